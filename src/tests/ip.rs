use crate::error::{Error, TransportError};
use crate::ip::{HttpIpResolver, IpResolver};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_current_ip_is_trimmed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("  203.0.113.7\n"))
        .expect(1)
        .mount(&server)
        .await;

    let resolver = HttpIpResolver::new(reqwest::Client::new(), server.uri());

    assert_eq!(resolver.current_ip().await.unwrap(), "203.0.113.7");
}

#[tokio::test]
async fn test_body_is_not_validated() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not-an-ip"))
        .mount(&server)
        .await;

    let resolver = HttpIpResolver::new(reqwest::Client::new(), server.uri());

    assert_eq!(resolver.current_ip().await.unwrap(), "not-an-ip");
}

#[tokio::test]
async fn test_server_error_is_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let resolver = HttpIpResolver::new(reqwest::Client::new(), server.uri());
    let err = resolver.current_ip().await.unwrap_err();

    assert!(matches!(err, Error::Transport(TransportError::Http(_))));
}
