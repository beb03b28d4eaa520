use super::soap::{self, Param};
use super::{client::RegistrarClient, models::*};
use crate::error::{Error, Result};
use async_trait::async_trait;
use log::debug;
use serde::de::DeserializeOwned;
use serde_json::Value;

pub const API_BASE_URL: &str = "https://soap.subreg.cz/cmd.php";

const LOGIN: &str = "Login";
const GET_DNS_ZONE: &str = "Get_DNS_Zone";
const ADD_DNS_RECORD: &str = "Add_DNS_Record";
const MODIFY_DNS_RECORD: &str = "Modify_DNS_Record";

/// subreg.cz SOAP client. Every command is one envelope posted to the
/// endpoint, answered with an [`ApiResponse`] container.
pub struct SubregClient {
    client: reqwest::Client,
    endpoint: String,
}

#[async_trait]
impl RegistrarClient for SubregClient {
    async fn authenticate(&self, username: &str, password: &str) -> Result<Session> {
        let data: LoginData = self
            .call_data(
                LOGIN,
                &[
                    ("login", Param::Text(username)),
                    ("password", Param::Text(password)),
                ],
            )
            .await?;

        Ok(Session::new(data.ssid))
    }

    async fn fetch_zone_records(&self, session: &Session, domain: &str) -> Result<Vec<DnsRecord>> {
        let zone: ZoneData = self
            .call_data(
                GET_DNS_ZONE,
                &[
                    ("ssid", Param::Text(session.as_str())),
                    ("domain", Param::Text(domain)),
                ],
            )
            .await?;

        debug!("Zone {} has {} records", domain, zone.records.len());
        Ok(zone.records)
    }

    async fn add_record(
        &self,
        session: &Session,
        domain: &str,
        record: &DnsRecord,
    ) -> Result<ApiResponse<Value>> {
        // The registrar assigns the id.
        let record = DnsRecord {
            id: None,
            ..record.clone()
        };

        self.call(
            ADD_DNS_RECORD,
            &[
                ("ssid", Param::Text(session.as_str())),
                ("domain", Param::Text(domain)),
                ("record", Param::Record(&record)),
            ],
        )
        .await
    }

    async fn modify_record(
        &self,
        session: &Session,
        domain: &str,
        record: &DnsRecord,
    ) -> Result<ApiResponse<Value>> {
        if record.id.is_none() {
            return Err(Error::MissingRecordId);
        }

        self.call(
            MODIFY_DNS_RECORD,
            &[
                ("ssid", Param::Text(session.as_str())),
                ("domain", Param::Text(domain)),
                ("record", Param::Record(record)),
            ],
        )
        .await
    }
}

impl SubregClient {
    pub fn new(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    async fn send(&self, command: &'static str, params: &[(&str, Param<'_>)]) -> Result<String> {
        debug!("Calling {}", command);
        let response = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "text/xml; charset=utf-8")
            .header("SOAPAction", soap::soap_action(command))
            .body(soap::build_request(command, params)?)
            .send()
            .await?;

        // Faults come back with HTTP 500 and are read from the body.
        Ok(response.text().await?)
    }

    async fn call<T: DeserializeOwned>(
        &self,
        command: &'static str,
        params: &[(&str, Param<'_>)],
    ) -> Result<ApiResponse<T>> {
        let text = self.send(command, params).await?;
        decode(command, &text)
    }

    async fn call_data<T: DeserializeOwned>(
        &self,
        command: &'static str,
        params: &[(&str, Param<'_>)],
    ) -> Result<T> {
        let text = self.send(command, params).await?;
        decode::<T>(command, &text)?
            .data
            .ok_or_else(|| Error::malformed(command, "missing data", text))
    }
}

/// Reads a SOAP response. The status is checked before the payload is
/// decoded, so `status: error` always becomes [`Error::RemoteApi`].
pub fn decode<T: DeserializeOwned>(command: &'static str, text: &str) -> Result<ApiResponse<T>> {
    let container = soap::parse_response(command, text)?;
    let envelope: ApiResponse<Value> =
        serde_json::from_value(container).map_err(|e| Error::malformed(command, e, text))?;

    if !envelope.is_ok() {
        return Err(Error::remote_api(command, envelope.error_message()));
    }

    let data = envelope
        .data
        .map(serde_json::from_value::<T>)
        .transpose()
        .map_err(|e| Error::malformed(command, e, text))?;

    Ok(ApiResponse {
        status: envelope.status,
        data,
        error: envelope.error,
    })
}
