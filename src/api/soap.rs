//! SOAP framing for the subreg.cz API.
//!
//! Requests are document/literal envelopes. Responses are read into a
//! small element tree and converted to JSON so the envelope and payload
//! structs in `models` deserialize the same way for every command.

use super::models::DnsRecord;
use crate::error::{Error, Result};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use serde_json::{Map, Value};

pub const SOAP_NAMESPACE: &str = "http://soap.subreg.cz/soap";
const ENVELOPE_NAMESPACE: &str = "http://schemas.xmlsoap.org/soap/envelope/";

/// One child of the command element.
pub enum Param<'a> {
    Text(&'a str),
    Record(&'a DnsRecord),
}

pub fn soap_action(command: &str) -> String {
    format!("{}#{}", SOAP_NAMESPACE, command)
}

pub fn build_request(command: &'static str, params: &[(&str, Param<'_>)]) -> Result<String> {
    let mut writer = Writer::new(Vec::new());
    let command_tag = format!("sub:{}", command);

    let mut events = vec![
        Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)),
        Event::Start(BytesStart::new("soapenv:Envelope").with_attributes([
            ("xmlns:soapenv", ENVELOPE_NAMESPACE),
            ("xmlns:sub", SOAP_NAMESPACE),
        ])),
        Event::Start(BytesStart::new("soapenv:Body")),
        Event::Start(BytesStart::new(command_tag.as_str())),
    ];

    for (name, param) in params {
        match param {
            Param::Text(value) => push_field(&mut events, name, value),
            Param::Record(record) => {
                events.push(Event::Start(BytesStart::new(*name)));
                if let Some(id) = &record.id {
                    push_field(&mut events, "id", &id.to_string());
                }
                push_field(&mut events, "name", &record.name);
                push_field(&mut events, "type", &record.r#type);
                push_field(&mut events, "content", &record.content);
                push_field(&mut events, "prio", &record.prio.to_string());
                push_field(&mut events, "ttl", &record.ttl.to_string());
                events.push(Event::End(BytesEnd::new(*name)));
            }
        }
    }

    events.push(Event::End(BytesEnd::new(command_tag.as_str())));
    events.push(Event::End(BytesEnd::new("soapenv:Body")));
    events.push(Event::End(BytesEnd::new("soapenv:Envelope")));

    for event in events {
        writer
            .write_event(event)
            .map_err(|e| Error::malformed(command, e, ""))?;
    }

    String::from_utf8(writer.into_inner()).map_err(|e| Error::malformed(command, e, ""))
}

fn push_field<'a>(events: &mut Vec<Event<'a>>, name: &'a str, value: &str) {
    events.push(Event::Start(BytesStart::new(name)));
    events.push(Event::Text(BytesText::new(value).into_owned()));
    events.push(Event::End(BytesEnd::new(name)));
}

#[derive(Debug, Default)]
struct Element {
    name: String,
    text: String,
    children: Vec<Element>,
}

impl Element {
    fn named(name: &[u8]) -> Self {
        Self {
            name: String::from_utf8_lossy(name).into_owned(),
            ..Default::default()
        }
    }

    fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|child| child.name == name)
    }

    fn into_child(self, name: &str) -> Option<Element> {
        self.children.into_iter().find(|child| child.name == name)
    }
}

fn parse_tree(command: &'static str, text: &str) -> Result<Element> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);

    let mut stack = vec![Element::default()];
    loop {
        let event = reader
            .read_event()
            .map_err(|e| Error::malformed(command, e, text))?;

        match event {
            Event::Start(e) => stack.push(Element::named(e.local_name().as_ref())),
            Event::Empty(e) => {
                let element = Element::named(e.local_name().as_ref());
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(element);
                }
            }
            Event::Text(t) => {
                let value = t.unescape().map_err(|e| Error::malformed(command, e, text))?;
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&value);
                }
            }
            Event::CData(c) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&String::from_utf8_lossy(&c));
                }
            }
            Event::End(_) => {
                let element = stack.pop();
                match (element, stack.last_mut()) {
                    (Some(element), Some(parent)) => parent.children.push(element),
                    _ => return Err(Error::malformed(command, "unbalanced tags", text)),
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    match (stack.pop(), stack.is_empty()) {
        (Some(root), true) => Ok(root),
        _ => Err(Error::malformed(command, "unclosed tags", text)),
    }
}

/// Empty elements (including `xsi:nil`) are treated as absent.
fn to_value(element: Element) -> Option<Value> {
    if element.children.is_empty() {
        return (!element.text.is_empty()).then(|| Value::String(element.text));
    }

    // SOAP-ENC arrays list their members as `<item>`
    if element.children.iter().all(|child| child.name == "item") {
        let items: Vec<Value> = element.children.into_iter().filter_map(to_value).collect();
        return Some(key_value_map(items));
    }

    let mut map = Map::new();
    for child in element.children {
        let name = child.name.clone();
        let Some(value) = to_value(child) else {
            continue;
        };
        match map.get_mut(&name) {
            Some(Value::Array(values)) => values.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
            None => {
                map.insert(name, value);
            }
        }
    }
    Some(Value::Object(map))
}

/// PHP's encoding of associative arrays: `<item><key>k</key><value>v</value></item>`.
fn key_value_map(items: Vec<Value>) -> Value {
    let is_map = !items.is_empty()
        && items.iter().all(|item| {
            item.as_object()
                .is_some_and(|o| o.contains_key("key") && o.keys().all(|k| k == "key" || k == "value"))
        });
    if !is_map {
        return Value::Array(items);
    }

    let mut map = Map::new();
    for item in items {
        if let Value::Object(mut entry) = item {
            if let Some(Value::String(key)) = entry.remove("key") {
                map.insert(key, entry.remove("value").unwrap_or(Value::Null));
            }
        }
    }
    Value::Object(map)
}

/// Extracts the command's response container as JSON. A SOAP fault is
/// reported as [`Error::RemoteApi`] with the fault string.
pub fn parse_response(command: &'static str, text: &str) -> Result<Value> {
    let body = parse_tree(command, text)?
        .into_child("Envelope")
        .and_then(|envelope| envelope.into_child("Body"))
        .ok_or_else(|| Error::malformed(command, "no SOAP body", text))?;

    let wrapper = body
        .children
        .into_iter()
        .next()
        .ok_or_else(|| Error::malformed(command, "empty SOAP body", text))?;

    if wrapper.name == "Fault" {
        let message = wrapper
            .child("faultstring")
            .map(|f| f.text.clone())
            .unwrap_or_default();
        return Err(Error::remote_api(command, message));
    }

    let container = if wrapper.child("response").is_some() {
        wrapper.into_child("response").unwrap_or_default()
    } else {
        wrapper
    };

    to_value(container).ok_or_else(|| Error::malformed(command, "empty response", text))
}
