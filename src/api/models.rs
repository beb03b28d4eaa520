use serde::{Deserialize, Deserializer};
use std::fmt;

pub const RECORD_TYPE_A: &str = "A";
pub const RECORD_PRIO: u32 = 0;
pub const RECORD_TTL: u32 = 900;

/// Session id handed out by `Login`, required by every other command.
#[derive(Clone, PartialEq, Eq)]
pub struct Session(String);

impl Session {
    pub fn new(ssid: impl Into<String>) -> Self {
        Self(ssid.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Session(<REDACTED>)")
    }
}

/// Registrar-assigned record id. The zone listing may send it as a number.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawRecordId")]
pub struct RecordId(String);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawRecordId {
    Number(u64),
    Text(String),
}

impl From<RawRecordId> for RecordId {
    fn from(raw: RawRecordId) -> Self {
        match raw {
            RawRecordId::Number(n) => Self(n.to_string()),
            RawRecordId::Text(s) => Self(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DnsRecord {
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(default)]
    pub name: String,
    pub r#type: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, deserialize_with = "number_or_string")]
    pub prio: u32,
    #[serde(default = "default_ttl", deserialize_with = "number_or_string")]
    pub ttl: u32,
}

fn default_ttl() -> u32 {
    RECORD_TTL
}

// SOAP carries every scalar as text
fn number_or_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u32),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// A list with one member arrives as a bare element rather than an array.
fn one_or_many<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<DnsRecord>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Many(Vec<DnsRecord>),
        One(DnsRecord),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Many(records) => records,
        Raw::One(record) => vec![record],
    })
}

impl DnsRecord {
    /// An A record with the fixed priority and TTL this updater writes.
    pub fn address(id: Option<RecordId>, name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            r#type: RECORD_TYPE_A.to_string(),
            content: content.into(),
            prio: RECORD_PRIO,
            ttl: RECORD_TTL,
        }
    }

    pub fn is_address(&self) -> bool {
        self.r#type == RECORD_TYPE_A
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Ok,
    Error,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub errormsg: String,
}

/// Envelope wrapping every registrar response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiResponse<T> {
    pub status: Status,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    #[serde(default)]
    pub error: Option<ApiErrorBody>,
}

impl<T> ApiResponse<T> {
    pub fn is_ok(&self) -> bool {
        self.status == Status::Ok
    }

    pub fn error_message(&self) -> &str {
        self.error
            .as_ref()
            .map(|e| e.errormsg.as_str())
            .filter(|m| !m.is_empty())
            .unwrap_or("unknown error")
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginData {
    pub ssid: String,
}

#[derive(Debug, Deserialize)]
pub struct ZoneData {
    #[serde(default, deserialize_with = "one_or_many")]
    pub records: Vec<DnsRecord>,
}
