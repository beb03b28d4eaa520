pub mod client;
pub mod models;
pub mod soap;
pub mod subreg;

pub use client::RegistrarClient;
pub use models::{DnsRecord, RecordId, Session};
pub use subreg::SubregClient;
