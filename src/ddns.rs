use crate::api::{DnsRecord, RecordId, RegistrarClient, Session};
use crate::config::RegistrarConfig;
use crate::error::{Error, Result};
use crate::ip::IpResolver;
use log::{debug, info, warn};
use std::fmt;

/// What a single run changed at the registrar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The record did not exist and was created with the current IP.
    Created { ip: String },
    /// The record pointed elsewhere and was modified.
    Updated { previous: Option<String>, ip: String },
    /// The record already held the current IP.
    Unchanged { ip: String },
}

impl fmt::Display for UpdateOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created { ip } => write!(f, "created with {}", ip),
            Self::Updated {
                previous: Some(previous),
                ip,
            } => write!(f, "updated {} -> {}", previous, ip),
            Self::Updated { previous: None, ip } => write!(f, "updated to {}", ip),
            Self::Unchanged { ip } => write!(f, "already up to date ({})", ip),
        }
    }
}

/// Last A record named `name` and how many such records the zone holds.
/// Duplicates resolve to the one listed last.
pub fn scan_address_records<'a>(
    records: &'a [DnsRecord],
    name: &str,
) -> (Option<&'a DnsRecord>, usize) {
    records
        .iter()
        .filter(|record| record.is_address() && record.name == name)
        .fold((None, 0), |(_, count), record| (Some(record), count + 1))
}

pub fn display_name(domain: &str, subdomain: &str) -> String {
    if subdomain.is_empty() {
        domain.to_string()
    } else {
        format!("{}.{}", subdomain, domain)
    }
}

pub struct Ddns<C, R> {
    client: C,
    resolver: R,
}

impl<C: RegistrarClient, R: IpResolver> Ddns<C, R> {
    pub fn new(client: C, resolver: R) -> Self {
        Self { client, resolver }
    }

    /// Id and content of the target record, or `(None, None)` if the zone
    /// has no such record yet.
    async fn get_record(
        &self,
        session: &Session,
        domain: &str,
        subdomain: &str,
    ) -> Result<(Option<RecordId>, Option<String>)> {
        let records = self.client.fetch_zone_records(session, domain).await?;

        let (found, matching) = scan_address_records(&records, subdomain);
        if matching > 1 {
            warn!(
                "{} A records named '{}' in {}, using the last one",
                matching, subdomain, domain
            );
        }

        Ok(match found {
            Some(record) => {
                if let Some(id) = &record.id {
                    debug!("Found record {} with content {}", id, record.content);
                }
                (record.id.clone(), Some(record.content.clone()))
            }
            None => (None, None),
        })
    }

    /// Creates or updates the configured A record to point at the current
    /// public IP. Every error is returned as-is; nothing is retried.
    pub async fn update_record(&self, config: &RegistrarConfig) -> Result<UpdateOutcome> {
        let domain = config.domain.as_str();
        let subdomain = config.subdomain.as_str();
        let name = display_name(domain, subdomain);

        let session = self
            .client
            .authenticate(&config.user, &config.password)
            .await?;
        debug!("Logged in as {}", config.user);

        let (mut record_id, mut old_ip) = self.get_record(&session, domain, subdomain).await?;

        let ip = self.resolver.current_ip().await?;
        info!("Current IP: {}", ip);

        let created = record_id.is_none();
        if created {
            info!("No A record for {}, creating it", name);
            let record = DnsRecord::address(None, subdomain, ip.as_str());
            self.client.add_record(&session, domain, &record).await?;

            (record_id, old_ip) = self.get_record(&session, domain, subdomain).await?;
            if record_id.is_none() {
                return Err(Error::RecordNotFound {
                    domain: domain.to_string(),
                    name: subdomain.to_string(),
                });
            }
        }

        if old_ip.as_deref() == Some(ip.as_str()) {
            return Ok(if created {
                UpdateOutcome::Created { ip }
            } else {
                UpdateOutcome::Unchanged { ip }
            });
        }

        info!("Updating {} to {}", name, ip);
        let record = DnsRecord::address(record_id, subdomain, ip.as_str());
        self.client.modify_record(&session, domain, &record).await?;

        Ok(UpdateOutcome::Updated {
            previous: old_ip,
            ip,
        })
    }
}
