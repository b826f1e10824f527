use super::errors::InfraError;
use crate::domain::ContactRegistry;
use serde::Serialize;

#[derive(Serialize)]
struct ReportRow<'a> {
    id: &'a str,
    name: &'a str,
    balance: f64,
    standing: &'static str,
}

/// One-way CSV report of the current balances.
pub struct BalanceReport;

impl BalanceReport {
    pub fn export_to_csv(registry: &ContactRegistry, filename: &str) -> Result<String, InfraError> {
        let mut writer = csv::Writer::from_path(filename)?;
        for contact in registry.contacts() {
            writer.serialize(ReportRow {
                id: contact.id.as_str(),
                name: &contact.name,
                balance: contact.balance,
                standing: contact.standing().label(),
            })?;
        }
        writer.flush().map_err(|e| InfraError::io(filename, e))?;
        tracing::info!(filename, rows = registry.len(), "exported balance report");
        Ok(filename.to_string())
    }
}
