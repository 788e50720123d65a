use crate::{ConfigError, ConfigErrorResult};

use serde::Deserialize;

/// Administrator allow-list.
///
/// Admins may create maintenance records for any car. This is a client-side
/// classification only; it does not restrict what the directory accepts.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AdminConfig {
    pub emails: Vec<String>,
}

impl AdminConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        for email in &self.emails {
            let email = email.trim();
            if email.is_empty() || !email.contains('@') {
                return Err(ConfigError::admin(format!(
                    "admin.emails entries must be email addresses, got '{}'",
                    email
                )));
            }
        }

        Ok(())
    }

    /// Trimmed, lowercased, de-duplicated entries.
    pub fn normalized_emails(&self) -> Vec<String> {
        let mut emails: Vec<String> = self
            .emails
            .iter()
            .map(|e| e.trim().to_lowercase())
            .filter(|e| !e.is_empty())
            .collect();
        emails.sort();
        emails.dedup();
        emails
    }

    /// Parse a comma separated list, as used by `MT_ADMIN_EMAILS`.
    pub(crate) fn parse_list(value: &str) -> Vec<String> {
        value
            .split(',')
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .map(String::from)
            .collect()
    }
}
