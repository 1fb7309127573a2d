//! Typed view over the `site.*` and `email.*` settings namespace of the
//! memory store. The core owns only the key mapping and validation; any
//! editing surface (web form, CLI) lives outside.

use serde_json::Value;
use thiserror::Error;

use crate::memory::error::MemorySystemError;
use crate::memory::store::MemoryStore;

/// A settings validation violation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("site name is required")]
    MissingSiteName,
    #[error("default e-mail transport is required")]
    MissingTransport,
    #[error("unknown e-mail transport '{0}' (expected mail, smtp, or sendmail)")]
    UnknownTransport(String),
    #[error("SMTP port '{0}' is not numeric")]
    InvalidSmtpPort(String),
}

/// Platform settings stored as flat keys in the memory store
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub site_name: String,
    pub site_description: String,
    pub site_web_upgrade: bool,
    pub email_default: String,
    pub email_smtp_host: String,
    pub email_smtp_port: String,
    pub email_smtp_username: String,
    pub email_smtp_password: String,
    pub email_smtp_encryption: String,
    pub email_sendmail_command: String,
}

const TRANSPORTS: [&str; 3] = ["mail", "smtp", "sendmail"];

fn get_string(memory: &dyn MemoryStore, path: &str) -> String {
    match memory.get(path) {
        Some(Value::String(s)) => s,
        _ => String::new(),
    }
}

impl Settings {
    /// Read settings from the memory store; absent keys become defaults
    pub fn load(memory: &dyn MemoryStore) -> Self {
        Self {
            site_name: get_string(memory, "site.name"),
            site_description: get_string(memory, "site.description"),
            site_web_upgrade: memory
                .get("site.web_upgrade")
                .and_then(|v| v.as_bool())
                .unwrap_or(false),
            email_default: get_string(memory, "email.default"),
            email_smtp_host: get_string(memory, "email.transports.smtp.host"),
            email_smtp_port: get_string(memory, "email.transports.smtp.port"),
            email_smtp_username: get_string(memory, "email.transports.smtp.username"),
            email_smtp_password: get_string(memory, "email.transports.smtp.password"),
            email_smtp_encryption: get_string(memory, "email.transports.smtp.encryption"),
            email_sendmail_command: get_string(memory, "email.transports.sendmail.command"),
        }
    }

    /// Write settings back as flat keys
    pub fn store(&self, memory: &mut dyn MemoryStore) -> Result<(), MemorySystemError> {
        memory.put("site.name", Value::String(self.site_name.clone()))?;
        memory.put(
            "site.description",
            Value::String(self.site_description.clone()),
        )?;
        memory.put("site.web_upgrade", Value::Bool(self.site_web_upgrade))?;
        memory.put("email.default", Value::String(self.email_default.clone()))?;
        memory.put(
            "email.transports.smtp.host",
            Value::String(self.email_smtp_host.clone()),
        )?;
        memory.put(
            "email.transports.smtp.port",
            Value::String(self.email_smtp_port.clone()),
        )?;
        memory.put(
            "email.transports.smtp.username",
            Value::String(self.email_smtp_username.clone()),
        )?;
        memory.put(
            "email.transports.smtp.password",
            Value::String(self.email_smtp_password.clone()),
        )?;
        memory.put(
            "email.transports.smtp.encryption",
            Value::String(self.email_smtp_encryption.clone()),
        )?;
        memory.put(
            "email.transports.sendmail.command",
            Value::String(self.email_sendmail_command.clone()),
        )?;
        Ok(())
    }

    /// Validate the settings. Returns every violation found; an empty list
    /// means valid.
    pub fn validate(&self) -> Vec<SettingsError> {
        let mut errors = Vec::new();

        if self.site_name.trim().is_empty() {
            errors.push(SettingsError::MissingSiteName);
        }

        if self.email_default.is_empty() {
            errors.push(SettingsError::MissingTransport);
        } else if !TRANSPORTS.contains(&self.email_default.as_str()) {
            errors.push(SettingsError::UnknownTransport(self.email_default.clone()));
        }

        if !self.email_smtp_port.is_empty() && self.email_smtp_port.parse::<u32>().is_err() {
            errors.push(SettingsError::InvalidSmtpPort(self.email_smtp_port.clone()));
        }

        errors
    }
}
