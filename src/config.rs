//! Process-boundary configuration for the pipeline.
//!
//! Values arrive as environment-style key/value pairs, optionally seeded
//! from a `.env` file. Parsing goes through an injectable lookup function so
//! it is testable without mutating process-global state.

use camino::Utf8PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::execution::services::{DEFAULT_TOOL_TIMEOUT, ToolSettings};

const RECIPIENT: &str = "COURIER_RECIPIENT";
const MAILBOX_HOST: &str = "COURIER_MAILBOX_HOST";
const MAILBOX_PORT: &str = "COURIER_MAILBOX_PORT";
const MAILBOX_USER: &str = "COURIER_MAILBOX_USER";
const MAILBOX_PASSWORD: &str = "COURIER_MAILBOX_PASSWORD";
const RELAY_HOST: &str = "COURIER_RELAY_HOST";
const RELAY_PORT: &str = "COURIER_RELAY_PORT";
const RELAY_USER: &str = "COURIER_RELAY_USER";
const RELAY_PASSWORD: &str = "COURIER_RELAY_PASSWORD";
const TOOL_PROGRAM: &str = "COURIER_TOOL_PROGRAM";
const TOOL_CREDENTIAL_VAR: &str = "COURIER_TOOL_CREDENTIAL_VAR";
const TOOL_CREDENTIAL: &str = "COURIER_TOOL_CREDENTIAL";
const STATE_ROOT: &str = "COURIER_STATE_ROOT";
const TOOL_TIMEOUT_SECS: &str = "COURIER_TOOL_TIMEOUT_SECS";

const DEFAULT_MAILBOX_PORT: u16 = 993;
const DEFAULT_RELAY_PORT: u16 = 465;
const DEFAULT_TOOL_CREDENTIAL_VAR: &str = "TOOL_API_KEY";
const DEFAULT_STATE_ROOT: &str = "state";

/// Errors raised while assembling the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A required key was not supplied.
    #[error("missing required configuration key {0}")]
    Missing(String),
    /// A supplied value could not be parsed.
    #[error("invalid value for configuration key {key}: {reason}")]
    Invalid {
        /// The offending key.
        key: String,
        /// Why the value was rejected.
        reason: String,
    },
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Credentials and endpoint of one mail transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    host: String,
    port: u16,
    username: String,
    password: String,
}

impl TransportConfig {
    /// Returns the endpoint host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the endpoint port.
    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }

    /// Returns the account username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the account password.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

/// Full configuration surface of one pipeline invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    recipient: String,
    mailbox: TransportConfig,
    relay: TransportConfig,
    tool_program: String,
    tool_credential_var: String,
    tool_credential: String,
    state_root: Utf8PathBuf,
    tool_timeout: Duration,
}

impl PipelineConfig {
    /// Loads the configuration from the process environment.
    ///
    /// A `.env` file in the working directory is honoured when present.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required key is missing or a value
    /// cannot be parsed.
    pub fn from_env() -> ConfigResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Assembles the configuration through an explicit lookup function.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required key is missing or a value
    /// cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ConfigResult<Self> {
        Ok(Self {
            recipient: require(&lookup, RECIPIENT)?,
            mailbox: TransportConfig {
                host: require(&lookup, MAILBOX_HOST)?,
                port: parse_port(&lookup, MAILBOX_PORT, DEFAULT_MAILBOX_PORT)?,
                username: require(&lookup, MAILBOX_USER)?,
                password: require(&lookup, MAILBOX_PASSWORD)?,
            },
            relay: TransportConfig {
                host: require(&lookup, RELAY_HOST)?,
                port: parse_port(&lookup, RELAY_PORT, DEFAULT_RELAY_PORT)?,
                username: require(&lookup, RELAY_USER)?,
                password: require(&lookup, RELAY_PASSWORD)?,
            },
            tool_program: require(&lookup, TOOL_PROGRAM)?,
            tool_credential_var: lookup(TOOL_CREDENTIAL_VAR)
                .unwrap_or_else(|| DEFAULT_TOOL_CREDENTIAL_VAR.to_owned()),
            tool_credential: require(&lookup, TOOL_CREDENTIAL)?,
            state_root: lookup(STATE_ROOT)
                .map_or_else(|| Utf8PathBuf::from(DEFAULT_STATE_ROOT), Utf8PathBuf::from),
            tool_timeout: parse_timeout(&lookup)?,
        })
    }

    /// Returns the notification recipient address.
    #[must_use]
    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    /// Returns the inbound mailbox transport settings.
    #[must_use]
    pub const fn mailbox(&self) -> &TransportConfig {
        &self.mailbox
    }

    /// Returns the outbound relay transport settings.
    #[must_use]
    pub const fn relay(&self) -> &TransportConfig {
        &self.relay
    }

    /// Returns the root directory for all persisted pipeline state.
    #[must_use]
    pub const fn state_root(&self) -> &Utf8PathBuf {
        &self.state_root
    }

    /// Builds the execution-stage tool settings.
    #[must_use]
    pub fn tool_settings(&self) -> ToolSettings {
        ToolSettings::new(
            &self.tool_program,
            &self.tool_credential_var,
            &self.tool_credential,
        )
        .with_timeout(self.tool_timeout)
    }
}

fn require(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> ConfigResult<String> {
    match lookup(key) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::Missing(key.to_owned())),
    }
}

fn parse_port(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: u16,
) -> ConfigResult<u16> {
    lookup(key).map_or(Ok(default), |value| {
        value.parse().map_err(|_| ConfigError::Invalid {
            key: key.to_owned(),
            reason: format!("{value} is not a port number"),
        })
    })
}

fn parse_timeout(lookup: &impl Fn(&str) -> Option<String>) -> ConfigResult<Duration> {
    lookup(TOOL_TIMEOUT_SECS).map_or(Ok(DEFAULT_TOOL_TIMEOUT), |value| {
        value
            .parse()
            .map(Duration::from_secs)
            .map_err(|_| ConfigError::Invalid {
                key: TOOL_TIMEOUT_SECS.to_owned(),
                reason: format!("{value} is not a whole number of seconds"),
            })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;

    fn full_environment() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            (RECIPIENT, "carol@example.com"),
            (MAILBOX_HOST, "imap.example.com"),
            (MAILBOX_USER, "bot@example.com"),
            (MAILBOX_PASSWORD, "mailbox-secret"),
            (RELAY_HOST, "smtp.example.com"),
            (RELAY_USER, "bot@example.com"),
            (RELAY_PASSWORD, "relay-secret"),
            (TOOL_PROGRAM, "codetool"),
            (TOOL_CREDENTIAL, "tool-secret"),
        ])
    }

    fn lookup_in(
        environment: HashMap<&'static str, &'static str>,
    ) -> impl Fn(&str) -> Option<String> {
        move |key| environment.get(key).map(ToString::to_string)
    }

    #[rstest]
    fn full_environment_parses_with_defaults() {
        let config = PipelineConfig::from_lookup(lookup_in(full_environment()))
            .expect("config should parse");

        assert_eq!(config.recipient(), "carol@example.com");
        assert_eq!(config.mailbox().port(), DEFAULT_MAILBOX_PORT);
        assert_eq!(config.relay().port(), DEFAULT_RELAY_PORT);
        assert_eq!(config.state_root(), &Utf8PathBuf::from("state"));
        assert_eq!(config.tool_settings().timeout(), DEFAULT_TOOL_TIMEOUT);
        assert_eq!(config.tool_settings().program(), "codetool");
    }

    #[rstest]
    fn missing_required_key_is_reported_by_name() {
        let mut environment = full_environment();
        environment.remove(RECIPIENT);

        let result = PipelineConfig::from_lookup(lookup_in(environment));

        assert_eq!(
            result,
            Err(ConfigError::Missing(RECIPIENT.to_owned()))
        );
    }

    #[rstest]
    fn blank_required_value_counts_as_missing() {
        let mut environment = full_environment();
        environment.insert(TOOL_CREDENTIAL, "   ");

        let result = PipelineConfig::from_lookup(lookup_in(environment));

        assert_eq!(
            result,
            Err(ConfigError::Missing(TOOL_CREDENTIAL.to_owned()))
        );
    }

    #[rstest]
    fn explicit_overrides_replace_the_defaults() {
        let mut environment = full_environment();
        environment.insert(MAILBOX_PORT, "143");
        environment.insert(TOOL_TIMEOUT_SECS, "60");
        environment.insert(STATE_ROOT, "/var/lib/courier");

        let config = PipelineConfig::from_lookup(lookup_in(environment))
            .expect("config should parse");

        assert_eq!(config.mailbox().port(), 143);
        assert_eq!(config.tool_settings().timeout(), Duration::from_secs(60));
        assert_eq!(config.state_root(), &Utf8PathBuf::from("/var/lib/courier"));
    }

    #[rstest]
    fn unparseable_port_is_rejected() {
        let mut environment = full_environment();
        environment.insert(RELAY_PORT, "not-a-port");

        let result = PipelineConfig::from_lookup(lookup_in(environment));

        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }
}
