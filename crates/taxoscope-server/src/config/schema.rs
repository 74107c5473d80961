use std::net::SocketAddr;

use serde::Deserialize;
use taxoscope_core::error::{Result, TaxoscopeError};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub source: SourceSection,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            version: 1,
            server: ServerSection::default(),
            source: SourceSection::default(),
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(TaxoscopeError::UnsupportedVersion);
        }

        self.server.validate()?;
        self.source.validate()?;

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr().map(|_| ())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|e| {
            TaxoscopeError::Config(format!("server.listen must be a valid socket address: {e}"))
        })
    }
}

/// Which stream source feeds the taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Newline-delimited envelopes over TCP.
    Tcp,
    /// Newline-delimited envelopes on standard input.
    Stdin,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceSection {
    #[serde(default = "default_source_kind")]
    pub kind: SourceKind,

    /// `host:port` of the stream endpoint (tcp only).
    #[serde(default)]
    pub address: String,

    #[serde(default = "default_subscription_id")]
    pub subscription_id: String,

    #[serde(default)]
    pub access_token: String,

    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

impl Default for SourceSection {
    fn default() -> Self {
        Self {
            kind: default_source_kind(),
            address: String::new(),
            subscription_id: default_subscription_id(),
            access_token: String::new(),
            channel_capacity: default_channel_capacity(),
        }
    }
}

impl SourceSection {
    pub fn validate(&self) -> Result<()> {
        if self.kind == SourceKind::Tcp && self.address.trim().is_empty() {
            return Err(TaxoscopeError::Config(
                "source.address is required for tcp sources".into(),
            ));
        }
        if self.subscription_id.trim().is_empty() {
            return Err(TaxoscopeError::Config(
                "source.subscription_id must not be empty".into(),
            ));
        }
        if !(1..=65536).contains(&self.channel_capacity) {
            return Err(TaxoscopeError::Config(
                "source.channel_capacity must be between 1 and 65536".into(),
            ));
        }
        Ok(())
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}
fn default_source_kind() -> SourceKind {
    SourceKind::Tcp
}
fn default_subscription_id() -> String {
    "firehose-a".into()
}
fn default_channel_capacity() -> usize {
    1024
}
