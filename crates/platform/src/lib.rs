//! Browser platform abstraction for the client-side flag SDK.
//! Probes an injected host environment once and exposes a single capability
//! descriptor (transport, streaming, storage, privacy signal, page URL).
//!
//! Do NOT read ambient globals here. Every host primitive arrives through
//! [`HostEnvironment`].

use thiserror::Error;

pub mod capabilities;
pub mod config;
pub mod credentials;
pub mod host;
pub mod location;
pub mod memory;
pub mod privacy;
pub mod storage;
pub mod streaming;
pub mod transport;

pub use capabilities::PlatformCapabilities;
pub use config::{PersistenceScope, PlatformConfig, UrlTransformer};
pub use host::{
    HostEnvironment, HttpClient, HttpProbe, Location, PrivacySignals, ReadyState, StorageArea,
    StorageSlot, StreamClient, StreamHandle, SupportedOptions,
};
pub use storage::PlatformStorage;
pub use streaming::{StreamFactory, StreamOptions, StreamStrategy};
pub use transport::{HttpRequest, HttpResponse, Method, Transport};

/// Environment tag reported to the flag service.
pub const CLIENT_IDENTIFIER: &str = "JSClient";

/// Platform-specific errors
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, PlatformError>;
