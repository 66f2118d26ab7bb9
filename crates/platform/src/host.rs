//! Host environment primitives consulted during capability resolution.
//!
//! Each field of [`HostEnvironment`] stands in for a browser global. An absent
//! primitive is `None` (or [`StorageSlot::Missing`]); the resolver never reaches
//! past this struct.

use crate::streaming::StreamOptions;
use crate::transport::{HttpRequest, HttpResponse};
use crate::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// HTTP request primitive (XMLHttpRequest-equivalent).
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Dispatch a request. `synchronous` asks for a blocking send.
    async fn send(&self, request: HttpRequest, synchronous: bool) -> Result<HttpResponse>;

    /// Construct one transport object for capability inspection.
    /// Must not call back into the capability descriptor.
    fn instantiate(&self) -> Box<dyn HttpProbe>;
}

/// A freshly constructed transport object.
pub trait HttpProbe {
    /// Whether the object carries the credentialed-request marker.
    fn has_credentials_marker(&self) -> bool;
}

/// Options a streaming implementation declares it honors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SupportedOptions {
    /// The request verb can be configured.
    pub method: bool,
}

/// Server-push stream constructor (EventSource-equivalent, or a polyfill).
pub trait StreamClient: Send + Sync {
    fn open(&self, url: &str, options: &StreamOptions) -> Box<dyn StreamHandle>;

    /// The native primitive declares nothing.
    fn supported_options(&self) -> SupportedOptions {
        SupportedOptions::default()
    }
}

/// Standard stream state constants; polyfills report the same values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ReadyState {
    Connecting = 0,
    Open = 1,
    Closed = 2,
}

/// An open stream owned by the caller.
pub trait StreamHandle: Send {
    fn ready_state(&self) -> ReadyState;
    fn close(&mut self);
}

/// Synchronous key/value storage primitive (Storage-equivalent).
pub trait StorageArea: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> Result<()>;
    fn remove_item(&self, key: &str) -> Result<()>;
}

/// Outcome of referencing a storage primitive.
#[derive(Clone, Default)]
pub enum StorageSlot {
    /// The primitive does not exist.
    #[default]
    Missing,
    Available(Arc<dyn StorageArea>),
    /// Referencing the primitive raised (feature administratively disabled).
    Denied(String),
}

impl fmt::Debug for StorageSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => f.write_str("Missing"),
            Self::Available(_) => f.write_str("Available"),
            Self::Denied(reason) => f.debug_tuple("Denied").field(reason).finish(),
        }
    }
}

/// Current page location.
pub trait Location: Send + Sync {
    fn href(&self) -> String;
}

/// The three places a "do not track" signal may live, in lookup order.
/// `None` means the property is undefined.
pub trait PrivacySignals: Send + Sync {
    /// `navigator.doNotTrack`
    fn standard(&self) -> Option<Value>;
    /// `navigator.msDoNotTrack`
    fn vendor_prefixed(&self) -> Option<Value>;
    /// `window.doNotTrack`
    fn global(&self) -> Option<Value>;
}

#[derive(Clone)]
pub struct HostEnvironment {
    pub http_client: Option<Arc<dyn HttpClient>>,
    pub stream_client: Option<Arc<dyn StreamClient>>,
    pub stream_polyfill: Option<Arc<dyn StreamClient>>,
    pub session_storage: StorageSlot,
    pub durable_storage: StorageSlot,
    pub location: Arc<dyn Location>,
    pub privacy: Arc<dyn PrivacySignals>,
}

impl HostEnvironment {
    /// A host with only page state; every optional primitive is absent.
    pub fn new(location: Arc<dyn Location>, privacy: Arc<dyn PrivacySignals>) -> Self {
        Self {
            http_client: None,
            stream_client: None,
            stream_polyfill: None,
            session_storage: StorageSlot::Missing,
            durable_storage: StorageSlot::Missing,
            location,
            privacy,
        }
    }

    pub fn with_http_client(mut self, client: Arc<dyn HttpClient>) -> Self {
        self.http_client = Some(client);
        self
    }

    pub fn with_stream_client(mut self, client: Arc<dyn StreamClient>) -> Self {
        self.stream_client = Some(client);
        self
    }

    pub fn with_stream_polyfill(mut self, polyfill: Arc<dyn StreamClient>) -> Self {
        self.stream_polyfill = Some(polyfill);
        self
    }

    pub fn with_session_storage(mut self, slot: StorageSlot) -> Self {
        self.session_storage = slot;
        self
    }

    pub fn with_durable_storage(mut self, slot: StorageSlot) -> Self {
        self.durable_storage = slot;
        self
    }
}

impl fmt::Debug for HostEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostEnvironment")
            .field("http_client", &self.http_client.is_some())
            .field("stream_client", &self.stream_client.is_some())
            .field("stream_polyfill", &self.stream_polyfill.is_some())
            .field("session_storage", &self.session_storage)
            .field("durable_storage", &self.durable_storage)
            .finish_non_exhaustive()
    }
}
