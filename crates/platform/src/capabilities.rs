//! The capability descriptor handed to the rest of the SDK.
//!
//! Resolution probes four independent capability groups (transport,
//! streaming, storage, page state). A missing or denied primitive only
//! removes its own capability; resolution itself cannot fail.

use crate::config::PlatformConfig;
use crate::credentials::CredentialProbe;
use crate::host::{HostEnvironment, HttpClient, PrivacySignals, StreamHandle};
use crate::location::UrlProvider;
use crate::privacy::resolve_do_not_track;
use crate::storage::PlatformStorage;
use crate::streaming::StreamFactory;
use crate::transport::Transport;
use crate::CLIENT_IDENTIFIER;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

pub struct PlatformCapabilities {
    http_client: Option<Arc<dyn HttpClient>>,
    transport: Option<Transport>,
    credentials: CredentialProbe,
    url: UrlProvider,
    privacy: Arc<dyn PrivacySignals>,
    storage: Option<PlatformStorage>,
    streaming: Option<StreamFactory>,
    flush_synchronously: Arc<AtomicBool>,
}

impl PlatformCapabilities {
    pub fn resolve(config: &PlatformConfig, host: &HostEnvironment) -> Self {
        let flush_synchronously = Arc::new(AtomicBool::new(false));

        let transport = host
            .http_client
            .as_ref()
            .map(|client| Transport::new(Arc::clone(client), Arc::clone(&flush_synchronously)));

        let storage = PlatformStorage::select(
            config.persistence(),
            &host.session_storage,
            &host.durable_storage,
        );

        let streaming = StreamFactory::select(
            config.use_report,
            host.stream_client.as_ref(),
            host.stream_polyfill.as_ref(),
        );

        let capabilities = Self {
            http_client: host.http_client.clone(),
            transport,
            credentials: CredentialProbe::new(),
            url: UrlProvider::new(
                Arc::clone(&host.location),
                config.event_url_transformer.clone(),
            ),
            privacy: Arc::clone(&host.privacy),
            storage,
            streaming,
            flush_synchronously,
        };

        info!(
            "Platform resolved: http={}, storage={}, streaming={:?}",
            capabilities.can_send_http(),
            capabilities
                .storage
                .as_ref()
                .map(|storage| storage.scope().as_str())
                .unwrap_or("disabled"),
            capabilities.streaming.as_ref().map(StreamFactory::strategy),
        );
        capabilities
    }

    pub fn can_send_http(&self) -> bool {
        self.transport.is_some()
    }

    /// `None` when the host has no request primitive.
    pub fn http(&self) -> Option<&Transport> {
        self.transport.as_ref()
    }

    /// Probed on first call, cached afterwards.
    pub fn http_allows_credentials(&self) -> bool {
        self.credentials.resolve(self.http_client.as_deref())
    }

    pub fn current_url(&self) -> String {
        self.url.current_url()
    }

    pub fn is_do_not_track(&self) -> bool {
        resolve_do_not_track(self.privacy.as_ref())
    }

    /// `None` when storage is missing or denied.
    pub fn storage(&self) -> Option<&PlatformStorage> {
        self.storage.as_ref()
    }

    /// `None` when no stream primitive of any kind exists.
    pub fn stream_factory(&self) -> Option<&StreamFactory> {
        self.streaming.as_ref()
    }

    pub fn streaming_uses_non_standard_verb(&self) -> bool {
        self.streaming
            .as_ref()
            .map(StreamFactory::uses_non_standard_verb)
            .unwrap_or(false)
    }

    pub fn stream_is_open_or_connecting(&self, handle: &dyn StreamHandle) -> Option<bool> {
        self.streaming
            .as_ref()
            .map(|_| StreamFactory::is_open_or_connecting(handle))
    }

    /// Ask for the next single outbound request to be sent synchronously.
    pub fn request_synchronous_flush(&self) {
        self.set_flush_synchronous(true);
    }

    pub fn set_flush_synchronous(&self, synchronous: bool) {
        self.flush_synchronously.store(synchronous, Ordering::SeqCst);
    }

    pub fn flush_is_synchronous(&self) -> bool {
        self.flush_synchronously.load(Ordering::SeqCst)
    }

    pub fn client_identifier(&self) -> &'static str {
        CLIENT_IDENTIFIER
    }
}

impl fmt::Debug for PlatformCapabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlatformCapabilities")
            .field("can_send_http", &self.can_send_http())
            .field("credentials", &self.credentials.state())
            .field("storage", &self.storage)
            .field("streaming", &self.streaming)
            .field("flush_is_synchronous", &self.flush_is_synchronous())
            .field("client_identifier", &CLIENT_IDENTIFIER)
            .finish_non_exhaustive()
    }
}
