//! Streaming transport selection.
//!
//! Built-in stream primitives only speak GET with a URL, which cannot carry a
//! large or sensitive user context. When the body-bearing verb is requested
//! and a polyfill declares that its verb is configurable, the polyfill opens a
//! per-user stream. Otherwise the standard primitive is bound and callers must
//! fall back to the broadcast stream plus a separate fetch.

use crate::host::{ReadyState, StreamClient, StreamHandle, SupportedOptions};
use crate::transport::Method;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Heartbeat and silent timeout applied when the caller sets none.
pub const DEFAULT_STREAM_TIMEOUT: Duration = Duration::from_millis(300_000);

/// Stream construction options. `None` fields fall back to the factory
/// defaults; polyfills ignore what they do not understand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamOptions {
    pub heartbeat_timeout: Option<Duration>,
    pub silent_timeout: Option<Duration>,
    /// Suppress the default `Cache-Control` header that breaks CORS preflight.
    pub skip_default_headers: Option<bool>,
    pub method: Option<Method>,
    pub body: Option<String>,
    pub headers: HashMap<String, String>,
}

impl StreamOptions {
    pub fn factory_defaults() -> Self {
        Self {
            heartbeat_timeout: Some(DEFAULT_STREAM_TIMEOUT),
            silent_timeout: Some(DEFAULT_STREAM_TIMEOUT),
            skip_default_headers: Some(true),
            ..Default::default()
        }
    }

    /// Lay `self` over `defaults`; any value set on `self` wins.
    pub fn over(self, defaults: StreamOptions) -> Self {
        let mut headers = defaults.headers;
        headers.extend(self.headers);
        Self {
            heartbeat_timeout: self.heartbeat_timeout.or(defaults.heartbeat_timeout),
            silent_timeout: self.silent_timeout.or(defaults.silent_timeout),
            skip_default_headers: self.skip_default_headers.or(defaults.skip_default_headers),
            method: self.method.or(defaults.method),
            body: self.body.or(defaults.body),
            headers,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamStrategy {
    /// Polyfill configured for the body-bearing verb.
    NonStandardVerb,
    /// Standard primitive.
    Native,
    /// Polyfill standing in for an absent standard primitive, GET only.
    Substitute,
}

/// Decision table over which primitives exist. `None` means no stream at all.
pub fn select_stream_strategy(
    use_report: bool,
    has_native: bool,
    polyfill: Option<SupportedOptions>,
) -> Option<StreamStrategy> {
    let polyfill_configurable = polyfill.map(|options| options.method).unwrap_or(false);
    match (use_report && polyfill_configurable, has_native, polyfill.is_some()) {
        (true, _, _) => Some(StreamStrategy::NonStandardVerb),
        (false, true, _) => Some(StreamStrategy::Native),
        (false, false, true) => Some(StreamStrategy::Substitute),
        (false, false, false) => None,
    }
}

/// Stream constructor bound at resolution time.
#[derive(Clone)]
pub struct StreamFactory {
    strategy: StreamStrategy,
    client: Arc<dyn StreamClient>,
}

impl StreamFactory {
    pub fn select(
        use_report: bool,
        native: Option<&Arc<dyn StreamClient>>,
        polyfill: Option<&Arc<dyn StreamClient>>,
    ) -> Option<Self> {
        let strategy = select_stream_strategy(
            use_report,
            native.is_some(),
            polyfill.map(|client| client.supported_options()),
        )?;

        let client = match strategy {
            StreamStrategy::Native => native,
            StreamStrategy::NonStandardVerb | StreamStrategy::Substitute => polyfill,
        }?;

        if use_report && strategy != StreamStrategy::NonStandardVerb {
            debug!("No verb-configurable stream polyfill; per-user stream falls back to broadcast");
        }
        debug!("Stream strategy selected: {:?}", strategy);

        Some(Self {
            strategy,
            client: Arc::clone(client),
        })
    }

    pub fn strategy(&self) -> StreamStrategy {
        self.strategy
    }

    pub fn uses_non_standard_verb(&self) -> bool {
        self.strategy == StreamStrategy::NonStandardVerb
    }

    /// Defaults this factory lays under caller options.
    pub fn defaults(&self) -> StreamOptions {
        let mut defaults = StreamOptions::factory_defaults();
        if self.uses_non_standard_verb() {
            defaults.method = Some(Method::Report);
        }
        defaults
    }

    pub fn open(&self, url: &str, options: StreamOptions) -> Box<dyn StreamHandle> {
        let options = options.over(self.defaults());
        self.client.open(url, &options)
    }

    /// Compared against the standard constants whichever client opened it.
    pub fn is_open_or_connecting(handle: &dyn StreamHandle) -> bool {
        matches!(handle.ready_state(), ReadyState::Open | ReadyState::Connecting)
    }
}

impl fmt::Debug for StreamFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamFactory")
            .field("strategy", &self.strategy)
            .finish_non_exhaustive()
    }
}
