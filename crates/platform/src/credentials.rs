//! Lazily computed cross-origin credential support.
//!
//! Constructing a transport object can disturb constrained hosts (test
//! harnesses in particular), so the probe runs on first query only and the
//! answer is cached for the life of the descriptor.

use crate::host::HttpClient;
use std::sync::Mutex;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProbeState {
    #[default]
    Unset,
    Cached(bool),
}

#[derive(Debug, Default)]
pub struct CredentialProbe {
    state: Mutex<ProbeState>,
}

impl CredentialProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ProbeState {
        *self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Return the cached answer, probing `client` on the first call.
    pub fn resolve(&self, client: Option<&dyn HttpClient>) -> bool {
        let mut state = self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let ProbeState::Cached(supported) = *state {
            return supported;
        }

        let supported = match client {
            Some(client) => client.instantiate().has_credentials_marker(),
            None => false,
        };
        debug!("Cross-origin credential support probed: {}", supported);
        *state = ProbeState::Cached(supported);
        supported
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::HttpProbe;
    use crate::transport::{HttpRequest, HttpResponse};
    use crate::{PlatformError, Result};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingClient {
        marker: bool,
        instantiated: AtomicUsize,
    }

    struct Probe(bool);

    impl HttpProbe for Probe {
        fn has_credentials_marker(&self) -> bool {
            self.0
        }
    }

    #[async_trait]
    impl HttpClient for CountingClient {
        async fn send(&self, _request: HttpRequest, _synchronous: bool) -> Result<HttpResponse> {
            Err(PlatformError::Transport("not used".into()))
        }

        fn instantiate(&self) -> Box<dyn HttpProbe> {
            self.instantiated.fetch_add(1, Ordering::SeqCst);
            Box::new(Probe(self.marker))
        }
    }

    #[test]
    fn starts_unset() {
        assert_eq!(CredentialProbe::new().state(), ProbeState::Unset);
    }

    #[test]
    fn probes_once_and_caches() {
        let client = CountingClient {
            marker: true,
            instantiated: AtomicUsize::new(0),
        };
        let probe = CredentialProbe::new();

        assert!(probe.resolve(Some(&client)));
        assert!(probe.resolve(Some(&client)));
        assert_eq!(client.instantiated.load(Ordering::SeqCst), 1);
        assert_eq!(probe.state(), ProbeState::Cached(true));
    }

    #[test]
    fn missing_client_caches_false() {
        let probe = CredentialProbe::new();
        assert!(!probe.resolve(None));
        assert_eq!(probe.state(), ProbeState::Cached(false));

        // A later client does not reopen the question.
        let client = CountingClient {
            marker: true,
            instantiated: AtomicUsize::new(0),
        };
        assert!(!probe.resolve(Some(&client)));
        assert_eq!(client.instantiated.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn absent_marker_is_false() {
        let client = CountingClient {
            marker: false,
            instantiated: AtomicUsize::new(0),
        };
        let probe = CredentialProbe::new();
        assert!(!probe.resolve(Some(&client)));
    }
}
