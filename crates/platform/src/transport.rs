//! Outbound HTTP transport bound to the host's request primitive.

use crate::host::HttpClient;
use crate::Result;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    /// Body-bearing read used to carry the user context.
    Report,
    Other(String),
}

impl Method {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Report => "REPORT",
            Self::Other(name) => name,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: HashMap<String, String>,
    pub body: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
}

/// Request function handed to the SDK's HTTP layer.
///
/// Every call consumes the shared synchronous-flush flag: the flag is read and
/// cleared before the returned future exists, so two calls never observe the
/// same `true`.
#[derive(Clone)]
pub struct Transport {
    client: Arc<dyn HttpClient>,
    flush_synchronously: Arc<AtomicBool>,
}

impl Transport {
    pub(crate) fn new(client: Arc<dyn HttpClient>, flush_synchronously: Arc<AtomicBool>) -> Self {
        Self {
            client,
            flush_synchronously,
        }
    }

    pub fn send(
        &self,
        method: Method,
        url: &str,
        headers: HashMap<String, String>,
        body: Option<String>,
    ) -> impl Future<Output = Result<HttpResponse>> + Send + 'static {
        let synchronous = self.flush_synchronously.swap(false, Ordering::SeqCst);
        let request = HttpRequest {
            method,
            url: url.to_string(),
            headers,
            body,
        };
        if synchronous {
            debug!("Dispatching {} {} synchronously", request.method, request.url);
        }

        let client = Arc::clone(&self.client);
        async move { client.send(request, synchronous).await }
    }
}

impl fmt::Debug for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transport")
            .field(
                "flush_synchronously",
                &self.flush_synchronously.load(Ordering::SeqCst),
            )
            .finish_non_exhaustive()
    }
}
