//! Current page URL, optionally rewritten by a user transform.

use crate::config::UrlTransformer;
use crate::host::Location;
use std::fmt;
use std::sync::Arc;

/// Reads the host location on every call so in-page navigation is reflected.
#[derive(Clone)]
pub struct UrlProvider {
    location: Arc<dyn Location>,
    transformer: Option<UrlTransformer>,
}

impl UrlProvider {
    pub fn new(location: Arc<dyn Location>, transformer: Option<UrlTransformer>) -> Self {
        Self {
            location,
            transformer,
        }
    }

    pub fn current_url(&self) -> String {
        let href = self.location.href();
        match &self.transformer {
            Some(transform) => transform(&href),
            None => href,
        }
    }
}

impl fmt::Debug for UrlProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UrlProvider")
            .field("transformed", &self.transformer.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::StaticLocation;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn raw_location_without_transform() {
        let location = Arc::new(StaticLocation::new("https://example.com/a"));
        let provider = UrlProvider::new(location.clone(), None);
        assert_eq!(provider.current_url(), "https://example.com/a");

        location.navigate("https://example.com/b");
        assert_eq!(provider.current_url(), "https://example.com/b");
    }

    #[test]
    fn transform_applied_once_per_call() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let transformer: UrlTransformer = Arc::new(move |href: &str| {
            counter.fetch_add(1, Ordering::SeqCst);
            href.split('?').next().unwrap_or(href).to_string()
        });
        let location = Arc::new(StaticLocation::new("https://example.com/p?token=secret"));
        let provider = UrlProvider::new(location.clone(), Some(transformer));

        assert_eq!(provider.current_url(), "https://example.com/p");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(provider.current_url(), "https://example.com/p");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(location.href(), "https://example.com/p?token=secret");
    }
}
