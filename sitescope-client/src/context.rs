use std::time::Duration;

use url::Url;

/// Connection configuration for a [`crate::SiteClient`].
///
/// Passed explicitly into the client constructor; nothing process-global is
/// bound, so two clients can target two sites in the same process.
#[derive(Debug, Clone)]
pub struct SiteContext {
    /// Root URL of the target site, e.g. `https://tenant.example/sites/hr`.
    pub base_url: Url,
    /// Opaque bearer token handed through as-is. `None` relies on whatever
    /// ambient session the transport provides; no auth logic lives here.
    pub auth_token: Option<String>,
    /// Per-request timeout applied to the underlying HTTP client.
    pub timeout: Duration,
}

impl SiteContext {
    /// Default request timeout when the environment does not set one.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            auth_token: None,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    pub fn with_auth_token(mut self, token: Option<String>) -> Self {
        self.auth_token = token;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_style_setters_apply() {
        let url = Url::parse("https://tenant.example/sites/hr").unwrap();
        let ctx = SiteContext::new(url)
            .with_auth_token(Some("token".into()))
            .with_timeout(Duration::from_secs(5));
        assert_eq!(ctx.auth_token.as_deref(), Some("token"));
        assert_eq!(ctx.timeout, Duration::from_secs(5));
    }

    #[test]
    fn defaults_are_anonymous_with_thirty_second_timeout() {
        let url = Url::parse("https://tenant.example").unwrap();
        let ctx = SiteContext::new(url);
        assert!(ctx.auth_token.is_none());
        assert_eq!(ctx.timeout, SiteContext::DEFAULT_TIMEOUT);
    }
}
