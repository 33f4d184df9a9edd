//! Connection configuration loading.
//!
//! Values come from CLI flags first, then the environment (optionally seeded
//! from a `.env` file). The result is the explicit [`SiteContext`] the client
//! is constructed from.

pub mod error;

use std::{path::PathBuf, time::Duration};

use sitescope_client::SiteContext;
use url::Url;

pub use error::ConfigLoadError;

/// Environment variable naming the target site URL.
pub const ENV_SITE_URL: &str = "SITESCOPE_SITE_URL";
/// Environment variable carrying an opaque bearer token, passed through as-is.
pub const ENV_AUTH_TOKEN: &str = "SITESCOPE_AUTH_TOKEN";
/// Environment variable overriding the request timeout, in whole seconds.
pub const ENV_TIMEOUT_SECS: &str = "SITESCOPE_TIMEOUT_SECS";

/// CLI-provided overrides; each `None` falls back to the environment.
#[derive(Debug, Clone, Default)]
pub struct LoaderOptions {
    pub site: Option<String>,
    pub env_file: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
}

/// Load the connection context from flags, `.env`, and the environment.
pub fn load(opts: &LoaderOptions) -> Result<SiteContext, ConfigLoadError> {
    match &opts.env_file {
        Some(path) => {
            dotenvy::from_path(path)?;
        }
        None => {
            // A missing .env in the working directory is not an error.
            let _ = dotenvy::dotenv();
        }
    }
    from_env(opts, |key| std::env::var(key).ok())
}

/// Resolve the context against an arbitrary environment lookup. Split out so
/// tests can supply a map instead of mutating process environment.
pub fn from_env(
    opts: &LoaderOptions,
    env: impl Fn(&str) -> Option<String>,
) -> Result<SiteContext, ConfigLoadError> {
    let raw_url = opts
        .site
        .clone()
        .or_else(|| env(ENV_SITE_URL))
        .filter(|s| !s.trim().is_empty())
        .ok_or(ConfigLoadError::MissingSiteUrl)?;
    let base_url = parse_site_url(raw_url.trim())?;

    let auth_token = env(ENV_AUTH_TOKEN).filter(|t| !t.trim().is_empty());

    let timeout_secs = match opts.timeout_secs {
        Some(secs) => secs,
        None => match env(ENV_TIMEOUT_SECS) {
            Some(raw) => raw.trim().parse::<u64>().map_err(|source| {
                ConfigLoadError::InvalidTimeout { value: raw, source }
            })?,
            None => SiteContext::DEFAULT_TIMEOUT.as_secs(),
        },
    };

    Ok(SiteContext::new(base_url)
        .with_auth_token(auth_token)
        .with_timeout(Duration::from_secs(timeout_secs)))
}

fn parse_site_url(raw: &str) -> Result<Url, ConfigLoadError> {
    let url = Url::parse(raw).map_err(|source| {
        ConfigLoadError::InvalidSiteUrl {
            url: raw.to_string(),
            source,
        }
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(ConfigLoadError::UnsupportedScheme {
            scheme: scheme.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn lookup(
        map: &HashMap<String, String>,
    ) -> impl Fn(&str) -> Option<String> + '_ {
        move |key| map.get(key).cloned()
    }

    #[test]
    fn flag_overrides_environment() {
        let map =
            env_of(&[(ENV_SITE_URL, "https://env.example/sites/ignored")]);
        let opts = LoaderOptions {
            site: Some("https://flag.example/sites/hr".into()),
            ..LoaderOptions::default()
        };
        let ctx = from_env(&opts, lookup(&map)).unwrap();
        assert_eq!(ctx.base_url.host_str(), Some("flag.example"));
    }

    #[test]
    fn environment_supplies_url_token_and_timeout() {
        let map = env_of(&[
            (ENV_SITE_URL, "https://tenant.example/sites/hr"),
            (ENV_AUTH_TOKEN, "secret"),
            (ENV_TIMEOUT_SECS, "5"),
        ]);
        let ctx =
            from_env(&LoaderOptions::default(), lookup(&map)).unwrap();
        assert_eq!(ctx.base_url.path(), "/sites/hr");
        assert_eq!(ctx.auth_token.as_deref(), Some("secret"));
        assert_eq!(ctx.timeout, Duration::from_secs(5));
    }

    #[test]
    fn missing_site_url_is_an_error() {
        let map = env_of(&[]);
        let err =
            from_env(&LoaderOptions::default(), lookup(&map)).unwrap_err();
        assert!(matches!(err, ConfigLoadError::MissingSiteUrl));
    }

    #[test]
    fn blank_site_url_is_treated_as_missing() {
        let map = env_of(&[(ENV_SITE_URL, "   ")]);
        let err =
            from_env(&LoaderOptions::default(), lookup(&map)).unwrap_err();
        assert!(matches!(err, ConfigLoadError::MissingSiteUrl));
    }

    #[test]
    fn non_http_scheme_is_rejected() {
        let opts = LoaderOptions {
            site: Some("ftp://tenant.example".into()),
            ..LoaderOptions::default()
        };
        let err = from_env(&opts, |_| None).unwrap_err();
        assert!(matches!(err, ConfigLoadError::UnsupportedScheme { .. }));
    }

    #[test]
    fn garbage_timeout_is_rejected() {
        let map = env_of(&[
            (ENV_SITE_URL, "https://tenant.example"),
            (ENV_TIMEOUT_SECS, "soon"),
        ]);
        let err =
            from_env(&LoaderOptions::default(), lookup(&map)).unwrap_err();
        assert!(matches!(err, ConfigLoadError::InvalidTimeout { .. }));
    }

    #[test]
    fn blank_token_is_ignored() {
        let map = env_of(&[
            (ENV_SITE_URL, "https://tenant.example"),
            (ENV_AUTH_TOKEN, ""),
        ]);
        let ctx =
            from_env(&LoaderOptions::default(), lookup(&map)).unwrap();
        assert!(ctx.auth_token.is_none());
    }
}
