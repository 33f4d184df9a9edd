use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error(
        "no site URL configured; pass --site or set SITESCOPE_SITE_URL"
    )]
    MissingSiteUrl,
    #[error("invalid site URL '{url}'")]
    InvalidSiteUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("unsupported site URL scheme '{scheme}' (expected http or https)")]
    UnsupportedScheme { scheme: String },
    #[error("invalid timeout '{value}' (expected whole seconds)")]
    InvalidTimeout {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
    #[error(transparent)]
    EnvFile(#[from] dotenvy::Error),
}
