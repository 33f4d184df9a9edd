//! REST client for the SharePoint site-metadata query.
//!
//! One operation: fetch a site resource with its four nested expansions
//! (sub-webs, content types, fields, lists) in a single round trip. The
//! client is configured through an explicit [`SiteContext`] passed by
//! reference; there is no process-global binding.

pub mod client;
pub mod context;
pub mod error;

pub use client::SiteClient;
pub use context::SiteContext;
pub use error::ClientError;
