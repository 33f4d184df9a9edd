//! Data model definitions shared across sitescope crates.
//!
//! Everything in here is a read-only record deserialized from the SharePoint
//! REST API's verbose OData JSON. Nothing is ever written back.
#![allow(missing_docs)]

pub mod entities;
pub mod site;

pub use entities::{ContentTypeInfo, FieldInfo, ListInfo, SubWeb};
pub use site::{Envelope, SiteInfo};
