use serde::{Deserialize, Deserializer};

use crate::entities::{
    ContentTypeInfo, FieldInfo, ListInfo, SubWeb, null_as_empty,
};

/// The aggregated result of one expanded site query: the site itself plus its
/// four nested collections, all delivered in a single round trip.
///
/// Absent or `null` expansions deserialize as empty collections rather than
/// failing; an empty tab is rendered in that case.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SiteInfo {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "results")]
    pub webs: Vec<SubWeb>,
    #[serde(default, deserialize_with = "results")]
    pub content_types: Vec<ContentTypeInfo>,
    #[serde(default, deserialize_with = "results")]
    pub fields: Vec<FieldInfo>,
    #[serde(default, deserialize_with = "results")]
    pub lists: Vec<ListInfo>,
}

/// The outer verbose-OData envelope: `{"d": {...}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    pub d: SiteInfo,
}

/// Unwrap a `{"results": [...]}` collection member. Verbose OData wraps every
/// expanded collection this way; `null` or a missing `results` array means an
/// empty collection.
fn results<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    #[derive(Deserialize)]
    struct Wrapper<T> {
        #[serde(default = "Vec::new")]
        results: Vec<T>,
    }

    Ok(Option::<Wrapper<T>>::deserialize(deserializer)?
        .map(|w| w.results)
        .unwrap_or_default())
}
