use serde::{Deserialize, Deserializer};

/// Deserialize a string member that may be absent or explicitly `null`.
/// SharePoint omits empty descriptions on some entities and nulls them on
/// others; both render as empty text downstream.
pub(crate) fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// A sub-site of the queried site.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SubWeb {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub server_relative_url: String,
}

impl SubWeb {
    /// The display key sub-webs are ordered by.
    pub fn sort_key(&self) -> &str {
        &self.title
    }
}

/// A content type attached to the queried site.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ContentTypeInfo {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
}

impl ContentTypeInfo {
    /// The display key content types are ordered by.
    pub fn sort_key(&self) -> &str {
        &self.name
    }
}

/// A site column (field) of the queried site.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FieldInfo {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub type_as_string: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub internal_name: String,
}

impl FieldInfo {
    /// The display key fields are ordered by.
    pub fn sort_key(&self) -> &str {
        &self.title
    }
}

/// A list hosted on the queried site.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListInfo {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    /// Server-side base template identifier; displayed as text.
    #[serde(default)]
    pub base_template: i64,
}

impl ListInfo {
    /// The display key lists are ordered by.
    pub fn sort_key(&self) -> &str {
        &self.title
    }
}
