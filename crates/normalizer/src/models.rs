use serde::Serialize;

/// Merged profile + repositories entity exposed to callers. Field
/// names are a fixed external contract; do not rename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedUser {
    pub user_name: String,
    pub display_name: Option<String>,
    pub avatar: Option<String>,
    pub geo_location: Option<String>,
    pub email: Option<String>,
    pub url: Option<String>,
    /// RFC-1123 rendering of the upstream creation timestamp, absent
    /// when the upstream never sent one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// `None` means the upstream returned no repository data at all;
    /// `Some(vec![])` means it returned an empty list. Distinct states.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repos: Option<Vec<NormalizedRepo>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedRepo {
    pub name: String,
    pub url: String,
}
