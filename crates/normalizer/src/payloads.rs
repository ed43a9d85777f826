use chrono::{DateTime, FixedOffset};
use serde::Deserialize;

/// Raw profile object as returned by the upstream `users/{username}`
/// endpoint. The creation timestamp keeps whatever offset the upstream
/// sent; rendering decides how to display it.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfilePayload {
    pub login: String,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub location: Option<String>,
    pub email: Option<String>,
    pub url: Option<String>,
    pub created_at: Option<DateTime<FixedOffset>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RepoPayload {
    pub name: String,
    pub url: String,
}
