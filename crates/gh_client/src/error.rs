use thiserror::Error;

/// Upstream failure classification, decided at the point of failure.
/// Clone is required so one in-flight result can be handed to every
/// coalesced waiter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GithubApiError {
    #[error("github user '{login}' not found")]
    NotFound { login: String },
    #[error("github api unavailable: {detail}")]
    Unavailable { detail: String },
}

impl GithubApiError {
    pub fn not_found(login: impl Into<String>) -> Self {
        Self::NotFound {
            login: login.into(),
        }
    }

    pub fn unavailable(detail: impl Into<String>) -> Self {
        Self::Unavailable {
            detail: detail.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
