pub mod client;
pub mod error;
pub mod exec;
pub mod metrics;

pub use client::{GithubClient, RestGithubClient};
pub use error::GithubApiError;
pub use exec::{HttpExec, ReqwestExecutor};
