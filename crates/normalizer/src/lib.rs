pub mod models;
pub mod payloads;
pub mod transform;

pub use models::{NormalizedRepo, NormalizedUser};
pub use payloads::{ProfilePayload, RepoPayload};
pub use transform::{format_created_at, merge_user};
