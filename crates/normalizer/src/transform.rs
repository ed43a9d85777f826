use chrono::{DateTime, FixedOffset};

use crate::models::{NormalizedRepo, NormalizedUser};
use crate::payloads::{ProfilePayload, RepoPayload};

/// Builds the merged entity from the raw profile and repository list.
///
/// Pure projection: an absent profile yields an absent result, an
/// absent repo list stays absent, an empty repo list stays empty.
pub fn merge_user(
    profile: Option<&ProfilePayload>,
    repos: Option<Vec<RepoPayload>>,
) -> Option<NormalizedUser> {
    let profile = profile?;
    Some(NormalizedUser {
        user_name: profile.login.clone(),
        display_name: profile.name.clone(),
        avatar: profile.avatar_url.clone(),
        geo_location: profile.location.clone(),
        email: profile.email.clone(),
        url: profile.url.clone(),
        created_at: profile.created_at.as_ref().map(format_created_at),
        repos: repos.map(|list| list.into_iter().map(normalize_repo).collect()),
    })
}

fn normalize_repo(repo: RepoPayload) -> NormalizedRepo {
    NormalizedRepo {
        name: repo.name,
        url: repo.url,
    }
}

/// RFC-1123 civil-time rendering in the timestamp's own offset. A zero
/// offset renders as `GMT`, anything else as its numeric offset. Day of
/// month is unpadded, names are always English.
pub fn format_created_at(created_at: &DateTime<FixedOffset>) -> String {
    let stamp = created_at.format("%a, %-d %b %Y %H:%M:%S");
    if created_at.offset().local_minus_utc() == 0 {
        format!("{} GMT", stamp)
    } else {
        format!("{} {}", stamp, created_at.format("%z"))
    }
}
