//! Prerelease policy and recency selection over a fetched release list.

use crate::release::Release;

/// Releases that pass the prerelease policy, in input order.
///
/// A release is kept when `include_prerelease` is set or when it is not itself
/// a prerelease.
pub fn filter_releases(
    releases: &[Release],
    include_prerelease: bool,
) -> impl Iterator<Item = &Release> {
    releases
        .iter()
        .filter(move |r| include_prerelease || !r.prerelease())
}

/// Picks the most recently published release that passes the policy.
///
/// Returns `None` when the list is empty or nothing qualifies. On equal
/// timestamps the release that appears first wins.
pub fn select_release(releases: &[Release], include_prerelease: bool) -> Option<&Release> {
    filter_releases(releases, include_prerelease).reduce(|best, candidate| {
        if candidate.published_at() > best.published_at() {
            candidate
        } else {
            best
        }
    })
}
