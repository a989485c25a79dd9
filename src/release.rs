//! Release and asset entities decoded from the releases endpoint.
//!
//! Both types are read-only views: they are built from the wire payload (or
//! through [`Release::new`]) and never mutated afterwards.

use chrono::{DateTime, FixedOffset, SecondsFormat};
use serde::{Deserialize, Serialize, Serializer};

/// A downloadable artifact attached to a release.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReleaseAsset {
    name: String,
    url: String,
    id: i64,
}

impl ReleaseAsset {
    pub fn new(name: impl Into<String>, url: impl Into<String>, id: i64) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            id,
        }
    }

    /// File name of the artifact.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// API URL that serves the asset's binary content.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn id(&self) -> i64 {
        self.id
    }
}

/// A published release record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Release {
    prerelease: bool,
    /// Publication time with the offset the host reported
    #[serde(serialize_with = "serialize_timestamp")]
    published_at: DateTime<FixedOffset>,
    html_url: String,
    /// Canonical API URL of the release record
    url: String,
    #[serde(default)]
    assets: Vec<ReleaseAsset>,
}

impl Release {
    pub fn new(
        prerelease: bool,
        published_at: impl Into<DateTime<FixedOffset>>,
        html_url: impl Into<String>,
        url: impl Into<String>,
        assets: Vec<ReleaseAsset>,
    ) -> Self {
        Self {
            prerelease,
            published_at: published_at.into(),
            html_url: html_url.into(),
            url: url.into(),
            assets,
        }
    }

    pub fn prerelease(&self) -> bool {
        self.prerelease
    }

    pub fn published_at(&self) -> DateTime<FixedOffset> {
        self.published_at
    }

    /// Human-facing release page.
    pub fn html_url(&self) -> &str {
        &self.html_url
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Assets in the order the API returned them.
    pub fn assets(&self) -> &[ReleaseAsset] {
        &self.assets
    }
}

/// Writes RFC 3339 with `Z` for UTC and the original offset otherwise.
fn serialize_timestamp<S: Serializer>(
    timestamp: &DateTime<FixedOffset>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    const PAYLOAD: &str = r#"{
        "prerelease": false,
        "published_at": "2024-03-05T10:20:30Z",
        "html_url": "https://github.com/owner/repo/releases/tag/v1.2.0",
        "url": "https://api.github.com/repos/owner/repo/releases/42",
        "assets": [
            {
                "name": "app-1.2.0-full.nupkg",
                "url": "https://api.github.com/repos/owner/repo/releases/assets/7",
                "id": 7
            },
            {
                "name": "RELEASES",
                "url": "https://api.github.com/repos/owner/repo/releases/assets/8",
                "id": 8
            }
        ]
    }"#;

    #[test]
    fn test_decode_release() {
        let release: Release = serde_json::from_str(PAYLOAD).unwrap();

        assert!(!release.prerelease());
        assert_eq!(
            release.published_at(),
            Utc.with_ymd_and_hms(2024, 3, 5, 10, 20, 30).unwrap()
        );
        assert_eq!(
            release.html_url(),
            "https://github.com/owner/repo/releases/tag/v1.2.0"
        );
        assert_eq!(
            release.url(),
            "https://api.github.com/repos/owner/repo/releases/42"
        );
        assert_eq!(release.assets().len(), 2);
        assert_eq!(release.assets()[0].name(), "app-1.2.0-full.nupkg");
        assert_eq!(release.assets()[1].id(), 8);
    }

    #[test]
    fn test_reserialize_preserves_values() {
        let release: Release = serde_json::from_str(PAYLOAD).unwrap();

        let original: serde_json::Value = serde_json::from_str(PAYLOAD).unwrap();
        let reencoded = serde_json::to_value(&release).unwrap();

        assert_eq!(reencoded, original);
    }

    #[test]
    fn test_reserialize_keeps_non_utc_offset() {
        let payload = r#"{
            "prerelease": false,
            "published_at": "2024-01-01T00:00:00+02:00",
            "html_url": "https://gitea.example.com/owner/repo/releases/tag/v1.0.0",
            "url": "https://gitea.example.com/api/v3/repos/owner/repo/releases/5",
            "assets": []
        }"#;

        let release: Release = serde_json::from_str(payload).unwrap();
        let reencoded = serde_json::to_value(&release).unwrap();

        assert_eq!(reencoded["published_at"], "2024-01-01T00:00:00+02:00");
        assert_eq!(
            reencoded,
            serde_json::from_str::<serde_json::Value>(payload).unwrap()
        );
        assert_eq!(
            release.published_at(),
            Utc.with_ymd_and_hms(2023, 12, 31, 22, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_decode_ignores_unknown_fields() {
        let release: Release = serde_json::from_str(
            r#"{
                "tag_name": "v1.0.0",
                "prerelease": true,
                "published_at": "2023-01-01T00:00:00Z",
                "html_url": "h",
                "url": "u",
                "assets": [{"name": "a", "url": "b", "id": 1, "size": 10}]
            }"#,
        )
        .unwrap();

        assert!(release.prerelease());
        assert_eq!(release.assets()[0], ReleaseAsset::new("a", "b", 1));
    }

    #[test]
    fn test_missing_assets_is_empty() {
        let release: Release = serde_json::from_str(
            r#"{"prerelease": false, "published_at": "2023-01-01T00:00:00Z", "html_url": "h", "url": "u"}"#,
        )
        .unwrap();

        assert!(release.assets().is_empty());
    }

    #[test]
    fn test_missing_published_at_fails() {
        let result: Result<Release, _> =
            serde_json::from_str(r#"{"prerelease": false, "html_url": "h", "url": "u", "assets": []}"#);

        assert!(result.is_err());
    }
}
