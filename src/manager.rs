//! The handle a discovery call hands to the downstream update stage.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::downloader::FileDownloader;
use crate::release::{Release, ReleaseAsset};

/// Update context bound to one selected release.
///
/// Assembled without any I/O; every caller-supplied input is carried through
/// unchanged.
#[derive(Clone)]
pub struct UpdateManager {
    release_url: String,
    application_name: Option<String>,
    root_directory: Option<PathBuf>,
    downloader: Option<Arc<dyn FileDownloader>>,
    release: Release,
    access_token: Option<String>,
}

impl UpdateManager {
    pub fn new(
        release_url: impl Into<String>,
        application_name: Option<String>,
        root_directory: Option<PathBuf>,
        downloader: Option<Arc<dyn FileDownloader>>,
        release: Release,
        access_token: Option<String>,
    ) -> Self {
        Self {
            release_url: release_url.into(),
            application_name,
            root_directory,
            downloader,
            release,
            access_token,
        }
    }

    /// Builds a manager seeded from the release's own canonical URL.
    pub fn for_release(
        release: Release,
        application_name: Option<String>,
        root_directory: Option<PathBuf>,
        downloader: Option<Arc<dyn FileDownloader>>,
        access_token: Option<String>,
    ) -> Self {
        let release_url = release.url().to_string();
        Self::new(
            release_url,
            application_name,
            root_directory,
            downloader,
            release,
            access_token,
        )
    }

    /// Canonical API URL of the selected release.
    pub fn release_url(&self) -> &str {
        &self.release_url
    }

    pub fn application_name(&self) -> Option<&str> {
        self.application_name.as_deref()
    }

    pub fn root_directory(&self) -> Option<&Path> {
        self.root_directory.as_deref()
    }

    pub fn downloader(&self) -> Option<&Arc<dyn FileDownloader>> {
        self.downloader.as_ref()
    }

    pub fn release(&self) -> &Release {
        &self.release
    }

    pub fn assets(&self) -> &[ReleaseAsset] {
        self.release.assets()
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }
}

impl fmt::Debug for UpdateManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpdateManager")
            .field("release_url", &self.release_url)
            .field("application_name", &self.application_name)
            .field("root_directory", &self.root_directory)
            .field("downloader", &self.downloader.as_ref().map(|_| "<custom>"))
            .field("release", &self.release)
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::downloader::MockFileDownloader;
    use chrono::{TimeZone, Utc};

    fn sample_release() -> Release {
        Release::new(
            false,
            Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
            "https://github.com/o/r/releases/tag/v2.0.0",
            "https://api.github.com/repos/o/r/releases/99",
            vec![ReleaseAsset::new(
                "RELEASES",
                "https://api.github.com/repos/o/r/releases/assets/5",
                5,
            )],
        )
    }

    #[test]
    fn test_for_release_uses_canonical_url() {
        let manager = UpdateManager::for_release(
            sample_release(),
            Some("MyApp".to_string()),
            Some(PathBuf::from("/opt/myapp")),
            None,
            None,
        );

        assert_eq!(
            manager.release_url(),
            "https://api.github.com/repos/o/r/releases/99"
        );
        assert_eq!(manager.application_name(), Some("MyApp"));
        assert_eq!(manager.root_directory(), Some(Path::new("/opt/myapp")));
        assert!(manager.downloader().is_none());
        assert_eq!(manager.assets().len(), 1);
        assert_eq!(manager.assets()[0].id(), 5);
        assert_eq!(manager.release(), &sample_release());
    }

    #[test]
    fn test_carries_downloader_and_token() {
        let downloader: Arc<dyn FileDownloader> = Arc::new(MockFileDownloader::new());
        let manager = UpdateManager::for_release(
            sample_release(),
            None,
            None,
            Some(downloader.clone()),
            Some("tok".to_string()),
        );

        assert!(Arc::ptr_eq(manager.downloader().unwrap(), &downloader));
        assert_eq!(manager.access_token(), Some("tok"));
    }

    #[test]
    fn test_debug_redacts_token() {
        let manager = UpdateManager::for_release(
            sample_release(),
            None,
            None,
            None,
            Some("ghp_verysecret".to_string()),
        );

        let debug = format!("{:?}", manager);
        assert!(!debug.contains("ghp_verysecret"));
        assert!(debug.contains("<redacted>"));
    }
}
