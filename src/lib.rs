pub mod config;
pub mod discovery;
pub mod downloader;
pub mod endpoint;
pub mod error;
pub mod fetcher;
pub mod http;
pub mod manager;
pub mod release;
pub mod selector;

pub use discovery::{DiscoveryOptions, github_update_manager, github_update_manager_with};
pub use downloader::FileDownloader;
pub use error::DiscoveryError;
pub use manager::UpdateManager;
pub use release::{Release, ReleaseAsset};
