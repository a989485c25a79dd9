//! Configuration for the command-line front end.

use std::env;
use std::path::PathBuf;

use crate::discovery::DiscoveryOptions;

/// Environment variable consulted for an access token.
pub const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

/// Source of environment variables, mockable in tests.
#[cfg_attr(test, mockall::automock)]
pub trait EnvSource {
    fn env_var(&self, key: &str) -> Result<String, env::VarError>;
}

/// Reads from the process environment.
pub struct SystemEnv;

impl EnvSource for SystemEnv {
    fn env_var(&self, key: &str) -> Result<String, env::VarError> {
        env::var(key)
    }
}

#[derive(Default)]
pub struct Config {
    pub token: Option<String>,
    pub api_url: Option<String>,
    pub root_directory: Option<PathBuf>,
    pub application_name: Option<String>,
    pub prerelease: bool,
}

impl Config {
    /// Fills in the access token from [`TOKEN_ENV_VAR`] when none was given.
    pub fn load<E: EnvSource>(source: &E, mut config: Config) -> Self {
        if config.token.is_none() {
            config.token = source.env_var(TOKEN_ENV_VAR).ok();
            if config.token.is_some() {
                log::debug!("Using access token from {}", TOKEN_ENV_VAR);
            }
        }
        config
    }

    pub fn discovery_options(&self) -> DiscoveryOptions {
        DiscoveryOptions {
            application_name: self.application_name.clone(),
            root_directory: self.root_directory.clone(),
            downloader: None,
            prerelease: self.prerelease,
            access_token: self.token.clone(),
            api_url: self.api_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::eq;

    #[test]
    fn test_load_reads_token_from_env() {
        let mut source = MockEnvSource::new();
        source
            .expect_env_var()
            .with(eq(TOKEN_ENV_VAR))
            .returning(|_| Ok("env_token".to_string()));

        let config = Config::load(&source, Config::default());

        assert_eq!(config.token.as_deref(), Some("env_token"));
    }

    #[test]
    fn test_load_prefers_explicit_token() {
        // No expectations: the environment must not be consulted.
        let source = MockEnvSource::new();

        let config = Config::load(
            &source,
            Config {
                token: Some("flag_token".to_string()),
                ..Default::default()
            },
        );

        assert_eq!(config.token.as_deref(), Some("flag_token"));
    }

    #[test]
    fn test_load_without_token() {
        let mut source = MockEnvSource::new();
        source
            .expect_env_var()
            .with(eq(TOKEN_ENV_VAR))
            .returning(|_| Err(env::VarError::NotPresent));

        let config = Config::load(&source, Config::default());

        assert_eq!(config.token, None);
    }

    #[test]
    fn test_discovery_options() {
        let config = Config {
            token: Some("t".to_string()),
            api_url: Some("http://localhost:1".to_string()),
            root_directory: Some(PathBuf::from("/apps")),
            application_name: Some("App".to_string()),
            prerelease: true,
        };

        let options = config.discovery_options();

        assert_eq!(options.access_token.as_deref(), Some("t"));
        assert_eq!(options.api_url.as_deref(), Some("http://localhost:1"));
        assert_eq!(options.root_directory, Some(PathBuf::from("/apps")));
        assert_eq!(options.application_name.as_deref(), Some("App"));
        assert!(options.prerelease);
        assert!(options.downloader.is_none());
    }
}
