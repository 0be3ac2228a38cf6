//! Engine configuration loader.

use std::path::Path;

use bundle_core::EngineConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for engine configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Keys missing from the file keep their [`EngineConfig::default`] values.
    pub fn load(path: &Path) -> LoadResult<EngineConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse config data from a TOML string.
    pub fn parse(content: &str) -> LoadResult<EngineConfig> {
        let config: EngineConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_use_defaults() {
        let config = ConfigLoader::parse("milestones = [3, 6]").unwrap();

        assert_eq!(
            config.completion_delay_ms,
            EngineConfig::DEFAULT_COMPLETION_DELAY_MS
        );
        assert!(!config.ignore_stack_count);
        assert!(config.is_milestone(6));
        assert!(!config.is_milestone(4));
    }

    #[test]
    fn overrides_delay() {
        let config =
            ConfigLoader::parse("completion_delay_ms = 250\nignore_stack_count = true").unwrap();

        assert_eq!(config.completion_delay_ms, 250);
        assert!(config.ignore_stack_count);
    }
}
