use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use crate::chromosome::MAX_POSITION;

pub const DEFAULT_PROMOTER_SIZE: u64 = 300;
pub const DEFAULT_OPERON_DISTANCE: u64 = 60;

/// Settings consumed by the annotation automaton.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct AnnotationConfig {
    /// Promoter extent upstream of each TSS, before shrinking to fit.
    pub promoter_size: u64,
    pub operons_enabled: bool,
    /// Same-strand genes closer than this share one promoter.
    pub operon_distance: u64,
}

impl Default for AnnotationConfig {
    fn default() -> Self {
        Self {
            promoter_size: DEFAULT_PROMOTER_SIZE,
            operons_enabled: true,
            operon_distance: DEFAULT_OPERON_DISTANCE,
        }
    }
}

impl AnnotationConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config file: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.promoter_size == 0 {
            bail!("invalid promoter size: must be a positive integer");
        }
        if self.operon_distance == 0 {
            bail!("invalid operon distance: must be a positive integer");
        }
        if self.promoter_size > MAX_POSITION {
            bail!("invalid promoter size: must not exceed {MAX_POSITION}");
        }
        if self.operon_distance > MAX_POSITION {
            bail!("invalid operon distance: must not exceed {MAX_POSITION}");
        }
        Ok(())
    }

    /// Apply command-line overrides on top of file or default values.
    #[must_use]
    pub fn with_overrides(
        mut self,
        promoter_size: Option<u64>,
        operon_distance: Option<u64>,
        disable_operons: bool,
    ) -> Self {
        if let Some(size) = promoter_size {
            self.promoter_size = size;
        }
        if let Some(distance) = operon_distance {
            self.operon_distance = distance;
        }
        if disable_operons {
            self.operons_enabled = false;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(json: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(json.as_bytes()).unwrap();
        f
    }

    #[test]
    fn defaults() {
        let config = AnnotationConfig::default();
        assert_eq!(config.promoter_size, 300);
        assert!(config.operons_enabled);
        assert_eq!(config.operon_distance, 60);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn valid_config_all_fields() {
        let json = r#"{ "promoterSize": 500, "operonsEnabled": false, "operonDistance": 100 }"#;
        let f = write_config(json);
        let config = AnnotationConfig::from_file(f.path()).unwrap();
        assert_eq!(config.promoter_size, 500);
        assert!(!config.operons_enabled);
        assert_eq!(config.operon_distance, 100);
    }

    #[test]
    fn omitted_fields_use_defaults() {
        let f = write_config(r#"{ "promoterSize": 1000 }"#);
        let config = AnnotationConfig::from_file(f.path()).unwrap();
        assert_eq!(config.promoter_size, 1000);
        assert!(config.operons_enabled);
        assert_eq!(config.operon_distance, 60);
    }

    #[test]
    fn zero_promoter_size() {
        let f = write_config(r#"{ "promoterSize": 0 }"#);
        let err = AnnotationConfig::from_file(f.path()).unwrap_err();
        assert!(err.to_string().contains("invalid promoter size"));
    }

    #[test]
    fn oversized_overrides_rejected() {
        let config = AnnotationConfig::default().with_overrides(Some(u64::MAX), None, false);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("invalid promoter size"));

        let config = AnnotationConfig::default().with_overrides(None, Some(u64::MAX), false);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("invalid operon distance"));

        let config = AnnotationConfig::default().with_overrides(Some(MAX_POSITION), None, false);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn unknown_key_rejected() {
        let f = write_config(r#"{ "promoterLength": 10 }"#);
        let err = AnnotationConfig::from_file(f.path()).unwrap_err();
        assert!(err.to_string().contains("failed to parse config file"));
    }

    #[test]
    fn overrides() {
        let config = AnnotationConfig::default().with_overrides(Some(150), None, true);
        assert_eq!(config.promoter_size, 150);
        assert_eq!(config.operon_distance, 60);
        assert!(!config.operons_enabled);
    }
}
