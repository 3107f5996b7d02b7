// cli/src/settings.rs

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use folio_browser::config::{DEFAULT_PAGE_LINK_SIZE, DEFAULT_PAGE_SIZE};
use folio_browser::BrowserConfig;
use std::path::Path;

/// Layered configuration: defaults, then the optional file, then `FOLIO_*`
/// environment variables, then command-line overrides.
pub fn load(path: Option<&Path>, page_size: Option<u32>) -> Result<BrowserConfig> {
    let mut builder = Config::builder()
        .set_default("page_size", DEFAULT_PAGE_SIZE as i64)?
        .set_default("page_link_size", DEFAULT_PAGE_LINK_SIZE as i64)?;

    if let Some(path) = path {
        builder = builder.add_source(File::from(path).required(true));
    }

    builder = builder.add_source(Environment::with_prefix("FOLIO").try_parsing(true));

    if let Some(page_size) = page_size {
        builder = builder.set_override("page_size", page_size as i64)?;
    }

    let config: BrowserConfig = builder
        .build()
        .context("failed to read configuration")?
        .try_deserialize()
        .context("invalid configuration values")?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_file_values_apply() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "page_size = 20\npage_link_size = 7").unwrap();

        let config = load(Some(file.path()), None).unwrap();
        assert_eq!(config, BrowserConfig::default().page_size(20).page_link_size(7));
    }

    #[test]
    fn test_flag_overrides_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "page_size = 20").unwrap();

        let config = load(Some(file.path()), Some(6)).unwrap();
        assert_eq!(config.page_size, 6);
        assert_eq!(config.page_link_size, DEFAULT_PAGE_LINK_SIZE);
    }

    #[test]
    fn test_zero_page_size_is_rejected() {
        assert!(load(None, Some(0)).is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load(Some(&dir.path().join("absent.toml")), None).is_err());
    }
}
