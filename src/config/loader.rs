//! Configuration and snapshot loading from disk.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

use crate::config::schema::RouterConfig;
use crate::config::validation::{validate_config, ValidationError};
use crate::content::{ContentSource, ContentStore, JsonContentSource, StoreError};
use crate::domain::DomainRegistry;
use crate::routing::{LookupChain, RoutingError, SnapshotParts};
use crate::template::TemplateTable;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Routing(#[from] RoutingError),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<RouterConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config: RouterConfig = toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Location of the content snapshot; relative paths resolve against the config file.
pub fn content_path(config_path: &Path, config: &RouterConfig) -> PathBuf {
    let snapshot_path = &config.content.snapshot_path;
    if snapshot_path.is_absolute() {
        return snapshot_path.clone();
    }
    config_path
        .parent()
        .map(|dir| dir.join(snapshot_path))
        .unwrap_or_else(|| snapshot_path.clone())
}

/// Load config and content, producing everything a snapshot needs.
pub fn load_snapshot(config_path: &Path) -> Result<(RouterConfig, SnapshotParts), ConfigError> {
    let config = load_config(config_path)?;
    let parts = load_parts(config_path, &config)?;
    Ok((config, parts))
}

/// Load the content referenced by an already loaded config.
pub fn load_parts(config_path: &Path, config: &RouterConfig) -> Result<SnapshotParts, ConfigError> {
    let source = JsonContentSource::new(content_path(config_path, config));
    let store = source.load_store()?;

    tracing::info!(
        config = %config_path.display(),
        content = %source.path().display(),
        nodes = store.len(),
        "Snapshot loaded"
    );

    build_parts(config, store)
}

/// Combine a validated config with a content store.
///
/// Domains or 404 pages pointing at missing or unpublished nodes are logged,
/// not rejected: content may be published later.
pub fn build_parts(config: &RouterConfig, store: ContentStore) -> Result<SnapshotParts, ConfigError> {
    let domains = DomainRegistry::from_config(&config.domains)?;
    let chain = LookupChain::from_config(&config.lookups)?;
    let templates = TemplateTable::from_config(&config.templates);

    for domain in domains.iter() {
        if !store.is_published(domain.root) {
            tracing::warn!(domain = %domain, root = %domain.root, "Domain root is not a published node");
        }
    }
    let pages = config
        .routing
        .not_found_page
        .into_iter()
        .chain(config.routing.not_found_pages.iter().map(|p| p.node));
    for page in pages {
        if !store.is_published(page) {
            tracing::warn!(node = %page, "Not-found page is not a published node");
        }
    }

    Ok(SnapshotParts::new(store)
        .with_domains(domains)
        .with_templates(Arc::new(templates))
        .with_chain(chain)
        .with_settings(config.routing.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_missing_file_is_io_error() {
        let result = load_config(Path::new("/definitely/not/here.toml"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_parse_error_names_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[routing\nbroken").unwrap();
        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains(&file.path().display().to_string()));
    }

    #[test]
    fn test_validation_errors_are_joined() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            [[templates]]
            alias = "a"
            id = 1

            [[templates]]
            alias = "A"
            id = 2

            [[domains]]
            host = ""
            root = 1
            culture = "en-US"
            "#
        )
        .unwrap();
        match load_config(file.path()) {
            Err(ConfigError::Validation(errors)) => assert_eq!(errors.len(), 2),
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[test]
    fn test_content_path_is_relative_to_config() {
        let mut config = RouterConfig::default();
        config.content.snapshot_path = PathBuf::from("nodes.json");
        assert_eq!(
            content_path(Path::new("/etc/router/router.toml"), &config),
            PathBuf::from("/etc/router/nodes.json")
        );

        config.content.snapshot_path = PathBuf::from("/srv/nodes.json");
        assert_eq!(
            content_path(Path::new("/etc/router/router.toml"), &config),
            PathBuf::from("/srv/nodes.json")
        );
    }
}
