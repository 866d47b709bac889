//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the router.
//! All types derive Serde traits for deserialization from config files.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::content::NodeId;
use crate::routing::lookup::{IdLookup, NicePathLookup, PathTemplateLookup, UrlAliasLookup};

/// Root configuration for the content router.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RouterConfig {
    /// Resolution settings (culture, 404 pages, path options).
    pub routing: RoutingConfig,

    /// Where the content snapshot lives.
    pub content: ContentConfig,

    /// Hostname bindings.
    pub domains: Vec<DomainConfig>,

    /// Template aliases usable as a trailing path segment.
    pub templates: Vec<TemplateConfig>,

    /// Lookup chain overrides. Empty means the built-in chain.
    pub lookups: Vec<LookupConfig>,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Resolution settings shared by every lookup.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Culture used when no domain matches.
    pub default_culture: String,

    /// Omit the first top-level node's segment from nice paths.
    pub hide_top_level_from_path: bool,

    /// Node rendered for unresolved requests in any culture.
    pub not_found_page: Option<NodeId>,

    /// Per-culture overrides of `not_found_page`.
    pub not_found_pages: Vec<NotFoundPageConfig>,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            default_culture: "en-US".to_string(),
            hide_top_level_from_path: false,
            not_found_page: None,
            not_found_pages: Vec::new(),
        }
    }
}

impl RoutingConfig {
    /// 404 page for `culture`, falling back to the culture-neutral page.
    pub fn not_found_page_for(&self, culture: &str) -> Option<NodeId> {
        self.not_found_pages
            .iter()
            .find(|p| p.culture.eq_ignore_ascii_case(culture))
            .map(|p| p.node)
            .or(self.not_found_page)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NotFoundPageConfig {
    pub culture: String,
    pub node: NodeId,
}

/// Content snapshot location.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ContentConfig {
    /// JSON node list. Relative paths resolve against the config file's directory.
    pub snapshot_path: PathBuf,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            snapshot_path: PathBuf::from("content.json"),
        }
    }
}

/// One hostname binding.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DomainConfig {
    /// Exact host (`example.com`) or wildcard (`*.example.com`).
    pub host: String,

    /// Optional leading path, e.g. `/fr`.
    #[serde(default)]
    pub path_prefix: Option<String>,

    /// Content node the domain is rooted at.
    pub root: NodeId,

    pub culture: String,
}

/// Template alias binding.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TemplateConfig {
    pub alias: String,
    pub id: u32,
}

/// Built-in lookup kinds that can be placed in the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LookupKind {
    NicePath,
    ById,
    PathTemplate,
    UrlAlias,
}

impl LookupKind {
    pub fn default_weight(self) -> u32 {
        match self {
            Self::NicePath => NicePathLookup::WEIGHT,
            Self::ById => IdLookup::WEIGHT,
            Self::PathTemplate => PathTemplateLookup::WEIGHT,
            Self::UrlAlias => UrlAliasLookup::WEIGHT,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::NicePath => NicePathLookup::NAME,
            Self::ById => IdLookup::NAME,
            Self::PathTemplate => PathTemplateLookup::NAME,
            Self::UrlAlias => UrlAliasLookup::NAME,
        }
    }
}

/// One `[[lookups]]` entry.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LookupConfig {
    pub kind: LookupKind,

    /// Chain position; defaults to the kind's built-in weight.
    #[serde(default)]
    pub weight: Option<u32>,

    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl LookupConfig {
    pub fn effective_weight(&self) -> u32 {
        self.weight.unwrap_or_else(|| self.kind.default_weight())
    }
}

fn default_enabled() -> bool {
    true
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` takes precedence.
    pub log_level: String,

    /// Enable the Prometheus endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config: RouterConfig = toml::from_str("").unwrap();
        assert_eq!(config.routing.default_culture, "en-US");
        assert!(!config.routing.hide_top_level_from_path);
        assert!(config.domains.is_empty());
        assert!(config.lookups.is_empty());
        assert_eq!(config.content.snapshot_path, PathBuf::from("content.json"));
        assert!(!config.observability.metrics_enabled);
    }

    #[test]
    fn test_full_config_parses() {
        let toml_str = r#"
            [routing]
            default_culture = "en-GB"
            hide_top_level_from_path = true
            not_found_page = 404

            [[routing.not_found_pages]]
            culture = "fr-FR"
            node = 2404

            [content]
            snapshot_path = "site/nodes.json"

            [[domains]]
            host = "example.fr"
            path_prefix = "/fr"
            root = 2000
            culture = "fr-FR"

            [[templates]]
            alias = "print"
            id = 3

            [[lookups]]
            kind = "by-id"
            weight = 5

            [[lookups]]
            kind = "url-alias"
            enabled = false
        "#;

        let config: RouterConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.routing.not_found_page, Some(NodeId(404)));
        assert_eq!(config.domains[0].path_prefix.as_deref(), Some("/fr"));
        assert_eq!(config.domains[0].root, NodeId(2000));
        assert_eq!(config.templates[0].id, 3);
        assert_eq!(config.lookups[0].kind, LookupKind::ById);
        assert_eq!(config.lookups[0].effective_weight(), 5);
        assert!(!config.lookups[1].enabled);
        assert_eq!(config.lookups[1].effective_weight(), UrlAliasLookup::WEIGHT);
    }

    #[test]
    fn test_not_found_page_per_culture() {
        let routing = RoutingConfig {
            not_found_page: Some(NodeId(1)),
            not_found_pages: vec![NotFoundPageConfig {
                culture: "de-DE".into(),
                node: NodeId(2),
            }],
            ..RoutingConfig::default()
        };
        assert_eq!(routing.not_found_page_for("DE-de"), Some(NodeId(2)));
        assert_eq!(routing.not_found_page_for("en-US"), Some(NodeId(1)));
        assert_eq!(RoutingConfig::default().not_found_page_for("en-US"), None);
    }

    #[test]
    fn test_unknown_lookup_kind_rejected() {
        let result: Result<RouterConfig, _> = toml::from_str("[[lookups]]\nkind = \"magic\"");
        assert!(result.is_err());
    }
}
