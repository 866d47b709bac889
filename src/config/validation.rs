//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Detect conflicting domains, templates and lookup weights
//! - Validate value shapes (host patterns, path prefixes, addresses)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouterConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system
//! - Node ids are not checked here; they depend on the content snapshot

use std::collections::{HashMap, HashSet};
use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::{LookupKind, RouterConfig};
use crate::domain::{Domain, HostPattern};
use crate::routing::lookup::NotFoundLookup;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("routing.default_culture must not be empty")]
    EmptyDefaultCulture,

    #[error("domain #{index}: invalid host pattern \"{host}\"")]
    InvalidHost { index: usize, host: String },

    #[error("domain #{index}: path prefix \"{prefix}\" must start with '/'")]
    InvalidPathPrefix { index: usize, prefix: String },

    #[error("domain #{index}: culture must not be empty")]
    EmptyDomainCulture { index: usize },

    #[error("domain \"{0}\" is declared more than once")]
    DuplicateDomain(String),

    #[error("template alias must not be empty or contain '/': \"{0}\"")]
    InvalidTemplateAlias(String),

    #[error("template alias \"{0}\" is declared more than once")]
    DuplicateTemplate(String),

    #[error("lookup \"{0}\" is listed more than once")]
    DuplicateLookup(&'static str),

    #[error("lookup \"{incoming}\" has weight {weight}, already taken by \"{existing}\"")]
    WeightConflict {
        weight: u32,
        existing: &'static str,
        incoming: &'static str,
    },

    #[error("lookup \"{0}\" uses the reserved not-found weight")]
    ReservedWeight(&'static str),

    #[error("not-found page for culture \"{0}\" is declared more than once")]
    DuplicateNotFoundCulture(String),

    #[error("invalid metrics address \"{0}\"")]
    InvalidMetricsAddress(String),
}

/// Check a parsed configuration, collecting every problem found.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.routing.default_culture.trim().is_empty() {
        errors.push(ValidationError::EmptyDefaultCulture);
    }

    let mut cultures = HashSet::new();
    for page in &config.routing.not_found_pages {
        if !cultures.insert(page.culture.to_lowercase()) {
            errors.push(ValidationError::DuplicateNotFoundCulture(page.culture.clone()));
        }
    }

    validate_domains(config, &mut errors);
    validate_templates(config, &mut errors);
    validate_lookups(config, &mut errors);

    let observability = &config.observability;
    if observability.metrics_enabled
        && observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_domains(config: &RouterConfig, errors: &mut Vec<ValidationError>) {
    let mut seen = HashSet::new();
    for (index, entry) in config.domains.iter().enumerate() {
        if HostPattern::parse(&entry.host).is_err() {
            errors.push(ValidationError::InvalidHost {
                index,
                host: entry.host.clone(),
            });
            continue;
        }
        if entry.culture.trim().is_empty() {
            errors.push(ValidationError::EmptyDomainCulture { index });
        }

        let mut domain = match Domain::new(&entry.host, entry.root, entry.culture.as_str()) {
            Ok(domain) => domain,
            Err(_) => continue,
        };
        if let Some(prefix) = entry.path_prefix.as_deref() {
            if !prefix.starts_with('/') {
                errors.push(ValidationError::InvalidPathPrefix {
                    index,
                    prefix: prefix.to_string(),
                });
                continue;
            }
            domain = domain.with_path_prefix(prefix);
        }

        if !seen.insert(domain.key()) {
            errors.push(ValidationError::DuplicateDomain(domain.to_string()));
        }
    }
}

fn validate_templates(config: &RouterConfig, errors: &mut Vec<ValidationError>) {
    let mut seen = HashSet::new();
    for template in &config.templates {
        let alias = template.alias.trim();
        if alias.is_empty() || alias.contains('/') {
            errors.push(ValidationError::InvalidTemplateAlias(template.alias.clone()));
        } else if !seen.insert(alias.to_lowercase()) {
            errors.push(ValidationError::DuplicateTemplate(template.alias.clone()));
        }
    }
}

fn validate_lookups(config: &RouterConfig, errors: &mut Vec<ValidationError>) {
    let mut kinds: HashSet<LookupKind> = HashSet::new();
    let mut weights: HashMap<u32, &'static str> = HashMap::new();

    for entry in &config.lookups {
        let name = entry.kind.name();
        if !kinds.insert(entry.kind) {
            errors.push(ValidationError::DuplicateLookup(name));
            continue;
        }
        if !entry.enabled {
            continue;
        }

        let weight = entry.effective_weight();
        if weight == NotFoundLookup::WEIGHT {
            errors.push(ValidationError::ReservedWeight(name));
        } else if let Some(existing) = weights.insert(weight, name) {
            errors.push(ValidationError::WeightConflict {
                weight,
                existing,
                incoming: name,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{DomainConfig, LookupConfig, TemplateConfig};
    use crate::content::NodeId;

    fn domain(host: &str, prefix: Option<&str>) -> DomainConfig {
        DomainConfig {
            host: host.to_string(),
            path_prefix: prefix.map(str::to_string),
            root: NodeId(1),
            culture: "en-US".to_string(),
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&RouterConfig::default()).is_ok());
    }

    #[test]
    fn test_duplicate_domains_detected_case_insensitively() {
        let mut config = RouterConfig::default();
        config.domains = vec![
            domain("example.com", Some("/en")),
            domain("EXAMPLE.com", Some("/EN/")),
            domain("example.com", None),
        ];
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], ValidationError::DuplicateDomain(_)));
    }

    #[test]
    fn test_bad_host_and_prefix() {
        let mut config = RouterConfig::default();
        config.domains = vec![domain("", None), domain("a.com", Some("en"))];
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.contains(&ValidationError::InvalidHost { index: 0, host: String::new() }));
        assert!(errors.contains(&ValidationError::InvalidPathPrefix {
            index: 1,
            prefix: "en".into()
        }));
    }

    #[test]
    fn test_lookup_weight_conflict_and_reserved() {
        let mut config = RouterConfig::default();
        config.lookups = vec![
            LookupConfig { kind: LookupKind::NicePath, weight: None, enabled: true },
            LookupConfig { kind: LookupKind::ById, weight: Some(10), enabled: true },
            LookupConfig { kind: LookupKind::UrlAlias, weight: Some(u32::MAX), enabled: true },
            LookupConfig { kind: LookupKind::NicePath, weight: Some(1), enabled: true },
        ];
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::WeightConflict {
                    weight: 10,
                    existing: "nice-path",
                    incoming: "by-id"
                },
                ValidationError::ReservedWeight("url-alias"),
                ValidationError::DuplicateLookup("nice-path"),
            ]
        );
    }

    #[test]
    fn test_disabled_lookup_does_not_conflict() {
        let mut config = RouterConfig::default();
        config.lookups = vec![
            LookupConfig { kind: LookupKind::NicePath, weight: None, enabled: true },
            LookupConfig { kind: LookupKind::ById, weight: Some(10), enabled: false },
        ];
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_template_aliases() {
        let mut config = RouterConfig::default();
        config.templates = vec![
            TemplateConfig { alias: "Print".into(), id: 1 },
            TemplateConfig { alias: "print".into(), id: 2 },
            TemplateConfig { alias: "a/b".into(), id: 3 },
        ];
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = RouterConfig::default();
        config.routing.default_culture = " ".into();
        config.observability.metrics_enabled = true;
        config.observability.metrics_address = "not-an-address".into();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
    }
}
