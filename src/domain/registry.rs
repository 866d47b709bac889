//! Domain matching.
//!
//! # Responsibilities
//! - Map a request host (and path) to the configured domain
//! - Strip the domain's mount prefix from the request path
//! - Find the domain that owns a node, for outbound route building
//!
//! # Design Decisions
//! - Host matching is case-insensitive; ports and trailing dots are ignored
//! - Exact host beats wildcard, longer pattern beats shorter, longer prefix beats shorter
//! - Remaining ties go to the domain registered first
//! - Duplicate (host, prefix) pairs are rejected at construction

use std::fmt;

use crate::config::schema::DomainConfig;
use crate::content::{ContentStore, NodeId};
use crate::domain::path::{self, ROOT};
use crate::routing::error::RoutingError;

/// Host-match pattern of a domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostPattern {
    /// Matches exactly this host.
    Exact(String),
    /// `*.example.com`: matches any strict sub-domain of the stored suffix.
    Wildcard(String),
}

impl HostPattern {
    /// Parse `example.com` or `*.example.com`.
    pub fn parse(pattern: &str) -> Result<Self, RoutingError> {
        let pattern = pattern.trim();
        if let Some(suffix) = pattern.strip_prefix("*.") {
            let suffix = path::normalize_host(suffix);
            if suffix.is_empty() || suffix.contains('*') {
                return Err(RoutingError::InvalidHostPattern(pattern.to_string()));
            }
            return Ok(Self::Wildcard(suffix));
        }

        let host = path::normalize_host(pattern);
        if host.is_empty() || host.contains('*') || host.contains('/') {
            return Err(RoutingError::InvalidHostPattern(pattern.to_string()));
        }
        Ok(Self::Exact(host))
    }

    /// Returns true if the (normalized) host matches this pattern.
    pub fn matches(&self, host: &str) -> bool {
        match self {
            Self::Exact(expected) => host == expected,
            Self::Wildcard(suffix) => host
                .strip_suffix(suffix.as_str())
                .and_then(|label| label.strip_suffix('.'))
                .is_some_and(|label| !label.is_empty()),
        }
    }

    /// Ranking key: exact over wildcard, then pattern length.
    fn specificity(&self) -> (bool, usize) {
        match self {
            Self::Exact(host) => (true, host.len()),
            Self::Wildcard(suffix) => (false, suffix.len()),
        }
    }
}

impl fmt::Display for HostPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(host) => write!(f, "{host}"),
            Self::Wildcard(suffix) => write!(f, "*.{suffix}"),
        }
    }
}

/// A host (plus optional path prefix) mapped to a content subtree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Domain {
    pub host: HostPattern,
    /// Canonical mount prefix, `None` when the site is mounted at `/`.
    pub path_prefix: Option<String>,
    pub root: NodeId,
    pub culture: String,
}

impl Domain {
    pub fn new(
        host: &str,
        root: NodeId,
        culture: impl Into<String>,
    ) -> Result<Self, RoutingError> {
        Ok(Self {
            host: HostPattern::parse(host)?,
            path_prefix: None,
            root,
            culture: culture.into(),
        })
    }

    /// Mount the domain under a path prefix (`/en`). A `/` prefix is the same as none.
    pub fn with_path_prefix(mut self, prefix: &str) -> Self {
        let prefix = path::canonicalize(prefix);
        self.path_prefix = (prefix != ROOT).then_some(prefix);
        self
    }

    /// Uniqueness key: pattern plus prefix, lower-cased.
    pub fn key(&self) -> String {
        format!(
            "{}{}",
            self.host,
            self.path_prefix.as_deref().unwrap_or_default()
        )
        .to_lowercase()
    }

    fn prefix(&self) -> &str {
        self.path_prefix.as_deref().unwrap_or(ROOT)
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.host, self.path_prefix.as_deref().unwrap_or_default())
    }
}

/// Registered domains in registration order.
#[derive(Debug, Clone, Default)]
pub struct DomainRegistry {
    domains: Vec<Domain>,
}

impl DomainRegistry {
    /// Build a registry, rejecting duplicate (host, prefix) pairs.
    pub fn new(domains: Vec<Domain>) -> Result<Self, RoutingError> {
        for (i, domain) in domains.iter().enumerate() {
            let key = domain.key();
            if domains[..i].iter().any(|d| d.key() == key) {
                return Err(RoutingError::DuplicateDomain(domain.to_string()));
            }
        }
        Ok(Self { domains })
    }

    /// Build from `[[domains]]` entries, keeping their order.
    pub fn from_config(entries: &[DomainConfig]) -> Result<Self, RoutingError> {
        let domains = entries
            .iter()
            .map(|entry| {
                let domain = Domain::new(&entry.host, entry.root, entry.culture.as_str())?;
                Ok(match entry.path_prefix.as_deref() {
                    Some(prefix) => domain.with_path_prefix(prefix),
                    None => domain,
                })
            })
            .collect::<Result<Vec<_>, RoutingError>>()?;
        Self::new(domains)
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Best domain for a request host and canonical path.
    pub fn match_request(&self, host: &str, path: &str) -> Option<&Domain> {
        let host = path::normalize_host(host);
        if host.is_empty() {
            return None;
        }

        let mut best: Option<(&Domain, (bool, usize, usize))> = None;
        for domain in &self.domains {
            if !domain.host.matches(&host) || !path::has_prefix(path, domain.prefix()) {
                continue;
            }
            let (exact, len) = domain.host.specificity();
            let score = (exact, len, path::segments(domain.prefix()).count());
            // Strictly greater keeps the earliest registration on ties.
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((domain, score));
            }
        }
        best.map(|(domain, _)| domain)
    }

    /// Best domain for a host, considering only the site root path.
    pub fn match_host(&self, host: &str) -> Option<&Domain> {
        self.match_request(host, ROOT)
    }

    /// Path relative to the domain root, with the mount prefix removed.
    ///
    /// A path outside the prefix is returned unchanged.
    pub fn strip_prefix(&self, path: &str, domain: &Domain) -> String {
        path::strip_prefix(path, domain.prefix()).unwrap_or_else(|| path.to_string())
    }

    /// Domain owning `node`: the one whose root is the nearest ancestor-or-self.
    pub fn domain_for_node(&self, store: &ContentStore, node: NodeId) -> Option<&Domain> {
        store
            .lineage(node)
            .into_iter()
            .rev()
            .find_map(|id| self.domains.iter().find(|d| d.root == id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Domain> {
        self.domains.iter()
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentNode;

    fn domain(host: &str, root: i64) -> Domain {
        Domain::new(host, NodeId(root), "en-US").unwrap()
    }

    #[test]
    fn test_host_pattern_matching() {
        let exact = HostPattern::parse("Example.com").unwrap();
        assert!(exact.matches("example.com"));
        assert!(!exact.matches("www.example.com"));

        let wildcard = HostPattern::parse("*.example.com").unwrap();
        assert!(wildcard.matches("www.example.com"));
        assert!(wildcard.matches("a.b.example.com"));
        assert!(!wildcard.matches("example.com"));
        assert!(!wildcard.matches("badexample.com"));
    }

    #[test]
    fn test_invalid_patterns() {
        assert!(HostPattern::parse("").is_err());
        assert!(HostPattern::parse("*.").is_err());
        assert!(HostPattern::parse("a*.com").is_err());
        assert!(HostPattern::parse("example.com/en").is_err());
    }

    #[test]
    fn test_exact_beats_wildcard() {
        let registry = DomainRegistry::new(vec![
            domain("*.example.com", 1),
            domain("www.example.com", 2),
        ])
        .unwrap();
        assert_eq!(registry.match_host("www.example.com").unwrap().root, NodeId(2));
        assert_eq!(registry.match_host("blog.example.com").unwrap().root, NodeId(1));
        assert!(registry.match_host("other.org").is_none());
    }

    #[test]
    fn test_longer_wildcard_wins() {
        let registry = DomainRegistry::new(vec![
            domain("*.example.com", 1),
            domain("*.shop.example.com", 2),
        ])
        .unwrap();
        assert_eq!(registry.match_host("eu.shop.example.com").unwrap().root, NodeId(2));
        assert_eq!(registry.match_host("shop.example.com").unwrap().root, NodeId(1));
    }

    #[test]
    fn test_port_and_case_ignored() {
        let registry = DomainRegistry::new(vec![domain("example.com", 1)]).unwrap();
        assert!(registry.match_host("EXAMPLE.com:8080").is_some());
        assert!(registry.match_host("").is_none());
    }

    #[test]
    fn test_path_prefix_domains() {
        let registry = DomainRegistry::new(vec![
            domain("example.com", 1),
            domain("example.com", 2).with_path_prefix("/fr/"),
        ])
        .unwrap();

        let fr = registry.match_request("example.com", "/fr/contact").unwrap();
        assert_eq!(fr.root, NodeId(2));
        assert_eq!(registry.strip_prefix("/fr/contact", fr), "/contact");
        assert_eq!(registry.strip_prefix("/fr", fr), "/");

        let root = registry.match_request("example.com", "/france").unwrap();
        assert_eq!(root.root, NodeId(1));
        assert_eq!(registry.strip_prefix("/france", root), "/france");
    }

    #[test]
    fn test_registration_order_breaks_ties() {
        let registry = DomainRegistry::new(vec![
            domain("*.a.com", 1),
            domain("*.b.com", 2),
        ])
        .unwrap();
        assert_eq!(registry.match_host("x.a.com").unwrap().root, NodeId(1));
    }

    #[test]
    fn test_duplicate_domains_rejected() {
        let result = DomainRegistry::new(vec![domain("example.com", 1), domain("EXAMPLE.COM", 2)]);
        assert!(matches!(result, Err(RoutingError::DuplicateDomain(_))));

        let same_host_other_prefix = DomainRegistry::new(vec![
            domain("example.com", 1),
            domain("example.com", 2).with_path_prefix("/en"),
        ]);
        assert!(same_host_other_prefix.is_ok());
    }

    #[test]
    fn test_domain_for_node_picks_nearest_root() {
        let top = ContentNode::root(1, "top");
        let site = ContentNode::child_of(&top, 2, "site");
        let page = ContentNode::child_of(&site, 3, "page");
        let store = ContentStore::from_nodes(vec![top, site, page]).unwrap();

        let registry = DomainRegistry::new(vec![domain("top.com", 1), domain("site.com", 2)]).unwrap();
        assert_eq!(registry.domain_for_node(&store, NodeId(3)).unwrap().root, NodeId(2));
        assert_eq!(registry.domain_for_node(&store, NodeId(1)).unwrap().root, NodeId(1));
        assert!(DomainRegistry::empty().domain_for_node(&store, NodeId(3)).is_none());
    }
}
