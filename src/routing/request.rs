//! Per-request resolution state.
//!
//! # Lifecycle
//! ```text
//! new (uri parsed, path canonical)
//!     → with_domain (domain, culture, domain-relative path)
//!     → lookups: resolve_to / with_template (first write wins)
//!     → mark_not_found (terminal lookup only)
//!     → ResolutionResult
//! ```
//!
//! The request is an owned value: each lookup takes it and hands it back,
//! either unchanged or with its resolution filled in.

use serde::Serialize;
use uuid::Uuid;

use crate::content::NodeId;
use crate::domain::path::{self, RequestUri};
use crate::domain::Domain;
use crate::template::TemplateId;

/// Resolution state of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Unresolved,
    Resolved,
    NotFound,
}

/// Context threaded through the lookup chain.
#[derive(Debug, Clone)]
pub struct DocumentRequest {
    id: Uuid,
    uri: String,
    host: Option<String>,
    domain: Option<Domain>,
    path: String,
    node: Option<NodeId>,
    template: Option<TemplateId>,
    not_found_page: Option<NodeId>,
    culture: String,
    outcome: Outcome,
    matched_by: Option<&'static str>,
}

impl DocumentRequest {
    /// Parse `uri` into a canonical path. An explicit `host` wins over a host in the URI.
    pub fn new(uri: &str, host: Option<&str>, default_culture: &str) -> Self {
        let parsed = RequestUri::parse(uri);
        let host = host
            .map(path::normalize_host)
            .filter(|h| !h.is_empty())
            .or(parsed.host);

        Self {
            id: Uuid::new_v4(),
            uri: uri.to_string(),
            host,
            domain: None,
            path: parsed.path,
            node: None,
            template: None,
            not_found_page: None,
            culture: default_culture.to_string(),
            outcome: Outcome::Unresolved,
            matched_by: None,
        }
    }

    /// Attach the matched domain; culture follows the domain and the path
    /// becomes relative to the domain root.
    pub fn with_domain(mut self, domain: &Domain, relative_path: String) -> Self {
        self.culture = domain.culture.clone();
        self.path = relative_path;
        self.domain = Some(domain.clone());
        self
    }

    /// Record the resolved node. Only the first call has an effect.
    pub fn resolve_to(mut self, node: NodeId) -> Self {
        if self.node.is_none() {
            self.node = Some(node);
            self.outcome = Outcome::Resolved;
        }
        self
    }

    /// Attach an explicit template. Only the first call has an effect.
    pub fn with_template(mut self, template: TemplateId) -> Self {
        if self.template.is_none() {
            self.template = Some(template);
        }
        self
    }

    /// Terminal state: nothing matched. `page` is the node to render as the 404 page.
    pub fn mark_not_found(mut self, page: Option<NodeId>) -> Self {
        self.node = None;
        self.template = None;
        self.not_found_page = page;
        self.outcome = Outcome::NotFound;
        self
    }

    pub(crate) fn record_match(mut self, lookup: &'static str) -> Self {
        self.matched_by = Some(lookup);
        self
    }

    /// Correlation id for log events.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The URI as received.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    pub fn domain(&self) -> Option<&Domain> {
        self.domain.as_ref()
    }

    pub fn has_domain(&self) -> bool {
        self.domain.is_some()
    }

    /// Root node of the matched domain, if any.
    pub fn domain_root(&self) -> Option<NodeId> {
        self.domain.as_ref().map(|d| d.root)
    }

    /// Canonical path, relative to the domain root when a domain matched.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn node(&self) -> Option<NodeId> {
        self.node
    }

    pub fn template(&self) -> Option<TemplateId> {
        self.template
    }

    pub fn not_found_page(&self) -> Option<NodeId> {
        self.not_found_page
    }

    pub fn culture(&self) -> &str {
        &self.culture
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Name of the lookup that terminated the chain.
    pub fn matched_by(&self) -> Option<&'static str> {
        self.matched_by
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_request_is_unresolved() {
        let request = DocumentRequest::new("/Foo//Bar/?x=1", None, "en-US");
        assert_eq!(request.path(), "/Foo/Bar");
        assert_eq!(request.outcome(), Outcome::Unresolved);
        assert_eq!(request.culture(), "en-US");
        assert!(!request.has_domain());
        assert_eq!(request.host(), None);
    }

    #[test]
    fn test_explicit_host_wins() {
        let request = DocumentRequest::new("http://a.com/x", Some("B.com:80"), "en-US");
        assert_eq!(request.host(), Some("b.com"));

        let request = DocumentRequest::new("http://a.com/x", None, "en-US");
        assert_eq!(request.host(), Some("a.com"));
    }

    #[test]
    fn test_with_domain_sets_culture_and_path() {
        let domain = Domain::new("example.fr", NodeId(2000), "fr-FR").unwrap();
        let request = DocumentRequest::new("/fr/contact", None, "en-US")
            .with_domain(&domain, "/contact".to_string());
        assert_eq!(request.culture(), "fr-FR");
        assert_eq!(request.path(), "/contact");
        assert_eq!(request.domain_root(), Some(NodeId(2000)));
    }

    #[test]
    fn test_fields_are_set_once() {
        let request = DocumentRequest::new("/", None, "en-US")
            .resolve_to(NodeId(1))
            .resolve_to(NodeId(2))
            .with_template(TemplateId(7))
            .with_template(TemplateId(8));
        assert_eq!(request.node(), Some(NodeId(1)));
        assert_eq!(request.template(), Some(TemplateId(7)));
        assert_eq!(request.outcome(), Outcome::Resolved);
    }

    #[test]
    fn test_mark_not_found() {
        let request = DocumentRequest::new("/missing", None, "en-US").mark_not_found(Some(NodeId(404)));
        assert_eq!(request.outcome(), Outcome::NotFound);
        assert_eq!(request.node(), None);
        assert_eq!(request.not_found_page(), Some(NodeId(404)));
    }
}
