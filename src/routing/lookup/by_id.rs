//! Id lookup: a purely numeric path names a node id (`/1047`).

use crate::content::NodeId;
use crate::domain::path;
use crate::routing::lookup::{Lookup, LookupContext, LookupOutcome};
use crate::routing::request::DocumentRequest;

/// Resolves `/<digits>` to the published node with that id.
///
/// Under a domain, the node must belong to the domain's subtree.
#[derive(Debug, Clone, Copy)]
pub struct IdLookup {
    weight: u32,
}

impl IdLookup {
    pub const NAME: &'static str = "by-id";
    pub const WEIGHT: u32 = 20;

    pub fn new() -> Self {
        Self::with_weight(Self::WEIGHT)
    }

    pub fn with_weight(weight: u32) -> Self {
        Self { weight }
    }
}

impl Default for IdLookup {
    fn default() -> Self {
        Self::new()
    }
}

impl Lookup for IdLookup {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn weight(&self) -> u32 {
        self.weight
    }

    fn attempt(&self, ctx: &LookupContext<'_>, request: DocumentRequest) -> LookupOutcome {
        let Some(id) = parse_node_id(request.path()) else {
            return LookupOutcome::Pass(request);
        };

        let in_scope = request
            .domain_root()
            .map_or(true, |root| ctx.store.is_descendant_or_self(id, root));

        if ctx.store.is_published(id) && in_scope {
            tracing::debug!(request_id = %request.id(), node = %id, "Found node by id");
            LookupOutcome::Matched(request.resolve_to(id))
        } else {
            LookupOutcome::Pass(request)
        }
    }
}

/// `/1234` → 1234. Anything other than a single all-digit segment is not an id.
fn parse_node_id(route: &str) -> Option<NodeId> {
    let mut segments = path::segments(route);
    let first = segments.next()?;
    if segments.next().is_some() || !first.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    first.parse::<i64>().ok().map(NodeId)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Domain;
    use crate::routing::lookup::test_support::{fixture, request};

    #[test]
    fn test_parse_node_id() {
        assert_eq!(parse_node_id("/1047"), Some(NodeId(1047)));
        assert_eq!(parse_node_id("/1047/"), Some(NodeId(1047)));
        assert_eq!(parse_node_id("/"), None);
        assert_eq!(parse_node_id("/10a"), None);
        assert_eq!(parse_node_id("/-5"), None);
        assert_eq!(parse_node_id("/1/2"), None);
        assert_eq!(parse_node_id("/99999999999999999999999"), None);
    }

    #[test]
    fn test_resolves_published_id() {
        let fx = fixture();
        let outcome = IdLookup::new().attempt(&fx.ctx(), request("/3"));
        assert_eq!(outcome.into_request().node(), Some(NodeId(3)));
    }

    #[test]
    fn test_unknown_id_passes() {
        let fx = fixture();
        let outcome = IdLookup::new().attempt(&fx.ctx(), request("/777"));
        assert!(!outcome.is_matched());
    }

    #[test]
    fn test_id_outside_domain_passes() {
        let fx = fixture();
        let domain = Domain::new("other.com", NodeId(10), "en-US").unwrap();
        let req = request("/3").with_domain(&domain, "/3".to_string());
        assert!(!IdLookup::new().attempt(&fx.ctx(), req).is_matched());

        let req = request("/11").with_domain(&domain, "/11".to_string());
        assert!(IdLookup::new().attempt(&fx.ctx(), req).is_matched());
    }
}
