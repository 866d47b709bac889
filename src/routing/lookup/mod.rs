//! Lookup strategies.
//!
//! # Responsibilities
//! - Define the `Lookup` trait every strategy implements
//! - Provide the shared route walk (cache first, then segment walk)
//!
//! # Built-in Lookups
//! | Lookup          | Weight   | Handles                                  |
//! |-----------------|----------|------------------------------------------|
//! | `nice-path`     | 10       | `/foo/bar` as a chain of url segments    |
//! | `by-id`         | 20       | `/1234` as a node id                     |
//! | `path-template` | 30       | `/foo/bar/<template alias>`              |
//! | `url-alias`     | 50       | explicit url aliases declared on nodes   |
//! | `not-found`     | terminal | always last, marks the request not found |
//!
//! # Design Decisions
//! - Lookups are stateless apart from their configured weight
//! - A lookup takes the request by value and returns it, matched or untouched
//! - Only route walks are cached; alias and id hits are cheap index reads

use std::fmt;

use crate::config::schema::RoutingConfig;
use crate::content::{ContentStore, NodeId};
use crate::domain::path;
use crate::domain::DomainRegistry;
use crate::routing::cache::{RouteCache, RouteKey};
use crate::routing::request::DocumentRequest;
use crate::template::TemplateRegistry;

pub mod by_id;
pub mod nice_path;
pub mod not_found;
pub mod path_template;
pub mod url_alias;

pub use by_id::IdLookup;
pub use nice_path::NicePathLookup;
pub use not_found::NotFoundLookup;
pub use path_template::PathTemplateLookup;
pub use url_alias::UrlAliasLookup;

/// Read-only view of one snapshot, handed to every lookup.
#[derive(Clone, Copy)]
pub struct LookupContext<'a> {
    pub store: &'a ContentStore,
    pub domains: &'a DomainRegistry,
    pub cache: &'a RouteCache,
    pub templates: &'a dyn TemplateRegistry,
    pub settings: &'a RoutingConfig,
}

impl fmt::Debug for LookupContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LookupContext")
            .field("nodes", &self.store.len())
            .field("domains", &self.domains.len())
            .field("cached_routes", &self.cache.len())
            .finish()
    }
}

/// Result of one lookup attempt.
#[derive(Debug)]
pub enum LookupOutcome {
    /// The lookup resolved the request; the chain stops.
    Matched(DocumentRequest),
    /// The lookup did not apply; the request is handed back unchanged.
    Pass(DocumentRequest),
}

impl LookupOutcome {
    pub fn is_matched(&self) -> bool {
        matches!(self, Self::Matched(_))
    }

    pub fn into_request(self) -> DocumentRequest {
        match self {
            Self::Matched(request) | Self::Pass(request) => request,
        }
    }
}

/// One pluggable resolution rule.
pub trait Lookup: Send + Sync + fmt::Debug {
    /// Stable name, used in logs, metrics and results.
    fn name(&self) -> &'static str;

    /// Chain position; lower runs first. Must be unique within a chain.
    fn weight(&self) -> u32;

    /// Try to resolve the request.
    fn attempt(&self, ctx: &LookupContext<'_>, request: DocumentRequest) -> LookupOutcome;
}

/// Resolve a domain-relative route to a node: route cache first, then a segment walk.
///
/// Successful walks are cached; misses are not.
pub fn resolve_route(ctx: &LookupContext<'_>, root: Option<NodeId>, route: &str) -> Option<NodeId> {
    let key = RouteKey::new(root, route);
    if let Some(node) = ctx.cache.get(&key) {
        tracing::trace!(route = %key, node = %node, "Route cache hit");
        return Some(node);
    }

    let node = walk(ctx, root, route)?;
    tracing::trace!(route = %key, node = %node, "Route resolved by walk");
    ctx.cache.set(key, node);
    Some(node)
}

/// Walk url segments from the domain root, or from the top of the tree.
fn walk(ctx: &LookupContext<'_>, root: Option<NodeId>, route: &str) -> Option<NodeId> {
    let store = ctx.store;
    let is_root_path = path::segments(route).next().is_none();

    let mut current = match root {
        Some(root) => Some(store.published(root)?.id),
        None if is_root_path || ctx.settings.hide_top_level_from_path => Some(store.first_root()?),
        None => None,
    };

    for segment in path::segments(route) {
        current = Some(store.child_by_segment(current, segment)?);
    }
    current
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[test]
    fn test_walk_from_virtual_root() {
        let fx = fixture();
        let ctx = fx.ctx();
        assert_eq!(resolve_route(&ctx, None, "/home/foo/bar"), Some(NodeId(3)));
        assert_eq!(resolve_route(&ctx, None, "/other/foo"), Some(NodeId(11)));
        assert_eq!(resolve_route(&ctx, None, "/foo"), None);
    }

    #[test]
    fn test_root_path_is_first_root() {
        let fx = fixture();
        assert_eq!(resolve_route(&fx.ctx(), None, "/"), Some(NodeId(1)));
    }

    #[test]
    fn test_hidden_top_level() {
        let mut fx = fixture();
        fx.settings.hide_top_level_from_path = true;
        let ctx = fx.ctx();
        assert_eq!(resolve_route(&ctx, None, "/foo/bar"), Some(NodeId(3)));
        assert_eq!(resolve_route(&ctx, None, "/home/foo"), None);
    }

    #[test]
    fn test_walk_from_domain_root() {
        let fx = fixture();
        let ctx = fx.ctx();
        assert_eq!(resolve_route(&ctx, Some(NodeId(10)), "/foo"), Some(NodeId(11)));
        assert_eq!(resolve_route(&ctx, Some(NodeId(10)), "/"), Some(NodeId(10)));
        assert_eq!(resolve_route(&ctx, Some(NodeId(999)), "/"), None);
    }

    #[test]
    fn test_walk_populates_cache_and_misses_are_not_cached() {
        let fx = fixture();
        let ctx = fx.ctx();

        assert_eq!(resolve_route(&ctx, None, "/HOME/Foo"), Some(NodeId(2)));
        assert_eq!(fx.cache.len(), 1);
        assert_eq!(resolve_route(&ctx, None, "/home/foo/"), Some(NodeId(2)));
        assert_eq!(fx.cache.stats().hits, 1);

        assert_eq!(resolve_route(&ctx, None, "/nope"), None);
        assert_eq!(fx.cache.len(), 1);
    }
}
