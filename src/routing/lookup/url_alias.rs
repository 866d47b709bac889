//! Url-alias lookup: nodes may declare extra routes that resolve to them.

use crate::domain::path;
use crate::routing::lookup::{Lookup, LookupContext, LookupOutcome};
use crate::routing::request::DocumentRequest;

/// Resolves a path through the alias index kept by the content store.
///
/// When several nodes declare the same alias, the shallowest one inside the
/// request's domain wins (then sort order, then id).
#[derive(Debug, Clone, Copy)]
pub struct UrlAliasLookup {
    weight: u32,
}

impl UrlAliasLookup {
    pub const NAME: &'static str = "url-alias";
    pub const WEIGHT: u32 = 50;

    pub fn new() -> Self {
        Self::with_weight(Self::WEIGHT)
    }

    pub fn with_weight(weight: u32) -> Self {
        Self { weight }
    }
}

impl Default for UrlAliasLookup {
    fn default() -> Self {
        Self::new()
    }
}

impl Lookup for UrlAliasLookup {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn weight(&self) -> u32 {
        self.weight
    }

    fn attempt(&self, ctx: &LookupContext<'_>, request: DocumentRequest) -> LookupOutcome {
        if path::segments(request.path()).next().is_none() {
            return LookupOutcome::Pass(request);
        }

        let root = request.domain_root();
        let found = ctx
            .store
            .nodes_with_alias(request.path())
            .iter()
            .copied()
            .find(|&node| root.map_or(true, |root| ctx.store.is_descendant_or_self(node, root)));

        match found {
            Some(node) => {
                tracing::debug!(request_id = %request.id(), node = %node, "Found node by url alias");
                LookupOutcome::Matched(request.resolve_to(node))
            }
            None => LookupOutcome::Pass(request),
        }
    }
}
