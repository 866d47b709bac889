//! Nice-path lookup: `/foo/bar` → the node reached by walking url segments.

use crate::routing::lookup::{resolve_route, Lookup, LookupContext, LookupOutcome};
use crate::routing::request::DocumentRequest;

/// Resolves the whole path as url segments below the domain root.
#[derive(Debug, Clone, Copy)]
pub struct NicePathLookup {
    weight: u32,
}

impl NicePathLookup {
    pub const NAME: &'static str = "nice-path";
    pub const WEIGHT: u32 = 10;

    pub fn new() -> Self {
        Self::with_weight(Self::WEIGHT)
    }

    pub fn with_weight(weight: u32) -> Self {
        Self { weight }
    }
}

impl Default for NicePathLookup {
    fn default() -> Self {
        Self::new()
    }
}

impl Lookup for NicePathLookup {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn weight(&self) -> u32 {
        self.weight
    }

    fn attempt(&self, ctx: &LookupContext<'_>, request: DocumentRequest) -> LookupOutcome {
        match resolve_route(ctx, request.domain_root(), request.path()) {
            Some(node) => {
                tracing::debug!(request_id = %request.id(), node = %node, "Found node by nice path");
                LookupOutcome::Matched(request.resolve_to(node))
            }
            None => LookupOutcome::Pass(request),
        }
    }
}
