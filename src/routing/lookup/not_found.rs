//! Terminal lookup: ends every chain that nothing else resolved.

use crate::routing::lookup::{Lookup, LookupContext, LookupOutcome};
use crate::routing::request::DocumentRequest;

/// Marks the request not found and picks the configured 404 page, if published.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotFoundLookup;

impl NotFoundLookup {
    pub const NAME: &'static str = "not-found";
    /// Reserved: no regular lookup may use it.
    pub const WEIGHT: u32 = u32::MAX;
}

impl Lookup for NotFoundLookup {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn weight(&self) -> u32 {
        Self::WEIGHT
    }

    fn attempt(&self, ctx: &LookupContext<'_>, request: DocumentRequest) -> LookupOutcome {
        let page = ctx
            .settings
            .not_found_page_for(request.culture())
            .filter(|&page| ctx.store.is_published(page));

        tracing::debug!(
            request_id = %request.id(),
            path = %request.path(),
            page = ?page,
            "No lookup matched"
        );
        LookupOutcome::Matched(request.mark_not_found(page))
    }
}
