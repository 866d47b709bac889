//! Lookup chain.
//!
//! # Responsibilities
//! - Hold lookups in ascending weight order
//! - Reject duplicate weights when the chain is assembled
//! - Run lookups until one matches, then stop
//! - Always finish with the not-found lookup
//!
//! # Design Decisions
//! - Built-in weights are constants and their order is checked at compile time
//! - Configured or custom weights are checked at construction (fail fast)
//! - The not-found weight is reserved; nothing can be ordered after it

use crate::config::schema::{LookupConfig, LookupKind};
use crate::routing::error::RoutingError;
use crate::routing::lookup::{
    IdLookup, Lookup, LookupContext, LookupOutcome, NicePathLookup, NotFoundLookup,
    PathTemplateLookup, UrlAliasLookup,
};
use crate::routing::request::DocumentRequest;

const _: () = assert!(
    NicePathLookup::WEIGHT < IdLookup::WEIGHT
        && IdLookup::WEIGHT < PathTemplateLookup::WEIGHT
        && PathTemplateLookup::WEIGHT < UrlAliasLookup::WEIGHT
        && UrlAliasLookup::WEIGHT < NotFoundLookup::WEIGHT
);

/// Ordered lookups plus the terminal not-found lookup.
#[derive(Debug)]
pub struct LookupChain {
    lookups: Vec<Box<dyn Lookup>>,
    terminal: NotFoundLookup,
}

impl LookupChain {
    pub fn builder() -> ChainBuilder {
        ChainBuilder::default()
    }

    /// The built-in lookups at their default weights.
    pub fn standard() -> Self {
        Self {
            lookups: vec![
                Box::new(NicePathLookup::new()),
                Box::new(IdLookup::new()),
                Box::new(PathTemplateLookup::new()),
                Box::new(UrlAliasLookup::new()),
            ],
            terminal: NotFoundLookup,
        }
    }

    /// Build from `[[lookups]]` entries. An empty list means the standard chain.
    pub fn from_config(entries: &[LookupConfig]) -> Result<Self, RoutingError> {
        if entries.is_empty() {
            return Ok(Self::standard());
        }

        let mut builder = Self::builder();
        for entry in entries.iter().filter(|e| e.enabled) {
            let weight = entry.effective_weight();
            builder = match entry.kind {
                LookupKind::NicePath => builder.register(NicePathLookup::with_weight(weight))?,
                LookupKind::ById => builder.register(IdLookup::with_weight(weight))?,
                LookupKind::PathTemplate => {
                    builder.register(PathTemplateLookup::with_weight(weight))?
                }
                LookupKind::UrlAlias => builder.register(UrlAliasLookup::with_weight(weight))?,
            };
        }
        Ok(builder.build())
    }

    /// Run the chain. The returned request is either resolved or marked not found.
    pub fn run(&self, ctx: &LookupContext<'_>, mut request: DocumentRequest) -> DocumentRequest {
        for lookup in &self.lookups {
            tracing::debug!(
                request_id = %request.id(),
                lookup = lookup.name(),
                weight = lookup.weight(),
                path = %request.path(),
                "Attempting lookup"
            );

            match lookup.attempt(ctx, request) {
                LookupOutcome::Matched(found) if found.node().is_some() => {
                    return found.record_match(lookup.name());
                }
                LookupOutcome::Matched(unresolved) => {
                    tracing::warn!(
                        request_id = %unresolved.id(),
                        lookup = lookup.name(),
                        "Lookup reported a match without a node, continuing"
                    );
                    request = unresolved;
                }
                LookupOutcome::Pass(unchanged) => request = unchanged,
            }
        }

        let name = self.terminal.name();
        self.terminal
            .attempt(ctx, request)
            .into_request()
            .record_match(name)
    }

    /// Lookup names in execution order, terminal included.
    pub fn names(&self) -> Vec<&'static str> {
        self.lookups
            .iter()
            .map(|l| l.name())
            .chain(std::iter::once(self.terminal.name()))
            .collect()
    }

    /// Number of regular lookups (the terminal lookup is not counted).
    pub fn len(&self) -> usize {
        self.lookups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lookups.is_empty()
    }
}

impl Default for LookupChain {
    fn default() -> Self {
        Self::standard()
    }
}

/// Assembles a chain, checking weights as lookups are registered.
#[derive(Debug, Default)]
pub struct ChainBuilder {
    lookups: Vec<Box<dyn Lookup>>,
}

impl ChainBuilder {
    /// Add a lookup. Fails if its weight is taken or reserved.
    pub fn register<L>(mut self, lookup: L) -> Result<Self, RoutingError>
    where
        L: Lookup + 'static,
    {
        let weight = lookup.weight();
        if weight == NotFoundLookup::WEIGHT {
            return Err(RoutingError::WeightConflict {
                weight,
                existing: NotFoundLookup::NAME,
                incoming: lookup.name(),
            });
        }
        if let Some(existing) = self.lookups.iter().find(|l| l.weight() == weight) {
            return Err(RoutingError::WeightConflict {
                weight,
                existing: existing.name(),
                incoming: lookup.name(),
            });
        }

        self.lookups.push(Box::new(lookup));
        Ok(self)
    }

    pub fn build(mut self) -> LookupChain {
        self.lookups.sort_by_key(|l| l.weight());
        LookupChain {
            lookups: self.lookups,
            terminal: NotFoundLookup,
        }
    }
}
