//! Immutable routing snapshot.
//!
//! A snapshot bundles everything one resolution reads: content, domains,
//! templates, the lookup chain, settings and the route cache built on top of
//! them. Snapshots are never mutated in place; a content or config change
//! produces new `SnapshotParts` that the resolver installs atomically.

use std::fmt;
use std::sync::Arc;

use crate::config::schema::RoutingConfig;
use crate::content::ContentStore;
use crate::domain::DomainRegistry;
use crate::routing::cache::RouteCache;
use crate::routing::chain::LookupChain;
use crate::routing::lookup::LookupContext;
use crate::template::{TemplateRegistry, TemplateTable};

/// Inputs for a new snapshot.
pub struct SnapshotParts {
    pub store: ContentStore,
    pub domains: DomainRegistry,
    pub templates: Arc<dyn TemplateRegistry>,
    pub chain: LookupChain,
    pub settings: RoutingConfig,
}

impl SnapshotParts {
    /// Content only: no domains, no templates, standard chain, default settings.
    pub fn new(store: ContentStore) -> Self {
        Self {
            store,
            domains: DomainRegistry::empty(),
            templates: Arc::new(TemplateTable::new()),
            chain: LookupChain::standard(),
            settings: RoutingConfig::default(),
        }
    }

    pub fn with_domains(mut self, domains: DomainRegistry) -> Self {
        self.domains = domains;
        self
    }

    pub fn with_templates(mut self, templates: Arc<dyn TemplateRegistry>) -> Self {
        self.templates = templates;
        self
    }

    pub fn with_chain(mut self, chain: LookupChain) -> Self {
        self.chain = chain;
        self
    }

    pub fn with_settings(mut self, settings: RoutingConfig) -> Self {
        self.settings = settings;
        self
    }
}

impl fmt::Debug for SnapshotParts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnapshotParts")
            .field("nodes", &self.store.len())
            .field("domains", &self.domains.len())
            .field("chain", &self.chain.names())
            .finish()
    }
}

/// One installed generation of routing state.
#[derive(Debug)]
pub struct Snapshot {
    generation: u64,
    store: ContentStore,
    domains: DomainRegistry,
    templates: Arc<dyn TemplateRegistry>,
    chain: LookupChain,
    settings: RoutingConfig,
    cache: RouteCache,
}

impl Snapshot {
    pub(crate) fn new(generation: u64, parts: SnapshotParts) -> Self {
        Self {
            generation,
            store: parts.store,
            domains: parts.domains,
            templates: parts.templates,
            chain: parts.chain,
            settings: parts.settings,
            cache: RouteCache::new(),
        }
    }

    /// View handed to lookups.
    pub fn context(&self) -> LookupContext<'_> {
        LookupContext {
            store: &self.store,
            domains: &self.domains,
            cache: &self.cache,
            templates: self.templates.as_ref(),
            settings: &self.settings,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn store(&self) -> &ContentStore {
        &self.store
    }

    pub fn domains(&self) -> &DomainRegistry {
        &self.domains
    }

    pub fn chain(&self) -> &LookupChain {
        &self.chain
    }

    pub fn settings(&self) -> &RoutingConfig {
        &self.settings
    }

    pub fn cache(&self) -> &RouteCache {
        &self.cache
    }
}
