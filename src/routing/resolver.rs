//! Request resolver.
//!
//! # Responsibilities
//! - Own the installed snapshot and swap it atomically
//! - Turn a URI (plus host) into a `ResolutionResult`
//! - Build nice URLs for nodes (the reverse direction)
//!
//! # Design Decisions
//! - Resolution is synchronous and lock-free: readers load an `Arc<Snapshot>`
//! - Each snapshot owns its route cache; installing clears the outgoing one
//! - "Not found" and "no content yet" are results, not errors

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use arc_swap::ArcSwapOption;
use serde::Serialize;

use crate::content::NodeId;
use crate::domain::path::{self, ROOT};
use crate::observability::metrics;
use crate::routing::lookup::{resolve_route, LookupContext};
use crate::routing::request::{DocumentRequest, Outcome};
use crate::routing::snapshot::{Snapshot, SnapshotParts};
use crate::template::TemplateId;

/// Outcome of `RequestResolver::resolve`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ResolutionResult {
    Resolved {
        node: NodeId,
        /// Explicit template from the path, else the node's default.
        template: Option<TemplateId>,
        culture: String,
        /// Matched domain (`host` + prefix), if any.
        domain: Option<String>,
        /// Lookup that resolved the request.
        lookup: &'static str,
    },
    NotFound {
        culture: String,
        /// Published 404 page configured for the culture.
        page: Option<NodeId>,
    },
    /// No snapshot installed yet, or the installed content is empty.
    StoreUnready,
}

impl ResolutionResult {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_store_unready(&self) -> bool {
        matches!(self, Self::StoreUnready)
    }

    /// Resolved node, if any.
    pub fn node(&self) -> Option<NodeId> {
        match self {
            Self::Resolved { node, .. } => Some(*node),
            _ => None,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Resolved { .. } => "resolved",
            Self::NotFound { .. } => "not_found",
            Self::StoreUnready => "store_unready",
        }
    }
}

/// Entry point of the routing engine.
#[derive(Debug, Default)]
pub struct RequestResolver {
    snapshot: ArcSwapOption<Snapshot>,
    generation: AtomicU64,
}

impl RequestResolver {
    /// A resolver with nothing installed; every request is `StoreUnready`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolver with `parts` already installed.
    pub fn with_snapshot(parts: SnapshotParts) -> Self {
        let resolver = Self::new();
        resolver.install(parts);
        resolver
    }

    /// Install a new snapshot and return its generation.
    ///
    /// In-flight resolutions finish against the previous snapshot; its cache is
    /// cleared so nothing it holds can be served again.
    pub fn install(&self, parts: SnapshotParts) -> u64 {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let snapshot = Arc::new(Snapshot::new(generation, parts));
        let nodes = snapshot.store().len();
        let published = snapshot.store().published_len();
        let domains = snapshot.domains().len();
        let chain = snapshot.chain().names();

        if let Some(previous) = self.snapshot.swap(Some(snapshot)) {
            previous.cache().clear_all();
        }

        tracing::info!(
            generation,
            nodes,
            published,
            domains,
            chain = ?chain,
            "Snapshot installed"
        );
        metrics::record_snapshot(generation, nodes);
        generation
    }

    /// Currently installed snapshot.
    pub fn snapshot(&self) -> Option<Arc<Snapshot>> {
        self.snapshot.load_full()
    }

    /// Drop every cached route of the current snapshot.
    pub fn clear_cache(&self) {
        if let Some(snapshot) = self.snapshot.load_full() {
            snapshot.cache().clear_all();
        }
    }

    /// Resolve a request URI. `host` overrides a host carried in `uri`.
    pub fn resolve(&self, uri: &str, host: Option<&str>) -> ResolutionResult {
        let start = Instant::now();
        let snapshot = match self.snapshot.load_full() {
            Some(snapshot) if snapshot.store().published_len() > 0 => snapshot,
            _ => {
                tracing::warn!(uri, "Content store not ready");
                metrics::record_resolution("store_unready", "none", start);
                return ResolutionResult::StoreUnready;
            }
        };

        let ctx = snapshot.context();
        let request = attach_domain(&ctx, DocumentRequest::new(uri, host, &ctx.settings.default_culture));
        tracing::debug!(
            request_id = %request.id(),
            uri,
            host = ?request.host(),
            domain = ?request.domain().map(ToString::to_string),
            path = %request.path(),
            generation = snapshot.generation(),
            "Resolving request"
        );

        let request = snapshot.chain().run(&ctx, request);
        let lookup = request.matched_by().unwrap_or_default();
        let result = finish(&ctx, request);

        tracing::debug!(outcome = result.label(), lookup, node = ?result.node(), "Request resolved");
        metrics::record_resolution(result.label(), lookup, start);
        result
    }

    /// Nice URL of a published node, e.g. `/fr/contact`.
    ///
    /// The route is relative to the node's domain (prefix included). Nodes
    /// whose nice path would not resolve back to them get `/<id>` instead.
    pub fn route_for(&self, node: NodeId) -> Option<String> {
        let snapshot = self.snapshot.load_full()?;
        let ctx = snapshot.context();
        if !ctx.store.is_published(node) {
            return None;
        }
        if let Some(route) = ctx.cache.get_route(node) {
            return Some(route);
        }

        let route = build_route(&ctx, node);
        ctx.cache.set_route(node, route.clone());
        Some(route)
    }
}

fn attach_domain(ctx: &LookupContext<'_>, request: DocumentRequest) -> DocumentRequest {
    let matched = request
        .host()
        .and_then(|host| ctx.domains.match_request(host, request.path()))
        .map(|domain| (domain, ctx.domains.strip_prefix(request.path(), domain)));

    match matched {
        Some((domain, relative)) => request.with_domain(domain, relative),
        None => request,
    }
}

fn finish(ctx: &LookupContext<'_>, request: DocumentRequest) -> ResolutionResult {
    match (request.outcome(), request.node()) {
        (Outcome::Resolved, Some(node)) => ResolutionResult::Resolved {
            node,
            template: request
                .template()
                .or_else(|| ctx.store.get(node).and_then(|n| n.template)),
            culture: request.culture().to_string(),
            domain: request.domain().map(ToString::to_string),
            lookup: request.matched_by().unwrap_or_default(),
        },
        _ => ResolutionResult::NotFound {
            culture: request.culture().to_string(),
            page: request.not_found_page(),
        },
    }
}

fn build_route(ctx: &LookupContext<'_>, node: NodeId) -> String {
    let store = ctx.store;
    let lineage = store.lineage(node);
    let domain = ctx.domains.domain_for_node(store, node);

    let (root, start) = match domain {
        Some(domain) => {
            let below_root = lineage
                .iter()
                .position(|&id| id == domain.root)
                .map_or(lineage.len(), |i| i + 1);
            (Some(domain.root), below_root)
        }
        None => {
            let under_first_root = lineage.first().copied() == store.first_root();
            let skip_top = under_first_root
                && (ctx.settings.hide_top_level_from_path || lineage.len() == 1);
            (None, usize::from(skip_top))
        }
    };

    let relative = path::from_segments(
        lineage[start..]
            .iter()
            .filter_map(|&id| store.get(id))
            .map(|n| n.url_name.as_str()),
    );

    let relative = if resolve_route(ctx, root, &relative) == Some(node) {
        relative
    } else {
        tracing::debug!(node = %node, route = %relative, "Nice route is ambiguous, using id route");
        format!("/{node}")
    };

    let prefix = domain.and_then(|d| d.path_prefix.as_deref());
    let full = match prefix {
        Some(prefix) if relative == ROOT => prefix.to_string(),
        Some(prefix) => format!("{prefix}{relative}"),
        None => relative,
    };
    path::encode(&full)
}
