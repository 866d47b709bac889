//! Route cache.
//!
//! # Responsibilities
//! - Memoize (domain root, path) → node id so repeated requests skip the tree walk
//! - Memoize node id → route for outbound url building
//! - Count hits and misses
//!
//! # Design Decisions
//! - Sharded concurrent map: lookups on different keys never contend
//! - Misses are never stored; a missing route may appear after the next publish
//! - Identical keys computed from one snapshot hold identical values, so last writer wins
//! - Cleared as a whole when a new snapshot is installed; no per-node invalidation

use dashmap::DashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::content::NodeId;
use crate::domain::path::{self, ROOT};
use crate::observability::metrics;

/// Normalized route: domain root (or none) plus lower-cased canonical path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RouteKey {
    root: Option<NodeId>,
    path: String,
}

impl RouteKey {
    pub fn new(root: Option<NodeId>, route_path: &str) -> Self {
        let mut canonical = String::new();
        for segment in path::segments(route_path) {
            canonical.push('/');
            canonical.push_str(&segment.to_lowercase());
        }
        if canonical.is_empty() {
            canonical.push_str(ROOT);
        }
        Self {
            root,
            path: canonical,
        }
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl fmt::Display for RouteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.root {
            Some(root) => write!(f, "{}{}", root, self.path),
            None => write!(f, "{}", self.path),
        }
    }
}

/// Hit/miss counters and current size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

/// Thread-safe route cache.
#[derive(Debug, Default)]
pub struct RouteCache {
    routes: DashMap<RouteKey, NodeId>,
    reverse: DashMap<NodeId, String>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl RouteCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached node for a route.
    pub fn get(&self, key: &RouteKey) -> Option<NodeId> {
        let found = self.routes.get(key).map(|entry| *entry.value());
        if found.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
        }
        metrics::record_cache_lookup(found.is_some());
        found
    }

    /// Store a resolved route.
    pub fn set(&self, key: RouteKey, node: NodeId) {
        self.routes.insert(key, node);
    }

    /// Cached outbound route for a node.
    pub fn get_route(&self, node: NodeId) -> Option<String> {
        self.reverse.get(&node).map(|entry| entry.value().clone())
    }

    pub fn set_route(&self, node: NodeId, route: String) {
        self.reverse.insert(node, route);
    }

    /// Drop every entry in both directions.
    pub fn clear_all(&self) {
        self.routes.clear();
        self.reverse.clear();
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.routes.len(),
        }
    }
}
