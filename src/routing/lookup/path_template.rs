//! Path-with-template lookup.
//!
//! Handles `/foo/bar/<template>` where `<template>` is a known template alias
//! and `/foo/bar` is the nice path of a node. The trailing segment is only
//! consumed when it names a template; otherwise the request passes untouched.

use crate::domain::path;
use crate::routing::lookup::{resolve_route, Lookup, LookupContext, LookupOutcome};
use crate::routing::request::DocumentRequest;

#[derive(Debug, Clone, Copy)]
pub struct PathTemplateLookup {
    weight: u32,
}

impl PathTemplateLookup {
    pub const NAME: &'static str = "path-template";
    pub const WEIGHT: u32 = 30;

    pub fn new() -> Self {
        Self::with_weight(Self::WEIGHT)
    }

    pub fn with_weight(weight: u32) -> Self {
        Self { weight }
    }
}

impl Default for PathTemplateLookup {
    fn default() -> Self {
        Self::new()
    }
}

impl Lookup for PathTemplateLookup {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn weight(&self) -> u32 {
        self.weight
    }

    fn attempt(&self, ctx: &LookupContext<'_>, request: DocumentRequest) -> LookupOutcome {
        let split = path::split_last_segment(request.path())
            .map(|(parent, alias)| (parent, alias.to_string()));
        let Some((parent, alias)) = split else {
            tracing::debug!(request_id = %request.id(), "No template in path \"/\"");
            return LookupOutcome::Pass(request);
        };

        let Some(template) = ctx.templates.resolve_by_alias(&alias) else {
            tracing::debug!(request_id = %request.id(), alias = %alias, "Not a valid template");
            return LookupOutcome::Pass(request);
        };
        tracing::debug!(request_id = %request.id(), alias = %alias, template = %template, "Valid template");

        match resolve_route(ctx, request.domain_root(), &parent) {
            Some(node) => {
                tracing::debug!(request_id = %request.id(), node = %node, "Found node with template");
                LookupOutcome::Matched(request.resolve_to(node).with_template(template))
            }
            None => LookupOutcome::Pass(request),
        }
    }
}
