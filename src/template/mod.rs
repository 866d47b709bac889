//! Template registry boundary.
//!
//! Rendering lives elsewhere; routing only needs to know whether a trailing
//! path segment names a template, and which one.

pub mod registry;

pub use registry::{TemplateId, TemplateRegistry, TemplateTable};
