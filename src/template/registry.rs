//! Template alias lookup.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::config::schema::TemplateConfig;

/// Identifier of a rendering template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateId(pub u32);

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Resolves template aliases to template ids.
pub trait TemplateRegistry: Send + Sync + fmt::Debug {
    fn resolve_by_alias(&self, alias: &str) -> Option<TemplateId>;
}

/// Case-insensitive alias table.
#[derive(Debug, Clone, Default)]
pub struct TemplateTable {
    by_alias: HashMap<String, TemplateId>,
}

impl TemplateTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from configuration entries. Later entries win on duplicate aliases.
    pub fn from_config(templates: &[TemplateConfig]) -> Self {
        templates
            .iter()
            .map(|t| (t.alias.clone(), TemplateId(t.id)))
            .collect()
    }

    /// Register an alias, returning the template it replaced.
    pub fn insert(&mut self, alias: impl AsRef<str>, id: TemplateId) -> Option<TemplateId> {
        self.by_alias.insert(alias.as_ref().to_lowercase(), id)
    }

    pub fn len(&self) -> usize {
        self.by_alias.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_alias.is_empty()
    }
}

impl TemplateRegistry for TemplateTable {
    fn resolve_by_alias(&self, alias: &str) -> Option<TemplateId> {
        if alias.is_empty() {
            return None;
        }
        self.by_alias.get(&alias.to_lowercase()).copied()
    }
}

impl<S: AsRef<str>> FromIterator<(S, TemplateId)> for TemplateTable {
    fn from_iter<I: IntoIterator<Item = (S, TemplateId)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (alias, id) in iter {
            table.insert(alias, id);
        }
        table
    }
}
