//! Shared fixtures for integration tests.
//!
//! ```text
//! en (1000)                         fr (2000)
//! ├── about (1001)                  ├── contact (2001)  alias "latest"
//! ├── news (1002)                   ├── a-propos (2002)
//! │   └── launch (1003)  alias      └── not-found (2099)
//! │                      "latest"
//! ├── drafts (1004) unpublished
//! │   └── secret (1005)
//! └── not-found (1099)
//! ```

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use content_router::config::schema::{NotFoundPageConfig, RoutingConfig};
use content_router::content::{ContentNode, ContentStore, NodeId};
use content_router::domain::{Domain, DomainRegistry};
use content_router::template::{TemplateId, TemplateTable};
use content_router::{RequestResolver, SnapshotParts};

pub const EN_ROOT: NodeId = NodeId(1000);
pub const FR_ROOT: NodeId = NodeId(2000);
pub const FANCY: TemplateId = TemplateId(7);

pub fn site_nodes() -> Vec<ContentNode> {
    let en = ContentNode::root(1000, "en").with_template(TemplateId(1));
    let about = ContentNode::child_of(&en, 1001, "about").with_sort_order(1);
    let news = ContentNode::child_of(&en, 1002, "news").with_sort_order(2);
    let launch = ContentNode::child_of(&news, 1003, "launch").with_aliases(["latest"]);
    let drafts = ContentNode::child_of(&en, 1004, "drafts").unpublished();
    let secret = ContentNode::child_of(&drafts, 1005, "secret");
    let en_404 = ContentNode::child_of(&en, 1099, "not-found").with_sort_order(99);

    let fr = ContentNode::root(2000, "fr").with_sort_order(1);
    let contact = ContentNode::child_of(&fr, 2001, "contact").with_aliases(["latest"]);
    let a_propos = ContentNode::child_of(&fr, 2002, "a-propos");
    let fr_404 = ContentNode::child_of(&fr, 2099, "not-found");

    vec![en, about, news, launch, drafts, secret, en_404, fr, contact, a_propos, fr_404]
}

pub fn site_domains() -> DomainRegistry {
    DomainRegistry::new(vec![
        Domain::new("example.com", EN_ROOT, "en-US").unwrap(),
        Domain::new("example.fr", FR_ROOT, "fr-FR").unwrap(),
        Domain::new("*.example.com", EN_ROOT, "en-GB").unwrap(),
        Domain::new("example.com", FR_ROOT, "fr-FR").unwrap().with_path_prefix("/fr"),
    ])
    .unwrap()
}

pub fn site_settings() -> RoutingConfig {
    RoutingConfig {
        not_found_page: Some(NodeId(1099)),
        not_found_pages: vec![NotFoundPageConfig {
            culture: "fr-FR".into(),
            node: NodeId(2099),
        }],
        ..RoutingConfig::default()
    }
}

pub fn site_parts() -> SnapshotParts {
    let templates: TemplateTable = [("fancytemplate", FANCY), ("print", TemplateId(8))]
        .into_iter()
        .collect();

    SnapshotParts::new(ContentStore::from_nodes(site_nodes()).unwrap())
        .with_domains(site_domains())
        .with_templates(Arc::new(templates))
        .with_settings(site_settings())
}

pub fn site_resolver() -> RequestResolver {
    RequestResolver::with_snapshot(site_parts())
}

/// Write `router.toml` and `nodes.json` describing the fixture site; returns the config path.
pub fn write_site(dir: &Path) -> PathBuf {
    let config = r#"
[routing]
default_culture = "en-US"
not_found_page = 1099

[[routing.not_found_pages]]
culture = "fr-FR"
node = 2099

[content]
snapshot_path = "nodes.json"

[[domains]]
host = "example.com"
root = 1000
culture = "en-US"

[[domains]]
host = "example.fr"
root = 2000
culture = "fr-FR"

[[domains]]
host = "*.example.com"
root = 1000
culture = "en-GB"

[[domains]]
host = "example.com"
path_prefix = "/fr"
root = 2000
culture = "fr-FR"

[[templates]]
alias = "fancytemplate"
id = 7

[[templates]]
alias = "print"
id = 8
"#;
    let config_path = dir.join("router.toml");
    std::fs::write(&config_path, config).unwrap();
    std::fs::write(
        dir.join("nodes.json"),
        serde_json::to_string_pretty(&site_nodes()).unwrap(),
    )
    .unwrap();
    config_path
}
