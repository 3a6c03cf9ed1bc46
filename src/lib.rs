#![forbid(unsafe_code)]

//! @acp:module "prdraft Library"
//! @acp:summary "Pull request description templates: resolution, visibility and content"
//! @acp:domain cli
//! @acp:layer api
//! @acp:stability stable
//!
//! # prdraft
//!
//! Decides which sections a generated pull request description contains,
//! where each section's text comes from, and whether it currently appears.
//!
//! ## Features
//!
//! - **Template discovery**: committed `pull_request_template.md` files win
//! - **Domain detection**: weighted path signals pick a stack-specific preset
//! - **Conditions**: sections shown only for tickets, commit counts or file patterns
//! - **Content**: commit lists, ticket links, checklists and change-type boxes
//!
//! ## Example
//!
//! ```rust,no_run
//! use prdraft::{compose, ChangeSet, RenderContext, ResolveOptions, TemplateResolver};
//! use std::path::Path;
//!
//! fn main() -> prdraft::Result<()> {
//!     let resolver = TemplateResolver::default();
//!     let template = resolver.resolve(Path::new("."), &ResolveOptions::default());
//!
//!     let changes = ChangeSet::from_json_file("changes.json")?;
//!     let ctx = RenderContext::from_change_set(&changes);
//!     print!("{}", compose(&template, &ctx));
//!     Ok(())
//! }
//! ```

pub mod change;
pub mod commands;
pub mod config;
pub mod error;
pub mod template;

// Re-exports
pub use change::{ChangeSet, ChangedFile, Commit};
pub use config::Config;
pub use error::{DraftError, Result};
pub use template::{
    compose, detect_domain, evaluate, get_preset, parse_template, preview, render, AutoPopulate,
    Condition, Domain, RenderContext, ResolveOptions, ResolvedTemplate, Section, TemplateResolver,
    TemplateSource,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
