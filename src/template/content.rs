//! @acp:module "Section Content"
//! @acp:summary "Generate the body text of one section from the change-set"
//! @acp:domain template
//! @acp:layer logic
//!
//! Content is resolved in a fixed order: caller override, auto-populated
//! content, the section placeholder, and finally a marker for required
//! sections. An `extracted` section without tickets renders nothing at all.

use std::collections::BTreeMap;

use serde::Serialize;

use super::change_type::{branch_prefix, generate_change_type};
use super::checklist::generate_checklist;
use super::summary::synthesize_summary;
use super::types::{AutoPopulate, Domain, Section};
use crate::change::{ChangeSet, Commit};

/// Rendered when a commits section has nothing to list
pub const NO_COMMITS: &str = "_No commits found._";

const TICKET_PLACEHOLDER: &str = "{ticket}";

/// Where the rendered body of a section comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentSource {
    Override,
    Auto,
    Placeholder,
    Marker,
    Empty,
}

impl ContentSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentSource::Override => "override",
            ContentSource::Auto => "auto",
            ContentSource::Placeholder => "placeholder",
            ContentSource::Marker => "marker",
            ContentSource::Empty => "empty",
        }
    }
}

/// @acp:summary "Borrowed view of everything section content is generated from"
#[derive(Debug, Clone, Default)]
pub struct RenderContext<'a> {
    pub commits: &'a [Commit],
    pub files: Vec<&'a str>,
    pub tickets: &'a [String],
    pub ticket_link_format: Option<&'a str>,
    pub overrides: Option<&'a BTreeMap<String, String>>,
    pub branch_name: Option<&'a str>,
    pub branch_prefix: Option<&'a str>,
    pub domain: Option<Domain>,
}

impl<'a> RenderContext<'a> {
    pub fn from_change_set(change_set: &'a ChangeSet) -> Self {
        let branch_name = change_set.branch.as_deref();
        Self {
            commits: &change_set.commits,
            files: change_set.file_paths(),
            tickets: &change_set.tickets,
            ticket_link_format: change_set.ticket_link_format.as_deref(),
            overrides: None,
            branch_name,
            branch_prefix: branch_name.and_then(branch_prefix),
            domain: None,
        }
    }

    pub fn with_overrides(mut self, overrides: &'a BTreeMap<String, String>) -> Self {
        self.overrides = Some(overrides);
        self
    }

    pub fn with_domain(mut self, domain: Option<Domain>) -> Self {
        self.domain = domain;
        self
    }

    pub fn with_branch_prefix(mut self, prefix: &'a str) -> Self {
        self.branch_prefix = Some(prefix);
        self
    }

    /// Use `format` only when the change-set did not bring its own
    pub fn with_fallback_link_format(mut self, format: Option<&'a str>) -> Self {
        if self.ticket_link_format.is_none() {
            self.ticket_link_format = format;
        }
        self
    }

    fn override_for(&self, name: &str) -> Option<&'a str> {
        let overrides = self.overrides?;
        overrides
            .get(name)
            .or_else(|| overrides.get(&name.to_lowercase()))
            .map(String::as_str)
    }
}

/// @acp:summary "Body text for a section; empty means the section is omitted"
pub fn render(section: &Section, ctx: &RenderContext<'_>) -> String {
    render_with_source(section, ctx).1
}

/// Body text together with the step of the resolution order that produced it
pub fn render_with_source(section: &Section, ctx: &RenderContext<'_>) -> (ContentSource, String) {
    if let Some(text) = ctx.override_for(&section.name) {
        return (ContentSource::Override, text.to_string());
    }

    let auto = match section.auto_populate {
        AutoPopulate::Commits => render_commits(ctx.commits),
        AutoPopulate::Extracted => {
            if ctx.tickets.is_empty() {
                return (ContentSource::Empty, String::new());
            }
            render_tickets(ctx.tickets, ctx.ticket_link_format)
        }
        AutoPopulate::Purpose => synthesize_summary(ctx.commits, ctx.branch_name),
        AutoPopulate::Checklist => generate_checklist(&ctx.files, ctx.domain),
        AutoPopulate::ChangeType => generate_change_type(ctx.branch_prefix, &ctx.files),
        AutoPopulate::None => String::new(),
    };
    if !auto.is_empty() {
        return (ContentSource::Auto, auto);
    }

    if let Some(placeholder) = section.placeholder.as_deref() {
        return (ContentSource::Placeholder, placeholder.to_string());
    }

    if section.required {
        (ContentSource::Marker, format!("[add {} here]", section.name))
    } else {
        (ContentSource::Empty, String::new())
    }
}

fn render_commits(commits: &[Commit]) -> String {
    if commits.is_empty() {
        return NO_COMMITS.to_string();
    }
    commits
        .iter()
        .map(|c| format!("- {} ({})", c.title(), c.short_hash()))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_tickets(tickets: &[String], link_format: Option<&str>) -> String {
    tickets
        .iter()
        .map(|ticket| format!("- {}", ticket_link(ticket, link_format)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Apply a link format to a ticket id
///
/// A format containing `{ticket}` is filled in; any other format is taken as
/// a URL prefix.
pub fn ticket_link(ticket: &str, link_format: Option<&str>) -> String {
    match link_format.map(str::trim).filter(|f| !f.is_empty()) {
        Some(format) if format.contains(TICKET_PLACEHOLDER) => {
            format.replace(TICKET_PLACEHOLDER, ticket)
        }
        Some(prefix) => format!("[{ticket}]({prefix}{ticket})"),
        None => ticket.to_string(),
    }
}
