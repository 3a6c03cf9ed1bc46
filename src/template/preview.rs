//! @acp:module "Preview"
//! @acp:summary "Per-section visibility report and final description assembly"
//! @acp:domain template
//! @acp:layer service

use serde::Serialize;

use super::condition::evaluate;
use super::content::{render, render_with_source, ContentSource, RenderContext};
use super::types::{Condition, ResolvedTemplate};

/// @acp:summary "How one section of a resolved template would be generated"
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionPreview {
    pub name: String,
    pub required: bool,
    pub condition: Condition,
    pub will_appear: bool,
    pub source: ContentSource,
}

fn holds(condition: &Condition, ctx: &RenderContext<'_>) -> bool {
    evaluate(condition, &ctx.files, ctx.tickets, ctx.commits.len())
}

/// @acp:summary "Report visibility and content source for every section, in order"
pub fn preview(template: &ResolvedTemplate, ctx: &RenderContext<'_>) -> Vec<SectionPreview> {
    template
        .sections
        .iter()
        .map(|section| SectionPreview {
            name: section.name.clone(),
            required: section.required,
            condition: section.condition.clone(),
            will_appear: holds(&section.condition, ctx),
            source: render_with_source(section, ctx).0,
        })
        .collect()
}

/// @acp:summary "Assemble the markdown description from visible, non-empty sections"
pub fn compose(template: &ResolvedTemplate, ctx: &RenderContext<'_>) -> String {
    let blocks: Vec<String> = template
        .sections
        .iter()
        .filter(|section| holds(&section.condition, ctx))
        .filter_map(|section| {
            let body = render(section, ctx);
            if body.trim().is_empty() {
                None
            } else {
                Some(format!("## {}\n\n{}", section.name, body.trim_end()))
            }
        })
        .collect();

    if blocks.is_empty() {
        String::new()
    } else {
        format!("{}\n", blocks.join("\n\n"))
    }
}
