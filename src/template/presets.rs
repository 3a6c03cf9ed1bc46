//! @acp:module "Preset Catalog"
//! @acp:summary "Built-in section lists for each supported domain plus generic presets"
//! @acp:domain template
//! @acp:layer data
//!
//! The catalog is a literal table built once on first use. It is never
//! mutated; lookups hand out shared slices.

use once_cell::sync::Lazy;

use super::types::{AutoPopulate, Condition, Section};

/// Name of the fallback preset
pub const DEFAULT_PRESET: &str = "default";

const UI_FILES: &str = r"\.(tsx|jsx|vue|svelte|css|scss|sass|less|html|svg|png|jpe?g|gif|storyboard|xib)$";
const MOBILE_UI_FILES: &str = r"\.(swift|kt|dart|storyboard|xib)$|res/layout/|Assets\.xcassets/";
const MOBILE_RELEASE_FILES: &str =
    r"(^|/)(Info\.plist|AndroidManifest\.xml|pubspec\.yaml|Podfile|build\.gradle(\.kts)?)$";
const API_FILES: &str =
    r"(^|/)(api|routes?|controllers?|handlers?|endpoints?)(/|\.)|openapi|swagger|\.proto$|\.graphql$";
const SCHEMA_FILES: &str =
    r"(^|/)(api|routes?|schemas?|migrations?)/|openapi|swagger|\.(proto|graphql|sql|avsc)$";
const MIGRATION_FILES: &str = r"(^|/)migrations?/|\.sql$";
const INFRA_FILES: &str =
    r"\.(tf|tfvars|hcl)$|(^|/)(helm|charts|k8s|kubernetes|ansible|terraform)/|(^|/)Dockerfile|docker-compose";
const AUTH_FILES: &str = r"(^|/)(auth|security|crypto|permissions?|policies)/|\.rego$|oauth|jwt|session";
const MODEL_FILES: &str = r"\.(pt|pth|onnx|h5|pkl|joblib|safetensors|ckpt)$|(^|/)models?/";
const DATA_FILES: &str = r"\.(csv|parquet|tsv|jsonl|arrow)$|(^|/)data(sets)?/|dvc\.(yaml|lock)$|\.dvc$";

static PRESETS: Lazy<Vec<(&'static str, &'static str, Vec<Section>)>> = Lazy::new(|| {
    vec![
        (DEFAULT_PRESET, "General-purpose description with checklist", default_preset()),
        ("minimal", "Summary, commits and tickets only", minimal_preset()),
        ("detailed", "Motivation, screenshots and review guidance", detailed_preset()),
        ("mobile", "iOS/Android apps: devices, screenshots, release impact", mobile_preset()),
        ("frontend", "Web UI: screenshots, browsers, accessibility", frontend_preset()),
        ("backend", "Services: API, breaking changes, migrations", backend_preset()),
        ("devops", "Infrastructure: deployment and rollback plans", devops_preset()),
        ("security", "Security impact and threat model", security_preset()),
        ("ml", "Models, datasets and evaluation results", ml_preset()),
    ]
});

/// @acp:summary "Look up a preset by name; unknown names yield the default preset"
pub fn get_preset(name: &str) -> &'static [Section] {
    find_preset(name).unwrap_or_else(default_sections)
}

/// Whether `name` is a known preset (case-insensitive)
pub fn has_preset(name: &str) -> bool {
    find_preset(name).is_some()
}

/// Available presets with their descriptions, in catalog order
pub fn list_presets() -> Vec<(&'static str, &'static str)> {
    PRESETS
        .iter()
        .map(|(name, description, _)| (*name, *description))
        .collect()
}

fn find_preset(name: &str) -> Option<&'static [Section]> {
    let wanted = name.trim();
    PRESETS
        .iter()
        .find(|(preset, _, _)| preset.eq_ignore_ascii_case(wanted))
        .map(|(_, _, sections)| sections.as_slice())
}

fn default_sections() -> &'static [Section] {
    PRESETS[0].2.as_slice()
}

// Building blocks shared by most presets

fn summary() -> Section {
    Section::new("Summary", AutoPopulate::Purpose).required()
}

fn changes() -> Section {
    Section::new("Changes", AutoPopulate::Commits).required()
}

fn related_tickets() -> Section {
    Section::new("Related Tickets", AutoPopulate::Extracted).with_condition(Condition::HasTickets)
}

fn type_of_change() -> Section {
    Section::new("Type of Change", AutoPopulate::ChangeType)
}

fn testing() -> Section {
    Section::new("Testing", AutoPopulate::None)
        .required()
        .with_placeholder("Describe how these changes were tested.")
}

fn checklist() -> Section {
    Section::new("Checklist", AutoPopulate::Checklist)
}

fn author_section(name: &str, placeholder: &str) -> Section {
    Section::new(name, AutoPopulate::None).with_placeholder(placeholder)
}

fn default_preset() -> Vec<Section> {
    vec![
        summary(),
        changes(),
        related_tickets(),
        type_of_change(),
        testing(),
        checklist(),
    ]
}

fn minimal_preset() -> Vec<Section> {
    vec![summary(), changes(), related_tickets()]
}

fn detailed_preset() -> Vec<Section> {
    vec![
        summary(),
        author_section("Motivation", "Why is this change needed? What problem does it solve?")
            .required(),
        changes(),
        related_tickets(),
        type_of_change(),
        author_section("Screenshots", "Before / after screenshots of the UI changes.")
            .with_condition(Condition::file_pattern(UI_FILES)),
        author_section("Review Guide", "Suggested order for reviewing the commits.")
            .with_condition(Condition::commit_count_gt(5)),
        testing(),
        checklist(),
    ]
}

fn mobile_preset() -> Vec<Section> {
    vec![
        summary(),
        changes(),
        related_tickets(),
        type_of_change(),
        author_section("Screenshots / Recordings", "Screens or recordings of the change on device.")
            .with_condition(Condition::file_pattern(MOBILE_UI_FILES)),
        author_section("Device Testing", "Devices and OS versions tested:").required(),
        author_section(
            "Release Impact",
            "Permissions, app store metadata or minimum OS changes.",
        )
        .with_condition(Condition::file_pattern(MOBILE_RELEASE_FILES)),
        checklist(),
    ]
}

fn frontend_preset() -> Vec<Section> {
    vec![
        summary(),
        changes(),
        related_tickets(),
        type_of_change(),
        author_section("Screenshots", "Before / after screenshots of the UI changes.")
            .with_condition(Condition::file_pattern(UI_FILES)),
        author_section("Browser Testing", "Browsers and viewports tested:").required(),
        author_section("Accessibility", "Keyboard navigation, contrast and screen reader notes.")
            .with_condition(Condition::file_pattern(UI_FILES)),
        checklist(),
    ]
}

fn backend_preset() -> Vec<Section> {
    vec![
        summary(),
        changes(),
        related_tickets(),
        type_of_change(),
        author_section("API Changes", "New or modified endpoints, request and response shapes.")
            .with_condition(Condition::file_pattern(API_FILES)),
        author_section("Breaking Changes", "What breaks for existing clients and how to migrate.")
            .with_condition(Condition::file_pattern(SCHEMA_FILES)),
        author_section("Database Migrations", "Migration steps and rollback procedure.")
            .with_condition(Condition::file_pattern(MIGRATION_FILES)),
        testing(),
        checklist(),
    ]
}

fn devops_preset() -> Vec<Section> {
    vec![
        summary(),
        changes(),
        related_tickets(),
        type_of_change(),
        author_section("Infrastructure Changes", "Resources created, modified or destroyed.")
            .with_condition(Condition::file_pattern(INFRA_FILES)),
        author_section("Deployment Plan", "Order of rollout and environments affected.").required(),
        author_section("Rollback Plan", "How to revert if the rollout fails.").required(),
        checklist(),
    ]
}

fn security_preset() -> Vec<Section> {
    vec![
        summary(),
        changes(),
        related_tickets(),
        type_of_change(),
        author_section("Security Impact", "Attack surface, data exposure and mitigations.")
            .required(),
        author_section("Threat Model", "Threats considered for the touched components.")
            .with_condition(Condition::file_pattern(AUTH_FILES)),
        testing(),
        checklist(),
    ]
}

fn ml_preset() -> Vec<Section> {
    vec![
        summary(),
        changes(),
        related_tickets(),
        type_of_change(),
        author_section("Model Changes", "Architecture, hyperparameters or checkpoint updates.")
            .with_condition(Condition::file_pattern(MODEL_FILES)),
        author_section("Dataset Changes", "Data sources, splits and preprocessing changes.")
            .with_condition(Condition::file_pattern(DATA_FILES)),
        author_section("Evaluation Results", "Metrics before and after this change.").required(),
        checklist(),
    ]
}
