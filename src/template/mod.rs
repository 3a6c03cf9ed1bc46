//! @acp:module "Template"
//! @acp:summary "PR description template resolution, section visibility and content generation"
//! @acp:domain template
//! @acp:layer feature

pub mod change_type;
pub mod checklist;
pub mod condition;
pub mod content;
pub mod detector;
pub mod parser;
pub mod presets;
pub mod preview;
pub mod resolver;
pub mod summary;
pub mod types;

pub use change_type::{infer_change_type, ChangeCategory};
pub use checklist::generate_checklist;
pub use condition::evaluate;
pub use content::{render, ContentSource, RenderContext};
pub use detector::{detect_domain, DetectionReport, DomainDetector, DEFAULT_DOMAIN};
pub use parser::parse_template;
pub use presets::{get_preset, has_preset, list_presets, DEFAULT_PRESET};
pub use preview::{compose, preview, SectionPreview};
pub use resolver::{ResolveOptions, TemplateResolver};
pub use summary::synthesize_summary;
pub use types::*;
