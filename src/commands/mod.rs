//! @acp:module "Commands"
//! @acp:summary "CLI command implementations"
//! @acp:domain cli
//! @acp:layer handler
//!
//! Each command is in its own submodule.

pub mod detect;
pub mod generate;
pub mod presets;
pub mod preview;
pub mod resolve;

pub use detect::{execute_detect, DetectOptions};
pub use generate::{execute_generate, parse_overrides, GenerateOptions};
pub use presets::{execute_presets, PresetsOptions};
pub use preview::{execute_preview, PreviewOptions};
pub use resolve::{execute_resolve, ResolveCmdOptions};
