// ABOUTME: Command module aggregator for the moorage CLI.
// ABOUTME: Re-exports plan and validate command handlers.

mod plan;
mod validate;

pub use plan::plan;
pub use validate::validate;
