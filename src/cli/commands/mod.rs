//! CLI command implementations.

mod config;
mod doctor;
mod models;
mod setup;
mod summarize;

pub use config::run_config;
pub use doctor::run_doctor;
pub use models::run_models;
pub use setup::run_setup;
pub use summarize::{run_summarize, SummarizeOptions};
