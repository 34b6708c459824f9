//! ATS insight library

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod history;
pub mod input;
pub mod output;
pub mod resume;

pub use analysis::analyzer::{AnalysisResult, AtsEngine};
pub use config::Config;
pub use error::{AtsInsightError, Result};
