//! ATS analysis engine: extraction, keyword matching, scoring, skill gaps,
//! recommendations, optimization suggestions, and benchmarks

pub mod analyzer;
pub mod benchmarks;
pub mod extractor;
pub mod keywords;
pub mod optimizer;
pub mod recommendations;
pub mod scorer;
pub mod skill_gap;

pub use analyzer::{AnalysisRequest, AnalysisResult, AtsEngine, KeywordAnalysis};
pub use benchmarks::Benchmark;
pub use optimizer::OptimizationSuggestion;
pub use recommendations::{PriorityLevel, Recommendation, RecommendationCategory};
pub use skill_gap::SkillGapResult;
