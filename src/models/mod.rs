pub mod analysis;
pub mod answer_key;
pub mod answer_sheet;
pub mod job;
pub mod loaders;
pub mod plan;
pub mod text_analysis;

pub use analysis::{AnswerKeyEntry, McqBatchRequest, McqBatchResult, ScoreSummary, StudentResult};
pub use answer_key::AnswerKey;
pub use answer_sheet::{AnswerSheet, AnswerSheetBatch};
pub use job::{AnalysisJob, McqJob, TextAnalysisJob};
pub use loaders::{load_all_toml_files, load_toml_to_job};
pub use plan::{mcq_capable_plans, mcq_quota, SubscriptionPlan, SUBSCRIPTION_PLANS};
pub use text_analysis::{AnalysisType, Language, Mistake, TextAnalysisRequest, TextAnalysisResult};
