pub mod job_ctx;
pub mod job_flow;
pub mod wizard;

pub use job_ctx::JobCtx;
pub use job_flow::{JobFlow, JobOutcome};
pub use wizard::{McqWizard, WizardState};
