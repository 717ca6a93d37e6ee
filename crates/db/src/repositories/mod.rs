//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod automation_rule_repo;
pub mod execution_log_repo;
pub mod lead_repo;
pub mod pipeline_repo;
pub mod stage_repo;

pub use automation_rule_repo::AutomationRuleRepo;
pub use execution_log_repo::ExecutionLogRepo;
pub use lead_repo::LeadRepo;
pub use pipeline_repo::PipelineRepo;
pub use stage_repo::StageRepo;
