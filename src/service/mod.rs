//! Application services: guarded price access, alert evaluation,
//! batch sweeps, and the alert lifecycle.

mod alerts;
mod batch;
mod evaluator;
mod gateway;

pub use alerts::AlertService;
pub use batch::{BatchRunner, BatchSummary};
pub use evaluator::{AlertEvaluator, Evaluation};
pub use gateway::PriceGateway;
