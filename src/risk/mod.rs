//! Risk evaluation: verdict policy, position sizing, overtrading gate.

mod config;
mod error;
mod evaluator;
mod gate;
mod policy;

pub use config::{ResetPolicy, RiskConfig};
pub use error::SubmitError;
pub use evaluator::{position_size, RiskAssessment, RiskEvaluator, Verdict};
pub use gate::OvertradingGate;
pub use policy::RrPolicy;
