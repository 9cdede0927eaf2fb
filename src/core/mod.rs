mod adjust;
mod engine;
mod error;
mod types;

pub use adjust::{FULL_RETIREMENT_AGE, adjust_benefit};
pub use engine::{run_breakeven, simulate};
pub use error::InvalidParameters;
pub use types::{
    BreakevenResult, MAX_SUPPORTED_AGE, SimulationParameters, Trajectory, TrajectoryRow,
};
