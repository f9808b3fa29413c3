pub mod constants;
pub mod control;
pub mod errors;
pub mod telemetry_system;
pub mod trajectory_system;

pub use constants::*;
pub use control::burn_time::BurnTimeResolver;
pub use control::lander::{LanderConfig, VehicleState};
pub use control::session::{DescentSession, PeriodOutcome, SessionPhase};
pub use errors::SimulationError;

// Re-export commonly used items from trajectory_system
pub use trajectory_system::dynamics::DynamicsEngine;
pub use trajectory_system::impact::{ImpactSolver, Touchdown};
pub use trajectory_system::kinematics::Kinematics;

// Re-export commonly used items from telemetry_system
pub use telemetry_system::landing_report::{LandingOutcome, LandingReport};
pub use telemetry_system::telemetry::{PeriodRecord, Telemetry};
