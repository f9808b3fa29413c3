use tracing::{debug, warn};

use crate::constants::{GRAVITY, IMPACT_TIME_TOLERANCE, MAX_IMPACT_ITERATIONS, SPECIFIC_IMPULSE};
use crate::control::lander::VehicleState;
use crate::errors::SimulationError;

use super::dynamics::DynamicsEngine;

/// Moment and speed of surface contact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Touchdown {
    pub velocity: f64,
    pub elapsed_time: f64,
    /// Refinement rounds spent; zero for a closed-form free fall.
    pub iterations: usize,
}

/// Converges on the exact touchdown instant of a burn that is already known
/// to end below the surface.
#[derive(Debug, Clone)]
pub struct ImpactSolver {
    max_iterations: usize,
}

impl Default for ImpactSolver {
    fn default() -> Self {
        ImpactSolver {
            max_iterations: MAX_IMPACT_ITERATIONS,
        }
    }
}

impl ImpactSolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_iterations(max_iterations: usize) -> Self {
        ImpactSolver { max_iterations }
    }

    pub fn get_max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Steps `state` to the surface at constant `burn_rate`.
    ///
    /// Each round estimates the time to impact from the constant-acceleration
    /// root, projects that far and commits. Rounds stop after one commits a
    /// step shorter than [`IMPACT_TIME_TOLERANCE`]. Only call this when a
    /// single projection at `burn_rate` already ends at or below the surface;
    /// otherwise the estimate may never shrink and the solver returns
    /// [`SimulationError::NonConvergence`].
    pub fn calc_impact(
        &self,
        state: &mut VehicleState,
        burn_rate: f64,
    ) -> Result<Touchdown, SimulationError> {
        let mut iterations = 0;

        while state.get_altitude() > 0.0 {
            if iterations >= self.max_iterations {
                return Err(self.non_convergence(iterations, state));
            }
            iterations += 1;

            let time_to_impact = Self::estimate_time_to_impact(state, burn_rate);
            if !time_to_impact.is_finite() || time_to_impact < 0.0 {
                return Err(self.non_convergence(iterations, state));
            }

            let mass_change = DynamicsEngine::mass_change_fraction(
                state.get_total_mass(),
                burn_rate,
                time_to_impact,
            );
            if mass_change >= 1.0 {
                return Err(self.non_convergence(iterations, state));
            }

            let projected = DynamicsEngine::project(state, burn_rate, time_to_impact);
            state.commit(burn_rate, time_to_impact, projected);
            debug!(
                iteration = iterations,
                time_to_impact,
                altitude = state.get_altitude(),
                velocity = state.get_velocity(),
                "impact refinement round"
            );

            if time_to_impact < IMPACT_TIME_TOLERANCE {
                break;
            }
        }

        Ok(Touchdown {
            velocity: state.get_velocity(),
            elapsed_time: state.get_elapsed_time(),
            iterations,
        })
    }

    /// Unpowered fall from the current state to the surface.
    pub fn free_fall_impact(state: &mut VehicleState) -> Touchdown {
        let fall_time =
            DynamicsEngine::free_fall_time_to_impact(state.get_velocity(), state.get_altitude());
        let velocity = DynamicsEngine::free_fall_velocity(state.get_velocity(), fall_time);
        let elapsed_time = state.get_elapsed_time() + fall_time;
        state.settle_on_surface(velocity, elapsed_time);

        Touchdown {
            velocity,
            elapsed_time,
            iterations: 0,
        }
    }

    fn estimate_time_to_impact(state: &VehicleState, burn_rate: f64) -> f64 {
        let velocity = state.get_velocity();
        let altitude = state.get_altitude();
        let acceleration = GRAVITY - SPECIFIC_IMPULSE * (burn_rate / state.get_total_mass());
        let discriminant = (velocity.powi(2) + 2.0 * altitude * acceleration).max(0.0);
        let descent_rate = velocity + discriminant.sqrt();
        if descent_rate <= 0.0 {
            return f64::INFINITY;
        }
        2.0 * altitude / descent_rate
    }

    fn non_convergence(&self, iterations: usize, state: &VehicleState) -> SimulationError {
        warn!(
            iterations,
            altitude = state.get_altitude(),
            velocity = state.get_velocity(),
            "impact solver failed to converge"
        );
        SimulationError::NonConvergence {
            iterations,
            altitude: state.get_altitude(),
        }
    }
}
