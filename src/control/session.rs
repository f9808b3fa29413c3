use tracing::{debug, info};

use crate::constants::{DECISION_PERIOD, MAX_BURN_RATE, MIN_BURN_RATE, PERIOD_EXHAUSTED_THRESHOLD};
use crate::control::burn_time::BurnTimeResolver;
use crate::control::lander::{LanderConfig, VehicleState};
use crate::errors::SimulationError;
use crate::telemetry_system::telemetry::Telemetry;
use crate::trajectory_system::dynamics::DynamicsEngine;
use crate::trajectory_system::impact::{ImpactSolver, Touchdown};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionPhase {
    Flying,
    OutOfFuel,
    Landed(Touchdown),
}

/// What a decision period ended with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PeriodOutcome {
    AwaitingBurnRate,
    OutOfFuel,
    Landed(Touchdown),
}

/// One landing attempt, advanced one pilot decision period at a time.
pub struct DescentSession {
    state: VehicleState,
    phase: SessionPhase,
    solver: ImpactSolver,
    telemetry: Telemetry,
    period_length: f64,
}

impl DescentSession {
    pub fn new(state: VehicleState) -> Self {
        DescentSession {
            state,
            phase: SessionPhase::Flying,
            solver: ImpactSolver::default(),
            telemetry: Telemetry::new(),
            period_length: DECISION_PERIOD,
        }
    }

    pub fn from_config(config: &LanderConfig) -> Result<Self, SimulationError> {
        Ok(Self::new(VehicleState::from_config(config)?))
    }

    pub fn with_solver(mut self, solver: ImpactSolver) -> Self {
        self.solver = solver;
        self
    }

    /// Applies `burn_rate` for one decision period.
    ///
    /// The period is cut into sub-steps: a fuel-limited burn, and a shorter
    /// one ending just past the zero-velocity crossing when thrust turns a
    /// descent into a climb. A step that would end below the surface is
    /// handed to the impact solver instead.
    pub fn run_period(&mut self, burn_rate: f64) -> Result<PeriodOutcome, SimulationError> {
        self.expect_phase(SessionPhase::Flying, "run a decision period")?;
        if !(MIN_BURN_RATE..=MAX_BURN_RATE).contains(&burn_rate) {
            return Err(SimulationError::BurnRateOutOfRange(burn_rate));
        }

        let mut remaining = self.period_length;
        loop {
            if self.state.is_out_of_fuel() {
                info!(elapsed_time = self.state.get_elapsed_time(), "fuel exhausted");
                self.phase = SessionPhase::OutOfFuel;
                return Ok(PeriodOutcome::OutOfFuel);
            }
            if remaining < PERIOD_EXHAUSTED_THRESHOLD {
                self.telemetry.collect_data(&self.state, burn_rate);
                return Ok(PeriodOutcome::AwaitingBurnRate);
            }

            let mut burn_time = BurnTimeResolver::actual_burn_time(&self.state, burn_rate, remaining);
            BurnTimeResolver::validate_burn(&self.state, burn_rate, burn_time)?;
            let mut projected = DynamicsEngine::project(&self.state, burn_rate, burn_time);
            if projected.is_below_surface() {
                return self.land(burn_rate);
            }

            if self.state.kinematics.is_descending() && projected.velocity < 0.0 {
                let upward = BurnTimeResolver::upward_burn_time(&self.state, burn_rate)?;
                burn_time = BurnTimeResolver::actual_burn_time(&self.state, burn_rate, upward);
                BurnTimeResolver::validate_burn(&self.state, burn_rate, burn_time)?;
                projected = DynamicsEngine::project(&self.state, burn_rate, burn_time);
                if projected.is_below_surface() {
                    return self.land(burn_rate);
                }
            }

            self.state.commit(burn_rate, burn_time, projected);
            remaining -= burn_time;
            debug!(
                burn_rate,
                burn_time,
                altitude = self.state.get_altitude(),
                velocity = self.state.get_velocity(),
                fuel = self.state.get_fuel_mass(),
                "committed burn"
            );
        }
    }

    /// Lets an empty lander fall to the surface.
    pub fn resolve_free_fall(&mut self) -> Result<Touchdown, SimulationError> {
        self.expect_phase(SessionPhase::OutOfFuel, "resolve a free fall")?;
        let touchdown = ImpactSolver::free_fall_impact(&mut self.state);
        self.touch_down(touchdown, 0.0);
        Ok(touchdown)
    }

    fn land(&mut self, burn_rate: f64) -> Result<PeriodOutcome, SimulationError> {
        let touchdown = self.solver.calc_impact(&mut self.state, burn_rate)?;
        self.touch_down(touchdown, burn_rate);
        Ok(PeriodOutcome::Landed(touchdown))
    }

    fn touch_down(&mut self, touchdown: Touchdown, burn_rate: f64) {
        info!(
            elapsed_time = touchdown.elapsed_time,
            velocity = touchdown.velocity,
            iterations = touchdown.iterations,
            "touchdown"
        );
        self.phase = SessionPhase::Landed(touchdown);
        self.telemetry.collect_data(&self.state, burn_rate);
    }

    fn expect_phase(&self, expected: SessionPhase, action: &str) -> Result<(), SimulationError> {
        if std::mem::discriminant(&self.phase) == std::mem::discriminant(&expected) {
            Ok(())
        } else {
            Err(SimulationError::SessionError(format!(
                "cannot {} while {:?}",
                action, self.phase
            )))
        }
    }

    pub fn get_state(&self) -> &VehicleState {
        &self.state
    }

    pub fn get_phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn get_telemetry(&self) -> &Telemetry {
        &self.telemetry
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, SessionPhase::Landed(_))
    }
}
