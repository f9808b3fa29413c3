use crate::constants::{GRAVITY, SPECIFIC_IMPULSE, UPWARD_BURN_PAD};
use crate::control::lander::VehicleState;
use crate::errors::SimulationError;
use crate::trajectory_system::dynamics::DynamicsEngine;

/// Bounds burn durations so that projections stay inside the range where
/// the series integration is valid.
pub struct BurnTimeResolver;

impl BurnTimeResolver {
    /// Shortens `requested_duration` when the tank cannot sustain
    /// `burn_rate` for that long. The shortened burn uses all remaining fuel.
    pub fn actual_burn_time(state: &VehicleState, burn_rate: f64, requested_duration: f64) -> f64 {
        if state.get_fuel_mass() < burn_rate * requested_duration {
            state.get_fuel_mass() / burn_rate
        } else {
            requested_duration
        }
    }

    /// Duration after which a burn that starts descending has brought the
    /// velocity through zero, plus a fixed pad.
    pub fn upward_burn_time(state: &VehicleState, burn_rate: f64) -> Result<f64, SimulationError> {
        if burn_rate.is_nan() || burn_rate <= 0.0 {
            return Err(SimulationError::PreconditionViolation(format!(
                "upward burn time needs a positive burn rate, got {}",
                burn_rate
            )));
        }

        let total_mass = state.get_total_mass();
        let velocity = state.get_velocity();
        let factor = (1.0 - (total_mass * GRAVITY) / (SPECIFIC_IMPULSE * burn_rate)) / 2.0;
        let root = factor + (factor * factor + velocity / SPECIFIC_IMPULSE).sqrt();

        Ok((total_mass * velocity) / (SPECIFIC_IMPULSE * burn_rate * root) + UPWARD_BURN_PAD)
    }

    /// Rejects a burn that the dynamics engine cannot project.
    pub fn validate_burn(
        state: &VehicleState,
        burn_rate: f64,
        burn_duration: f64,
    ) -> Result<(), SimulationError> {
        if !burn_rate.is_finite() || burn_rate < 0.0 {
            return Err(SimulationError::PreconditionViolation(format!(
                "burn rate must be a non-negative number, got {}",
                burn_rate
            )));
        }
        if !burn_duration.is_finite() || burn_duration < 0.0 {
            return Err(SimulationError::PreconditionViolation(format!(
                "burn duration must be a non-negative number, got {}",
                burn_duration
            )));
        }

        let mass_change =
            DynamicsEngine::mass_change_fraction(state.get_total_mass(), burn_rate, burn_duration);
        if mass_change >= 1.0 {
            return Err(SimulationError::PreconditionViolation(format!(
                "mass-change fraction {:.6} must stay below 1",
                mass_change
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_requested_duration_kept_when_fuel_suffices() {
        let state = VehicleState::new(16_500.0, 16_500.0, 120.0, 1.0).unwrap();
        assert_eq!(BurnTimeResolver::actual_burn_time(&state, 200.0, 10.0), 10.0);
    }

    #[test]
    fn test_duration_clamped_to_remaining_fuel() {
        let state = VehicleState::new(500.0, 16_500.0, 20.0, 0.2).unwrap();
        let duration = BurnTimeResolver::actual_burn_time(&state, 200.0, 10.0);
        assert_abs_diff_eq!(duration, 2.5, epsilon = 1e-12);
        assert!(200.0 * duration <= state.get_fuel_mass() + 1e-9);
    }

    #[test]
    fn test_free_fall_is_never_clamped() {
        let state = VehicleState::new(0.0, 16_500.0, 20.0, 0.2).unwrap();
        assert_eq!(BurnTimeResolver::actual_burn_time(&state, 0.0, 10.0), 10.0);
    }

    #[test]
    fn test_upward_burn_time_lands_on_zero_velocity() {
        let state = VehicleState::new(16_500.0, 16_500.0, 50.0, 0.05).unwrap();
        let full_period = DynamicsEngine::project(&state, 200.0, 10.0);
        assert!(full_period.velocity < 0.0);

        let duration = BurnTimeResolver::upward_burn_time(&state, 200.0).unwrap();
        assert!(duration > UPWARD_BURN_PAD && duration < 10.0);

        let at_crossing = DynamicsEngine::project(&state, 200.0, duration - UPWARD_BURN_PAD);
        assert_abs_diff_eq!(at_crossing.velocity, 0.0, epsilon = 1e-3);
    }

    #[test]
    fn test_upward_burn_time_with_light_lander() {
        let state = VehicleState::new(2_000.0, 16_500.0, 50.0, 0.02).unwrap();
        let duration = BurnTimeResolver::upward_burn_time(&state, 200.0).unwrap();
        let at_crossing = DynamicsEngine::project(&state, 200.0, duration - UPWARD_BURN_PAD);
        assert_abs_diff_eq!(at_crossing.velocity, 0.0, epsilon = 1e-3);
    }

    #[test]
    fn test_upward_burn_time_rejects_zero_rate() {
        let state = VehicleState::new(16_500.0, 16_500.0, 50.0, 0.05).unwrap();
        assert!(matches!(
            BurnTimeResolver::upward_burn_time(&state, 0.0),
            Err(SimulationError::PreconditionViolation(_))
        ));
    }

    #[test]
    fn test_validate_burn() {
        let state = VehicleState::new(16_500.0, 16_500.0, 120.0, 1.0).unwrap();
        assert!(BurnTimeResolver::validate_burn(&state, 200.0, 10.0).is_ok());
        assert!(BurnTimeResolver::validate_burn(&state, 0.0, 0.0).is_ok());

        for (rate, duration) in [(-1.0, 10.0), (200.0, -0.5), (f64::NAN, 1.0), (200.0, 165.0)] {
            assert!(matches!(
                BurnTimeResolver::validate_burn(&state, rate, duration),
                Err(SimulationError::PreconditionViolation(_))
            ));
        }
    }

    #[test]
    fn test_fuel_only_lander_cannot_burn_everything() {
        let state = VehicleState::new(1_000.0, 0.0, 10.0, 0.1).unwrap();
        let duration = BurnTimeResolver::actual_burn_time(&state, 100.0, 20.0);
        assert!(BurnTimeResolver::validate_burn(&state, 100.0, duration).is_err());
    }
}
