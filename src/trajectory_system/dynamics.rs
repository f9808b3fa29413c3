use crate::constants::{GRAVITY, SPECIFIC_IMPULSE};
use crate::control::lander::VehicleState;

use super::kinematics::Kinematics;

/// Closed-form projection of vertical motion under constant gravity and a
/// constant fuel burn rate.
///
/// The rocket-equation log term is replaced by a five-term series in the
/// mass-change fraction `x = burn_rate * burn_duration / total_mass`. Callers
/// must keep `x < 1`; see
/// [`BurnTimeResolver::validate_burn`](crate::control::burn_time::BurnTimeResolver::validate_burn).
pub struct DynamicsEngine;

impl DynamicsEngine {
    /// Projects `state` forward by `burn_duration` without touching it.
    ///
    /// The returned snapshot carries the state's current elapsed time; the
    /// clock only moves on commit.
    pub fn project(state: &VehicleState, burn_rate: f64, burn_duration: f64) -> Kinematics {
        debug_assert!(burn_rate >= 0.0, "Burn rate cannot be negative");
        debug_assert!(burn_duration >= 0.0, "Burn duration cannot be negative");

        let mass_change =
            Self::mass_change_fraction(state.get_total_mass(), burn_rate, burn_duration);
        debug_assert!(mass_change < 1.0, "Mass-change fraction must stay below 1");

        let velocity = state.get_velocity();
        Kinematics {
            velocity: velocity + Self::velocity_delta(burn_duration, mass_change),
            altitude: state.get_altitude()
                + Self::altitude_delta(velocity, burn_duration, mass_change),
            elapsed_time: state.get_elapsed_time(),
        }
    }

    pub fn mass_change_fraction(total_mass: f64, burn_rate: f64, burn_duration: f64) -> f64 {
        (burn_rate * burn_duration) / total_mass
    }

    pub fn velocity_delta(burn_duration: f64, mass_change: f64) -> f64 {
        GRAVITY * burn_duration + SPECIFIC_IMPULSE * Self::velocity_mass_factor(mass_change)
    }

    pub fn altitude_delta(velocity: f64, burn_duration: f64, mass_change: f64) -> f64 {
        -GRAVITY * burn_duration.powi(2) / 2.0 - velocity * burn_duration
            + SPECIFIC_IMPULSE * burn_duration * Self::altitude_mass_factor(mass_change)
    }

    /// Truncated series for `ln(1 - x)`.
    pub fn velocity_mass_factor(x: f64) -> f64 {
        -(x + x.powi(2) / 2.0 + x.powi(3) / 3.0 + x.powi(4) / 4.0 + x.powi(5) / 5.0)
    }

    pub fn altitude_mass_factor(x: f64) -> f64 {
        x / 2.0 + x.powi(2) / 6.0 + x.powi(3) / 12.0 + x.powi(4) / 20.0 + x.powi(5) / 30.0
    }

    /// Time for an unpowered fall from `altitude` starting at `velocity`
    /// (positive downward) to reach the surface.
    pub fn free_fall_time_to_impact(velocity: f64, altitude: f64) -> f64 {
        (-velocity + (velocity.powi(2) + 2.0 * altitude * GRAVITY).sqrt()) / GRAVITY
    }

    pub fn free_fall_velocity(velocity: f64, fall_time: f64) -> f64 {
        velocity + GRAVITY * fall_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn classic_lander() -> VehicleState {
        VehicleState::new(16_500.0, 16_500.0, 120.0, 1.0).unwrap()
    }

    #[test]
    fn test_free_fall_projection() {
        let state = classic_lander();
        let projected = DynamicsEngine::project(&state, 0.0, 10.0);

        assert_abs_diff_eq!(projected.velocity, 1.01, epsilon = 1e-9);
        assert_abs_diff_eq!(projected.altitude, 109.95, epsilon = 1e-6);
        assert_eq!(projected.elapsed_time, 0.0);
    }

    #[test]
    fn test_zero_burn_rate_reduces_to_free_fall() {
        let state = VehicleState::new(3_000.0, 9_000.0, 42.0, 0.37).unwrap();
        let duration = 7.25;
        let projected = DynamicsEngine::project(&state, 0.0, duration);

        assert_eq!(DynamicsEngine::velocity_mass_factor(0.0), 0.0);
        assert_eq!(DynamicsEngine::altitude_mass_factor(0.0), 0.0);
        assert_relative_eq!(
            projected.velocity - state.get_velocity(),
            GRAVITY * duration,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            projected.altitude - state.get_altitude(),
            -GRAVITY * duration * duration / 2.0 - state.get_velocity() * duration,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_full_burn_matches_series_formula() {
        let mut state = classic_lander();
        let first = DynamicsEngine::project(&state, 200.0, 10.0);
        assert_abs_diff_eq!(first.velocity, 0.8974633731159924, epsilon = 1e-12);
        assert_abs_diff_eq!(first.altitude, 110.50682037995632, epsilon = 1e-10);

        state.commit(200.0, 10.0, first);
        assert_eq!(state.get_fuel_mass(), 14_500.0);

        let x: f64 = 2_000.0 / 31_000.0;
        let series_v = -(x + x * x / 2.0 + x.powi(3) / 3.0 + x.powi(4) / 4.0 + x.powi(5) / 5.0);
        let series_a = x / 2.0 + x * x / 6.0 + x.powi(3) / 12.0 + x.powi(4) / 20.0 + x.powi(5) / 30.0;
        let expected_velocity = state.get_velocity() + GRAVITY * 10.0 + SPECIFIC_IMPULSE * series_v;
        let expected_altitude = state.get_altitude() - GRAVITY * 50.0
            - state.get_velocity() * 10.0
            + SPECIFIC_IMPULSE * 10.0 * series_a;

        let second = DynamicsEngine::project(&state, 200.0, 10.0);
        assert_relative_eq!(second.velocity, expected_velocity, epsilon = 1e-12);
        assert_relative_eq!(second.altitude, expected_altitude, epsilon = 1e-12);
    }

    #[test]
    fn test_series_is_not_the_closed_log_form() {
        let x: f64 = 2_000.0 / 18_500.0;
        assert_abs_diff_eq!(x, 0.10811, epsilon = 1e-5);
        let truncated = DynamicsEngine::velocity_mass_factor(x);
        let exact = (1.0 - x).ln();
        assert!(truncated > exact);
        assert_abs_diff_eq!(truncated, exact, epsilon = 1e-6);
    }

    #[test]
    fn test_projection_is_deterministic_and_pure() {
        let state = VehicleState::new(2_000.0, 16_500.0, 12.0, 0.3).unwrap();
        let before = state.clone();
        let first = DynamicsEngine::project(&state, 200.0, 10.0);
        let second = DynamicsEngine::project(&state, 200.0, 10.0);

        assert_eq!(first, second);
        assert_eq!(state, before);
    }

    #[test]
    fn test_thrust_slows_descent() {
        let state = classic_lander();
        let coasting = DynamicsEngine::project(&state, 0.0, 10.0);
        let burning = DynamicsEngine::project(&state, 100.0, 10.0);
        assert!(burning.velocity < coasting.velocity);
        assert!(burning.altitude > coasting.altitude);
    }

    #[test]
    fn test_free_fall_time_to_impact() {
        let fall_time = DynamicsEngine::free_fall_time_to_impact(1.0, 120.0);
        assert_abs_diff_eq!(fall_time, 113.5528725660044, epsilon = 1e-9);
        assert_abs_diff_eq!(
            DynamicsEngine::free_fall_velocity(1.0, fall_time),
            1.1135528725660044,
            epsilon = 1e-12
        );
        assert_eq!(DynamicsEngine::free_fall_time_to_impact(0.5, 0.0), 0.0);
    }
}
