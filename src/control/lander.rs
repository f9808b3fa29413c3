use crate::constants::{
    DEFAULT_ALTITUDE, DEFAULT_DRY_MASS, DEFAULT_FUEL_MASS, DEFAULT_VELOCITY,
    FUEL_EXHAUSTED_THRESHOLD,
};
use crate::errors::SimulationError;
use crate::trajectory_system::kinematics::Kinematics;

/// Initial parameters for a landing session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LanderConfig {
    pub fuel_mass: f64,
    pub dry_mass: f64,
    pub altitude: f64,
    pub velocity: f64,
}

impl Default for LanderConfig {
    fn default() -> Self {
        LanderConfig {
            fuel_mass: DEFAULT_FUEL_MASS,
            dry_mass: DEFAULT_DRY_MASS,
            altitude: DEFAULT_ALTITUDE,
            velocity: DEFAULT_VELOCITY,
        }
    }
}

impl LanderConfig {
    pub fn validate(&self) -> Result<(), SimulationError> {
        let fields = [
            ("fuel mass", self.fuel_mass),
            ("dry mass", self.dry_mass),
            ("altitude", self.altitude),
            ("velocity", self.velocity),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(SimulationError::InitializationError(format!(
                    "{} must be finite, got {}",
                    name, value
                )));
            }
        }

        if self.fuel_mass < 0.0 {
            return Err(SimulationError::InitializationError(format!(
                "fuel mass cannot be negative, got {}",
                self.fuel_mass
            )));
        }
        if self.dry_mass < 0.0 {
            return Err(SimulationError::InitializationError(format!(
                "dry mass cannot be negative, got {}",
                self.dry_mass
            )));
        }
        if self.fuel_mass + self.dry_mass <= 0.0 {
            return Err(SimulationError::InitializationError(
                "total mass must be positive".to_string(),
            ));
        }
        if self.altitude < 0.0 {
            return Err(SimulationError::InitializationError(format!(
                "altitude cannot be negative, got {}",
                self.altitude
            )));
        }
        Ok(())
    }
}

/// Mutable lander state for one session.
///
/// Masses are private so that `total_mass == dry_mass + fuel_mass` holds
/// after every change; the only mutation path is [`VehicleState::commit`].
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleState {
    pub kinematics: Kinematics,
    fuel_mass: f64,
    dry_mass: f64,
    total_mass: f64,
}

impl VehicleState {
    pub fn new(
        fuel_mass: f64,
        dry_mass: f64,
        altitude: f64,
        velocity: f64,
    ) -> Result<Self, SimulationError> {
        Self::from_config(&LanderConfig {
            fuel_mass,
            dry_mass,
            altitude,
            velocity,
        })
    }

    pub fn from_config(config: &LanderConfig) -> Result<Self, SimulationError> {
        config.validate()?;
        Ok(VehicleState {
            kinematics: Kinematics::new(config.velocity, config.altitude, 0.0),
            fuel_mass: config.fuel_mass,
            dry_mass: config.dry_mass,
            total_mass: config.dry_mass + config.fuel_mass,
        })
    }

    /// Applies an accepted projection: moves to `projected`, advances the
    /// clock by `burn_duration` and burns `burn_rate * burn_duration` of fuel.
    pub fn commit(&mut self, burn_rate: f64, burn_duration: f64, projected: Kinematics) {
        self.kinematics.velocity = projected.velocity;
        self.kinematics.altitude = projected.altitude;
        self.kinematics.elapsed_time += burn_duration;
        // fuel / rate * rate can land a hair below zero
        self.fuel_mass = (self.fuel_mass - burn_rate * burn_duration).max(0.0);
        self.total_mass = self.dry_mass + self.fuel_mass;
    }

    /// Lands the vehicle at the given touchdown speed and time.
    pub(crate) fn settle_on_surface(&mut self, velocity: f64, elapsed_time: f64) {
        self.kinematics = Kinematics::new(velocity, 0.0, elapsed_time);
    }

    pub fn is_out_of_fuel(&self) -> bool {
        self.fuel_mass < FUEL_EXHAUSTED_THRESHOLD
    }

    pub fn get_velocity(&self) -> f64 {
        self.kinematics.velocity
    }

    pub fn get_altitude(&self) -> f64 {
        self.kinematics.altitude
    }

    pub fn get_elapsed_time(&self) -> f64 {
        self.kinematics.elapsed_time
    }

    pub fn get_fuel_mass(&self) -> f64 {
        self.fuel_mass
    }

    pub fn get_dry_mass(&self) -> f64 {
        self.dry_mass
    }

    pub fn get_total_mass(&self) -> f64 {
        self.total_mass
    }
}
