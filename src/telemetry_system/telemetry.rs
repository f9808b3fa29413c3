use crate::constants::{FEET_PER_MILE, MPH_PER_MILE_PER_SECOND};
use crate::control::lander::VehicleState;

/// Lander readings at the end of one decision period.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeriodRecord {
    pub elapsed_time: f64,
    pub altitude: f64,
    pub velocity: f64,
    pub fuel_mass: f64,
    pub burn_rate: f64,
}

#[derive(Debug, Default)]
pub struct Telemetry {
    pub log: Vec<PeriodRecord>,
    max_speed: f64,
    min_fuel: Option<f64>,
}

impl Telemetry {
    pub fn new() -> Self {
        Telemetry::default()
    }

    pub fn collect_data(&mut self, state: &VehicleState, burn_rate: f64) {
        let record = PeriodRecord {
            elapsed_time: state.get_elapsed_time(),
            altitude: state.get_altitude(),
            velocity: state.get_velocity(),
            fuel_mass: state.get_fuel_mass(),
            burn_rate,
        };

        if record.velocity.abs() > self.max_speed {
            self.max_speed = record.velocity.abs();
        }
        self.min_fuel = Some(match self.min_fuel {
            Some(fuel) => fuel.min(record.fuel_mass),
            None => record.fuel_mass,
        });
        self.log.push(record);
    }

    pub fn get_max_speed(&self) -> f64 {
        self.max_speed
    }

    pub fn get_min_fuel(&self) -> Option<f64> {
        self.min_fuel
    }

    pub fn header() -> &'static str {
        " SEC  MILES  FEET    MPH   FUEL"
    }

    /// Status line in the classic table layout: whole miles plus the
    /// remainder in feet, speed in mph.
    pub fn status_line(state: &VehicleState) -> String {
        let (miles, feet) = Self::split_altitude(state.get_altitude());
        format!(
            "{:4.0}    {:3}  {:4}  {:5}  {:5.0}",
            state.get_elapsed_time().trunc(),
            miles,
            feet,
            Self::to_mph(state.get_velocity()) as i64,
            state.get_fuel_mass().trunc()
        )
    }

    pub fn split_altitude(altitude: f64) -> (i64, i64) {
        let miles = altitude.trunc();
        let feet = FEET_PER_MILE * (altitude - miles);
        (miles as i64, feet as i64)
    }

    pub fn to_mph(velocity: f64) -> f64 {
        velocity * MPH_PER_MILE_PER_SECOND
    }

    pub fn display_data(&self) {
        println!("--- Flight Log ---");
        println!("{}   RATE", Self::header());
        for record in &self.log {
            let (miles, feet) = Self::split_altitude(record.altitude);
            println!(
                "{:4.0}    {:3}  {:4}  {:5}  {:5.0}  {:5.1}",
                record.elapsed_time.trunc(),
                miles,
                feet,
                Self::to_mph(record.velocity) as i64,
                record.fuel_mass.trunc(),
                record.burn_rate
            );
        }
        println!("Max Speed: {:.0} MPH", Self::to_mph(self.max_speed));
        if let Some(fuel) = self.min_fuel {
            println!("Fuel Remaining: {:.0} LBS", fuel);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trajectory_system::kinematics::Kinematics;

    #[test]
    fn test_split_altitude() {
        assert_eq!(Telemetry::split_altitude(120.0), (120, 0));
        assert_eq!(Telemetry::split_altitude(109.5), (109, 2640));
        assert_eq!(Telemetry::split_altitude(0.25), (0, 1320));
    }

    #[test]
    fn test_status_line_for_classic_lander() {
        let state = VehicleState::new(16_500.0, 16_500.0, 120.0, 1.0).unwrap();
        assert_eq!(
            Telemetry::status_line(&state),
            "   0    120     0   3600  16500"
        );
    }

    #[test]
    fn test_collect_data_tracks_extremes() {
        let mut state = VehicleState::new(1_000.0, 5_000.0, 10.0, 0.5).unwrap();
        let mut telemetry = Telemetry::new();
        assert_eq!(telemetry.get_min_fuel(), None);

        telemetry.collect_data(&state, 0.0);
        state.commit(50.0, 4.0, Kinematics::new(-0.7, 10.2, 0.0));
        telemetry.collect_data(&state, 50.0);
        state.commit(10.0, 2.0, Kinematics::new(0.1, 10.1, 0.0));
        telemetry.collect_data(&state, 10.0);

        assert_eq!(telemetry.log.len(), 3);
        assert_eq!(telemetry.get_max_speed(), 0.7);
        assert_eq!(telemetry.get_min_fuel(), Some(780.0));
        assert_eq!(telemetry.log[1].burn_rate, 50.0);
        assert_eq!(telemetry.log[2].elapsed_time, 6.0);
    }
}
