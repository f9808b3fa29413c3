/// Vertical motion of the lander at one instant.
///
/// Velocity is positive downward. A snapshot returned by
/// [`DynamicsEngine::project`](super::dynamics::DynamicsEngine::project) is a
/// candidate only; it has no effect until committed to a vehicle state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kinematics {
    pub velocity: f64,
    pub altitude: f64,
    pub elapsed_time: f64,
}

impl Kinematics {
    pub fn new(velocity: f64, altitude: f64, elapsed_time: f64) -> Self {
        Kinematics {
            velocity,
            altitude,
            elapsed_time,
        }
    }

    pub fn is_below_surface(&self) -> bool {
        self.altitude <= 0.0
    }

    pub fn is_descending(&self) -> bool {
        self.velocity > 0.0
    }
}
