// Physical Constants
pub const GRAVITY: f64 = 0.001; // miles/s²
pub const SPECIFIC_IMPULSE: f64 = 1.8; // miles/s (fuel measured by mass)

// Solver Parameters
pub const IMPACT_TIME_TOLERANCE: f64 = 0.005; // s
pub const MAX_IMPACT_ITERATIONS: usize = 1_000;
pub const UPWARD_BURN_PAD: f64 = 0.05; // s, keeps the next step off the exact zero crossing

// Session Parameters
pub const DECISION_PERIOD: f64 = 10.0; // s
pub const PERIOD_EXHAUSTED_THRESHOLD: f64 = 0.001; // s
pub const FUEL_EXHAUSTED_THRESHOLD: f64 = 0.001; // lbs
pub const MIN_BURN_RATE: f64 = 0.0; // lbs/s
pub const MAX_BURN_RATE: f64 = 200.0; // lbs/s

// Lander Defaults
pub const DEFAULT_FUEL_MASS: f64 = 16_500.0; // lbs
pub const DEFAULT_DRY_MASS: f64 = 16_500.0; // lbs
pub const DEFAULT_ALTITUDE: f64 = 120.0; // miles
pub const DEFAULT_VELOCITY: f64 = 1.0; // miles/s, downward

// Display Constants
pub const MPH_PER_MILE_PER_SECOND: f64 = 3600.0;
pub const FEET_PER_MILE: f64 = 5280.0;
pub const CRATER_DEPTH_PER_MPH: f64 = 0.227; // feet
pub const PERFECT_LANDING_MPH: f64 = 1.2;
pub const GOOD_LANDING_MPH: f64 = 10.0;
pub const SURVIVABLE_LANDING_MPH: f64 = 60.0;
