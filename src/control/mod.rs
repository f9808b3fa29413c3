pub mod burn_time;
pub mod lander;
pub mod session;
