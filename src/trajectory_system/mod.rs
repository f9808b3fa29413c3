pub mod dynamics;
pub mod impact;
pub mod kinematics;
