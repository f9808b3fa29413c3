use crate::constants::{
    CRATER_DEPTH_PER_MPH, GOOD_LANDING_MPH, MPH_PER_MILE_PER_SECOND, PERFECT_LANDING_MPH,
    SURVIVABLE_LANDING_MPH,
};
use crate::trajectory_system::impact::Touchdown;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LandingOutcome {
    Perfect,
    Good,
    CraftDamaged,
    Destroyed { crater_depth: f64 },
}

impl LandingOutcome {
    pub fn classify(impact_mph: f64) -> Self {
        if impact_mph < PERFECT_LANDING_MPH {
            LandingOutcome::Perfect
        } else if impact_mph <= GOOD_LANDING_MPH {
            LandingOutcome::Good
        } else if impact_mph <= SURVIVABLE_LANDING_MPH {
            LandingOutcome::CraftDamaged
        } else {
            LandingOutcome::Destroyed {
                crater_depth: impact_mph * CRATER_DEPTH_PER_MPH,
            }
        }
    }

    pub fn is_survivable(&self) -> bool {
        !matches!(self, LandingOutcome::Destroyed { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LandingReport {
    pub elapsed_time: f64,
    pub impact_mph: f64,
    pub outcome: LandingOutcome,
}

impl LandingReport {
    pub fn from_touchdown(touchdown: &Touchdown) -> Self {
        let impact_mph = touchdown.velocity * MPH_PER_MILE_PER_SECOND;
        LandingReport {
            elapsed_time: touchdown.elapsed_time,
            impact_mph,
            outcome: LandingOutcome::classify(impact_mph),
        }
    }
}
