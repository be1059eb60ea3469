//! A single vehicle on the road.

use serde::{Deserialize, Serialize};

/// Physical length of a vehicle in metres, subtracted from bumper gaps.
pub const VEHICLE_LENGTH: f64 = 5.0;

/// Default vehicle mass in kilograms.
pub const VEHICLE_MASS: f64 = 1500.0;

/// State of one vehicle: position along the road, speed and the
/// acceleration applied on the last step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: usize,
    /// Position along the road axis in metres
    pub position: f64,
    /// Speed in m/s, never negative
    pub velocity: f64,
    /// Acceleration applied on the last step in m/s^2
    pub acceleration: f64,
    /// Mass in kilograms
    pub mass: f64,
}

impl Vehicle {
    pub fn new(id: usize, position: f64, velocity: f64) -> Self {
        Self {
            id,
            position,
            velocity,
            acceleration: 0.0,
            mass: VEHICLE_MASS,
        }
    }

    /// Advance the vehicle by one time step under `acceleration`.
    ///
    /// The displacement is integrated from the pre-step speed. Speed is
    /// floored at zero and the vehicle never moves backwards.
    pub fn update(&mut self, acceleration: f64, dt: f64) {
        let old_v = self.velocity;
        let new_v = (old_v + acceleration * dt).max(0.0);
        let dx = (old_v * dt + 0.5 * acceleration * dt * dt).max(0.0);
        self.position += dx;
        self.velocity = new_v;
        self.acceleration = acceleration;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accelerates_and_advances() {
        let mut car = Vehicle::new(0, 10.0, 20.0);
        car.update(2.0, 0.5);
        assert!((car.velocity - 21.0).abs() < 1e-12);
        // dx = 20*0.5 + 0.5*2*0.25 = 10.25
        assert!((car.position - 20.25).abs() < 1e-12);
        assert_eq!(car.acceleration, 2.0);
    }

    #[test]
    fn speed_never_goes_negative() {
        let mut car = Vehicle::new(0, 0.0, 1.0);
        car.update(-10.0, 1.0);
        assert_eq!(car.velocity, 0.0);
    }

    #[test]
    fn never_moves_backwards() {
        let mut car = Vehicle::new(0, 5.0, 0.0);
        car.update(-3.0, 1.0);
        assert_eq!(car.position, 5.0);
    }
}
