//! The Intelligent Driver Model.
//!
//! Computes the acceleration of an "ego" vehicle from its own speed and
//! the bumper-to-bumper gap to the vehicle ahead. See Treiber et al.,
//! "Congested traffic states in empirical observations and microscopic
//! simulations" (2000).

use crate::config::IdmParams;
use crate::vehicle::{Vehicle, VEHICLE_LENGTH};

#[derive(Debug, Clone)]
pub struct IdmModel {
    params: IdmParams,
}

impl IdmModel {
    pub fn new(params: IdmParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &IdmParams {
        &self.params
    }

    /// Acceleration of `ego` following `lead`, in m/s^2.
    ///
    /// No lead means an open road: the gap is infinite and the approach
    /// rate zero. A non-positive gap (vehicles touching or overlapping)
    /// returns the emergency deceleration `-b`. The result is always
    /// finite and clamped to `[-b, a_max]`.
    pub fn acceleration(&self, ego: &Vehicle, lead: Option<&Vehicle>) -> f64 {
        let p = &self.params;
        let v = ego.velocity;

        let (gap, delta_v) = match lead {
            None => (f64::INFINITY, 0.0),
            Some(lead) => {
                let gap = lead.position - ego.position - VEHICLE_LENGTH;
                if gap <= 0.0 {
                    return -p.b;
                }
                (gap, v - lead.velocity)
            }
        };

        let s_star = p.s0 + v * p.t_headway + v * delta_v / (2.0 * (p.a_max * p.b).sqrt());
        let free_term = (v / p.v0).powf(p.delta);
        let gap_term = if gap.is_finite() {
            (s_star / gap).powi(2)
        } else {
            0.0
        };

        let accel = p.a_max * (1.0 - free_term - gap_term);
        if !accel.is_finite() {
            return -p.b;
        }
        accel.clamp(-p.b, p.a_max)
    }
}
