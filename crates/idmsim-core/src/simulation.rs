//! The single-lane car-following simulation.
//!
//! Each step computes IDM accelerations for every vehicle from the
//! pre-step state, applies them, then enforces a hard minimum gap so a
//! follower can never end a step inside its lead. Every vehicle is
//! sampled into the trace once per step.

use tracing::debug;

use crate::config::{IdmParams, SimulationConfig};
use crate::error::{SimError, SimResult};
use crate::idm::IdmModel;
use crate::spawn;
use crate::trace::TraceRow;
use crate::vehicle::{Vehicle, VEHICLE_LENGTH};

pub struct TrafficSimulation {
    config: SimulationConfig,
    model: IdmModel,
    vehicles: Vec<Vehicle>,
    /// Vehicle exempt from the IDM, holding a fixed speed
    fixed_id: Option<usize>,
    rows: Vec<TraceRow>,
}

impl TrafficSimulation {
    /// Spawn the fleet from the configuration.
    ///
    /// With `first_speed` set, the front-most vehicle becomes a
    /// fixed-speed lead: constant velocity, zero acceleration, ignored
    /// by the IDM for the whole run.
    pub fn new(config: SimulationConfig, params: IdmParams) -> SimResult<Self> {
        config.validate()?;
        params.validate()?;

        let mut rng = spawn::make_rng(config.seed);
        let positions = spawn::positions(
            config.distribution,
            config.num_vehicles,
            config.road_length,
            &mut rng,
        )?;
        let speeds = spawn::speeds(config.num_vehicles, config.speed_min, config.speed_max, &mut rng);

        let mut vehicles: Vec<Vehicle> = positions
            .into_iter()
            .zip(speeds)
            .enumerate()
            .map(|(id, (x, v))| Vehicle::new(id, x, v))
            .collect();

        let fixed_id = match config.first_speed {
            Some(speed) => {
                let lead = vehicles
                    .iter_mut()
                    .max_by(|a, b| a.position.total_cmp(&b.position))
                    .ok_or_else(|| SimError::config("no vehicles spawned"))?;
                lead.velocity = speed;
                lead.acceleration = 0.0;
                Some(lead.id)
            }
            None => None,
        };

        debug!(
            vehicles = vehicles.len(),
            distribution = %config.distribution,
            seed = ?config.seed,
            "fleet spawned"
        );

        Ok(Self {
            model: IdmModel::new(params),
            config,
            vehicles,
            fixed_id,
            rows: Vec::new(),
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn rows(&self) -> &[TraceRow] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<TraceRow> {
        self.rows
    }

    /// Number of steps a full run takes.
    pub fn steps(&self) -> usize {
        self.config.steps()
    }

    /// Run the whole simulation.
    pub fn run(&mut self) {
        self.run_with(|_, _| {});
    }

    /// Run the whole simulation, invoking `on_step(done, total)` after
    /// each step for progress reporting.
    pub fn run_with<F: FnMut(usize, usize)>(&mut self, mut on_step: F) {
        let steps = self.steps();
        self.rows.reserve(steps * self.vehicles.len());
        for step in 0..steps {
            self.step(step);
            on_step(step + 1, steps);
        }
        debug!(steps, rows = self.rows.len(), "simulation finished");
    }

    /// Index of the nearest vehicle strictly ahead of vehicle `i`.
    fn lead_index(&self, i: usize) -> Option<usize> {
        let x = self.vehicles[i].position;
        let mut best = None;
        let mut best_gap = f64::INFINITY;
        for (j, other) in self.vehicles.iter().enumerate() {
            if other.position > x {
                let gap = other.position - x;
                if gap < best_gap {
                    best_gap = gap;
                    best = Some(j);
                }
            }
        }
        best
    }

    fn step(&mut self, step: usize) {
        let dt = self.config.dt;
        let t = step as f64 * dt;
        let n = self.vehicles.len();

        // Accelerations from the pre-step state; None marks the fixed lead.
        let mut plan: Vec<Option<(f64, Option<usize>)>> = vec![None; n];
        for i in 0..n {
            if Some(self.vehicles[i].id) == self.fixed_id {
                continue;
            }
            let lead = self.lead_index(i);
            let accel = self
                .model
                .acceleration(&self.vehicles[i], lead.map(|j| &self.vehicles[j]));
            plan[i] = Some((accel, lead));
        }

        for (i, entry) in plan.iter().enumerate() {
            match entry {
                Some((accel, _)) => self.vehicles[i].update(*accel, dt),
                None => {
                    // Fixed lead: constant speed, no dynamics
                    let v = self.vehicles[i].velocity;
                    self.vehicles[i].position += v * dt;
                    self.vehicles[i].acceleration = 0.0;
                }
            }
        }

        // Contact clamp, front to back so chains of clamps propagate.
        let min_dist = self.model.params().s0 + VEHICLE_LENGTH;
        for i in (0..n).rev() {
            let Some((_, Some(lead))) = plan[i] else {
                continue;
            };
            let lead_x = self.vehicles[lead].position;
            let lead_v = self.vehicles[lead].velocity;
            let car = &mut self.vehicles[i];
            if car.position > lead_x - min_dist {
                car.position = lead_x - min_dist;
                car.velocity = car.velocity.min(lead_v);
                car.acceleration = 0.0;
            }
        }

        for car in &self.vehicles {
            self.rows.push(TraceRow {
                time: t,
                id: car.id,
                x: car.position,
                y: 0.0,
                v: car.velocity,
                a: car.acceleration,
                mass: car.mass,
            });
        }
    }
}
