//! Initial placement of vehicles along the road.

use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Exp, Normal, Triangular};
use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};

/// How initial vehicle positions are drawn over `[0, road_length)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpawnDistribution {
    /// Evenly spaced, end of road excluded
    Uniform,
    /// Independent uniform draws, sorted
    Random,
    /// Gaussian around the road midpoint, sigma = length / 5
    Normal,
    /// Exponential with scale = length / count, biased towards the start
    Exponential,
    /// Triangular peaking at the road midpoint
    Triangular,
}

impl FromStr for SpawnDistribution {
    type Err = SimError;

    fn from_str(s: &str) -> SimResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "uniform" => Ok(Self::Uniform),
            "random" => Ok(Self::Random),
            "normal" => Ok(Self::Normal),
            "exponential" => Ok(Self::Exponential),
            "triangular" => Ok(Self::Triangular),
            other => Err(SimError::distribution(format!(
                "unknown distribution '{other}' \
                 (expected uniform, random, normal, exponential or triangular)"
            ))),
        }
    }
}

impl fmt::Display for SpawnDistribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Uniform => "uniform",
            Self::Random => "random",
            Self::Normal => "normal",
            Self::Exponential => "exponential",
            Self::Triangular => "triangular",
        };
        f.write_str(name)
    }
}

/// Build the RNG, seeded when a seed is configured.
pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Draw `count` initial positions over `[0, road_length)`, sorted
/// ascending. Random draws outside the road are clamped onto it.
pub fn positions(
    distribution: SpawnDistribution,
    count: usize,
    road_length: f64,
    rng: &mut StdRng,
) -> SimResult<Vec<f64>> {
    let n = count as f64;
    let mut positions: Vec<f64> = match distribution {
        SpawnDistribution::Uniform => (0..count)
            .map(|i| i as f64 * road_length / n)
            .collect(),
        SpawnDistribution::Random => (0..count)
            .map(|_| rng.gen_range(0.0..road_length))
            .collect(),
        SpawnDistribution::Normal => {
            let normal = Normal::new(road_length / 2.0, road_length / 5.0)
                .map_err(|e| SimError::distribution(e.to_string()))?;
            (0..count)
                .map(|_| normal.sample(rng).clamp(0.0, road_length))
                .collect()
        }
        SpawnDistribution::Exponential => {
            // rand_distr takes the rate, numpy-style scale is length / count
            let exp = Exp::new(n / road_length)
                .map_err(|e| SimError::distribution(e.to_string()))?;
            (0..count)
                .map(|_| exp.sample(rng).clamp(0.0, road_length))
                .collect()
        }
        SpawnDistribution::Triangular => {
            let tri = Triangular::new(0.0, road_length, road_length / 2.0)
                .map_err(|e| SimError::distribution(e.to_string()))?;
            (0..count).map(|_| tri.sample(rng)).collect()
        }
    };
    positions.sort_by(f64::total_cmp);
    Ok(positions)
}

/// Draw one initial speed per vehicle, uniform over the configured range.
pub fn speeds(count: usize, speed_min: f64, speed_max: f64, rng: &mut StdRng) -> Vec<f64> {
    (0..count)
        .map(|_| rng.gen_range(speed_min..=speed_max))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_names() {
        assert_eq!(
            "uniform".parse::<SpawnDistribution>().unwrap(),
            SpawnDistribution::Uniform
        );
        assert_eq!(
            "Triangular".parse::<SpawnDistribution>().unwrap(),
            SpawnDistribution::Triangular
        );
    }

    #[test]
    fn rejects_unknown_name() {
        let err = "gamma".parse::<SpawnDistribution>().unwrap_err();
        assert!(err.to_string().contains("gamma"));
    }

    #[test]
    fn uniform_is_evenly_spaced_without_endpoint() {
        let mut rng = make_rng(Some(1));
        let xs = positions(SpawnDistribution::Uniform, 5, 500.0, &mut rng).unwrap();
        assert_eq!(xs, vec![0.0, 100.0, 200.0, 300.0, 400.0]);
    }

    #[test]
    fn draws_stay_on_the_road_and_sorted() {
        let mut rng = make_rng(Some(2));
        for dist in [
            SpawnDistribution::Random,
            SpawnDistribution::Normal,
            SpawnDistribution::Exponential,
            SpawnDistribution::Triangular,
        ] {
            let xs = positions(dist, 50, 300.0, &mut rng).unwrap();
            assert_eq!(xs.len(), 50);
            assert!(xs.windows(2).all(|w| w[0] <= w[1]), "{dist} not sorted");
            assert!(
                xs.iter().all(|&x| (0.0..=300.0).contains(&x)),
                "{dist} left the road"
            );
        }
    }

    #[test]
    fn seeded_draws_are_reproducible() {
        let mut a = make_rng(Some(42));
        let mut b = make_rng(Some(42));
        assert_eq!(
            positions(SpawnDistribution::Random, 10, 100.0, &mut a).unwrap(),
            positions(SpawnDistribution::Random, 10, 100.0, &mut b).unwrap()
        );
        assert_eq!(speeds(10, 5.0, 10.0, &mut a), speeds(10, 5.0, 10.0, &mut b));
    }

    #[test]
    fn degenerate_speed_range_is_constant() {
        let mut rng = make_rng(Some(3));
        let vs = speeds(4, 12.0, 12.0, &mut rng);
        assert_eq!(vs, vec![12.0; 4]);
    }
}
