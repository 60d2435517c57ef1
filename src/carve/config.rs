//! Carving policy selection and vote threshold.

use crate::core::math::consensus_threshold;
use crate::core::CarveError;
use serde::{Deserialize, Serialize};

/// Default share of cameras that must see a voxel as foreground.
pub const DEFAULT_CONSENSUS_FRACTION: f64 = 0.8;

/// How the per-camera silhouette tests combine into a keep/drop decision.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CarvePolicy {
    /// Carve against one camera only; out-of-frame voxels are kept.
    SingleView { camera: usize },
    /// Carve against every camera in turn; a voxel must pass all of them.
    Sequential,
    /// Keep voxels seen as foreground by at least the threshold number of cameras.
    #[default]
    Consensus,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarveConfig {
    pub policy: CarvePolicy,
    /// Fraction of the camera count used for the consensus threshold, in (0, 1].
    pub consensus_fraction: f64,
    /// Explicit vote threshold; overrides `consensus_fraction` when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_votes: Option<usize>,
}

impl Default for CarveConfig {
    fn default() -> Self {
        Self {
            policy: CarvePolicy::default(),
            consensus_fraction: DEFAULT_CONSENSUS_FRACTION,
            min_votes: None,
        }
    }
}

impl CarveConfig {
    pub fn consensus() -> Self {
        Self::default()
    }

    pub fn sequential() -> Self {
        Self {
            policy: CarvePolicy::Sequential,
            ..Self::default()
        }
    }

    pub fn single_view(camera: usize) -> Self {
        Self {
            policy: CarvePolicy::SingleView { camera },
            ..Self::default()
        }
    }

    /// Vote threshold for a set of `cameras` views.
    ///
    /// Fails if the fraction is outside (0, 1] or `min_votes` is outside `1..=cameras`.
    pub fn threshold(&self, cameras: usize) -> Result<usize, CarveError> {
        if let Some(min_votes) = self.min_votes {
            if min_votes == 0 || min_votes > cameras {
                return Err(CarveError::InvalidConfig(format!(
                    "min_votes must be in 1..={}, got {}",
                    cameras, min_votes
                )));
            }
            return Ok(min_votes);
        }

        let f = self.consensus_fraction;
        if !(f.is_finite() && f > 0.0 && f <= 1.0) {
            return Err(CarveError::InvalidConfig(format!(
                "consensus_fraction must be in (0, 1], got {}",
                f
            )));
        }
        Ok(consensus_threshold(f, cameras))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_threshold() {
        let cfg = CarveConfig::default();
        assert_eq!(cfg.policy, CarvePolicy::Consensus);
        assert_eq!(cfg.threshold(5).unwrap(), 4);
    }

    #[test]
    fn test_min_votes_override() {
        let cfg = CarveConfig {
            min_votes: Some(2),
            ..CarveConfig::default()
        };
        assert_eq!(cfg.threshold(5).unwrap(), 2);
        assert!(cfg.threshold(1).is_err());
    }

    #[test]
    fn test_fraction_validation() {
        for bad in [0.0, -0.5, 1.5, f64::NAN] {
            let cfg = CarveConfig {
                consensus_fraction: bad,
                ..CarveConfig::default()
            };
            assert!(matches!(cfg.threshold(4), Err(CarveError::InvalidConfig(_))));
        }
    }

    #[test]
    fn test_policy_json() {
        let cfg: CarveConfig =
            serde_json::from_str(r#"{"policy":{"kind":"single_view","camera":2}}"#).unwrap();
        assert_eq!(cfg.policy, CarvePolicy::SingleView { camera: 2 });
        assert_eq!(cfg.consensus_fraction, DEFAULT_CONSENSUS_FRACTION);

        let cfg: CarveConfig = serde_json::from_str(r#"{"policy":{"kind":"sequential"}}"#).unwrap();
        assert_eq!(cfg.policy, CarvePolicy::Sequential);
    }
}
