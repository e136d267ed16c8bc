//! Reward model: usefulness and confidence folded into one scalar.
//!
//! The scalar is always derived from `RewardComponents` so that any reward
//! handed to the search can be recomputed and explained later.
//!
//! Two call sites share the same formula:
//! - proxy (`fast_reward`): only `r_useful` is known, `r_conf` falls back to
//!   `default_confidence`.
//! - final (`reward`): both components come from the search node, after the
//!   action was executed.

use serde::{Deserialize, Serialize};

use super::errors::PolicyError;

/// Inputs the scalar reward was computed from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RewardComponents {
    pub r_useful: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r_conf: Option<f64>,
}

impl RewardComponents {
    pub fn useful(r_useful: f64) -> Self {
        Self {
            r_useful,
            r_conf: None,
        }
    }

    pub fn with_confidence(mut self, r_conf: f64) -> Self {
        self.r_conf = Some(r_conf);
        self
    }

    /// Recompute the scalar these components stand for.
    pub fn reward(&self, combiner: &RewardCombiner) -> f64 {
        combiner.combine(self.r_useful, self.r_conf).0
    }
}

/// Weighted geometric mean: `r_useful^alpha * r_conf^(1 - alpha)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RewardCombiner {
    alpha: f64,
    default_confidence: f64,
}

impl RewardCombiner {
    /// `alpha` and `default_confidence` are validated by `PolicyConfig`.
    pub fn new(alpha: f64, default_confidence: f64) -> Self {
        Self {
            alpha,
            default_confidence,
        }
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Combine the components; `r_conf = None` uses the default confidence.
    ///
    /// The returned components echo exactly what was passed in, so a proxy
    /// reward keeps `r_conf: None` and stays distinguishable from a final one.
    pub fn combine(&self, r_useful: f64, r_conf: Option<f64>) -> (f64, RewardComponents) {
        let conf = r_conf.unwrap_or(self.default_confidence);
        let reward = r_useful.powf(self.alpha) * conf.powf(1.0 - self.alpha);
        (reward, RewardComponents { r_useful, r_conf })
    }

    /// Final reward: both components are mandatory and must be probabilities.
    pub fn combine_final(
        &self,
        r_useful: Option<f64>,
        r_conf: Option<f64>,
    ) -> Result<(f64, RewardComponents), PolicyError> {
        let r_useful = r_useful.ok_or(PolicyError::MissingRewardComponent("r_useful"))?;
        let r_conf = r_conf.ok_or(PolicyError::MissingRewardComponent("r_conf"))?;
        check_probability("r_useful", r_useful)?;
        check_probability("r_conf", r_conf)?;
        Ok(self.combine(r_useful, Some(r_conf)))
    }
}

fn check_probability(name: &'static str, value: f64) -> Result<(), PolicyError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(PolicyError::ComponentOutOfRange { name, value })
    }
}
