use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Priced;

/// Errors raised when a [`BudgetPolicy`] is internally inconsistent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BudgetPolicyError {
    #[error("lower_percent ({lower}) must not exceed upper_percent ({upper})")]
    InvertedBand { lower: u32, upper: u32 },
    #[error("upper_percent must be greater than zero")]
    EmptyBand,
}

/// Tolerance-band policy applied to generated candidates.
///
/// Ratios are stored as whole percentages so the band test is exact integer
/// arithmetic; `80` and `120` reproduce the `0.8x`/`1.2x` window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BudgetPolicy {
    /// Lower edge of the band, as a percentage of the budget.
    pub lower_percent: u32,
    /// Upper edge of the band, as a percentage of the budget.
    pub upper_percent: u32,
    /// Budgets at or above this value only enforce the lower edge.
    pub high_budget_threshold: u64,
}

impl Default for BudgetPolicy {
    fn default() -> Self {
        Self {
            lower_percent: 80,
            upper_percent: 120,
            high_budget_threshold: 30_000,
        }
    }
}

/// Rounded band edges, suitable for showing to a person or a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BudgetBand {
    pub min: u64,
    pub max: u64,
    /// Whether `max` is actually enforced for this budget.
    pub max_enforced: bool,
}

/// Result of running the filter over a candidate list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetOutcome<T> {
    /// Surviving candidates, in input order.
    pub items: Vec<T>,
    /// `true` when nothing fit the band and the unfiltered input was returned.
    pub relaxed: bool,
    /// Number of candidates the band rejected (counted even when relaxed).
    pub rejected: usize,
}

impl BudgetPolicy {
    pub fn validate(&self) -> Result<(), BudgetPolicyError> {
        if self.upper_percent == 0 {
            return Err(BudgetPolicyError::EmptyBand);
        }
        if self.lower_percent > self.upper_percent {
            return Err(BudgetPolicyError::InvertedBand {
                lower: self.lower_percent,
                upper: self.upper_percent,
            });
        }
        Ok(())
    }

    pub fn is_high_budget(&self, budget: u64) -> bool {
        budget >= self.high_budget_threshold
    }

    /// Band edges rounded half-up to the nearest unit.
    pub fn band(&self, budget: u64) -> BudgetBand {
        BudgetBand {
            min: scale_rounded(budget, self.lower_percent),
            max: scale_rounded(budget, self.upper_percent),
            max_enforced: !self.is_high_budget(budget),
        }
    }

    /// Whether a single price fits the band for `budget`.
    pub fn admits(&self, price: u64, budget: u64) -> bool {
        // price >= budget * lower / 100, compared without division.
        let scaled_price = u128::from(price) * 100;
        let above_min = scaled_price >= u128::from(budget) * u128::from(self.lower_percent);
        if self.is_high_budget(budget) {
            return above_min;
        }
        above_min && scaled_price <= u128::from(budget) * u128::from(self.upper_percent)
    }

    /// Keeps candidates inside the band, falling back to the whole input when
    /// the band would leave nothing.
    pub fn filter<T: Priced>(&self, candidates: Vec<T>, budget: u64) -> BudgetOutcome<T> {
        let total = candidates.len();
        let admitted = candidates
            .iter()
            .filter(|candidate| self.admits(candidate.price(), budget))
            .count();

        if admitted == 0 {
            if total > 0 {
                let band = self.band(budget);
                tracing::warn!(
                    budget,
                    band_min = band.min,
                    band_max = band.max,
                    candidates = total,
                    "no candidate fits the budget band; returning unfiltered candidates"
                );
            }
            return BudgetOutcome {
                items: candidates,
                relaxed: total > 0,
                rejected: total,
            };
        }

        let items: Vec<T> = candidates
            .into_iter()
            .filter(|candidate| self.admits(candidate.price(), budget))
            .collect();

        tracing::debug!(budget, kept = items.len(), rejected = total - admitted, "budget filter applied");

        BudgetOutcome {
            items,
            relaxed: false,
            rejected: total - admitted,
        }
    }
}

fn scale_rounded(budget: u64, percent: u32) -> u64 {
    let scaled = (u128::from(budget) * u128::from(percent) + 50) / 100;
    u64::try_from(scaled).unwrap_or(u64::MAX)
}
