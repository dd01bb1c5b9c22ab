//! Budget tolerance-band filtering.
//!
//! Generated gift candidates come back with a price the model *claims* fits the
//! user's budget. This crate is where that claim gets checked. A [`BudgetPolicy`]
//! describes a tolerance band around the stated budget (80%..120% by default)
//! and a "high budget" threshold above which only the lower bound is enforced,
//! so premium suggestions above the nominal ceiling survive.
//!
//! The one non-obvious rule is the fallback: if nothing survives the band, the
//! original list comes back untouched and [`BudgetOutcome::relaxed`] is set.
//! An off-budget answer beats an empty one for this use case, but callers
//! should know it happened, so the fallback is logged at `warn`.
//!
//! ```
//! use budget::{BudgetPolicy, Priced};
//!
//! struct Item(u64);
//! impl Priced for Item {
//!     fn price(&self) -> u64 { self.0 }
//! }
//!
//! let policy = BudgetPolicy::default();
//! let outcome = policy.filter(vec![Item(4200), Item(6200), Item(9000)], 5000);
//! assert_eq!(outcome.items.len(), 1);
//! assert!(!outcome.relaxed);
//! ```

mod policy;

pub use policy::{BudgetBand, BudgetOutcome, BudgetPolicy, BudgetPolicyError};

/// Anything carrying a price in the smallest currency unit.
pub trait Priced {
    fn price(&self) -> u64;
}

impl<T: Priced + ?Sized> Priced for &T {
    fn price(&self) -> u64 {
        (**self).price()
    }
}

/// Filters `candidates` with the default policy.
pub fn filter<T: Priced>(candidates: Vec<T>, budget: u64) -> BudgetOutcome<T> {
    BudgetPolicy::default().filter(candidates, budget)
}
