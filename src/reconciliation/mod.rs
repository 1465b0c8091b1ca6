//! Per-session payment reconciliation
//!
//! Totals are whole currency units. Per-walker splits are rounded half-up to
//! two decimal places and are absent when the session has no walkers.

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::types::{DogRef, WalkSession};

/// Whether a session's payments are complete
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Settlement {
    /// Received equals expected
    Settled,
    /// Amount still missing
    Outstanding(u64),
}

/// Financial summary of one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reconciliation {
    pub price_per_dog: u32,
    pub total_dogs: usize,
    pub paid_dogs: usize,
    pub pending_dogs: usize,
    pub walker_count: usize,
    /// Price times every dog in the roster
    pub expected_total: u64,
    /// Price times paid dogs
    pub received_total: u64,
    /// Expected minus received
    pub outstanding: u64,
    pub expected_per_walker: Option<BigDecimal>,
    pub received_per_walker: Option<BigDecimal>,
}

impl Reconciliation {
    /// Reconcile a session roster
    pub fn for_session(session: &WalkSession) -> Self {
        Self::calculate(session.price_per_dog, &session.dogs, session.walkers.len())
    }

    /// Reconcile from raw figures
    pub fn calculate(price_per_dog: u32, dogs: &[DogRef], walker_count: usize) -> Self {
        let total_dogs = dogs.len();
        let paid_dogs = dogs.iter().filter(|d| d.paid).count();
        let pending_dogs = total_dogs - paid_dogs;

        let price = u64::from(price_per_dog);
        let expected_total = price * total_dogs as u64;
        let received_total = price * paid_dogs as u64;

        Self {
            price_per_dog,
            total_dogs,
            paid_dogs,
            pending_dogs,
            walker_count,
            expected_total,
            received_total,
            outstanding: expected_total - received_total,
            expected_per_walker: split(expected_total, walker_count),
            received_per_walker: split(received_total, walker_count),
        }
    }

    pub fn is_settled(&self) -> bool {
        self.outstanding == 0
    }

    pub fn settlement(&self) -> Settlement {
        if self.is_settled() {
            Settlement::Settled
        } else {
            Settlement::Outstanding(self.outstanding)
        }
    }
}

/// Divide a whole amount among walkers, rounded half-up to cents
fn split(total: u64, walkers: usize) -> Option<BigDecimal> {
    if walkers == 0 {
        return None;
    }
    let walkers = walkers as u128;
    let cents = (u128::from(total) * 200 + walkers) / (walkers * 2);
    let amount = BigDecimal::from(cents as u64) / BigDecimal::from(100);
    Some(amount.with_scale(2))
}

/// Whole amount with currency symbol, e.g. `R$ 120`
pub fn format_total(symbol: &str, amount: u64) -> String {
    format!("{} {}", symbol, amount)
}

/// Per-walker split with currency symbol, e.g. `R$ 40.00`
pub fn format_split(symbol: &str, amount: &BigDecimal) -> String {
    format!("{} {}", symbol, amount.with_scale(2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dogs(paid: &[bool]) -> Vec<DogRef> {
        paid.iter()
            .enumerate()
            .map(|(i, &paid)| DogRef {
                id: i.to_string(),
                name: format!("DOG{}", i),
                paid,
            })
            .collect()
    }

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    #[test]
    fn test_partial_payment() {
        let r = Reconciliation::calculate(40, &dogs(&[true, true, false]), 2);

        assert_eq!(r.total_dogs, 3);
        assert_eq!(r.paid_dogs, 2);
        assert_eq!(r.pending_dogs, 1);
        assert_eq!(r.expected_total, 120);
        assert_eq!(r.received_total, 80);
        assert_eq!(r.outstanding, 40);
        assert_eq!(r.expected_per_walker, Some(dec("60.00")));
        assert_eq!(r.received_per_walker, Some(dec("40.00")));
        assert_eq!(r.expected_per_walker.as_ref().unwrap().to_string(), "60.00");
        assert!(!r.is_settled());
        assert_eq!(r.settlement(), Settlement::Outstanding(40));
    }

    #[test]
    fn test_zero_walkers_has_no_split() {
        let r = Reconciliation::calculate(40, &dogs(&[true, false]), 0);

        assert_eq!(r.expected_total, 80);
        assert_eq!(r.received_total, 40);
        assert_eq!(r.expected_per_walker, None);
        assert_eq!(r.received_per_walker, None);
    }

    #[test]
    fn test_split_rounds_half_up_to_cents() {
        // 100 / 3 = 33.333...
        let r = Reconciliation::calculate(50, &dogs(&[true, true]), 3);
        assert_eq!(r.expected_per_walker.unwrap().to_string(), "33.33");

        // 200 / 3 = 66.666...
        let r = Reconciliation::calculate(100, &dogs(&[true, true]), 3);
        assert_eq!(r.expected_per_walker.unwrap().to_string(), "66.67");

        // 1 / 8 = 0.125
        let r = Reconciliation::calculate(1, &dogs(&[false]), 8);
        assert_eq!(r.expected_per_walker.unwrap().to_string(), "0.13");
        assert_eq!(r.received_per_walker.unwrap().to_string(), "0.00");
    }

    #[test]
    fn test_settled_iff_every_dog_paid() {
        for flags in [
            vec![],
            vec![true],
            vec![false],
            vec![true, true, true],
            vec![true, false, true],
        ] {
            let r = Reconciliation::calculate(35, &dogs(&flags), 1);
            assert_eq!(r.is_settled(), flags.iter().all(|&p| p), "{:?}", flags);
        }
    }

    #[test]
    fn test_formatting() {
        assert_eq!(format_total("R$", 120), "R$ 120");
        assert_eq!(format_split("R$", &dec("60")), "R$ 60.00");
        assert_eq!(format_split("R$", &dec("33.33")), "R$ 33.33");
    }
}
