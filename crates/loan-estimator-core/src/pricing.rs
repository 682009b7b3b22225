use rust_decimal_macros::dec;
use serde::Serialize;

use crate::types::*;

// ---------------------------------------------------------------------------
// Credit tiers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CreditTier {
    Excellent,
    VeryGood,
    Good,
    Fair,
    Subprime,
}

impl CreditTier {
    /// Base annual rate before any tenure surcharge.
    pub fn base_rate(&self) -> Percent {
        match self {
            CreditTier::Excellent => dec!(8.0),
            CreditTier::VeryGood => dec!(9.5),
            CreditTier::Good => dec!(10.5),
            CreditTier::Fair => dec!(11.5),
            CreditTier::Subprime => dec!(13.5),
        }
    }
}

pub fn tier_for_score(credit_score: CreditScore) -> CreditTier {
    match credit_score {
        800..=CreditScore::MAX => CreditTier::Excellent,
        700..=799 => CreditTier::VeryGood,
        650..=699 => CreditTier::Good,
        600..=649 => CreditTier::Fair,
        _ => CreditTier::Subprime,
    }
}

/// Surcharge for long tenures: +0.5 above 5 years, +1.0 above 10 years.
pub fn tenure_surcharge(tenure_years: u32) -> Percent {
    let mut surcharge = dec!(0);
    if tenure_years > 5 {
        surcharge += dec!(0.5);
    }
    if tenure_years > 10 {
        surcharge += dec!(0.5);
    }
    surcharge
}

/// Suggested annual interest rate in percent for a score and tenure.
pub fn suggest_rate(credit_score: CreditScore, tenure_years: u32) -> Percent {
    tier_for_score(credit_score).base_rate() + tenure_surcharge(tenure_years)
}
