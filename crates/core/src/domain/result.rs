use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::region::{BuyerType, Region};
use crate::money::format_gbp;

/// Half-open price interval covered by one band. `upper` is `None` for the
/// final open-ended band of a table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandRange {
    pub lower: Decimal,
    pub upper: Option<Decimal>,
}

impl fmt::Display for BandRange {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.upper {
            Some(upper) => {
                write!(formatter, "{} - {}", format_gbp(self.lower), format_gbp(upper))
            }
            None => write!(formatter, "Above {}", format_gbp(self.lower)),
        }
    }
}

/// One line of a calculation: how much of the price fell into this band and
/// the tax charged on that slice. `rate` already includes any surcharge.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandBreakdown {
    pub band: BandRange,
    pub rate: Decimal,
    pub taxable_amount: Decimal,
    pub tax_due: Decimal,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub purchase_price: Decimal,
    pub region: Region,
    pub buyer_type: BuyerType,
    /// Total tax rounded to pence. Band lines are left unrounded so the
    /// arithmetic stays auditable.
    pub total_tax: Decimal,
    /// Total tax as a percentage of the price, rounded to two decimals.
    pub effective_rate: Decimal,
    pub breakdown: Vec<BandBreakdown>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuyerTypeSummary {
    pub buyer_type: BuyerType,
    pub total_tax: Decimal,
    pub effective_rate: Decimal,
}

/// Side-by-side totals for the three buyer categories at one price, always
/// ordered standard, first-time, additional.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuyerTypeComparison {
    pub purchase_price: Decimal,
    pub region: Region,
    pub scenarios: Vec<BuyerTypeSummary>,
    /// Standard minus first-time, floored at zero.
    pub first_time_savings: Decimal,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionSummary {
    pub region: Region,
    pub total_tax: Decimal,
    pub effective_rate: Decimal,
}

/// The same purchase priced under all three regimes, ordered England,
/// Scotland, Wales.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionComparison {
    pub purchase_price: Decimal,
    pub buyer_type: BuyerType,
    pub totals: Vec<RegionSummary>,
}
