use rust_decimal::Decimal;

use crate::domain::region::{BuyerType, Region};
use crate::domain::result::{
    BandBreakdown, BandRange, BuyerTypeComparison, BuyerTypeSummary, CalculationResult,
    RegionComparison, RegionSummary,
};
use crate::schedule::{RateTable, RegionSchedule, Schedule};

/// Deterministic marginal-band calculator over a [`Schedule`]. Every figure
/// a caller ever sees comes out of this type.
#[derive(Clone, Debug)]
pub struct Calculator {
    schedule: Schedule,
}

impl Calculator {
    pub fn new(schedule: Schedule) -> Self {
        Self { schedule }
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// Walks the applicable rate table and taxes each slice of the price at
    /// its band's rate. A price at or below zero produces an empty breakdown
    /// and zero tax rather than an error.
    pub fn calculate(
        &self,
        price: Decimal,
        region: Region,
        buyer_type: BuyerType,
    ) -> CalculationResult {
        let region_schedule = self.schedule.region(region);
        let (table, surcharge) = active_table(region_schedule, price, buyer_type);

        let mut breakdown = Vec::new();
        let mut total_tax = Decimal::ZERO;
        let mut previous = Decimal::ZERO;

        for entry in table.bands() {
            if price > previous {
                let ceiling = entry.up_to.map_or(price, |threshold| price.min(threshold));
                let taxable_amount = ceiling - previous;
                if taxable_amount > Decimal::ZERO {
                    let rate = entry.rate + surcharge;
                    let tax_due = taxable_amount * rate;
                    total_tax += tax_due;
                    breakdown.push(BandBreakdown {
                        band: BandRange { lower: previous, upper: entry.up_to },
                        rate,
                        taxable_amount,
                        tax_due,
                    });
                }
            }
            match entry.up_to {
                Some(threshold) => {
                    previous = threshold;
                    if price <= threshold {
                        break;
                    }
                }
                None => break,
            }
        }

        let effective_rate = if price > Decimal::ZERO {
            (total_tax / price * Decimal::ONE_HUNDRED).round_dp(2)
        } else {
            Decimal::ZERO
        };

        CalculationResult {
            purchase_price: price,
            region,
            buyer_type,
            total_tax: total_tax.round_dp(2),
            effective_rate,
            breakdown,
        }
    }

    /// Prices the same purchase as standard, first-time, and additional, in
    /// that order, and reports what first-time relief saves.
    pub fn compare_buyer_types(&self, price: Decimal, region: Region) -> BuyerTypeComparison {
        let scenarios: Vec<BuyerTypeSummary> = BuyerType::ALL
            .iter()
            .map(|&buyer_type| {
                let result = self.calculate(price, region, buyer_type);
                BuyerTypeSummary {
                    buyer_type,
                    total_tax: result.total_tax,
                    effective_rate: result.effective_rate,
                }
            })
            .collect();

        let standard = scenarios[0].total_tax;
        let first_time = scenarios[1].total_tax;
        let first_time_savings = (standard - first_time).max(Decimal::ZERO);

        BuyerTypeComparison { purchase_price: price, region, scenarios, first_time_savings }
    }

    /// Prices the same purchase under all three regional regimes, ordered
    /// England, Scotland, Wales.
    pub fn compare_regions(&self, price: Decimal, buyer_type: BuyerType) -> RegionComparison {
        let totals = Region::ALL
            .iter()
            .map(|&region| {
                let result = self.calculate(price, region, buyer_type);
                RegionSummary {
                    region,
                    total_tax: result.total_tax,
                    effective_rate: result.effective_rate,
                }
            })
            .collect();

        RegionComparison { purchase_price: price, buyer_type, totals }
    }
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new(Schedule::builtin())
    }
}

/// Picks the table and surcharge for a buyer. First-time buyers get the
/// relief table only where the region has one and the price sits within its
/// cap; otherwise they quietly pay standard rates.
fn active_table(
    region_schedule: &RegionSchedule,
    price: Decimal,
    buyer_type: BuyerType,
) -> (&RateTable, Decimal) {
    match buyer_type {
        BuyerType::FirstTime => {
            if let Some(relief) = &region_schedule.first_time {
                let within_cap =
                    region_schedule.first_time_cap.map_or(true, |cap| price <= cap);
                if within_cap {
                    return (relief, Decimal::ZERO);
                }
            }
            (&region_schedule.standard, Decimal::ZERO)
        }
        BuyerType::Additional => (&region_schedule.standard, region_schedule.surcharge),
        BuyerType::Standard => (&region_schedule.standard, Decimal::ZERO),
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::Calculator;
    use crate::domain::region::{BuyerType, Region};

    fn calculator() -> Calculator {
        Calculator::default()
    }

    #[test]
    fn england_below_the_nil_band_pays_nothing() {
        let result = calculator().calculate(dec!(200000), Region::England, BuyerType::Standard);

        assert_eq!(result.total_tax, dec!(0));
        assert_eq!(result.effective_rate, dec!(0));
        assert_eq!(result.breakdown.len(), 1);
        assert_eq!(result.breakdown[0].taxable_amount, dec!(200000));
        assert_eq!(result.breakdown[0].rate, dec!(0));
    }

    #[test]
    fn england_standard_at_500k() {
        let result = calculator().calculate(dec!(500000), Region::England, BuyerType::Standard);

        assert_eq!(result.total_tax, dec!(12500));
        assert_eq!(result.effective_rate, dec!(2.5));
        assert_eq!(result.breakdown.len(), 2);
        assert_eq!(result.breakdown[0].taxable_amount, dec!(250000));
        assert_eq!(result.breakdown[0].tax_due, dec!(0));
        assert_eq!(result.breakdown[1].taxable_amount, dec!(250000));
        assert_eq!(result.breakdown[1].tax_due, dec!(12500));
    }

    #[test]
    fn england_first_time_at_500k_uses_the_relief_table() {
        let result = calculator().calculate(dec!(500000), Region::England, BuyerType::FirstTime);

        assert_eq!(result.total_tax, dec!(3750));
        assert_eq!(result.effective_rate, dec!(0.75));
        assert_eq!(result.breakdown.len(), 2);
        assert_eq!(result.breakdown[0].band.upper, Some(dec!(425000)));
        assert_eq!(result.breakdown[1].taxable_amount, dec!(75000));
        assert_eq!(result.breakdown[1].rate, dec!(0.05));
    }

    #[test]
    fn england_first_time_above_the_cap_falls_back_to_standard() {
        let engine = calculator();
        let first_time = engine.calculate(dec!(700000), Region::England, BuyerType::FirstTime);
        let standard = engine.calculate(dec!(700000), Region::England, BuyerType::Standard);

        assert_eq!(first_time.total_tax, dec!(22500));
        assert_eq!(first_time.breakdown, standard.breakdown);
    }

    #[test]
    fn england_first_time_at_the_cap_keeps_the_relief() {
        let result = calculator().calculate(dec!(625000), Region::England, BuyerType::FirstTime);

        assert_eq!(result.total_tax, dec!(10000));
        assert_eq!(result.breakdown.last().unwrap().band.upper, Some(dec!(625000)));
    }

    #[test]
    fn england_additional_stacks_the_surcharge_on_every_band() {
        let result = calculator().calculate(dec!(300000), Region::England, BuyerType::Additional);

        assert_eq!(result.total_tax, dec!(17500));
        assert_eq!(result.breakdown[0].rate, dec!(0.05));
        assert_eq!(result.breakdown[0].tax_due, dec!(12500));
        assert_eq!(result.breakdown[1].rate, dec!(0.10));
        assert_eq!(result.breakdown[1].tax_due, dec!(5000));
    }

    #[test]
    fn scotland_first_time_relief_has_no_cap() {
        let result = calculator().calculate(dec!(700000), Region::Scotland, BuyerType::FirstTime);

        // 175k nil, then 2%, 5%, and 10% slices of the relief table.
        assert_eq!(result.total_tax, dec!(42750));
        assert_eq!(result.breakdown[0].band.upper, Some(dec!(175000)));
    }

    #[test]
    fn scotland_additional_dwelling_supplement() {
        let result = calculator().calculate(dec!(300000), Region::Scotland, BuyerType::Additional);

        assert_eq!(result.total_tax, dec!(22600));
        assert_eq!(result.breakdown[0].rate, dec!(0.06));
        assert_eq!(result.breakdown[2].rate, dec!(0.11));
    }

    #[test]
    fn wales_has_no_first_time_relief() {
        let engine = calculator();
        let first_time = engine.calculate(dec!(300000), Region::Wales, BuyerType::FirstTime);
        let standard = engine.calculate(dec!(300000), Region::Wales, BuyerType::Standard);

        assert_eq!(first_time.total_tax, dec!(4500));
        assert_eq!(first_time.total_tax, standard.total_tax);
        assert_eq!(first_time.breakdown, standard.breakdown);
    }

    #[test]
    fn wales_additional_rates() {
        let result = calculator().calculate(dec!(300000), Region::Wales, BuyerType::Additional);

        assert_eq!(result.total_tax, dec!(16500));
        assert_eq!(result.breakdown[0].rate, dec!(0.04));
        assert_eq!(result.breakdown[1].rate, dec!(0.10));
    }

    #[test]
    fn price_on_a_threshold_stays_in_the_lower_band() {
        let result = calculator().calculate(dec!(250000), Region::England, BuyerType::Standard);

        assert_eq!(result.total_tax, dec!(0));
        assert_eq!(result.breakdown.len(), 1);
        assert_eq!(result.breakdown[0].band.upper, Some(dec!(250000)));
    }

    #[test]
    fn breakdown_covers_the_whole_price_contiguously() {
        let result = calculator().calculate(dec!(1600000), Region::England, BuyerType::Standard);

        assert_eq!(result.breakdown.len(), 4);
        let mut previous = dec!(0);
        for line in &result.breakdown {
            assert_eq!(line.band.lower, previous);
            assert!(line.taxable_amount > dec!(0));
            previous = line.band.upper.unwrap_or(dec!(1600000));
        }
        assert_eq!(result.breakdown.last().unwrap().band.upper, None);

        let taxed: rust_decimal::Decimal =
            result.breakdown.iter().map(|line| line.taxable_amount).sum();
        assert_eq!(taxed, dec!(1600000));
    }

    #[test]
    fn zero_price_is_absorbed() {
        let result = calculator().calculate(dec!(0), Region::England, BuyerType::Standard);

        assert_eq!(result.total_tax, dec!(0));
        assert_eq!(result.effective_rate, dec!(0));
        assert!(result.breakdown.is_empty());
    }

    #[test]
    fn negative_price_is_absorbed() {
        let result = calculator().calculate(dec!(-100), Region::Scotland, BuyerType::Additional);

        assert_eq!(result.total_tax, dec!(0));
        assert_eq!(result.effective_rate, dec!(0));
        assert!(result.breakdown.is_empty());
    }

    #[test]
    fn buyer_comparison_is_ordered_and_reports_savings() {
        let comparison = calculator().compare_buyer_types(dec!(500000), Region::England);

        let buyers: Vec<_> =
            comparison.scenarios.iter().map(|scenario| scenario.buyer_type).collect();
        assert_eq!(
            buyers,
            vec![BuyerType::Standard, BuyerType::FirstTime, BuyerType::Additional]
        );
        assert_eq!(comparison.scenarios[0].total_tax, dec!(12500));
        assert_eq!(comparison.scenarios[1].total_tax, dec!(3750));
        assert_eq!(comparison.scenarios[2].total_tax, dec!(37500));
        assert_eq!(comparison.first_time_savings, dec!(8750));
    }

    #[test]
    fn buyer_comparison_savings_floor_at_zero() {
        let comparison = calculator().compare_buyer_types(dec!(300000), Region::Wales);

        assert_eq!(comparison.first_time_savings, dec!(0));
    }

    #[test]
    fn region_comparison_is_ordered_england_scotland_wales() {
        let comparison = calculator().compare_regions(dec!(500000), BuyerType::Standard);

        let regions: Vec<_> = comparison.totals.iter().map(|total| total.region).collect();
        assert_eq!(regions, vec![Region::England, Region::Scotland, Region::Wales]);
        assert_eq!(comparison.totals[0].total_tax, dec!(12500));
        assert_eq!(comparison.totals[1].total_tax, dec!(23350));
        assert_eq!(comparison.totals[2].total_tax, dec!(18000));
    }
}
