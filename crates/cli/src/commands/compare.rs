use rust_decimal::Decimal;
use stampy_agent::reply;
use stampy_core::{Calculator, Region};

use crate::commands::CommandResult;

pub fn run(calculator: &Calculator, price: Decimal, region: Region, json: bool) -> CommandResult {
    let comparison = calculator.compare_buyer_types(price, region);
    tracing::debug!(
        event_name = "cli.compare",
        region = %region,
        savings = %comparison.first_time_savings,
        "compared buyer types"
    );

    if json {
        CommandResult::json(&comparison)
    } else {
        CommandResult::ok(reply::buyer_comparison_message(&comparison))
    }
}
