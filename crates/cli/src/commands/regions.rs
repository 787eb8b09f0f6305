use rust_decimal::Decimal;
use stampy_agent::reply;
use stampy_core::{BuyerType, Calculator};

use crate::commands::CommandResult;

pub fn run(
    calculator: &Calculator,
    price: Decimal,
    buyer_type: BuyerType,
    json: bool,
) -> CommandResult {
    let comparison = calculator.compare_regions(price, buyer_type);
    tracing::debug!(
        event_name = "cli.regions",
        buyer_type = %buyer_type,
        "compared regions"
    );

    if json {
        CommandResult::json(&comparison)
    } else {
        CommandResult::ok(reply::region_comparison_message(&comparison))
    }
}
