use rust_decimal::Decimal;
use stampy_agent::reply;
use stampy_core::{BuyerType, Calculator, Region};

use crate::commands::CommandResult;

pub fn run(
    calculator: &Calculator,
    price: Decimal,
    region: Region,
    buyer_type: BuyerType,
    json: bool,
) -> CommandResult {
    let result = calculator.calculate(price, region, buyer_type);
    tracing::debug!(
        event_name = "cli.calculate",
        region = %region,
        buyer_type = %buyer_type,
        total_tax = %result.total_tax,
        "calculated transaction tax"
    );

    if json {
        CommandResult::json(&result)
    } else {
        CommandResult::ok(reply::calculation_message(&result))
    }
}
