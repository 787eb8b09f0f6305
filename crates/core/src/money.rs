use rust_decimal::Decimal;

/// Formats an amount as whole pounds with thousands separators: `£12,500`.
/// Pence are rounded away, which suits band thresholds and headline figures.
pub fn format_gbp(amount: Decimal) -> String {
    let rounded = amount.round_dp(0);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let grouped = group_thousands(&rounded.abs().to_string());
    if negative {
        format!("-£{grouped}")
    } else {
        format!("£{grouped}")
    }
}

/// Like [`format_gbp`] but keeps pence when the amount is not a whole number
/// of pounds: `£3,750` stays terse, `£3,750.25` keeps its pence.
pub fn format_gbp_exact(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    if rounded.fract().is_zero() {
        return format_gbp(rounded);
    }
    let negative = rounded.is_sign_negative();
    let text = rounded.abs().to_string();
    let (pounds, pence) = match text.split_once('.') {
        Some((pounds, pence)) => (pounds, format!("{pence:0<2}")),
        None => (text.as_str(), "00".to_owned()),
    };
    let grouped = group_thousands(pounds);
    if negative {
        format!("-£{grouped}.{pence}")
    } else {
        format!("£{grouped}.{pence}")
    }
}

/// Formats a value that is already expressed in percent: `2.5` becomes `2.5%`.
pub fn format_percent(percent: Decimal) -> String {
    format!("{}%", percent.normalize())
}

/// Formats a rate fraction as a percentage: `0.05` becomes `5%`, `0.075`
/// becomes `7.5%`.
pub fn format_rate(rate: Decimal) -> String {
    format_percent(rate * Decimal::ONE_HUNDRED)
}

fn group_thousands(digits: &str) -> String {
    let length = digits.len();
    let mut grouped = String::with_capacity(length + length / 3);
    for (index, character) in digits.chars().enumerate() {
        if index > 0 && (length - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(character);
    }
    grouped
}
