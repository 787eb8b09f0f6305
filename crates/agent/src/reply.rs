use rust_decimal::Decimal;
use stampy_core::money::{format_gbp, format_gbp_exact, format_percent, format_rate};
use stampy_core::{BuyerTypeComparison, CalculationResult, RegionComparison};

/// Renders one calculation as a headline plus a band-by-band breakdown.
pub fn calculation_message(result: &CalculationResult) -> String {
    let mut lines = vec![format!(
        "For a {} property in {} as {} {}, {} comes to {} (effective rate: {}).",
        format_gbp(result.purchase_price),
        result.region.display_name(),
        article(result.buyer_type.label()),
        result.buyer_type.label(),
        result.region.tax_name(),
        format_gbp_exact(result.total_tax),
        format_percent(result.effective_rate),
    )];

    if !result.breakdown.is_empty() {
        lines.push(String::new());
        lines.push("Band breakdown:".to_string());
        for band in &result.breakdown {
            lines.push(format!(
                "  {}: {} of {} = {}",
                band.band,
                format_rate(band.rate),
                format_gbp(band.taxable_amount),
                format_gbp_exact(band.tax_due),
            ));
        }
    }

    lines.join("\n")
}

/// Renders the standard / first-time / additional side-by-side view.
pub fn buyer_comparison_message(comparison: &BuyerTypeComparison) -> String {
    let mut lines = vec![format!(
        "For a {} property in {}:",
        format_gbp(comparison.purchase_price),
        comparison.region.display_name(),
    )];

    for scenario in &comparison.scenarios {
        lines.push(format!(
            "  {}: {} (effective rate: {})",
            capitalize(scenario.buyer_type.label()),
            format_gbp_exact(scenario.total_tax),
            format_percent(scenario.effective_rate),
        ));
    }

    if comparison.first_time_savings > Decimal::ZERO {
        lines.push(format!(
            "First-time buyer relief saves {}.",
            format_gbp_exact(comparison.first_time_savings)
        ));
    }

    lines.join("\n")
}

/// Renders the same purchase priced in all three regions.
pub fn region_comparison_message(comparison: &RegionComparison) -> String {
    let mut lines = vec![format!(
        "Across the UK for a {} purchase as {} {}:",
        format_gbp(comparison.purchase_price),
        article(comparison.buyer_type.label()),
        comparison.buyer_type.label(),
    )];

    for summary in &comparison.totals {
        lines.push(format!(
            "  {}: {} (effective rate: {})",
            summary.region.display_name(),
            format_gbp_exact(summary.total_tax),
            format_percent(summary.effective_rate),
        ));
    }

    lines.join("\n")
}

fn article(word: &str) -> &'static str {
    match word.chars().next() {
        Some('a' | 'e' | 'i' | 'o' | 'u') => "an",
        _ => "a",
    }
}

fn capitalize(text: &str) -> String {
    let mut characters = text.chars();
    match characters.next() {
        Some(first) => first.to_uppercase().collect::<String>() + characters.as_str(),
        None => String::new(),
    }
}
