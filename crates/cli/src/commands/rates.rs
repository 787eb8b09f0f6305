use rust_decimal::Decimal;
use stampy_core::money::{format_gbp, format_rate};
use stampy_core::{BandRange, RateTable, Region, Schedule};

use crate::commands::CommandResult;

pub fn run(schedule: &Schedule, region: Option<Region>, json: bool) -> CommandResult {
    if json {
        return match region {
            Some(region) => CommandResult::json(schedule.region(region)),
            None => CommandResult::json(schedule),
        };
    }

    let selected = match region {
        Some(region) => vec![region],
        None => Region::ALL.to_vec(),
    };

    let mut lines = vec![format!("Rate schedule {}", schedule.tax_year)];
    for region in selected {
        let region_schedule = schedule.region(region);
        lines.push(String::new());
        lines.push(format!("{} - {}", region.display_name(), region.tax_name()));
        lines.push("  Standard rates:".to_string());
        lines.extend(table_lines(&region_schedule.standard));

        match (&region_schedule.first_time, region_schedule.first_time_cap) {
            (Some(first_time), Some(cap)) => {
                lines.push(format!("  First-time buyer rates (up to {}):", format_gbp(cap)));
                lines.extend(table_lines(first_time));
            }
            (Some(first_time), None) => {
                lines.push("  First-time buyer rates:".to_string());
                lines.extend(table_lines(first_time));
            }
            (None, _) => lines.push("  No first-time buyer relief.".to_string()),
        }

        lines.push(format!(
            "  Additional property surcharge: +{} on every band",
            format_rate(region_schedule.surcharge)
        ));
    }

    CommandResult::ok(lines.join("\n"))
}

fn table_lines(table: &RateTable) -> Vec<String> {
    let mut previous = Decimal::ZERO;
    table
        .bands()
        .iter()
        .map(|band| {
            let range = BandRange { lower: previous, upper: band.up_to };
            if let Some(upper) = band.up_to {
                previous = upper;
            }
            format!("    {}: {}", range, format_rate(band.rate))
        })
        .collect()
}
