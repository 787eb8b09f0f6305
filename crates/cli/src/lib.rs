pub mod commands;

use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use stampy_core::{BuyerType, Calculator, Region, Schedule};

use crate::commands::CommandResult;

#[derive(Debug, Parser)]
#[command(
    name = "stampy",
    about = "UK property transaction tax calculator",
    long_about = "Calculate SDLT (England & Northern Ireland), LBTT (Scotland), and LTT (Wales) \
                  with band-by-band breakdowns, buyer-type and cross-region comparisons, and a \
                  plain-English ask mode.",
    after_help = "Examples:\n  stampy calculate --price 500000 --region england --buyer-type first-time\n  stampy compare --price 500000 --region england\n  stampy regions --price 450000\n  stampy rates --region scotland\n  stampy ask \"stamp duty on a 450k second home in wales\""
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
    #[arg(
        long,
        global = true,
        value_name = "FILE",
        help = "Load rate tables from a TOML file instead of the built-in schedule"
    )]
    schedule: Option<PathBuf>,
    #[arg(long, global = true, help = "Emit machine-readable JSON output")]
    json: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Calculate tax for one purchase with a band-by-band breakdown")]
    Calculate {
        #[arg(long, value_parser = parse_price, help = "Purchase price (500000, 500k, £500,000)")]
        price: Decimal,
        #[arg(long, value_parser = parse_region, default_value = "england")]
        region: Region,
        #[arg(long, value_parser = parse_buyer_type, default_value = "standard")]
        buyer_type: BuyerType,
    },
    #[command(about = "Compare standard, first-time, and additional buyer costs at one price")]
    Compare {
        #[arg(long, value_parser = parse_price)]
        price: Decimal,
        #[arg(long, value_parser = parse_region, default_value = "england")]
        region: Region,
    },
    #[command(about = "Price the same purchase across England & NI, Scotland, and Wales")]
    Regions {
        #[arg(long, value_parser = parse_price)]
        price: Decimal,
        #[arg(long, value_parser = parse_buyer_type, default_value = "standard")]
        buyer_type: BuyerType,
    },
    #[command(about = "Show the rate bands for one region or the whole schedule")]
    Rates {
        #[arg(long, value_parser = parse_region)]
        region: Option<Region>,
    },
    #[command(about = "Ask in plain English; parsing is deterministic and fully offline")]
    Ask {
        #[arg(required = true, value_name = "QUESTION")]
        text: Vec<String>,
    },
}

pub fn run() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    let result = execute(cli);
    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}

/// Resolves the schedule, builds the calculator, and dispatches one
/// subcommand. Split out from [`run`] so tests can drive parsed arguments
/// end to end.
pub fn execute(cli: Cli) -> CommandResult {
    let schedule = match Schedule::load(cli.schedule.as_deref()) {
        Ok(schedule) => schedule,
        Err(error) => return CommandResult::failed(error.to_string()),
    };
    if cli.schedule.is_some() {
        tracing::info!(
            event_name = "cli.schedule.loaded",
            tax_year = %schedule.tax_year,
            "using schedule override"
        );
    }
    let calculator = Calculator::new(schedule);

    match cli.command {
        Command::Calculate { price, region, buyer_type } => {
            commands::calculate::run(&calculator, price, region, buyer_type, cli.json)
        }
        Command::Compare { price, region } => {
            commands::compare::run(&calculator, price, region, cli.json)
        }
        Command::Regions { price, buyer_type } => {
            commands::regions::run(&calculator, price, buyer_type, cli.json)
        }
        Command::Rates { region } => commands::rates::run(calculator.schedule(), region, cli.json),
        Command::Ask { text } => commands::ask::run(calculator, &text.join(" "), cli.json),
    }
}

fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}

fn parse_price(value: &str) -> Result<Decimal, String> {
    let amount = stampy_agent::intent::parse_amount(value)
        .ok_or_else(|| format!("invalid price `{value}` (try 500000, 500k, or £500,000)"))?;
    if amount < Decimal::ZERO {
        return Err("price cannot be negative".to_string());
    }
    Ok(amount)
}

fn parse_region(value: &str) -> Result<Region, String> {
    Region::from_str(value).map_err(|error| error.to_string())
}

fn parse_buyer_type(value: &str) -> Result<BuyerType, String> {
    Ok(BuyerType::from_input(value))
}
