//! # OmniCalc CLI Application
//!
//! Command line front end for calc_core. Every subcommand builds a
//! [`CalculationRequest`], runs it and prints either a human-readable report
//! or, with `--json`, the serialized output.
//!
//! ```bash
//! omnicalc convert 100 celsius fahrenheit --category temperature
//! omnicalc physics kinetic m=2 v=3
//! omnicalc loan --principal 250000 --rate 6 --json
//! ```

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use calc_core::calculations::{
    ArithmeticInput, BinaryOp, BmiInput, CalculationOutput, CalculationRequest, ConversionInput, PhysicsInput,
};
use calc_core::conversions::RATE_SNAPSHOT;
use calc_core::finance::{InvestmentInput, LoanInput, SalaryInput};
use calc_core::formulas::STANDARD_FORMULAS;
use calc_core::settings::CalculatorSettings;
use calc_core::units::UnitCategory;
use calc_core::{load_settings_or_default, CalcError};

#[derive(Debug, Parser)]
#[command(name = "omnicalc", version, about = "Multi-tool calculator: units, physics, finance, BMI")]
struct Cli {
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Settings file supplying display precision and finance defaults
    #[arg(long, global = true, value_name = "PATH")]
    settings: Option<PathBuf>,

    /// Enable debug logging (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Convert a value between two units of a category
    #[command(allow_negative_numbers = true)]
    Convert {
        value: f64,
        from: String,
        to: String,
        /// length, mass, temperature, angle or currency
        #[arg(short, long)]
        category: String,
    },

    /// Evaluate a physics formula, e.g. `physics velocity d=100 t=9.58`
    #[command(allow_negative_numbers = true)]
    Physics {
        formula: String,
        #[arg(value_parser = parse_key_val)]
        inputs: Vec<(String, String)>,
    },

    /// Project investment growth with monthly contributions
    Invest {
        #[arg(long)]
        principal: Option<f64>,
        #[arg(long)]
        monthly: Option<f64>,
        /// Annual rate in percent
        #[arg(long)]
        rate: Option<f64>,
        #[arg(long)]
        years: Option<f64>,
    },

    /// Fixed-rate loan payment and yearly balances
    Loan {
        #[arg(long)]
        principal: Option<f64>,
        /// Annual rate in percent
        #[arg(long)]
        rate: Option<f64>,
        #[arg(long)]
        years: Option<f64>,
    },

    /// Break an hourly rate down into daily, weekly, monthly and annual pay
    Salary {
        #[arg(long)]
        hourly: Option<f64>,
        #[arg(long)]
        hours: Option<f64>,
        #[arg(long)]
        weeks: Option<f64>,
    },

    /// Body-mass index from weight (kg) and height (cm)
    Bmi { weight_kg: f64, height_cm: f64 },

    /// One keypad operation, e.g. `arith 6 / 3` or `arith 7 % 3`
    #[command(allow_negative_numbers = true)]
    Arith { a: f64, op: String, b: f64 },

    /// List the physics formulas
    Formulas,

    /// List unit categories, or the units of one category
    Units { category: Option<String> },
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected SYMBOL=VALUE, got '{}'", s))?;
    Ok((key.trim().to_string(), value.trim().to_string()))
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings = match &cli.settings {
        Some(path) => load_settings_or_default(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => CalculatorSettings::default(),
    };
    debug!(precision = settings.display_precision, "settings ready");

    let request = match build_request(&cli.command, &settings)? {
        Some(request) => request,
        None => {
            print_listing(&cli.command, cli.json)?;
            return Ok(());
        }
    };

    match request.run() {
        Ok(output) => {
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                print_report(&request, &output, &settings);
            }
            Ok(())
        }
        Err(e) => {
            if cli.json {
                eprintln!("{}", error_json(&e)?);
            }
            Err(e).with_context(|| format!("{} calculation failed", request.calc_type()))
        }
    }
}

fn error_json(e: &CalcError) -> Result<String> {
    let value = serde_json::json!({ "code": e.error_code(), "error": e });
    Ok(serde_json::to_string_pretty(&value)?)
}

/// Map a subcommand to a calculation; listing commands map to `None`.
fn build_request(command: &Command, settings: &CalculatorSettings) -> Result<Option<CalculationRequest>> {
    let request = match command {
        Command::Convert {
            value,
            from,
            to,
            category,
        } => CalculationRequest::Convert(ConversionInput {
            value: *value,
            from_unit: from.clone(),
            to_unit: to.clone(),
            category: category.clone(),
        }),
        Command::Physics { formula, inputs } => CalculationRequest::Physics(PhysicsInput {
            formula: formula.clone(),
            inputs: inputs.iter().cloned().collect::<HashMap<_, _>>(),
        }),
        Command::Invest {
            principal,
            monthly,
            rate,
            years,
        } => {
            let defaults = settings.investment;
            CalculationRequest::Investment(InvestmentInput {
                principal: principal.unwrap_or(defaults.principal),
                monthly_contribution: monthly.unwrap_or(defaults.monthly_contribution),
                annual_rate_percent: rate.unwrap_or(defaults.annual_rate_percent),
                years: years.unwrap_or(defaults.years),
            })
        }
        Command::Loan { principal, rate, years } => {
            let defaults = settings.loan;
            CalculationRequest::Loan(LoanInput {
                principal: principal.unwrap_or(defaults.principal),
                annual_rate_percent: rate.unwrap_or(defaults.annual_rate_percent),
                years: years.unwrap_or(defaults.years),
            })
        }
        Command::Salary { hourly, hours, weeks } => {
            let defaults = settings.salary;
            CalculationRequest::Salary(SalaryInput {
                hourly_rate: hourly.unwrap_or(defaults.hourly_rate),
                hours_per_week: hours.unwrap_or(defaults.hours_per_week),
                weeks_per_year: weeks.unwrap_or(defaults.weeks_per_year),
            })
        }
        Command::Bmi { weight_kg, height_cm } => CalculationRequest::Bmi(BmiInput {
            weight_kg: *weight_kg,
            height_cm: *height_cm,
        }),
        Command::Arith { a, op, b } => CalculationRequest::Arithmetic(ArithmeticInput {
            a: *a,
            op: op.parse::<BinaryOp>()?,
            b: *b,
        }),
        Command::Formulas | Command::Units { .. } => return Ok(None),
    };
    Ok(Some(request))
}

fn print_listing(command: &Command, json: bool) -> Result<()> {
    match command {
        Command::Formulas => {
            if json {
                let listing: Vec<_> = STANDARD_FORMULAS
                    .iter()
                    .map(|spec| {
                        let fields: Vec<_> = spec.fields.iter().map(|f| f.symbol).collect();
                        serde_json::json!({
                            "key": spec.key,
                            "name": spec.name,
                            "equation": spec.equation,
                            "fields": fields,
                            "unit": spec.unit,
                        })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&listing)?);
            } else {
                for spec in STANDARD_FORMULAS.iter() {
                    let fields: Vec<_> = spec.fields.iter().map(|f| f.symbol).collect();
                    println!("  {:<14} {:<20} inputs: {:<6} -> {}", spec.key, spec.equation, fields.join(","), spec.unit);
                }
            }
        }
        Command::Units { category } => {
            let categories = match category {
                Some(name) => vec![UnitCategory::parse(name)?],
                None => UnitCategory::ALL.to_vec(),
            };
            if json {
                let listing: Vec<_> = categories
                    .iter()
                    .map(|c| {
                        let units: Vec<_> = c.units().iter().map(|u| u.key()).collect();
                        serde_json::json!({ "category": c.key(), "units": units })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&listing)?);
            } else {
                for c in categories {
                    println!("{}:", c.display_name());
                    for unit in c.units() {
                        println!("  {:<12} {}", unit.key(), unit.symbol());
                    }
                }
            }
        }
        _ => {}
    }
    Ok(())
}

fn banner(title: &str) {
    println!("═══════════════════════════════════════");
    println!("  {}", title);
    println!("═══════════════════════════════════════");
}

fn print_report(request: &CalculationRequest, output: &CalculationOutput, settings: &CalculatorSettings) {
    let fmt = |v: f64| settings.format_value(v);
    match (request, output) {
        (CalculationRequest::Convert(input), CalculationOutput::Convert(result)) => {
            println!("{} {} = {} {}", input.value, input.from_unit, fmt(result.value), result.symbol);
            if UnitCategory::parse(&input.category).ok() == Some(UnitCategory::Currency) {
                println!(
                    "({}, {}-{:02}, {} months old)",
                    RATE_SNAPSHOT.label,
                    RATE_SNAPSHOT.year,
                    RATE_SNAPSHOT.month,
                    RATE_SNAPSHOT.age_today()
                );
            }
        }
        (_, CalculationOutput::Physics(result)) => {
            println!("{} {}", fmt(result.value), result.unit);
        }
        (CalculationRequest::Investment(input), CalculationOutput::Investment(projection)) => {
            banner("INVESTMENT GROWTH");
            println!();
            println!("Input:");
            println!("  Principal:    {:.2}", input.principal);
            println!("  Monthly:      {:.2}", input.monthly_contribution);
            println!("  Annual rate:  {}%", input.annual_rate_percent);
            println!("  Years:        {}", input.years);
            println!();
            println!("  Year        Balance    Contributed");
            for snapshot in &projection.schedule {
                println!("  {:>4} {:>14.2} {:>14.2}", snapshot.period, snapshot.balance, snapshot.contributed);
            }
            println!();
            println!("  Total:    {}", fmt(projection.summary.total));
            println!("  Invested: {}", fmt(projection.summary.invested));
            println!("  Interest: {}", fmt(projection.summary.interest));
        }
        (CalculationRequest::Loan(input), CalculationOutput::Loan(loan)) => {
            banner("LOAN AMORTIZATION");
            println!();
            println!("Input:");
            println!("  Principal:    {:.2}", input.principal);
            println!("  Annual rate:  {}%", input.annual_rate_percent);
            println!("  Years:        {}", input.years);
            println!();
            println!("  Year        Balance           Paid");
            for snapshot in &loan.schedule {
                println!("  {:>4} {:>14.2} {:>14.2}", snapshot.period, snapshot.balance, snapshot.contributed);
            }
            println!();
            println!("  Monthly payment: {}", fmt(loan.summary.monthly_payment));
            println!("  Total paid:      {}", fmt(loan.summary.total_paid));
            println!("  Total interest:  {}", fmt(loan.summary.total_interest));
        }
        (_, CalculationOutput::Salary(pay)) => {
            println!("  Daily:   {}", fmt(pay.daily));
            println!("  Weekly:  {}", fmt(pay.weekly));
            println!("  Monthly: {}", fmt(pay.monthly));
            println!("  Annual:  {}", fmt(pay.annual));
        }
        (_, CalculationOutput::Bmi(result)) => {
            println!("BMI {:.1} ({})", result.bmi, result.category.display_name());
        }
        (CalculationRequest::Arithmetic(input), CalculationOutput::Arithmetic { value }) => {
            println!("{} {} {} = {}", input.a, input.op, input.b, fmt(*value));
        }
        (_, other) => {
            // Request and output kinds always pair up; fall back to JSON otherwise
            if let Ok(json) = serde_json::to_string_pretty(other) {
                println!("{}", json);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_val() {
        assert_eq!(parse_key_val("m=2").unwrap(), ("m".to_string(), "2".to_string()));
        assert!(parse_key_val("m2").is_err());
    }

    #[test]
    fn test_finance_defaults_come_from_settings() {
        let mut settings = CalculatorSettings::default();
        settings.loan.years = 15.0;
        let command = Command::Loan {
            principal: Some(100_000.0),
            rate: None,
            years: None,
        };
        match build_request(&command, &settings).unwrap() {
            Some(CalculationRequest::Loan(input)) => {
                assert_eq!(input.principal, 100_000.0);
                assert_eq!(input.annual_rate_percent, 5.5);
                assert_eq!(input.years, 15.0);
            }
            other => panic!("unexpected request {:?}", other),
        }
    }

    #[test]
    fn test_cli_parses_subcommands() {
        let cli = Cli::parse_from(["omnicalc", "--json", "arith", "-6", "/", "3"]);
        assert!(cli.json);
        let request = build_request(&cli.command, &CalculatorSettings::default()).unwrap();
        assert!(matches!(request, Some(CalculationRequest::Arithmetic(_))));

        let cli = Cli::parse_from(["omnicalc", "arith", "7", "mod", "3"]);
        let output = build_request(&cli.command, &CalculatorSettings::default())
            .unwrap()
            .unwrap()
            .run()
            .unwrap();
        assert!(matches!(output, CalculationOutput::Arithmetic { value } if value == 1.0));

        let cli = Cli::parse_from(["omnicalc", "physics", "kinetic", "m=2", "v=3"]);
        let output = build_request(&cli.command, &CalculatorSettings::default())
            .unwrap()
            .unwrap()
            .run()
            .unwrap();
        assert!(matches!(output, CalculationOutput::Physics(ref r) if r.value == 9.0));
    }

    #[test]
    fn test_listing_commands_have_no_request() {
        let cli = Cli::parse_from(["omnicalc", "units", "mass"]);
        assert!(build_request(&cli.command, &CalculatorSettings::default()).unwrap().is_none());
    }
}
