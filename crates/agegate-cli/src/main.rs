//! agegate - replay age gate page loads from the terminal
//!
//! Runs the same engine the browser adapter mounts, with a headless view and a
//! JSON file standing in for the cookie jar. Useful for checking a
//! configuration or a birthdate against a given day without a browser.

use std::path::PathBuf;

use agegate_core::{
    build_form, is_eligible, AgeGate, ChoiceStore, Clock, EligibilityDecision, FixedClock,
    GateConfig, GateState, MemoryView, SystemClock,
};
use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod jar;

use jar::FileCookieJar;

#[derive(Parser)]
#[command(name = "agegate", about = "Age gate developer harness")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "AGEGATE_CONFIG", global = true)]
    config: Option<String>,

    /// Cookie jar file shared between visits
    #[arg(
        long,
        env = "AGEGATE_JAR",
        default_value = "agegate-cookies.json",
        global = true
    )]
    jar: PathBuf,

    /// Pretend today is this date (YYYY-MM-DD)
    #[arg(long, global = true)]
    today: Option<NaiveDate>,

    /// Override the configured minimum age
    #[arg(long, global = true)]
    min_age: Option<u32>,

    /// Log level
    #[arg(long, env = "AGEGATE_LOG_LEVEL", default_value = "warn", global = true)]
    log_level: String,

    /// Enable JSON logging
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the month and year options the form would offer
    Form {
        #[arg(long)]
        json: bool,
    },

    /// Evaluate a birth month/year without touching the cookie jar
    Check {
        /// Zero-based month (January = 0)
        #[arg(long, allow_hyphen_values = true)]
        month: i32,
        #[arg(long, allow_hyphen_values = true)]
        year: i32,
        #[arg(long)]
        json: bool,
    },

    /// Simulate one page load, optionally submitting the form
    Visit {
        /// Raw month selector value; empty or invalid picks the first option
        #[arg(long, allow_hyphen_values = true)]
        month: Option<String>,
        /// Raw year selector value; empty or invalid picks the first option
        #[arg(long, allow_hyphen_values = true)]
        year: Option<String>,
        /// Tick "Remember Me"
        #[arg(long)]
        remember: bool,
        #[arg(long)]
        json: bool,
    },

    /// Expire the remembered decision
    Forget,
}

#[derive(Serialize)]
struct CheckReport {
    month: i32,
    year: i32,
    minimum_age: u32,
    today: NaiveDate,
    decision: EligibilityDecision,
}

#[derive(Serialize)]
struct VisitReport {
    today: NaiveDate,
    submitted: bool,
    state: GateState,
    decision: EligibilityDecision,
    gate_visible: bool,
    message: Option<String>,
    form_rendered: bool,
    remembered: Option<EligibilityDecision>,
}

fn init_tracing(cli: &Cli) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| cli.log_level.clone().into());

    if cli.json_logs {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn load_config(cli: &Cli) -> Result<GateConfig> {
    let mut config = GateConfig::load(cli.config.as_deref()).context("loading configuration")?;
    if let Some(age) = cli.min_age {
        config.minimum_age = age;
    }
    Ok(config)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli);

    let config = load_config(&cli)?;
    let clock = FixedClock(cli.today.unwrap_or_else(|| SystemClock.today()));

    match &cli.command {
        Commands::Form { json } => {
            let form = build_form(&config, clock.today().year());
            if *json {
                print_json(&form)?;
            } else {
                let months: Vec<String> = form
                    .month
                    .options
                    .iter()
                    .map(|o| format!("{}={}", o.value, o.label))
                    .collect();
                println!("months: {}", months.join(", "));
                println!(
                    "years:  {} .. {} ({} options)",
                    form.year.options.first().map(|o| o.value).unwrap_or_default(),
                    form.year.options.last().map(|o| o.value).unwrap_or_default(),
                    form.year.options.len()
                );
            }
        }

        Commands::Check { month, year, json } => {
            let eligible = is_eligible(&config, *month, *year, clock.today());
            let report = CheckReport {
                month: *month,
                year: *year,
                minimum_age: config.minimum_age,
                today: clock.today(),
                decision: EligibilityDecision::from_eligible(eligible),
            };
            if *json {
                print_json(&report)?;
            } else {
                println!("{}", report.decision);
            }
        }

        Commands::Visit {
            month,
            year,
            remember,
            json,
        } => {
            let jar = FileCookieJar::open(&cli.jar)
                .with_context(|| format!("opening cookie jar {}", cli.jar.display()))?;
            let mut gate = AgeGate::initialize(config, MemoryView::new(), jar, clock)?;

            let wants_submit = month.is_some() || year.is_some();
            let submitted = wants_submit && gate.form().is_some() && !gate.state().is_terminal();
            if submitted {
                let selection = gate
                    .form()
                    .map(|form| form.selection_from_values(month.as_deref(), year.as_deref()))
                    .context("form missing after initialisation")?;
                gate.submit(selection, *remember);
            } else if wants_submit {
                info!(state = %gate.state(), "Gate not asking, selection ignored");
            }

            let report = VisitReport {
                today: clock.today(),
                submitted,
                state: gate.state(),
                decision: gate.decision(),
                gate_visible: gate.view().is_visible(),
                message: gate.view().message().map(str::to_string),
                form_rendered: gate.view().render_count() > 0,
                remembered: gate.store().read().map(|c| c.decision()),
            };

            if *json {
                print_json(&report)?;
            } else {
                println!("state:      {}", report.state);
                println!("gate:       {}", if report.gate_visible { "visible" } else { "hidden" });
                if let Some(message) = &report.message {
                    println!("message:    {}", message);
                }
                match report.remembered {
                    Some(decision) => println!("remembered: {}", decision),
                    None => println!("remembered: nothing"),
                }
            }
        }

        Commands::Forget => {
            let mut jar = FileCookieJar::open(&cli.jar)
                .with_context(|| format!("opening cookie jar {}", cli.jar.display()))?;
            jar.clear().context("clearing decision")?;
            println!("forgot decision in {}", jar.path().display());
        }
    }

    Ok(())
}
