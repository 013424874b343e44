//! hlf CLI - Landed-cost estimation for goods shipped to Israel.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use hlf_lib::prelude::*;
use std::path::PathBuf;

mod commands;
mod context;
mod display;
mod logging;

use context::AppContext;

#[derive(Parser)]
#[command(name = "hlf")]
#[command(about = "Estimate shipping, customs and VAT on goods shipped to Israel", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbosity level (-v, -vv, -vvv). HLF_LOG overrides this.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Statistics JSON to use instead of the bundled dataset
    #[arg(long, global = true)]
    stats: Option<PathBuf>,

    /// Estimator config JSON (thresholds, bands, tiers, settings)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Full landed-cost breakdown for one product
    Calculate {
        /// Product price in EUR
        price: f64,

        /// Calculation method (conservative, average, optimistic)
        #[arg(short, long)]
        method: Option<CalculationMethod>,

        /// Order mode (single, bulk)
        #[arg(long)]
        mode: Option<OrderMode>,

        /// EUR to ILS exchange rate. Defaults to the historical mean.
        #[arg(short, long)]
        rate: Option<f64>,

        /// Product weight in kg
        #[arg(short, long)]
        weight: Option<f64>,

        /// Product page URL
        #[arg(long)]
        url: Option<String>,
    },

    /// Quick estimate from the historical surcharge percentage
    Quick {
        /// Product price in EUR
        price: f64,

        /// Calculation method (conservative, average, optimistic)
        #[arg(short, long)]
        method: Option<CalculationMethod>,

        /// EUR to ILS exchange rate. Defaults to the historical mean.
        #[arg(short, long)]
        rate: Option<f64>,
    },

    /// Show the loaded fee statistics
    Stats,

    /// Allocate a known shipping cost over a cart
    Cart {
        /// Cart line as <price> or <price>x<quantity> (repeatable)
        #[arg(short, long = "item", required = true)]
        items: Vec<CartItem>,

        /// Shipping charged for the whole order in EUR
        #[arg(short, long)]
        shipping: f64,

        /// EUR to ILS exchange rate. Defaults to the historical mean.
        #[arg(short, long)]
        rate: Option<f64>,
    },

    /// Compare estimates with fees actually paid
    Validate {
        /// JSON list of {name, unit_price, hlf_actual} observations
        file: PathBuf,

        /// Calculation method (conservative, average, optimistic)
        #[arg(short, long)]
        method: Option<CalculationMethod>,

        /// Order mode (single, bulk)
        #[arg(long)]
        mode: Option<OrderMode>,

        /// Number of largest over- and underestimates to list
        #[arg(long, default_value = "3")]
        top: usize,
    },

    /// Build a statistics dataset from historical orders
    BuildStats {
        /// JSON list of historical orders
        orders: PathBuf,

        /// Output file. Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// VAT rate recorded in the dataset
        #[arg(long, default_value = "0.18")]
        vat_rate: f64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    // Building a dataset needs no existing statistics, so load lazily
    let load = || AppContext::load(cli.stats.as_deref(), cli.config.as_deref(), cli.json);

    match command {
        Commands::Calculate {
            price,
            method,
            mode,
            rate,
            weight,
            url,
        } => commands::calculate::calculate(
            &load()?,
            price,
            method,
            mode,
            rate,
            weight,
            url.as_deref(),
        ),
        Commands::Quick {
            price,
            method,
            rate,
        } => commands::quick::quick(&load()?, price, method, rate),
        Commands::Stats => commands::stats::show_stats(&load()?),
        Commands::Cart {
            items,
            shipping,
            rate,
        } => commands::cart::cart(&load()?, items, shipping, rate),
        Commands::Validate {
            file,
            method,
            mode,
            top,
        } => commands::validate::validate(&load()?, &file, method, mode, top),
        Commands::BuildStats {
            orders,
            output,
            vat_rate,
        } => commands::build_stats::build_stats(&orders, output.as_deref(), vat_rate, cli.json),
    }
}
