use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use verda_config::ConfigManager;
use verda_core::{
    bill_service::RuleBasedMockExtractor,
    public_api::{EmissionsEngine, SaveOutcome},
    random::StdRandom,
    reward_service::WeeklyOutcome,
    time::SystemClock,
};
use verda_domain::{AccountType, Category, CategoryPayload, GroceryItem};
use verda_storage_json::JsonRecordStore;

#[derive(Parser, Debug)]
#[command(name = "verda", version, about = "Personal carbon emissions tracker")]
struct Cli {
    /// Account profile: individual or family (defaults to the configured one)
    #[arg(long, global = true)]
    account: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute emissions for one event without saving it
    Calc {
        #[command(subcommand)]
        payload: PayloadCommand,
    },

    /// Compute emissions and append the record to the ledger
    Save {
        #[command(subcommand)]
        payload: PayloadCommand,
    },

    /// List saved records, newest first
    History {
        /// Restrict to one category: electricity, gas or grocery
        #[arg(long)]
        category: Option<String>,

        /// Maximum records printed
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },

    /// Daily, monthly and yearly totals plus the benchmark verdict
    Dashboard,

    /// Per-month chart totals over the configured window
    Months,

    /// Weekly reduction score
    Reward,

    /// Classify free-form bill text and estimate its footprint
    AnalyzeBill {
        /// Bill or receipt text to analyze
        text: String,

        /// Seed for the synthetic estimate, for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Save the analysis as a genuine record after printing it
        #[arg(long)]
        confirm: bool,
    },
}

#[derive(Subcommand, Debug)]
enum PayloadCommand {
    /// Electricity usage in kWh
    Electricity { units: f64 },

    /// LPG usage in kilograms
    Gas { kg: f64 },

    /// Grocery lines as name:quantity[:unit]
    Grocery {
        #[arg(required = true)]
        items: Vec<String>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let base = verda_config::Config::default().resolve_data_root();
    let manager = ConfigManager::with_base_dir(base).context("preparing config directory")?;
    let config = manager.load().context("loading configuration")?;

    let account = AccountType::from_str(
        cli.account
            .as_deref()
            .unwrap_or(&config.default_account_type),
    );

    let seed = match &cli.command {
        Command::AnalyzeBill { seed, .. } => *seed,
        _ => None,
    };
    let random = match seed {
        Some(value) => StdRandom::seeded(value),
        None => StdRandom::from_entropy(),
    };

    let store = JsonRecordStore::open(config.ledger_path())
        .with_context(|| format!("opening ledger at {}", config.ledger_path().display()))?;
    let mut engine = EmissionsEngine::new(
        Box::new(store),
        Box::new(SystemClock),
        Box::new(RuleBasedMockExtractor::new(random)),
    );

    match cli.command {
        Command::Calc { payload } => {
            let payload = build_payload(payload)?;
            let result = engine.calculate(&payload, account)?;
            println!("Total: {:.2} kg CO2e", result.total_emissions);
            println!("Status: {}", result.status_label);
            print_tips(&result.suggestions);
        }

        Command::Save { payload } => {
            let payload = build_payload(payload)?;
            // Trend is computed against the ledger as it stood before this save.
            let trend = engine.trend_for(
                engine.calculate(&payload, account)?.total_emissions,
                payload.category(),
            )?;
            let outcome = engine.calculate_and_save(payload, account)?;
            print_save(&outcome, account)?;
            if let Some(comparison) = trend {
                println!(
                    "Trend: {} ({:.2} kg vs the previous {} record)",
                    comparison.status,
                    comparison.difference,
                    outcome.record.category
                );
            }
        }

        Command::History { category, limit } => {
            let filter = match category.as_deref() {
                Some(raw) => Some(
                    Category::parse(raw)
                        .with_context(|| format!("unknown category `{raw}`"))?,
                ),
                None => None,
            };
            let records = engine.query_history(filter)?;
            if records.is_empty() {
                println!("No records yet.");
            }
            for record in records.iter().take(limit) {
                println!(
                    "{}  {:<11} {:>8.2} kg CO2e  {}",
                    record.recorded_at.format("%Y-%m-%d %H:%M"),
                    record.category.to_string(),
                    record.total_emissions,
                    record.analysis.status_label
                );
            }
        }

        Command::Dashboard => {
            let summary = engine.dashboard_summary()?;
            let suffix = if summary.is_estimated { " (estimated)" } else { "" };
            println!("Today:      {:.2} kg CO2e{suffix}", summary.daily);
            println!("This month: {:.2} kg CO2e{suffix}", summary.monthly);
            println!("This year:  {:.2} kg CO2e{suffix}", summary.yearly);
            match summary.highest_contributor {
                Some(category) => println!("Highest contributor: {category}"),
                None => println!("Highest contributor: none"),
            }
            println!("Days tracked: {}", summary.days_tracked);
            println!("Benchmark: {}", engine.benchmark_status(account)?);
        }

        Command::Months => {
            let months = engine.recent_months(config.chart_months as usize)?;
            for bucket in months {
                println!("{} {}  {:>8.2} kg CO2e", bucket.label, bucket.year, bucket.total);
            }
        }

        Command::Reward => {
            let reward = engine.weekly_reward()?;
            println!("This week: {:.2} kg CO2e", reward.this_week);
            println!("Last week: {:.2} kg CO2e", reward.last_week);
            match reward.outcome {
                WeeklyOutcome::Scored {
                    reduction_percent,
                    progress_percent,
                } => {
                    println!("Reduction: {reduction_percent:.1}%");
                    println!("Progress:  {progress_percent:.1}%");
                }
                WeeklyOutcome::InitialWeek => {
                    println!(
                        "First tracked week; progress starts at {:.1}%",
                        reward.outcome.progress_percent()
                    );
                }
            }
        }

        Command::AnalyzeBill { text, confirm, .. } => {
            let analysis = engine.analyze_bill_text(&text);
            println!("Bill type: {}", analysis.bill_type);
            println!("Estimated footprint: {:.2} kg CO2e", analysis.carbon_emissions);
            println!("Status: {}", analysis.status_label);
            println!(
                "Dominant contributor: {} ({:.2} kg CO2e)",
                analysis.dominant_contributor.name, analysis.dominant_contributor.impact
            );
            for item in &analysis.detected_items {
                println!("  {:<26} {:>8}  {:>6.2} kg CO2e", item.name, item.quantity, item.co2_impact);
            }
            print_tips(&analysis.reduction_tips);

            if confirm {
                let outcome = engine.confirm_analysis(&analysis, account)?;
                print_save(&outcome, account)?;
            }
        }
    }

    Ok(())
}

fn build_payload(command: PayloadCommand) -> Result<CategoryPayload> {
    Ok(match command {
        PayloadCommand::Electricity { units } => CategoryPayload::Electricity { units },
        PayloadCommand::Gas { kg } => CategoryPayload::Gas { kg },
        PayloadCommand::Grocery { items } => CategoryPayload::Grocery {
            items: items
                .iter()
                .map(|raw| parse_grocery_item(raw))
                .collect::<Result<Vec<_>>>()?,
        },
    })
}

/// Parses a `name:quantity[:unit]` grocery argument.
fn parse_grocery_item(raw: &str) -> Result<GroceryItem> {
    let mut parts = raw.splitn(3, ':');
    let name = parts.next().unwrap_or_default().trim();
    let quantity = parts.next();
    let unit = parts.next().map(str::trim).unwrap_or("unit");
    let Some(quantity) = quantity else {
        bail!("grocery item `{raw}` is missing a quantity (expected name:quantity[:unit])");
    };
    if name.is_empty() {
        bail!("grocery item `{raw}` is missing a name");
    }
    let quantity: f64 = quantity
        .trim()
        .parse()
        .with_context(|| format!("grocery item `{raw}` has a non-numeric quantity"))?;
    Ok(GroceryItem::new(name, quantity, unit))
}

fn print_save(outcome: &SaveOutcome, account: AccountType) -> Result<()> {
    println!(
        "Saved {:.2} kg CO2e ({} account)",
        outcome.calculation.total_emissions, account
    );
    println!("Status: {}", outcome.calculation.status_label);
    print_tips(&outcome.calculation.suggestions);
    if let Some(err) = &outcome.store_error {
        bail!("record was computed but could not be saved: {err}");
    }
    Ok(())
}

fn print_tips(tips: &[String]) {
    for tip in tips {
        println!("  - {tip}");
    }
}
