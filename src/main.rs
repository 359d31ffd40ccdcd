use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};

use kitchen_schedule::config::SchedulerConfig;
use kitchen_schedule::models::{time, Order, Schedule};
use kitchen_schedule::scheduler::{KitchenScheduler, ScheduleKpi};
use kitchen_schedule::store::{CsvOrderStore, OrderStore};

#[derive(Parser)]
#[command(
    name = "kitchen-schedule",
    about = "Schedule kitchen orders with Priority, FCFS, SJF or Round Robin",
    version,
    propagate_version = true
)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    /// Order file (overrides `orders_path` from the config)
    #[arg(short, long, global = true)]
    orders: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute and print the schedule for the stored orders
    Schedule {
        /// Policy: "Priority", "FCFS", "SJF" or "Round Robin"
        #[arg(short, long)]
        policy: Option<String>,
        /// Round-robin quantum in minutes
        #[arg(short, long, allow_negative_numbers = true)]
        quantum: Option<i64>,
        /// Evaluate statuses at this instant (YYYY-MM-DD HH:MM:SS) instead of now
        #[arg(long)]
        now: Option<String>,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
        /// Also print schedule metrics
        #[arg(long)]
        metrics: bool,
        /// Skip malformed rows instead of failing
        #[arg(long)]
        skip_malformed: bool,
    },
    /// Append a new order
    Add {
        #[arg(long)]
        customer: String,
        #[arg(long)]
        dish: String,
        /// Preparation time in minutes
        #[arg(long)]
        prep: u32,
        #[arg(long, default_value = "")]
        category: String,
        /// Lower is more urgent
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        priority: i32,
        /// Order time (YYYY-MM-DD HH:MM:SS); defaults to now
        #[arg(long)]
        at: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("kitchen_schedule=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => SchedulerConfig::from_file(path)?,
        None => SchedulerConfig::default(),
    };
    if let Some(path) = cli.orders {
        config.orders_path = path;
    }

    match cli.command {
        Commands::Schedule {
            policy,
            quantum,
            now,
            format,
            metrics,
            skip_malformed,
        } => {
            if let Some(policy) = policy {
                config.policy = policy;
            }
            if let Some(quantum) = quantum {
                config.quantum = quantum;
            }
            config.skip_malformed |= skip_malformed;
            let now = match now {
                Some(s) => time::parse_timestamp(&s).with_context(|| format!("invalid --now {s:?}"))?,
                None => time::now(),
            };
            schedule(&config, now, format, metrics)
        }
        Commands::Add {
            customer,
            dish,
            prep,
            category,
            priority,
            at,
        } => {
            let placed = match at {
                Some(s) => time::parse_timestamp(&s).with_context(|| format!("invalid --at {s:?}"))?,
                None => time::now(),
            };
            let order = Order::new(customer, dish, prep, placed)
                .with_category(category)
                .with_priority(priority);
            CsvOrderStore::from_config(&config).append_order(&order)?;
            println!("Order added");
            Ok(())
        }
    }
}

fn schedule(
    config: &SchedulerConfig,
    now: chrono::DateTime<chrono::FixedOffset>,
    format: Format,
    metrics: bool,
) -> anyhow::Result<()> {
    // Validate policy and quantum before touching the order file.
    let scheduler = KitchenScheduler::from_config(config)?;
    let orders = CsvOrderStore::from_config(config).load_orders()?;
    let schedule = scheduler.schedule(&orders, now)?;
    let kpi = metrics.then(|| ScheduleKpi::calculate(&schedule, &orders));

    match format {
        Format::Json => {
            let mut value = serde_json::to_value(&schedule)?;
            if let Some(kpi) = &kpi {
                value["metrics"] = serde_json::to_value(kpi)?;
            }
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        Format::Text => {
            print_table(&schedule);
            if let Some(kpi) = &kpi {
                println!();
                println!("makespan:        {} min", kpi.makespan_min);
                println!("avg turnaround:  {:.1} min", kpi.avg_turnaround_min);
                println!("avg waiting:     {:.1} min", kpi.avg_waiting_min);
                println!(
                    "status:          {} pending, {} in progress, {} completed",
                    kpi.pending, kpi.in_progress, kpi.completed
                );
                println!("preemptions:     {}", kpi.preemptions);
            }
        }
    }
    Ok(())
}

fn print_table(schedule: &Schedule) {
    println!("algorithm: {}", schedule.policy);
    println!(
        "{:<20} {:<24} {:>5} {:>5} {:>8} {:>8}  {}",
        "CUSTOMER", "DISH", "PREP", "SLICE", "START", "END", "STATUS"
    );
    for entry in &schedule.entries {
        let slice = entry
            .slice
            .map(|s| s.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<20} {:<24} {:>5} {:>5} {:>8} {:>8}  {}",
            entry.order.customer_name,
            entry.order.dish_name,
            entry.order.prep_time,
            slice,
            time::format_clock(&entry.start_time),
            time::format_clock(&entry.end_time),
            entry.status
        );
    }
}
