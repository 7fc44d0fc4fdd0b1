mod commands;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use smart_todo_core::draft::DEFAULT_ESTIMATE_MINUTES;
use smart_todo_core::task::Priority;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "smart-todo", about = "Personal task manager with list, calendar and analytics views", version)]
struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Workspace root to use instead of searching upward from the current directory
    #[arg(long, global = true, env = "SMART_TODO_DIR")]
    dir: Option<PathBuf>,

    /// Log debug output to stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new task workspace
    Init {
        /// Store the strict validation policy in the workspace config
        #[arg(long)]
        strict: bool,
    },

    /// Create a new task
    Add {
        /// Task title (required)
        #[arg(short, long, default_value = "")]
        title: String,

        /// Category label (required)
        #[arg(short, long, default_value = "")]
        category: String,

        /// Longer description
        #[arg(short, long, default_value = "")]
        description: String,

        /// Priority (low, medium, high)
        #[arg(short, long, default_value = "medium")]
        priority: Priority,

        /// Due date as YYYY-MM-DD (defaults to today)
        #[arg(long)]
        due: Option<NaiveDate>,

        /// Estimated time in minutes
        #[arg(short, long, default_value_t = DEFAULT_ESTIMATE_MINUTES)]
        estimate: u32,

        /// Validate with the strict policy for this invocation
        #[arg(long)]
        strict: bool,
    },

    /// Edit an existing task; omitted fields keep their current value
    Edit {
        /// Task ID (full or prefix, minimum 4 chars)
        id: String,

        #[arg(short, long)]
        title: Option<String>,

        #[arg(short, long)]
        category: Option<String>,

        #[arg(short, long)]
        description: Option<String>,

        #[arg(short, long)]
        priority: Option<Priority>,

        #[arg(long)]
        due: Option<NaiveDate>,

        #[arg(short, long)]
        estimate: Option<u32>,

        /// Validate with the strict policy for this invocation
        #[arg(long)]
        strict: bool,
    },

    /// Toggle a task between completed and in progress
    Done {
        /// Task ID (full or prefix, minimum 4 chars)
        id: String,
    },

    /// Delete a task
    Rm {
        /// Task ID (full or prefix, minimum 4 chars)
        id: String,
    },

    /// Delete every task
    Clear {
        /// Confirm deleting all tasks
        #[arg(long)]
        yes: bool,
    },

    /// List tasks ordered by completion, priority and due date
    List,

    /// Show every field of one task
    Show {
        /// Task ID (full or prefix, minimum 4 chars)
        id: String,
    },

    /// Show a month calendar of due tasks
    Calendar {
        /// Year (defaults to the current year)
        #[arg(long)]
        year: Option<i32>,

        /// Month 1-12 (defaults to the current month)
        #[arg(long)]
        month: Option<u32>,
    },

    /// Show completion statistics and recommendations
    Stats,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let dir = cli.dir.as_deref();
    let result = match cli.command {
        Commands::Init { strict } => commands::init::run(dir, strict),
        Commands::Add {
            title,
            category,
            description,
            priority,
            due,
            estimate,
            strict,
        } => commands::add::run(
            dir,
            commands::add::Fields {
                title,
                category,
                description,
                priority,
                due,
                estimate,
            },
            strict,
        ),
        Commands::Edit {
            id,
            title,
            category,
            description,
            priority,
            due,
            estimate,
            strict,
        } => commands::edit::run(
            dir,
            id,
            commands::edit::Changes {
                title,
                category,
                description,
                priority,
                due,
                estimate,
            },
            strict,
        ),
        Commands::Done { id } => commands::done::run(dir, id),
        Commands::Rm { id } => commands::rm::run(dir, id),
        Commands::Clear { yes } => commands::clear::run(dir, yes),
        Commands::List => commands::list::run(dir, cli.json),
        Commands::Show { id } => commands::show::run(dir, id, cli.json),
        Commands::Calendar { year, month } => commands::calendar::run(dir, year, month, cli.json),
        Commands::Stats => commands::stats::run(dir, cli.json),
    };

    if let Err(e) = result {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}
