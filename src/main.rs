use anyhow::Result;
use clap::{Parser, Subcommand};

use fintrack::cli::{
    handle_audit_command, handle_budget_command, handle_config_command, handle_expense_command,
    handle_export_command, handle_goal_command, handle_income_command, handle_init_command,
    handle_investment_command, handle_recurring_command, handle_report_command,
    handle_split_command, AuditArgs,
};
use fintrack::config::{FintrackPaths, Settings};
use fintrack::storage::Storage;

#[derive(Parser)]
#[command(
    name = "fintrack",
    version,
    about = "Personal finance tracker with budget, goal and investment analytics",
    long_about = "Personal finance tracker.\n\n\
                  fintrack records expenses, income, budgets, investments, savings goals, \
                  recurring transactions and shared bills in local JSON files, and turns \
                  them into dashboards, budget status, portfolio and trend reports."
)]
struct Cli {
    /// Show debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the data directory and settings file
    Init,

    /// Show or change settings
    Config {
        #[command(subcommand)]
        cmd: Option<fintrack::cli::ConfigCommands>,
    },

    /// Expense commands
    #[command(subcommand, alias = "exp")]
    Expense(fintrack::cli::ExpenseCommands),

    /// Income commands
    #[command(subcommand, alias = "inc")]
    Income(fintrack::cli::IncomeCommands),

    /// Monthly budget commands
    #[command(subcommand)]
    Budget(fintrack::cli::BudgetCommands),

    /// Investment commands
    #[command(subcommand, alias = "inv")]
    Investment(fintrack::cli::InvestmentCommands),

    /// Savings goal commands
    #[command(subcommand)]
    Goal(fintrack::cli::GoalCommands),

    /// Recurring transaction commands
    #[command(subcommand, alias = "rec")]
    Recurring(fintrack::cli::RecurringCommands),

    /// Split bill commands
    #[command(subcommand)]
    Split(fintrack::cli::SplitCommands),

    /// Generate reports
    #[command(subcommand)]
    Report(fintrack::cli::ReportCommands),

    /// Export data
    #[command(subcommand)]
    Export(fintrack::cli::ExportCommands),

    /// Show recent changes
    Audit(AuditArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .target(env_logger::Target::Stderr)
        .init();

    // Initialize paths and settings
    let paths = FintrackPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    let storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Init) => handle_init_command(&paths, &settings)?,
        Some(Commands::Config { cmd }) => handle_config_command(&paths, &mut settings, cmd)?,
        Some(Commands::Expense(cmd)) => handle_expense_command(&storage, &settings, cmd)?,
        Some(Commands::Income(cmd)) => handle_income_command(&storage, &settings, cmd)?,
        Some(Commands::Budget(cmd)) => handle_budget_command(&storage, &settings, cmd)?,
        Some(Commands::Investment(cmd)) => handle_investment_command(&storage, &settings, cmd)?,
        Some(Commands::Goal(cmd)) => handle_goal_command(&storage, &settings, cmd)?,
        Some(Commands::Recurring(cmd)) => handle_recurring_command(&storage, &settings, cmd)?,
        Some(Commands::Split(cmd)) => handle_split_command(&storage, &settings, cmd)?,
        Some(Commands::Report(cmd)) => handle_report_command(&storage, &settings, cmd)?,
        Some(Commands::Export(cmd)) => handle_export_command(&storage, &settings, cmd)?,
        Some(Commands::Audit(args)) => handle_audit_command(&storage, args)?,
        None => {
            println!("fintrack - Personal finance tracking");
            println!();
            println!("Run 'fintrack init' to get started.");
            println!("Run 'fintrack --help' for usage information.");
        }
    }

    Ok(())
}
