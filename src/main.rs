use anyhow::Result;
use clap::{Parser, Subcommand};

use akiba::cli::{
    handle_account_command, handle_auth_command, handle_category_command, handle_report_command,
    handle_transaction_command, AccountCommands, AuthCommands, CategoryCommands, ReportCommands,
    TransactionCommands,
};
use akiba::config::{AkibaPaths, Settings};
use akiba::context::AppContext;
use akiba::error::{AkibaError, AkibaResult};
use akiba::logging::setup_logging;

#[derive(Parser)]
#[command(
    name = "akiba",
    version,
    about = "Terminal client for the AkibaFlow personal finance API",
    long_about = "Akiba talks to the AkibaFlow REST API: manage accounts, categories \
                  and transactions, and see where your money goes with the \
                  dashboard, spending and 50/30/20 budget reports."
)]
struct Cli {
    /// API base URL (overrides AKIBA_API_BASE_URL and the config file)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Log requests and cache activity to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in, register, log out, or show the current user
    #[command(subcommand)]
    Auth(AuthCommands),

    /// Account management commands
    #[command(subcommand)]
    Account(AccountCommands),

    /// Category management commands
    #[command(subcommand)]
    Category(CategoryCommands),

    /// Transaction management commands
    #[command(subcommand, alias = "txn")]
    Transaction(TransactionCommands),

    /// Dashboard, spending and budget reports
    #[command(subcommand)]
    Report(ReportCommands),

    /// Show current configuration and paths
    Config,
}

impl Commands {
    fn action(&self) -> &'static str {
        match self {
            Commands::Auth(cmd) => cmd.action(),
            Commands::Account(cmd) => cmd.action(),
            Commands::Category(cmd) => cmd.action(),
            Commands::Transaction(cmd) => cmd.action(),
            Commands::Report(cmd) => cmd.action(),
            Commands::Config => "show configuration",
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let Some(command) = cli.command else {
        println!("Akiba - personal finance from the command line");
        println!();
        println!("Run 'akiba --help' for usage information.");
        println!("Run 'akiba auth login' to get started.");
        return Ok(());
    };

    let action = command.action();
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime
        .block_on(run(command, cli.api_url.as_deref()))
        .map_err(|err| failure(action, err))
}

async fn run(command: Commands, api_url: Option<&str>) -> AkibaResult<()> {
    let paths = AkibaPaths::new()?;

    if let Commands::Config = command {
        return show_config(&paths, api_url);
    }

    let ctx = AppContext::init(paths, api_url)?;

    match command {
        Commands::Auth(cmd) => handle_auth_command(&ctx, cmd).await,
        Commands::Account(cmd) => handle_account_command(&ctx, cmd).await,
        Commands::Category(cmd) => handle_category_command(&ctx, cmd).await,
        Commands::Transaction(cmd) => handle_transaction_command(&ctx, cmd).await,
        Commands::Report(cmd) => handle_report_command(&ctx, cmd).await,
        Commands::Config => Ok(()),
    }
}

fn show_config(paths: &AkibaPaths, api_url: Option<&str>) -> AkibaResult<()> {
    let settings = Settings::load_or_create(paths)?.with_overrides(api_url)?;
    let session = akiba::storage::SessionStore::load(paths.session_file())?;

    println!("Akiba Configuration");
    println!("===================");
    println!("Data directory: {}", paths.base_dir().display());
    println!("Settings file:  {}", paths.settings_file().display());
    println!("Session file:   {}", paths.session_file().display());
    println!();
    println!("Settings:");
    println!("  API base URL:  {}", settings.api_base_url);
    println!("  Currency:      {}", settings.currency);
    println!("  Page size:     {}", settings.page_size);
    println!("  Recent limit:  {}", settings.recent_limit);
    println!();
    match session.user()? {
        Some(user) => println!("Logged in as {}", user),
        None => println!("Not logged in"),
    }
    Ok(())
}

fn failure(action: &str, err: AkibaError) -> anyhow::Error {
    let mut message = format!("Failed to {}: {}", action, err.user_message());
    if err.is_unauthorized() && !matches!(err, AkibaError::NotAuthenticated) {
        message.push_str("\nYour session may have expired. Run 'akiba auth login' to log in again.");
    }
    anyhow::anyhow!(message)
}
