//! Account CLI commands
//!
//! Implements CLI commands for account management.

use clap::Subcommand;

use crate::api::Transport;
use crate::context::AppContext;
use crate::display::account::{format_account_details, format_account_list};
use crate::error::{AkibaError, AkibaResult};
use crate::models::{AccountType, AccountUpdate};
use crate::services::AccountService;

/// Account subcommands
#[derive(Subcommand)]
pub enum AccountCommands {
    /// List all accounts with a total balance
    List,
    /// Show account details
    Show {
        /// Account name or ID
        account: String,
    },
    /// Create a new account
    Create {
        /// Account name
        name: String,
        /// Account type (checking, savings, credit)
        #[arg(short = 't', long, default_value = "checking")]
        account_type: String,
        /// Opening balance (e.g., "1000.00" or "1000")
        #[arg(short, long, default_value = "0")]
        balance: String,
        /// Currency code (defaults to the configured currency)
        #[arg(short, long)]
        currency: Option<String>,
    },
    /// Update an account
    Update {
        /// Account name or ID
        account: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New account type
        #[arg(short = 't', long)]
        account_type: Option<String>,
        /// New currency code
        #[arg(short, long)]
        currency: Option<String>,
        /// Mark the account active
        #[arg(long, conflicts_with = "deactivate")]
        activate: bool,
        /// Mark the account inactive
        #[arg(long)]
        deactivate: bool,
    },
    /// Delete an account
    Delete {
        /// Account name or ID
        account: String,
    },
}

impl AccountCommands {
    pub fn action(&self) -> &'static str {
        match self {
            Self::List => "fetch accounts",
            Self::Show { .. } => "fetch account",
            Self::Create { .. } => "create account",
            Self::Update { .. } => "update account",
            Self::Delete { .. } => "delete account",
        }
    }
}

/// Handle an account command
pub async fn handle_account_command<T: Transport>(
    ctx: &AppContext<T>,
    cmd: AccountCommands,
) -> AkibaResult<()> {
    let service = AccountService::new(ctx.client());

    match cmd {
        AccountCommands::List => {
            let accounts = service.list().await?;
            print!("{}", format_account_list(&accounts));
        }

        AccountCommands::Show { account } => {
            let found = service.find(&account).await?;
            let fresh = service.get(found.id).await?;
            print!("{}", format_account_details(&fresh));
        }

        AccountCommands::Create {
            name,
            account_type,
            balance,
            currency,
        } => {
            let currency = currency.unwrap_or_else(|| ctx.settings.currency.clone());
            let account = service
                .create(&name, &balance, &currency, &account_type)
                .await?;

            println!("Created account: {}", account.name);
            println!("  Type: {}", account.account_type);
            println!(
                "  Balance: {}",
                account.current_balance.format_with_currency(&account.currency)
            );
            println!("  ID: {}", account.id);
        }

        AccountCommands::Update {
            account,
            name,
            account_type,
            currency,
            activate,
            deactivate,
        } => {
            let account_type = account_type
                .map(|raw| {
                    AccountType::parse(&raw).ok_or_else(|| {
                        AkibaError::Validation(format!(
                            "Invalid account type '{}'. Valid types: checking, savings, credit",
                            raw
                        ))
                    })
                })
                .transpose()?;

            let update = AccountUpdate {
                name,
                currency: currency.map(|c| c.trim().to_uppercase()),
                account_type,
                is_active: match (activate, deactivate) {
                    (true, _) => Some(true),
                    (_, true) => Some(false),
                    _ => None,
                },
            };

            if update.is_empty() {
                println!("No changes specified. Use --name, --account-type, --currency, --activate or --deactivate.");
                return Ok(());
            }

            let found = service.find(&account).await?;
            let updated = service.update(found.id, &update).await?;
            println!("Updated account: {}", updated.name);
        }

        AccountCommands::Delete { account } => {
            let found = service.find(&account).await?;
            service.delete(found.id).await?;
            println!("Deleted account: {}", found.name);
        }
    }

    Ok(())
}
