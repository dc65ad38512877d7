//! Transaction CLI commands
//!
//! Implements CLI commands for transaction management.

use clap::Subcommand;

use crate::api::{Page, Transport};
use crate::context::AppContext;
use crate::display::transaction::{format_transaction_details, format_transaction_register};
use crate::error::{AkibaError, AkibaResult};
use crate::models::{
    timestamp, AccountId, CategoryId, TransactionFilter, TransactionId, TransactionType,
    TransactionUpdate, TypeFilter,
};
use crate::services::{AccountService, CategoryService, TransactionForm, TransactionService};

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// List transactions
    List {
        /// Case-insensitive text to look for in descriptions
        #[arg(short, long)]
        search: Option<String>,
        /// Only show this type (all, income, expense)
        #[arg(short = 't', long = "type", default_value = "all")]
        transaction_type: String,
        /// Only show this category (name or ID)
        #[arg(short = 'C', long)]
        category: Option<String>,
        /// Only show this account (name or ID)
        #[arg(short, long)]
        account: Option<String>,
        /// Number of transactions to fetch (defaults to the configured page size)
        #[arg(short, long)]
        limit: Option<u32>,
        /// Number of transactions to skip
        #[arg(long, default_value = "0")]
        skip: u32,
    },
    /// Show transaction details
    Show {
        /// Transaction ID
        id: String,
    },
    /// Record a new transaction
    Add {
        /// Amount (e.g., "250" or "250.00"), always positive
        amount: String,
        /// Transaction type (income, expense)
        #[arg(short = 't', long = "type", default_value = "expense")]
        transaction_type: String,
        /// Account name or ID
        #[arg(short, long)]
        account: Option<String>,
        /// Category name or ID
        #[arg(short = 'C', long)]
        category: Option<String>,
        /// Description
        #[arg(short, long, default_value = "")]
        description: String,
        /// Transaction date (YYYY-MM-DD), defaults to today
        #[arg(long, default_value = "")]
        date: String,
    },
    /// Update a transaction's category, description or date
    Update {
        /// Transaction ID
        id: String,
        /// New category name or ID
        #[arg(short = 'C', long)]
        category: Option<String>,
        /// New description
        #[arg(short, long)]
        description: Option<String>,
        /// New date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
    },
    /// Delete a transaction
    Delete {
        /// Transaction ID
        id: String,
    },
}

impl TransactionCommands {
    pub fn action(&self) -> &'static str {
        match self {
            Self::List { .. } => "fetch transactions",
            Self::Show { .. } => "fetch transaction",
            Self::Add { .. } => "create transaction",
            Self::Update { .. } => "update transaction",
            Self::Delete { .. } => "delete transaction",
        }
    }
}

/// Handle a transaction command
pub async fn handle_transaction_command<T: Transport>(
    ctx: &AppContext<T>,
    cmd: TransactionCommands,
) -> AkibaResult<()> {
    let service = TransactionService::new(ctx.client());
    let currency = ctx.settings.currency.as_str();

    match cmd {
        TransactionCommands::List {
            search,
            transaction_type,
            category,
            account,
            limit,
            skip,
        } => {
            let type_filter = TypeFilter::parse(&transaction_type).ok_or_else(|| {
                AkibaError::Validation(format!(
                    "Invalid type '{}'. Valid types: all, income, expense",
                    transaction_type
                ))
            })?;

            let category_id = match category {
                Some(c) => Some(resolve_category(ctx, &c).await?),
                None => None,
            };
            let account_id = match account {
                Some(a) => Some(resolve_account(ctx, &a).await?),
                None => None,
            };

            let filter = TransactionFilter {
                search: search.unwrap_or_default(),
                transaction_type: type_filter,
                category_id,
                account_id,
            };
            let page = Page::new(skip, limit.unwrap_or(ctx.settings.page_size));

            let transactions = service.list(page).await?;
            let categories = CategoryService::new(ctx.client()).list().await?;
            let matching = filter.apply(&transactions);

            print!(
                "{}",
                format_transaction_register(&matching, &categories, currency)
            );
        }

        TransactionCommands::Show { id } => {
            let id = parse_transaction_id(&id)?;
            let txn = service.get(id).await?;
            let category_name = CategoryService::new(ctx.client())
                .list()
                .await?
                .iter()
                .find(|c| c.id == txn.category_id)
                .map(|c| c.name.clone());

            print!(
                "{}",
                format_transaction_details(&txn, category_name.as_deref(), currency)
            );
        }

        TransactionCommands::Add {
            amount,
            transaction_type,
            account,
            category,
            description,
            date,
        } => {
            let transaction_type = TransactionType::parse(&transaction_type).ok_or_else(|| {
                AkibaError::Validation(format!(
                    "Invalid type '{}'. Valid types: income, expense",
                    transaction_type
                ))
            })?;

            let account_id = match account {
                Some(a) => Some(resolve_account(ctx, &a).await?),
                None => None,
            };
            let category_id = match category {
                Some(c) => Some(resolve_category(ctx, &c).await?),
                None => None,
            };

            let form = TransactionForm {
                amount: &amount,
                transaction_type,
                account_id,
                category_id,
                description: &description,
                date: &date,
            };
            let txn = service.create(&form).await?;

            println!("Created transaction: {}", txn.id);
            println!("  {}", txn);
        }

        TransactionCommands::Update {
            id,
            category,
            description,
            date,
        } => {
            let id = parse_transaction_id(&id)?;
            let transaction_date = date
                .map(|raw| {
                    timestamp::parse(&raw)
                        .ok_or_else(|| AkibaError::Validation(format!("Invalid date '{}'", raw)))
                })
                .transpose()?;

            let mut update = TransactionUpdate {
                category_id: None,
                description,
                transaction_date,
            };
            if let Some(c) = category {
                update.category_id = Some(resolve_category(ctx, &c).await?);
            }

            if update.is_empty() {
                println!("No changes specified. Use --category, --description or --date.");
                return Ok(());
            }

            let txn = service.update(id, &update).await?;
            println!("Updated transaction: {}", txn);
        }

        TransactionCommands::Delete { id } => {
            let id = parse_transaction_id(&id)?;
            service.delete(id).await?;
            println!("Deleted transaction: {}", id);
        }
    }

    Ok(())
}

fn parse_transaction_id(raw: &str) -> AkibaResult<TransactionId> {
    raw.parse()
        .map_err(|_| AkibaError::Validation(format!("Invalid transaction ID '{}'", raw)))
}

/// Numeric IDs are used as-is; anything else is looked up by name
async fn resolve_account<T: Transport>(ctx: &AppContext<T>, raw: &str) -> AkibaResult<AccountId> {
    if let Ok(id) = raw.parse::<AccountId>() {
        return Ok(id);
    }
    Ok(AccountService::new(ctx.client()).find(raw).await?.id)
}

async fn resolve_category<T: Transport>(
    ctx: &AppContext<T>,
    raw: &str,
) -> AkibaResult<CategoryId> {
    if let Ok(id) = raw.parse::<CategoryId>() {
        return Ok(id);
    }
    Ok(CategoryService::new(ctx.client()).find(raw).await?.id)
}
