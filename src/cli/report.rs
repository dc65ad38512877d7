//! Report CLI commands

use clap::Subcommand;

use crate::api::{Page, Transport};
use crate::context::AppContext;
use crate::error::{AkibaError, AkibaResult};
use crate::reports::{BudgetReport, DashboardSummary, SpendingReport};
use crate::services::{AccountService, AuthService, CategoryService, TransactionService};

/// Report subcommands
#[derive(Subcommand)]
pub enum ReportCommands {
    /// Greeting, total balance and recent transactions
    Dashboard,
    /// Expenses per category
    Spending {
        /// Only list the N largest categories
        #[arg(long)]
        top: Option<usize>,
    },
    /// 50/30/20 needs, wants and savings
    Budget,
}

impl ReportCommands {
    pub fn action(&self) -> &'static str {
        match self {
            Self::Dashboard => "load dashboard",
            Self::Spending { .. } => "generate spending report",
            Self::Budget => "generate budget report",
        }
    }
}

/// Handle a report command
pub async fn handle_report_command<T: Transport>(
    ctx: &AppContext<T>,
    cmd: ReportCommands,
) -> AkibaResult<()> {
    let client = ctx.client();
    let accounts = AccountService::new(client);
    let categories = CategoryService::new(client);
    let transactions = TransactionService::new(client);
    let page = Page::first(ctx.settings.page_size);
    let currency = ctx.settings.currency.as_str();

    match cmd {
        ReportCommands::Dashboard => {
            let user = ctx
                .session()
                .user()?
                .ok_or(AkibaError::NotAuthenticated)?;

            let (accounts, transactions) =
                futures::try_join!(accounts.list(), transactions.list(page))?;

            // Prefer the server's view of the profile, but the stored one will do
            let user = match AuthService::new(client).whoami().await {
                Ok(fresh) => (*fresh).clone(),
                Err(e) if e.is_unauthorized() => return Err(e),
                Err(e) => {
                    tracing::warn!("using stored profile: {}", e);
                    user
                }
            };

            let summary = DashboardSummary::generate(
                &user,
                &accounts,
                &transactions,
                ctx.settings.recent_limit as usize,
            );
            print!("{}", summary.format_terminal(currency));
        }

        ReportCommands::Spending { top } => {
            let (categories, transactions) =
                futures::try_join!(categories.list(), transactions.list(page))?;
            let report = SpendingReport::generate(&categories, &transactions);

            match top {
                Some(n) => {
                    for row in report.top_categories(n) {
                        println!(
                            "{:<24} {:>14}",
                            row.category_name,
                            row.total.format_with_currency(currency)
                        );
                    }
                }
                None => print!("{}", report.format_terminal(currency)),
            }
        }

        ReportCommands::Budget => {
            let (categories, transactions) =
                futures::try_join!(categories.list(), transactions.list(page))?;
            let report = BudgetReport::generate(&categories, &transactions);
            print!("{}", report.format_terminal(currency));
        }
    }

    Ok(())
}
