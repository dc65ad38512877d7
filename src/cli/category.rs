//! Category CLI commands

use clap::Subcommand;

use crate::api::Transport;
use crate::context::AppContext;
use crate::display::category::{format_category_details, format_category_list};
use crate::error::AkibaResult;
use crate::models::category::KNOWN_SYSTEM_NAMES;
use crate::services::CategoryService;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List system and custom categories
    List,
    /// Show category details
    Show {
        /// Category name or ID
        category: String,
    },
    /// Create a custom category
    Create {
        /// Category name
        name: String,
        /// Budgeting tag (food, transport, entertainment, shopping, bills,
        /// health, education, other)
        #[arg(short, long)]
        system_name: String,
    },
}

impl CategoryCommands {
    pub fn action(&self) -> &'static str {
        match self {
            Self::List => "fetch categories",
            Self::Show { .. } => "fetch category",
            Self::Create { .. } => "create category",
        }
    }
}

/// Handle a category command
pub async fn handle_category_command<T: Transport>(
    ctx: &AppContext<T>,
    cmd: CategoryCommands,
) -> AkibaResult<()> {
    let service = CategoryService::new(ctx.client());

    match cmd {
        CategoryCommands::List => {
            let categories = service.list().await?;
            print!("{}", format_category_list(&categories));
        }

        CategoryCommands::Show { category } => {
            let found = service.find(&category).await?;
            let fresh = service.get(found.id).await?;
            print!("{}", format_category_details(&fresh));
        }

        CategoryCommands::Create { name, system_name } => {
            let category = service.create(&name, &system_name).await?;
            println!("Created category: {}", category.name);
            println!("  System name: {}", category.system_name_or_default());
            println!("  ID: {}", category.id);

            if !KNOWN_SYSTEM_NAMES.contains(&category.system_name_or_default()) {
                println!(
                    "Note: '{}' is not a standard system name; the budget view counts it as a want.",
                    category.system_name_or_default()
                );
            }
        }
    }

    Ok(())
}
