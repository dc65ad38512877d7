//! Auth CLI commands

use std::io::{self, BufRead, Write};

use clap::Subcommand;

use crate::api::Transport;
use crate::context::AppContext;
use crate::error::{AkibaError, AkibaResult};
use crate::models::UserCreate;
use crate::services::AuthService;

/// Auth subcommands
#[derive(Subcommand)]
pub enum AuthCommands {
    /// Log in and remember the session
    Login {
        /// Email address
        #[arg(short, long)]
        email: Option<String>,
        /// Password (prompted for when omitted)
        #[arg(long, env = "AKIBA_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Create a new user account
    Register {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        phone: String,
        /// Password (prompted for when omitted)
        #[arg(long, env = "AKIBA_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Forget the stored session
    Logout,
    /// Show the logged-in user
    Whoami,
}

impl AuthCommands {
    /// Verb phrase used in "Failed to ..." messages
    pub fn action(&self) -> &'static str {
        match self {
            Self::Login { .. } => "log in",
            Self::Register { .. } => "register",
            Self::Logout => "log out",
            Self::Whoami => "fetch user info",
        }
    }
}

/// Handle an auth command
pub async fn handle_auth_command<T: Transport>(
    ctx: &AppContext<T>,
    cmd: AuthCommands,
) -> AkibaResult<()> {
    let service = AuthService::new(ctx.client());

    match cmd {
        AuthCommands::Login { email, password } => {
            let email = match email {
                Some(email) => email,
                None => prompt_line("Email: ")?,
            };
            let password = match password {
                Some(password) => password,
                None => prompt_password("Password: ")?,
            };

            let user = service.login(&email, &password).await?;
            println!("Welcome back, {}!", user.greeting_name());
        }

        AuthCommands::Register {
            first_name,
            last_name,
            email,
            phone,
            password,
        } => {
            let password = match password {
                Some(password) => password,
                None => prompt_password("Password: ")?,
            };

            let form = UserCreate {
                first_name,
                last_name,
                email,
                password,
                phone_number: phone,
            };
            let user = service.register(&form).await?;

            println!("Registered {}", user);
            println!("Run 'akiba auth login' to log in.");
        }

        AuthCommands::Logout => {
            let was_logged_in = ctx.session().is_authenticated();
            service.logout()?;
            if was_logged_in {
                println!("Logged out.");
            } else {
                println!("Not logged in.");
            }
        }

        AuthCommands::Whoami => {
            let session = service
                .current_session()?
                .ok_or(AkibaError::NotAuthenticated)?;
            let user = service.whoami().await?;

            println!("{}", user.full_name());
            println!("  ID:     {}", user.id);
            println!("  Email:  {}", user.email);
            if !user.phone_number.is_empty() {
                println!("  Phone:  {}", user.phone_number);
            }
            println!("  Active: {}", if user.active { "Yes" } else { "No" });
            if let Some(expires) = session.expires_at() {
                println!("  Token expires: {}", expires.format("%Y-%m-%d %H:%M UTC"));
            }
        }
    }

    Ok(())
}

fn prompt_line(prompt: &str) -> AkibaResult<String> {
    print!("{}", prompt);
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn prompt_password(prompt: &str) -> AkibaResult<String> {
    rpassword::prompt_password(prompt)
        .map_err(|e| AkibaError::Io(format!("Failed to read password: {}", e)))
}
