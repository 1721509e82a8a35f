use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::io;
use std::process::ExitCode;

use taskdeck::commands::{
    CreateOptions, CreateUserOptions, EditOptions, cmd_cancel, cmd_claim, cmd_complete,
    cmd_config_get, cmd_config_set, cmd_config_show, cmd_create, cmd_delete, cmd_edit, cmd_login,
    cmd_logout, cmd_ls, cmd_show, cmd_start, cmd_user_create, cmd_user_ls, cmd_whoami,
};
use taskdeck::error::TaskdeckError;
use taskdeck::session::SessionStore;
use taskdeck::types::{
    Role, TicketPriority, TicketStatus, VALID_PRIORITIES, VALID_ROLES, VALID_STATUSES,
};

#[derive(Parser)]
#[command(name = "taskdeck")]
#[command(about = "Command-line client for a shared task-tracking service")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and store the session
    Login {
        /// Username
        username: String,

        /// Password (prompted when omitted)
        #[arg(long)]
        password: Option<String>,
    },

    /// Clear the stored session
    Logout,

    /// Show the current identity
    Whoami {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List tasks
    Ls {
        /// Filter by status (pending, in_progress, completed, cancelled)
        #[arg(long, value_parser = parse_status)]
        status: Option<TicketStatus>,

        /// Substring search over title and description
        #[arg(long)]
        search: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Display a task with the actions available to you
    #[command(visible_alias = "s")]
    Show {
        /// Task id
        id: i64,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a new task
    #[command(visible_alias = "c")]
    Create {
        /// Task title
        title: String,

        /// Description text
        #[arg(short, long)]
        description: Option<String>,

        /// Priority: low, medium, high (server default: medium)
        #[arg(short, long, value_parser = parse_priority)]
        priority: Option<TicketPriority>,

        /// Due date (ISO 8601, e.g. 2026-09-01)
        #[arg(long)]
        due: Option<String>,

        /// Assign an initial owner by user id
        #[arg(long)]
        owner: Option<i64>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Edit a pending task directly (admin)
    Edit {
        /// Task id
        id: i64,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New description
        #[arg(short, long)]
        description: Option<String>,

        /// New status
        #[arg(long, value_parser = parse_status)]
        status: Option<TicketStatus>,

        /// New priority
        #[arg(short, long, value_parser = parse_priority)]
        priority: Option<TicketPriority>,

        /// New due date
        #[arg(long)]
        due: Option<String>,

        /// Reassign owner by user id
        #[arg(long)]
        owner: Option<i64>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Take ownership of a pending task
    Claim {
        /// Task id
        id: i64,

        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Begin work on a pending task assigned to you
    Start {
        /// Task id
        id: i64,

        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Mark your in-progress task completed
    #[command(visible_alias = "close")]
    Complete {
        /// Task id
        id: i64,

        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Cancel a pending or in-progress task
    Cancel {
        /// Task id
        id: i64,

        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Delete a task (admin)
    Delete {
        /// Task id
        id: i64,

        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Manage user accounts (admin)
    Users {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// List user accounts
    Ls {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Create a user account
    Create {
        /// Unique username
        username: String,

        /// First name
        name: String,

        /// Last name
        last_name: String,

        /// Password (prompted when omitted)
        #[arg(long)]
        password: Option<String>,

        /// Role: admin or user (server default: user)
        #[arg(long, value_parser = parse_role)]
        role: Option<Role>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration
    Show,
    /// Set a configuration value (base_url, request_timeout, theme, language)
    Set {
        /// Configuration key
        key: String,
        /// Value to set
        value: String,
    },
    /// Get a configuration value
    Get {
        /// Configuration key
        key: String,
    },
}

fn parse_status(s: &str) -> Result<TicketStatus, String> {
    s.parse().map_err(|_| {
        format!(
            "Invalid status. Must be one of: {}",
            VALID_STATUSES.join(", ")
        )
    })
}

fn parse_priority(s: &str) -> Result<TicketPriority, String> {
    s.parse().map_err(|_| {
        format!(
            "Invalid priority. Must be one of: {}",
            VALID_PRIORITIES.join(", ")
        )
    })
}

fn parse_role(s: &str) -> Result<Role, String> {
    s.parse()
        .map_err(|_| format!("Invalid role. Must be one of: {}", VALID_ROLES.join(", ")))
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Login { username, password } => {
            cmd_login(&username, password.as_deref()).await
        }
        Commands::Logout => cmd_logout(),
        Commands::Whoami { json } => cmd_whoami(json),

        Commands::Ls {
            status,
            search,
            json,
        } => cmd_ls(status, search.as_deref(), json).await,
        Commands::Show { id, json } => cmd_show(id, json).await,

        Commands::Create {
            title,
            description,
            priority,
            due,
            owner,
            json,
        } => {
            cmd_create(CreateOptions {
                title,
                description,
                priority,
                due_date: due,
                owner_id: owner,
                json,
            })
            .await
        }

        Commands::Edit {
            id,
            title,
            description,
            status,
            priority,
            due,
            owner,
            json,
        } => {
            cmd_edit(
                id,
                EditOptions {
                    title,
                    description,
                    status,
                    priority,
                    due_date: due,
                    owner_id: owner,
                    json,
                },
            )
            .await
        }

        Commands::Claim { id, yes } => cmd_claim(id, yes).await,
        Commands::Start { id, yes } => cmd_start(id, yes).await,
        Commands::Complete { id, yes } => cmd_complete(id, yes).await,
        Commands::Cancel { id, yes } => cmd_cancel(id, yes).await,
        Commands::Delete { id, yes } => cmd_delete(id, yes).await,

        Commands::Users { action } => match action {
            UserAction::Ls { json } => cmd_user_ls(json).await,
            UserAction::Create {
                username,
                name,
                last_name,
                password,
                role,
                json,
            } => {
                cmd_user_create(CreateUserOptions {
                    username,
                    name,
                    last_name,
                    password,
                    role,
                    json,
                })
                .await
            }
        },

        Commands::Config { action } => match action {
            ConfigAction::Show => cmd_config_show(),
            ConfigAction::Set { key, value } => cmd_config_set(&key, &value),
            ConfigAction::Get { key } => cmd_config_get(&key),
        },

        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "taskdeck", &mut io::stdout());
            Ok(())
        }
    };

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            // A rejected token means the stored session is dead; clear it so
            // the next command starts from the login prompt.
            if matches!(e, TaskdeckError::Unauthorized(_)) {
                if let Ok(mut session) = SessionStore::load() {
                    let _ = session.logout();
                }
                eprintln!("{}", e);
                eprintln!("Session cleared. Run: taskdeck login <username>");
            } else {
                eprintln!("{}", e);
            }
            ExitCode::FAILURE
        }
    }
}
