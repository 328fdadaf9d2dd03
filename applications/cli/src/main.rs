/// Teamspace - command-line client
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use teamspace_core::ResourceId;
use teamspace_session::{Workspace, WorkspaceError};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod navigator;
mod settings;

use navigator::PrintNavigator;

#[derive(Parser)]
#[command(name = "teamspace")]
#[command(about = "Teamspace project collaboration client", long_about = None)]
struct Cli {
    /// Configuration file path (defaults to ./teamspace.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account and log in
    Register {
        /// Account email
        #[arg(short, long)]
        email: String,
        /// Account password
        #[arg(short, long, env = "TEAMSPACE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Log in with an existing account
    Login {
        /// Account email
        #[arg(short, long)]
        email: String,
        /// Account password
        #[arg(short, long, env = "TEAMSPACE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Log out and forget the stored token
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Work with projects
    Projects {
        #[command(subcommand)]
        command: ProjectCommands,
    },
}

#[derive(Subcommand)]
enum ProjectCommands {
    /// List the projects you belong to
    List,
    /// Create a project
    Create {
        /// Project name
        name: String,
    },
    /// Open a project by id
    Open {
        /// Project id
        id: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "teamspace=debug,teamspace_session=debug,teamspace_client=debug"
    } else {
        "teamspace=info,teamspace_session=info,teamspace_client=info"
    };

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = settings::load(cli.config.as_deref())?;
    tracing::debug!(url = %config.server.url, "Configuration loaded");

    let workspace = Workspace::connect(&config, Arc::new(PrintNavigator)).await?;

    if let Err(e) = run(cli.command, &workspace).await {
        tracing::debug!(error = ?e, "Command failed");
        anyhow::bail!(e.user_message());
    }

    Ok(())
}

async fn run(command: Commands, workspace: &Workspace) -> Result<(), WorkspaceError> {
    match command {
        Commands::Register { email, password } => {
            let user = workspace.lifecycle().register(&email, &password).await?;
            println!("Registered as {}", user.display_name());
        }
        Commands::Login { email, password } => {
            let user = workspace.lifecycle().login(&email, &password).await?;
            println!("Logged in as {}", user.display_name());
        }
        Commands::Logout => {
            workspace.logout().await?;
            println!("Logged out");
        }
        Commands::Whoami => match workspace.lifecycle().rehydrate().await? {
            Some(user) => match &user.email {
                Some(email) => println!("{} <{}>", user.display_name(), email),
                None => println!("{}", user.display_name()),
            },
            None => println!("Not logged in"),
        },
        Commands::Projects { command } => run_projects(command, workspace).await?,
    }

    Ok(())
}

async fn run_projects(command: ProjectCommands, workspace: &Workspace) -> Result<(), WorkspaceError> {
    match command {
        ProjectCommands::List => {
            let projects = workspace.list_projects().await?;
            if projects.is_empty() {
                println!("No projects yet");
            }
            for project in projects {
                println!(
                    "{}\t{}\t{} collaborator(s)",
                    project.id,
                    project.name,
                    project.collaborator_count()
                );
            }
        }
        ProjectCommands::Create { name } => {
            workspace.ensure_session().await?;

            let dialog = workspace.dialog();
            dialog.open().await?;
            dialog.edit(&name).await?;
            let project = dialog.submit().await?;

            println!("Created {} ({})", project.name, project.id);
        }
        ProjectCommands::Open { id } => {
            // The directory only opens cached projects, so load it first
            workspace.list_projects().await?;
            workspace.open_project(&ResourceId::from(id)).await?;
        }
    }

    Ok(())
}
