use anyhow::Result;
use clap::{Parser, Subcommand};
use scenesmith_application::ScenesmithApp;
use scenesmith_core::TabId;
use scenesmith_core::navigation::Route;
use scenesmith_infrastructure::url_router::{CREATE_PATH, format_location};
use scenesmith_infrastructure::{ConfigService, ScenesmithPaths, UrlRouter};
use std::sync::Arc;

mod commands;
mod logging;

#[derive(Parser)]
#[command(name = "scenesmith")]
#[command(about = "Scenesmith CLI - campaign authoring workspace client", long_about = None)]
struct Cli {
    /// API base URL, overriding the config file and SCENESMITH_API_URL
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage projects
    Projects {
        #[command(subcommand)]
        action: ProjectsAction,
    },
    /// Show per-tab status and the phase of a project
    Status { session_id: String },
    /// Open a location (e.g. "/create?sessionId=p1&tab=scenes") and show the result
    Open { location: String },
    /// List the characters of a project
    Characters { session_id: String },
    /// Show what the context store holds for a project
    Health { session_id: String },
    /// Lock or unlock a context block
    Lock {
        session_id: String,
        /// Block type (background, characters, custom, ...)
        block_type: String,
        /// Unlock instead of lock
        #[arg(long)]
        unlock: bool,
    },
    /// Generate a macro chain from a concept
    GenerateChain {
        session_id: String,
        concept: String,
        /// Extra request metadata as a JSON object
        #[arg(long)]
        meta: Option<String>,
    },
}

#[derive(Subcommand)]
enum ProjectsAction {
    /// List projects, most recently updated first
    List,
    /// Create a project
    Create { title: String },
    /// Delete a project
    Delete { id: String },
}

impl Commands {
    /// Location the router starts at for this command.
    fn initial_location(&self) -> String {
        match self {
            Commands::Projects { .. } => CREATE_PATH.to_string(),
            Commands::Open { location } => location.clone(),
            Commands::Status { session_id }
            | Commands::Characters { session_id }
            | Commands::Health { session_id }
            | Commands::Lock { session_id, .. }
            | Commands::GenerateChain { session_id, .. } => {
                format_location(&Route::workspace(session_id.as_str(), TabId::Overview))
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = ScenesmithPaths::default();
    let mut config = ConfigService::new(paths.clone()).get_config()?;
    if let Some(url) = cli.api_url {
        config.api_base_url = url;
    }
    let _log_guard = logging::init(&paths, &config)?;

    let router = Arc::new(UrlRouter::from_location(&cli.command.initial_location())?);
    let app = ScenesmithApp::from_config(&config, router.clone())?;

    match cli.command {
        Commands::Projects { action } => match action {
            ProjectsAction::List => commands::projects::list(&app).await?,
            ProjectsAction::Create { title } => commands::projects::create(&app, &title).await?,
            ProjectsAction::Delete { id } => commands::projects::delete(&app, &id).await?,
        },
        Commands::Status { .. } => commands::workspace::status(&app).await?,
        Commands::Open { .. } => commands::workspace::open(&app, &router).await?,
        Commands::Characters { .. } => commands::workspace::characters(&app).await?,
        Commands::Health { .. } => commands::workspace::health(&app).await?,
        Commands::Lock {
            block_type, unlock, ..
        } => commands::workspace::lock(&app, &block_type, !unlock).await?,
        Commands::GenerateChain { concept, meta, .. } => {
            commands::workspace::generate_chain(&app, &concept, meta.as_deref()).await?
        }
    }

    Ok(())
}
