//! Devnors console — exercises every client operation from the command
//! line: auth, role selection, resume analysis, interview chat, and the
//! dashboard resources.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid::Uuid;

use devnors_client::ai::gemini::GeminiClient;
use devnors_client::ai::probe::BackendHealthProbe;
use devnors_client::ai::proxy::ProxyBackend;
use devnors_client::ai::AnalysisBackend;
use devnors_client::api::auth::RegisterRequest;
use devnors_client::models::resources::JobCreate;
use devnors_client::models::user::RoleSelection;
use devnors_client::session::store::{FileSessionStore, SessionStore};
use devnors_client::{AiDispatcher, ApiClient, Config, SessionManager};

#[derive(Parser)]
#[command(name = "devnors")]
#[command(about = "Console client for the Devnors talent-matching platform")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Log in and persist the session token
    Login { email: String, password: String },
    /// Register a new account (logs in immediately afterwards)
    Register {
        email: String,
        password: String,
        name: String,
    },
    /// Drop the stored session
    Logout,
    /// Show the current user record
    Whoami,
    /// Pick the account role: candidate or employer
    SelectRole { role: String },
    /// Analyze a resume file (backend proxy, direct AI fallback)
    Analyze { file: PathBuf },
    /// Send one interview-chat message
    Chat { message: String },
    /// List open job listings
    Jobs,
    /// Post a job listing
    PostJob {
        title: String,
        company: String,
        location: String,
        description: String,
        #[arg(long, value_delimiter = ',')]
        skills: Vec<String>,
        #[arg(long)]
        salary_range: Option<String>,
    },
    /// List candidate summaries
    Talents,
    /// Show the token balance
    Balance,
    /// Show the token transaction history
    Transactions,
    /// Purchase tokens
    BuyTokens { amount: i64 },
    /// List todos
    Todos,
    /// Add a todo
    AddTodo { title: String },
    /// Mark a todo done or not done
    ToggleTodo {
        id: Uuid,
        #[arg(long, action = clap::ArgAction::Set, default_value_t = true)]
        done: bool,
    },
    /// List saved memories
    Memories,
    /// Save a memory
    Remember { content: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("devnors_client={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let store: Arc<dyn SessionStore> = Arc::new(
        FileSessionStore::open(&config.session_file)
            .with_context(|| format!("opening session file {}", config.session_file.display()))?,
    );
    let api = ApiClient::with_timeout(
        config.api_base_url.clone(),
        store.clone(),
        config.request_timeout_secs,
    )?;
    let session = SessionManager::new(api.clone(), store);

    let direct: Option<Arc<dyn AnalysisBackend>> = match &config.gemini_api_key {
        Some(key) => Some(Arc::new(GeminiClient::new(key.clone())?)),
        None => None,
    };
    let dispatcher = AiDispatcher::new(
        Arc::new(BackendHealthProbe::new(api.clone())),
        Arc::new(ProxyBackend::new(api.clone())),
        direct,
    );

    match cli.command {
        Command::Login { email, password } => {
            let outcome = session.login(&email, &password).await;
            if !outcome.success {
                bail!("Login failed: {}", outcome.error.unwrap_or_default());
            }
            info!("Logged in as {email}");
            print_json(&session.current_user())?;
        }
        Command::Register {
            email,
            password,
            name,
        } => {
            let outcome = session
                .register(&RegisterRequest {
                    email: email.clone(),
                    password,
                    name,
                })
                .await;
            if !outcome.success {
                bail!("Registration failed: {}", outcome.error.unwrap_or_default());
            }
            info!("Registered and logged in as {email}");
            print_json(&session.current_user())?;
        }
        Command::Logout => {
            session.logout();
            println!("Logged out.");
        }
        Command::Whoami => {
            if !session.check_auth().await {
                bail!("Not logged in");
            }
            print_json(&session.current_user())?;
            println!("portal role: {:?}", session.portal_role());
        }
        Command::SelectRole { role } => {
            let selection: RoleSelection = role.parse().map_err(anyhow::Error::msg)?;
            let user = session.select_role(selection).await?;
            print_json(&user)?;
        }
        Command::Analyze { file } => {
            let resume_text = std::fs::read_to_string(&file)
                .with_context(|| format!("reading resume {}", file.display()))?;
            let profile = dispatcher.analyze_resume(&resume_text).await?;
            print_json(&profile)?;
        }
        Command::Chat { message } => {
            let reply = dispatcher.chat(&[], &message).await?;
            println!("{reply}");
        }
        Command::Jobs => print_json(&api.list_jobs().await?)?,
        Command::PostJob {
            title,
            company,
            location,
            description,
            skills,
            salary_range,
        } => {
            let job = api
                .create_job(&JobCreate {
                    title,
                    company,
                    location,
                    description,
                    skills,
                    salary_range,
                })
                .await?;
            print_json(&job)?;
        }
        Command::Talents => print_json(&api.list_talents().await?)?,
        Command::Balance => print_json(&api.token_balance().await?)?,
        Command::Transactions => print_json(&api.token_transactions().await?)?,
        Command::BuyTokens { amount } => print_json(&api.purchase_tokens(amount).await?)?,
        Command::Todos => print_json(&api.list_todos().await?)?,
        Command::AddTodo { title } => print_json(&api.create_todo(&title).await?)?,
        Command::ToggleTodo { id, done } => print_json(&api.toggle_todo(id, done).await?)?,
        Command::Memories => print_json(&api.list_memories().await?)?,
        Command::Remember { content } => print_json(&api.create_memory(&content).await?)?,
    }

    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
