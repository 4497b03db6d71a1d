use anyhow::Context;
use board_backend_lib::{
    config::Settings,
    member::NewMember,
    router,
    store::{InMemoryMemberStore, MemberStore},
    AppState,
};
use board_common::Role;
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "board-backend", about = "Member-board backend server")]
struct Cli {
    /// Path to a TOML config file (defaults to board.toml in the cwd)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the configured bind address
    #[arg(long)]
    bind: Option<SocketAddr>,

    /// Seed a member account for local runs, as `username:password`
    #[arg(long)]
    seed_member: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = match &cli.config {
        Some(path) => Settings::load_from(path)?,
        None => Settings::load()?,
    };
    if let Some(bind) = cli.bind {
        settings.bind_addr = bind;
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(settings.log_level.clone())),
        )
        .init();

    anyhow::ensure!(
        !settings.token.secret.is_empty(),
        "token secret must be configured (board.toml [token] secret, or BOARD_TOKEN__SECRET)"
    );

    let store: Arc<dyn MemberStore> = Arc::new(InMemoryMemberStore::new());
    let state = Arc::new(AppState::new(Arc::clone(&store), settings)?);

    if let Some(seed) = &cli.seed_member {
        let (username, password) = seed
            .split_once(':')
            .context("--seed-member expects username:password")?;
        let member = store
            .save(NewMember {
                username: username.to_string(),
                password_hash: state.hasher.hash(password)?,
                name: username.to_string(),
                nickname: username.to_string(),
                age: 22,
                role: Role::User,
            })
            .await?;
        tracing::info!(username = %member.username, "seeded member account");
    }

    let app = router::create_router(Arc::clone(&state));
    let listener = TcpListener::bind(state.settings.bind_addr).await?;
    tracing::info!("listening on {}", state.settings.bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
