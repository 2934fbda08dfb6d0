use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use tvhook_core::{
    logging, Config, InMemoryHost, MediaItemRef, ResolveContext, RewriteResolver, User,
};

#[derive(Parser, Debug)]
#[command(name = "tvhook")]
#[command(about = "Resolve live-TV playback URLs through a rewrite webhook", long_about = None)]
struct Args {
    /// Config file (YAML, TOML or JSON); TVHOOK_* environment variables override it
    #[arg(short, long, env = "TVHOOK_CONFIG_PATH")]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve one item and print its media sources as JSON
    Resolve {
        /// Item id, sent as channel_id
        #[arg(long)]
        id: String,

        /// Item name, sent as channel_name
        #[arg(long)]
        name: String,

        /// Item's native path, used as the fallback URL
        #[arg(long)]
        path: Option<String>,

        /// Authenticated user name for the request
        #[arg(long)]
        user: Option<String>,
    },

    /// Print the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = Config::load(args.config.as_deref()).context("Failed to load configuration")?;

    match args.command {
        Command::Config => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        Command::Resolve {
            id,
            name,
            path,
            user,
        } => {
            logging::init_logging(&config.logging, config.rewrite.enable_debug_logging)?;
            info!("tvhook starting...");

            let resolver = RewriteResolver::new(config.rewrite)?;

            let mut host = InMemoryHost::new();
            if let Some(name) = &user {
                host = host.with_user(User::new(name.clone(), name.clone()));
            }

            let cancel = CancellationToken::new();
            let ctrl_c = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    warn!("Interrupted; cancelling rewrite request");
                    ctrl_c.cancel();
                }
            });

            let mut ctx = ResolveContext::new(&host, &host).with_cancel(cancel);
            if let Some(name) = user.as_deref() {
                ctx = ctx.with_identity(name);
            }

            let mut item = MediaItemRef::new(id, name);
            if let Some(path) = path {
                item = item.with_path(path);
            }

            let sources = resolver.resolve(&item, &ctx).await;
            println!("{}", serde_json::to_string_pretty(&sources)?);

            resolver.shutdown();
        }
    }

    Ok(())
}
