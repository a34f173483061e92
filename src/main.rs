use crate::args::{Args, Command};

use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wxa_identity::{Config, IdentityClient, Signer};

mod args;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Load configuration from --config path (defaults to config/default.toml)
    let mut config =
        Config::load(&args.config).with_context(|| format!("failed to load configuration from {}", args.config))?;

    // Apply CLI overrides
    if let Some(app_id) = args.app_id {
        config.wechat.app_id = app_id;
    }
    if let Some(app_secret) = args.app_secret {
        config.wechat.app_secret = app_secret;
    }
    if let Some(base_url) = args.base_url {
        config.wechat.base_url = base_url;
    }

    init_logging(&config.logging.level);

    info!("Starting {} v{}", wxa_identity::NAME, wxa_identity::VERSION);
    info!("Configuration loaded from: {}", args.config);
    info!("App: {}", config.wechat.app_id);
    info!("Identity API: {}", config.wechat.base_url);

    let client = IdentityClient::new(config.wechat)?;

    match args.command {
        Command::Token => print_json(&client.obtain_access_token().await?),
        Command::Login { code } => print_json(&client.obtain_open_id(&code).await?),
        Command::Phone {
            access_token,
            code,
            openid,
        } => print_json(&client.obtain_telephone(&access_token, &code, &openid).await?),
        Command::UserKey {
            openid,
            access_token,
            session_key,
        } => print_json(&client.fetch_user(&openid, &access_token, &session_key).await?),
        Command::CheckSession {
            openid,
            access_token,
            session_key,
        } => {
            #[allow(deprecated)]
            let payload = client.verify_session(&openid, &access_token, &session_key).await?;
            print_json(&payload)
        }
        Command::Sign { key, message } => {
            println!("{}", Signer::sign(&message, &key));
            Ok(())
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn init_logging(level: &str) {
    let log_level = match level.to_lowercase().as_str() {
        "error" => tracing::Level::ERROR,
        "warn" => tracing::Level::WARN,
        "info" => tracing::Level::INFO,
        "debug" => tracing::Level::DEBUG,
        "trace" => tracing::Level::TRACE,
        _ => {
            eprintln!("Invalid log level: {}, defaulting to info", level);
            tracing::Level::INFO
        }
    };

    // Logs go to stderr so command output stays parseable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("wxa_identity={}", log_level).into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}
