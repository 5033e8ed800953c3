mod args;
mod console;

use anyhow::{Context, Result};
use args::{Cli, Command};
use artist_token::Dapp;
use artist_token_config::{DappConfig, LoggerConfig};
use clap::Parser;
use console::{format_entry, format_session, ConsoleObserver};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = DappConfig::load_or_default(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    cli.apply(&mut config)?;

    init_tracing(&config.logger);

    info!(
        target: "artist_token",
        provider = %config.provider.url,
        metadata = %config.metadata.source,
        "starting artist token client"
    );

    let dapp = Dapp::new(config)?.with_observer(Arc::new(ConsoleObserver));
    let session = dapp
        .connect()
        .await
        .map_err(|err| {
            error!(target: "artist_token", error = %err, "failed to connect");
            err
        })
        .context("could not resolve a session with the provider")?;

    match cli.command {
        Command::Status => {
            println!("{}", format_session(&session));
        }
        Command::Register { name, count, price } => {
            let submission = dapp.register(&name, &count, &price)?;
            println!(
                "Submitted registration of {} ({} tokens, {} wei attached)",
                submission.request().name,
                submission.request().count,
                submission.request().value
            );
            submission.outcome().await?;
            list_artists(&dapp).await?;
        }
        Command::Redeem => {
            // the notice fires whether or not the registration succeeds
            dapp.redeem()?.completed().await?;
        }
        Command::List => {
            list_artists(&dapp).await?;
        }
    }

    Ok(())
}

async fn list_artists(dapp: &Dapp) -> Result<()> {
    let refresh = dapp.refresh_all().await?;
    println!("{} artists", refresh.count);
    for entry in refresh.sorted() {
        println!("{}", format_entry(&entry));
    }
    Ok(())
}

fn init_tracing(logger: &LoggerConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,artist_token={}", logger.level)));
    let builder = fmt().with_env_filter(env_filter).with_writer(std::io::stderr);
    let _ = if logger.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}
