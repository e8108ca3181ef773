use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use goodthings::app::AppContext;
use goodthings::cli::{commands, Cli, Commands};
use goodthings::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;
    let ctx = AppContext::new(&config, cli.db)?;

    if cli.offline {
        ctx.network.set_online(false);
    }

    match cli.command {
        Commands::Add { items, no_comment } => {
            commands::add_entry(&ctx, &items, no_comment).await?;
        }
        Commands::Today => {
            commands::show_today(&ctx)?;
        }
        Commands::Show { date, json } => {
            commands::show_entry(&ctx, &date, json)?;
        }
        Commands::List { from, to, json } => {
            commands::list_entries(&ctx, from.as_deref(), to.as_deref(), json)?;
        }
        Commands::Edit { date, items } => {
            commands::edit_entry(&ctx, &date, &items)?;
        }
        Commands::Delete { date } => {
            commands::delete_entry(&ctx, &date)?;
        }
        Commands::Comment { date, number } => {
            commands::request_comment(&ctx, &date, number).await?;
        }
        Commands::Stats { json } => {
            commands::show_stats(&ctx, json)?;
        }
    }

    Ok(())
}
