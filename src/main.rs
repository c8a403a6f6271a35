use anyhow::Result;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;

use jamcredits::{bio, extract, jams, ldjam, team, telemetry};

#[derive(Parser)]
#[command(name = "jamcredits", about = "itch.io and Ludum Dare game-jam scraping and team-credit extraction")]
struct Cli {
    /// Emit one JSON envelope per command on stdout; logs go to stderr
    #[arg(global = true, long, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Jams(jams::JamsCmd),
    Ldjam(ldjam::LdjamCmd),
    Bio(bio::BioCmd),
    Team(team::TeamCmd),
    Extract(extract::ExtractCmd),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();
    telemetry::config::set_json_mode(cli.json);

    // stderr logging; respects RUST_LOG and JAM_LOG_FORMAT
    telemetry::config::init_tracing();

    match cli.command {
        Commands::Jams(args) => jams::run(args).await?,
        Commands::Ldjam(args) => ldjam::run(args).await?,
        Commands::Bio(args) => bio::run(args).await?,
        Commands::Team(args) => team::run(args).await?,
        Commands::Extract(args) => extract::run(args).await?,
    }

    Ok(())
}
