use clap::Parser;
use client::{network, rendering};
use log::info;
use tokio::io::BufReader;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Server address to connect to
    #[arg(short = 's', long, default_value = "127.0.0.1:8080")]
    server: String,

    /// Print only the status line, not the board
    #[arg(long)]
    plain: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    if std::env::var("RUST_LOG").is_err() {
        eprintln!("Set RUST_LOG=info for detailed logging");
    }

    let args = Args::parse();

    info!("Starting client...");
    info!("Connecting to: {}", args.server);
    info!("Controls: type `<layer> <row> <column>` and press Enter to click a tile");

    let renderer = rendering::Renderer::new(!args.plain);
    let mut client = network::Client::connect(&args.server, renderer).await?;

    client.run(BufReader::new(tokio::io::stdin())).await?;

    Ok(())
}
