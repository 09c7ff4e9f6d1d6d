use anyhow::{anyhow, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use queue_courier::client::{ApiClient, Transport};
use queue_courier::models::ActionRequest;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "queuectl", about = "Send, count and receive queue messages", version)]
struct Cli {
    /// Endpoint of a running queue_courier server
    #[arg(long, env = "QUEUE_API_URL", default_value = "http://127.0.0.1:8080/api")]
    url: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Enqueue a message
    Send {
        /// Message body; defaults to a timestamped placeholder
        #[arg(long, short = 'm')]
        message: Option<String>,
    },
    /// Print the approximate number of queued messages
    Count,
    /// Pop and print the oldest message
    Receive,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing()?;

    let cli = Cli::parse();
    let client = ApiClient::new(cli.url)?;

    let payload = match cli.command {
        Command::Send { message } => ActionRequest::send_message(
            message.unwrap_or_else(|| format!("Message:{}", Local::now().format("%Y%m%d%H%M%S%.3f"))),
        ),
        Command::Count => ActionRequest::get_count(),
        Command::Receive => ActionRequest::receive_message(),
    };

    let response = client
        .send(&payload)
        .await
        .map_err(|err| anyhow!("{} ({err})", err.message()))?;
    println!("{}", response.message);

    Ok(())
}

fn init_tracing() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}
