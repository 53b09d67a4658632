use clap::Parser;
use parley::ChatError;
use parley::config::{CliArgs, ClientConfig};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), ChatError> {
    // stdout is the chat surface; logs go to stderr.
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let config = ClientConfig::from_args(CliArgs::parse())?;
    tracing::info!(url = %config.ws_url, format = ?config.wire_format, "parley starting");

    parley::app::run(config).await
}
