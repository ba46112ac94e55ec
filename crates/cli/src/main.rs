use anyhow::Context;
use clap::{Parser, Subcommand};
use lendr_kernel::settings::{Settings, StockCheck};

#[derive(Debug, Parser)]
#[command(name = "lendr-cli", version, about = "Run and inspect the lending service")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Start the HTTP server
    Serve {
        /// Override `server.port`
        #[arg(long)]
        port: Option<u16>,
        /// Run the borrow stock check before the decrement (strict) or after it (legacy)
        #[arg(long, value_parser = parse_stock_check)]
        stock_check: Option<StockCheck>,
    },
    /// Print the effective settings as JSON
    Config,
}

fn parse_stock_check(raw: &str) -> Result<StockCheck, String> {
    match raw {
        "strict" => Ok(StockCheck::Strict),
        "legacy" => Ok(StockCheck::Legacy),
        other => Err(format!("expected 'strict' or 'legacy', got '{other}'")),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut settings = Settings::load().context("failed to load lendr settings")?;

    match cli.command {
        Command::Config => {
            let rendered =
                serde_json::to_string_pretty(&settings).context("failed to render settings")?;
            println!("{rendered}");
            Ok(())
        }
        Command::Serve { port, stock_check } => {
            if let Some(port) = port {
                settings.server.port = port;
            }
            if let Some(stock_check) = stock_check {
                settings.borrow.stock_check = stock_check;
            }
            lendr_telemetry::init(&settings.telemetry)?;
            tracing::info!(env = ?settings.environment, "lendr-cli serve");

            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .context("failed to build tokio runtime")?;
            runtime.block_on(lendr_app::run(&settings))
        }
    }
}
