use anyhow::Result;
use clap::{Parser, Subcommand};
use okbridge_brokers_okex::{Environment, OkexClient, OkexConfig};
use okbridge_core::*;
use rust_decimal::Decimal;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "okbridge")]
#[command(about = "Signed REST calls against the OKEx v5 API: balances, tickers and orders")]
#[command(version)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Path to a TOML file with environment and endpoint settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// API key
    #[arg(long, env = "OKEX_API_KEY", default_value = "")]
    api_key: String,

    /// API secret used for signing
    #[arg(long, env = "OKEX_API_SECRET", default_value = "", hide_env_values = true)]
    api_secret: String,

    /// API passphrase
    #[arg(long, env = "OKEX_API_PASSPHRASE", default_value = "", hide_env_values = true)]
    passphrase: String,

    /// Use the simulated-trading environment
    #[arg(long)]
    demo: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show spot account balances (USD)
    SpotBalance,

    /// Show the latest spot ticker
    SpotTicker {
        /// Instrument symbol (e.g. "BTC-USDT")
        symbol: String,
    },

    /// Show isolated-margin balances for a futures instrument
    FuturesBalance {
        /// Instrument symbol (e.g. "BTC-USD-211231")
        symbol: String,
    },

    /// Show the latest futures ticker
    FuturesTicker {
        /// Instrument symbol (e.g. "BTC-USD-211231")
        symbol: String,
    },

    /// Place an order
    PlaceOrder {
        /// Instrument symbol; symbols containing "SWAP" trade in cross margin
        #[arg(short, long)]
        symbol: String,

        /// buy or sell (ignored for swaps)
        #[arg(long)]
        side: Side,

        /// Order size
        #[arg(short, long)]
        quantity: Decimal,

        /// Limit price
        #[arg(short, long)]
        price: Decimal,

        /// market, limit, post_only, fok or ioc
        #[arg(long, default_value = "limit")]
        order_type: OrderType,

        /// Leverage (isolated orders only)
        #[arg(long)]
        leverage: Option<Decimal>,
    },

    /// Run the example sequence: balances, tickers and a limit order
    Demo,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let mut config = match &cli.config {
        Some(path) => OkexConfig::load(path)?,
        None => OkexConfig::default(),
    };
    if cli.demo {
        config.environment = Environment::Demo;
    }

    if cli.api_key.is_empty() || cli.api_secret.is_empty() {
        tracing::warn!("API key or secret not set; private endpoints will be rejected");
    }

    tracing::info!(
        environment = ?config.environment,
        base_url = %config.base_url(),
        "Using OKEx REST endpoint"
    );

    let credentials = Credentials::new(cli.api_key, cli.api_secret, cli.passphrase);
    let client = OkexClient::new(credentials, config);

    match cli.command {
        Commands::SpotBalance => print_response(&client.spot_balances().await?),
        Commands::SpotTicker { symbol } => print_response(&client.spot_ticker(&symbol).await?),
        Commands::FuturesBalance { symbol } => {
            print_response(&client.futures_balances(&symbol).await?)
        }
        Commands::FuturesTicker { symbol } => {
            print_response(&client.futures_ticker(&symbol).await?)
        }
        Commands::PlaceOrder {
            symbol,
            side,
            quantity,
            price,
            order_type,
            leverage,
        } => {
            let mut order = OrderRequest::new(&symbol, side, quantity, price, order_type);
            order.leverage = leverage;
            tracing::info!(symbol = %symbol, side = ?side, %quantity, %price, "Placing order");
            print_response(&client.place_order(&order).await?);
        }
        Commands::Demo => run_demo(&client).await?,
    }

    Ok(())
}

/// The example calls, one after another.
async fn run_demo(exchange: &dyn Exchange) -> Result<()> {
    const SPOT_SYMBOL: &str = "BTC-USDT";
    const FUTURES_SYMBOL: &str = "BTC-USD-211231";

    let sep = "=".repeat(60);

    println!("{sep}\n  SPOT BALANCES\n{sep}");
    print_response(&exchange.spot_balances().await?);

    println!("{sep}\n  SPOT TICKER {}\n{sep}", SPOT_SYMBOL);
    print_response(&exchange.spot_ticker(SPOT_SYMBOL).await?);

    println!("{sep}\n  FUTURES BALANCES {}\n{sep}", FUTURES_SYMBOL);
    print_response(&exchange.futures_balances(FUTURES_SYMBOL).await?);

    println!("{sep}\n  FUTURES TICKER {}\n{sep}", FUTURES_SYMBOL);
    print_response(&exchange.futures_ticker(FUTURES_SYMBOL).await?);

    let order = OrderRequest::new(
        FUTURES_SYMBOL,
        Side::Buy,
        Decimal::new(10, 0),
        Decimal::new(60_000, 0),
        OrderType::Limit,
    )
    .with_leverage(Decimal::new(10, 0));

    println!("{sep}\n  PLACE ORDER {}\n{sep}", FUTURES_SYMBOL);
    print_response(&exchange.place_order(&order).await?);

    Ok(())
}

fn print_response(response: &ApiResponse) {
    if let Some(code) = response.exchange_code().filter(|code| *code != "0") {
        tracing::warn!(code = %code, "Exchange reported an error");
    }
    println!("{}", response);
}
