use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use route_selector::aggregator::JupiterClient;
use route_selector::pool::{unix_now, Direction, PoolSource, RpcPoolSource};
use route_selector::selector::{QuoteEngine, QuoteRequest, RouteSource, Selection};
use route_selector::simulate::RpcSimulator;

#[derive(Parser)]
#[command(name = "route-selector", version, about = "wXMR swap route quoting CLI")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Quote both routes for a trade and print the selection
    Quote(QuoteArgs),
    /// Print the current pool snapshot
    Pool(PoolArgs),
}

#[derive(Clone, Copy, ValueEnum)]
enum CliDirection {
    /// USDC in, wXMR out
    Buy,
    /// wXMR in, USDC out
    Sell,
}

#[derive(Parser)]
struct QuoteArgs {
    /// Solana RPC URL
    #[arg(long, default_value = "https://api.mainnet-beta.solana.com")]
    rpc: String,
    /// Aggregator API base URL
    #[arg(long, default_value = "https://quote-api.jup.ag/v6")]
    aggregator_url: String,
    /// Trade direction
    #[arg(long, value_enum)]
    direction: CliDirection,
    /// Input amount in atomic units (USDC for buy, piconero for sell)
    #[arg(long)]
    amount: u64,
    /// wXMR mint address
    #[arg(long)]
    wxmr_mint: String,
    /// USDC mint address
    #[arg(long)]
    usdc_mint: String,
    /// Wallet the aggregator swap would execute as
    #[arg(long)]
    user: String,
    /// Debounce before any network work, in milliseconds
    #[arg(long, default_value_t = 250)]
    debounce_ms: u64,
    /// Budget for the aggregator leg, in milliseconds
    #[arg(long, default_value_t = 5_000)]
    aggregator_timeout_ms: u64,
}

#[derive(Parser)]
struct PoolArgs {
    /// Solana RPC URL
    #[arg(long, default_value = "https://api.mainnet-beta.solana.com")]
    rpc: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Quote(args) => run_quote(args).await,
        Command::Pool(args) => run_pool(args).await,
    }
}

async fn run_quote(args: QuoteArgs) -> Result<()> {
    let (direction, input_mint, output_mint) = match args.direction {
        CliDirection::Buy => (Direction::Buy, args.usdc_mint, args.wxmr_mint),
        CliDirection::Sell => (Direction::Sell, args.wxmr_mint, args.usdc_mint),
    };

    let engine = QuoteEngine::new(
        RpcPoolSource::new(&args.rpc),
        JupiterClient::new(
            &args.aggregator_url,
            Duration::from_millis(args.aggregator_timeout_ms),
        )?,
        RpcSimulator::new(&args.rpc),
        Duration::from_millis(args.debounce_ms),
        Duration::from_millis(args.aggregator_timeout_ms),
    );

    let selection = engine
        .quote(&QuoteRequest {
            direction,
            amount_in: args.amount,
            input_mint,
            output_mint,
            user: args.user,
        })
        .await?;

    match selection {
        Selection::Route { source, out_amount } => {
            let source = match source {
                RouteSource::Pool => "pool",
                RouteSource::Aggregator => "aggregator",
            };
            println!("route: {source}");
            println!("out_amount: {out_amount}");
        }
        Selection::NoRoute => println!("route: none"),
        Selection::Superseded => println!("route: superseded"),
    }
    Ok(())
}

async fn run_pool(args: PoolArgs) -> Result<()> {
    let source = RpcPoolSource::new(&args.rpc);
    let snapshot = source.snapshot().await?;
    println!("pool: {}", RpcPoolSource::pool_address());
    println!("buy_price: {}", snapshot.buy_price);
    println!("sell_price: {}", snapshot.sell_price);
    println!("enabled: {}", snapshot.enabled);
    println!(
        "price_age_secs: {}",
        unix_now().saturating_sub(snapshot.last_price_update)
    );
    println!("wxmr_reserve: {}", snapshot.wxmr_reserve);
    println!("usdc_reserve: {}", snapshot.usdc_reserve);
    Ok(())
}
