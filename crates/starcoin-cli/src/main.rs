use clap::{Parser, Subcommand};
use starcoin_rpc::RpcConfig;
use std::time::Duration;

mod commands;
mod transfer;

/// Starcoin node command-line client.
#[derive(Parser)]
#[command(name = "starcoin-sdk-cli")]
#[command(about = "Query and transact against a Starcoin node over JSON-RPC")]
#[command(version)]
struct Cli {
    /// Node RPC URL.
    #[arg(long, env = "STARCOIN_RPC_URL", default_value = "http://127.0.0.1:9850")]
    url: String,

    /// Request timeout in seconds (HTTP client default if unset).
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Enable debug logging (RUST_LOG takes precedence).
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show node information.
    Info,

    /// Show node status.
    Status,

    /// Fetch a transaction by hash.
    Txn { hash: String },

    /// Fetch a transaction's execution info by hash.
    TxnInfo { hash: String },

    /// Fetch a block by number.
    Block { number: u64 },

    /// Check whether an account exists.
    Exists { address: String },

    /// Show an account's sequence number.
    Sequence { address: String },

    /// Show an account's Account resource.
    Resource { address: String },

    /// Show an account's token balance resource.
    Balance {
        address: String,

        /// Token type, e.g. 0x1::STC::STC.
        #[arg(long, default_value = "0x1::STC::STC")]
        token: String,
    },

    /// Dump an account's state set at a state root.
    StateSet { address: String, state_root: String },

    /// Show the reward, author and gas fee of a block.
    Reward {
        number: u64,

        /// Print the whole reward queue instead of one entry.
        #[arg(long)]
        queue: bool,
    },

    /// Call any RPC method with a JSON array of params.
    Call {
        method: String,
        params: Option<String>,
    },

    /// Transfer STC: sign through the node and submit.
    Transfer {
        /// Sender address (must be unlocked on the node).
        #[arg(long)]
        sender: String,

        #[arg(long)]
        receiver: String,

        /// Receiver authentication key (hex).
        #[arg(long)]
        receiver_auth_key: String,

        /// Amount in nanoSTC.
        #[arg(long)]
        amount: u128,

        #[arg(long, default_value = "251")]
        chain_id: u8,

        #[arg(long, default_value = "10000000")]
        max_gas: u64,

        #[arg(long, default_value = "1")]
        gas_price: u64,

        /// Seconds from the node clock until the transaction expires.
        #[arg(long, default_value = "43200")]
        ttl_secs: u64,

        /// Print the signed transaction without submitting it.
        #[arg(long)]
        dry_run: bool,
    },
}

pub struct AppContext {
    pub config: RpcConfig,
}

impl AppContext {
    fn from_cli(cli: &Cli) -> Self {
        Self {
            config: RpcConfig {
                url: cli.url.clone(),
                timeout: cli.timeout_secs.map(Duration::from_secs),
                ..Default::default()
            },
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let ctx = AppContext::from_cli(&cli);

    let result = match cli.command {
        Commands::Info => commands::node_info(&ctx).await,
        Commands::Status => commands::node_status(&ctx).await,
        Commands::Txn { hash } => commands::transaction(&ctx, &hash).await,
        Commands::TxnInfo { hash } => commands::transaction_info(&ctx, &hash).await,
        Commands::Block { number } => commands::block(&ctx, number).await,
        Commands::Exists { address } => commands::account_exists(&ctx, &address).await,
        Commands::Sequence { address } => commands::sequence(&ctx, &address).await,
        Commands::Resource { address } => commands::account_resource(&ctx, &address).await,
        Commands::Balance { address, token } => commands::balance(&ctx, &address, &token).await,
        Commands::StateSet {
            address,
            state_root,
        } => commands::state_set(&ctx, &address, &state_root).await,
        Commands::Reward { number, queue } => commands::block_reward(&ctx, number, queue).await,
        Commands::Call { method, params } => {
            commands::call(&ctx, &method, params.as_deref()).await
        }
        Commands::Transfer {
            sender,
            receiver,
            receiver_auth_key,
            amount,
            chain_id,
            max_gas,
            gas_price,
            ttl_secs,
            dry_run,
        } => {
            let opts = transfer::TransferOptions {
                chain_id,
                max_gas_amount: max_gas,
                gas_unit_price: gas_price,
                ttl_secs,
            };
            commands::transfer(&ctx, &sender, &receiver, &receiver_auth_key, amount, &opts, dry_run)
                .await
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        if let Some(hint) = commands::error_hint(&*e) {
            eprintln!("Hint: {}", hint);
        }
        std::process::exit(1);
    }
}
