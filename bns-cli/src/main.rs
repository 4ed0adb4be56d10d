//! BNS CLI
//!
//! Command-line interface for checking, verifying and updating the content
//! records of BNB Name Service domains.

mod render;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use bns_chain::{BnbClient, BnbSigner, ChainConfig};
use bns_core::constants::{
    CONFIRM_DELAY_SECS, DEFAULT_AUDIT_FILE, DEFAULT_BSC_RPC_URL, DEFAULT_DOMAIN,
};
use bns_core::{Address, BnsError};
use bns_gateway::GatewayClient;
use bns_ops::{
    CheckerConfig, ConfirmPolicy, RecordUpdater, RecordVerifier, ResolutionChecker, UpdateRequest,
    UpdaterConfig,
};

/// BNS - BNB Name Service content record tools
#[derive(Parser)]
#[command(name = "bns")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    /// BNB Smart Chain RPC URL
    #[arg(long, global = true, env = "BSC_RPC_URL", default_value = DEFAULT_BSC_RPC_URL)]
    rpc_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that a domain resolves to the IPNS publisher and query gateways
    Check {
        /// Domain to check
        #[arg(long, env = "DOMAIN", default_value = DEFAULT_DOMAIN)]
        domain: String,
        /// Expected publisher contract (defaults to the known IPNS publisher)
        #[arg(long)]
        publisher: Option<String>,
    },

    /// Read an IPNS record straight from a publisher contract and query gateways
    Verify {
        /// Publisher contract address
        #[arg(long, env = "CONTRACT_ADDRESS")]
        contract: Option<String>,
    },

    /// Point a domain's resolver at a new CID
    Update {
        /// Hex private key of the signing account
        #[arg(long, env = "PRIVATE_KEY", hide_env_values = true)]
        private_key: Option<String>,
        /// CID to store
        #[arg(long, env = "NEW_CID")]
        cid: Option<String>,
        /// Domain to update
        #[arg(long, env = "DOMAIN", default_value = DEFAULT_DOMAIN)]
        domain: String,
        /// Where to write the update record
        #[arg(short, long, env = "BNS_AUDIT_FILE", default_value = DEFAULT_AUDIT_FILE)]
        output: PathBuf,
        /// Seconds to wait before proceeding past a warning
        #[arg(long, default_value_t = CONFIRM_DELAY_SECS)]
        confirm_delay: u64,
        /// Ask before proceeding past a warning instead of waiting
        #[arg(short, long)]
        interactive: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is fine; the environment may already be set.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_json);

    let result = match cli.command {
        Commands::Check { domain, publisher } => {
            cmd_check(&cli.rpc_url, domain, publisher.as_deref()).await
        }
        Commands::Verify { contract } => cmd_verify(&cli.rpc_url, contract.as_deref()).await,
        Commands::Update {
            private_key,
            cid,
            domain,
            output,
            confirm_delay,
            interactive,
        } => {
            let confirm = if interactive {
                ConfirmPolicy::Prompt
            } else {
                ConfirmPolicy::AutoProceed {
                    delay_secs: confirm_delay,
                }
            };
            cmd_update(
                &cli.rpc_url,
                private_key.as_deref(),
                cid.as_deref(),
                domain,
                UpdaterConfig::default()
                    .with_audit_path(output)
                    .with_confirm(confirm),
            )
            .await
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err:#}", "❌ Error:".red().bold());
            ExitCode::from(exit_code(&err))
        }
    }
}

/// Exit code for a failed command. Errors outside `BnsError` map to 1.
fn exit_code(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<BnsError>()
        .map(BnsError::exit_code)
        .unwrap_or(1)
}

/// Sets up the tracing subscriber. `RUST_LOG` takes precedence over `--verbose`.
fn init_logging(verbose: bool, json: bool) {
    let filter = if verbose { "bns=debug,info" } else { "bns=info,warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into());

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry.with(fmt::layer().with_writer(std::io::stderr)).init();
    }
}

/// Check domain resolution
async fn cmd_check(rpc_url: &str, domain: String, publisher: Option<&str>) -> Result<()> {
    println!("{} {}", "🔍 Checking domain:".cyan().bold(), domain);

    let mut config = CheckerConfig::for_domain(domain);
    if let Some(raw) = publisher {
        let address: Address = raw
            .trim()
            .parse()
            .map_err(|e| BnsError::InvalidInput(format!("publisher '{raw}' is not an address: {e}")))?;
        config = config.with_publisher(address);
    }

    let chain = BnbClient::with_config(ChainConfig::new(rpc_url))?;
    let gateways = GatewayClient::new()?;

    let report = ResolutionChecker::new(&chain, &gateways, config).check().await?;
    render::check_report(&report);

    Ok(())
}

/// Verify a publisher contract directly
async fn cmd_verify(rpc_url: &str, contract: Option<&str>) -> Result<()> {
    let contract = RecordVerifier::parse_contract(contract)?;
    println!("{} {}", "🔎 Verifying contract:".cyan().bold(), contract);

    let chain = BnbClient::with_config(ChainConfig::new(rpc_url))?;
    let gateways = GatewayClient::new()?;

    let report = RecordVerifier::new(&chain, &gateways).verify(contract).await?;
    render::verify_report(&report);

    Ok(())
}

/// Update a domain's contenthash
async fn cmd_update(
    rpc_url: &str,
    private_key: Option<&str>,
    cid: Option<&str>,
    domain: String,
    config: UpdaterConfig,
) -> Result<()> {
    let (private_key, request) = update_request(private_key, cid, domain)?;
    println!(
        "{} {} → {}",
        "📝 Updating:".cyan().bold(),
        request.domain,
        request.cid
    );

    let signer = BnbSigner::new(ChainConfig::new(rpc_url), private_key)?;
    let confirmer = config.confirm.confirmer();

    let outcome = RecordUpdater::new(&signer, &*confirmer, config)
        .run(&request)
        .await?;
    render::update_outcome(&outcome);

    Ok(())
}

/// Checks every update input before a client is built.
fn update_request<'k>(
    private_key: Option<&'k str>,
    cid: Option<&str>,
    domain: String,
) -> Result<(&'k str, UpdateRequest), BnsError> {
    let private_key = private_key
        .filter(|k| !k.trim().is_empty())
        .ok_or_else(|| BnsError::missing("PRIVATE_KEY"))?;
    let cid = cid
        .filter(|c| !c.trim().is_empty())
        .ok_or_else(|| BnsError::missing("NEW_CID"))?;

    let request = UpdateRequest::new(domain, cid);
    request.validate()?;
    Ok((private_key, request))
}
