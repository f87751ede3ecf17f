use clap::{Parser, Subcommand};
use ecosystem_client::{ApproveWithdrawalParams, EcosystemClient};
use solana_sdk::{pubkey::Pubkey, signer::Signer};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod error;
mod keypair;

use commands::create_ecosystem::CreateEcosystemArgs;
use config::{CliConfig, GlobalArgs, Settings};
use error::CliResult;

#[derive(Parser)]
#[command(name = "ecosystem")]
#[command(about = "Ecosystem CLI - drive ecosystem program operations with durable submission")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the global program config (skipped if it exists)
    Initialize,

    /// Create a new ecosystem mint with its config and vaults
    CreateEcosystem(CreateEcosystemArgs),

    /// Create the payer's associated token account for a mint
    CreateTokenAccount {
        #[arg(long)]
        ecosystem_mint: Pubkey,
    },

    /// Deposit collateral and mint ecosystem tokens
    Deposit {
        #[arg(long)]
        ecosystem_mint: Pubkey,

        /// Payer's collateral token account
        #[arg(long)]
        user_collateral_account: Pubkey,

        #[arg(long, default_value = "1000000")]
        amount: String,
    },

    /// Add a withdrawal approver
    AddApprover {
        #[arg(long)]
        approver_address: Pubkey,
    },

    /// Remove a withdrawal approver
    RemoveApprover {
        #[arg(long)]
        approver_address: Pubkey,
    },

    /// Open a withdrawal request
    RequestWithdrawal {
        #[arg(long)]
        ecosystem_mint: Pubkey,

        /// Merchant wallet (defaults to the payer)
        #[arg(long)]
        merchant_wallet: Option<Pubkey>,
    },

    /// Approve a merchant's withdrawal request
    ApproveWithdrawal {
        #[arg(long)]
        ecosystem_mint: Pubkey,

        #[arg(long)]
        merchant_wallet: Pubkey,

        #[arg(long)]
        merchant_token_account: Pubkey,
    },

    /// Show a merchant's balance account
    CheckBalance {
        #[arg(long)]
        ecosystem_mint: Pubkey,

        /// Merchant wallet (defaults to the payer)
        #[arg(long)]
        merchant_wallet: Option<Pubkey>,
    },

    /// Initialize, create an ecosystem, create a token account and deposit
    RunAll {
        #[command(flatten)]
        ecosystem: CreateEcosystemArgs,

        /// Deposit from this collateral account; skipped when absent
        #[arg(long)]
        user_collateral_account: Option<Pubkey>,

        #[arg(long, default_value = "1000000")]
        amount: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    init_tracing(cli.global.verbose);

    match run(cli).await {
        Ok(()) => {
            println!("\n🎉 Operation completed");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("\n❌ Error: {}", e);
            if e.is_ambiguous() {
                eprintln!("   The transaction may still land; check its signature before retrying.");
            }
            ExitCode::from(e.exit_code())
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> CliResult<()> {
    let file = match &cli.global.config {
        Some(path) => CliConfig::load(path)?,
        None => CliConfig::default(),
    };
    let settings = Settings::resolve(&cli.global, file)?;
    let payer = keypair::load_keypair(&settings.keypair_path)?;

    println!("🌐 Network: {}", settings.rpc_url);
    println!("🔑 Payer: {}\n", payer.pubkey());

    let client = EcosystemClient::new_with_rpc_url(settings.rpc_url, settings.commitment)
        .with_submit_config(settings.submit_config)
        .with_compute_units(settings.compute_units);

    match cli.command {
        Commands::Initialize => {
            commands::initialize::execute(&client, &payer).await?;
        }

        Commands::CreateEcosystem(args) => {
            commands::create_ecosystem::execute(&client, &payer, &args).await?;
        }

        Commands::CreateTokenAccount { ecosystem_mint } => {
            commands::create_token_account::execute(&client, &payer, &ecosystem_mint).await?;
        }

        Commands::Deposit {
            ecosystem_mint,
            user_collateral_account,
            amount,
        } => {
            commands::deposit::execute(
                &client,
                &payer,
                ecosystem_mint,
                user_collateral_account,
                &amount,
            )
            .await?;
        }

        Commands::AddApprover { approver_address } => {
            commands::add_approver::execute(&client, &payer, &approver_address).await?
        }

        Commands::RemoveApprover { approver_address } => {
            commands::remove_approver::execute(&client, &payer, &approver_address).await?
        }

        Commands::RequestWithdrawal {
            ecosystem_mint,
            merchant_wallet,
        } => {
            commands::request_withdrawal::execute(&client, &payer, &ecosystem_mint, merchant_wallet)
                .await?
        }

        Commands::ApproveWithdrawal {
            ecosystem_mint,
            merchant_wallet,
            merchant_token_account,
        } => {
            let params = ApproveWithdrawalParams {
                ecosystem_mint,
                merchant: merchant_wallet,
                merchant_token_account,
            };
            commands::approve_withdrawal::execute(&client, &payer, &params).await?
        }

        Commands::CheckBalance {
            ecosystem_mint,
            merchant_wallet,
        } => {
            let merchant = merchant_wallet.unwrap_or_else(|| payer.pubkey());
            commands::check_balance::execute(&client, &ecosystem_mint, &merchant).await?
        }

        Commands::RunAll {
            ecosystem,
            user_collateral_account,
            amount,
        } => {
            commands::run_all::execute(&client, &payer, &ecosystem, user_collateral_account, &amount)
                .await?
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use ecosystem_tx::Commitment;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_deposit_defaults() {
        let mint = Pubkey::new_unique();
        let collateral = Pubkey::new_unique();
        let cli = Cli::try_parse_from([
            "ecosystem",
            "deposit",
            "--ecosystem-mint",
            &mint.to_string(),
            "--user-collateral-account",
            &collateral.to_string(),
            "--commitment",
            "finalized",
            "--fast",
        ])
        .unwrap();

        assert!(cli.global.fast);
        assert_eq!(cli.global.commitment, Some(Commitment::Finalized));
        match cli.command {
            Commands::Deposit {
                ecosystem_mint,
                user_collateral_account,
                amount,
            } => {
                assert_eq!(ecosystem_mint, mint);
                assert_eq!(user_collateral_account, collateral);
                assert_eq!(amount, "1000000");
            }
            _ => panic!("expected deposit"),
        }
    }

    #[test]
    fn test_create_ecosystem_requires_collateral_mint() {
        assert!(Cli::try_parse_from(["ecosystem", "create-ecosystem"]).is_err());
        assert!(Cli::try_parse_from([
            "ecosystem",
            "add-approver",
            "--approver-address",
            "not-a-pubkey"
        ])
        .is_err());
    }
}
