use crate::Discriminator;
use solana_sdk::pubkey::Pubkey;

/// Ecosystem program
pub const ECOSYSTEM_PROGRAM_ID: Pubkey =
    solana_sdk::pubkey!("DuFkXZLHxnuKpz9QzS128kEbs7e1bvmC91EGywP74n4U");

/// Default transfer hook attached to newly created ecosystem mints
pub const TRANSFER_HOOK_PROGRAM_ID: Pubkey =
    solana_sdk::pubkey!("6BGyrUsGSJiscv8M3hC7JWMm4JKLBXMu3Js4ZQvcNY3G");

pub const TOKEN_2022_PROGRAM_ID: Pubkey =
    solana_sdk::pubkey!("TokenzQdBNbLqP5VEhdkAS6EPFLC1PHnBqCXEpPxuEb");

pub const SPL_TOKEN_PROGRAM_ID: Pubkey = spl_token::ID;

/// Output mint paid out when a withdrawal request is approved (USDC)
pub const WITHDRAWAL_OUTPUT_MINT: Pubkey =
    solana_sdk::pubkey!("EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v");

/// Seed prefixes for PDA derivation
pub const CONFIG_SEED: &[u8] = b"config";
pub const MINT_AUTHORITY_SEED: &[u8] = b"mint_authority";
pub const ECOSYSTEM_CONFIG_SEED: &[u8] = b"ecosystem_config";
pub const FEE_VAULT_AUTHORITY_SEED: &[u8] = b"fee_vault_authority";
pub const FEE_VAULT_SEED: &[u8] = b"fee_vault";
pub const COLLATERAL_VAULT_SEED: &[u8] = b"collateral_vault";
pub const WITHDRAWAL_REQUEST_SEED: &[u8] = b"withdrawal_request";
pub const MERCHANT_BALANCE_SEED: &[u8] = b"merchant_balance";
pub const VAULT_SEED: &[u8] = b"vault";

/// Instruction discriminators
pub const INITIALIZE_DISCRIMINATOR: Discriminator = [175, 175, 109, 31, 13, 152, 155, 237];
pub const CREATE_ECOSYSTEM_DISCRIMINATOR: Discriminator = [112, 220, 80, 248, 66, 241, 71, 246];
pub const DEPOSIT_ECOSYSTEM_DISCRIMINATOR: Discriminator = [177, 193, 65, 180, 136, 55, 178, 43];
pub const ADD_APPROVER_DISCRIMINATOR: Discriminator = [213, 245, 135, 79, 129, 129, 22, 80];
pub const REMOVE_APPROVER_DISCRIMINATOR: Discriminator = [214, 72, 133, 48, 50, 58, 227, 224];
pub const CREATE_WITHDRAWAL_REQUEST_DISCRIMINATOR: Discriminator =
    [37, 98, 178, 192, 168, 139, 43, 242];
pub const APPROVE_WITHDRAWAL_REQUEST_DISCRIMINATOR: Discriminator =
    [190, 168, 219, 52, 136, 10, 126, 172];

pub const DEFAULT_COMPUTE_UNITS: u32 = 400_000;
