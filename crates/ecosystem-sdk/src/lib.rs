/*!
# Ecosystem SDK

Pure building blocks for talking to the ecosystem program: deterministic
address derivation, fixed-layout instruction encoding, and unsigned
transaction assembly. Nothing in this crate performs I/O; anything that has
to be read from the ledger first (token program ownership, a user's token
account) is passed in through [`AccountMetadata`].
*/

pub mod accounts;
mod address_finder;
pub mod constants;
mod error;
pub mod instruction;
mod instruction_builders;
mod instruction_data;
mod metadata;
mod state;
mod transaction_builders;

pub use address_finder::AddressFinder;
pub use constants::*;
pub use error::{SdkError, SdkResult};
pub use instruction_builders::*;
pub use instruction_data::{encode, parse_amount, parse_unsigned, Arg, Discriminator, InstructionData};
pub use metadata::AccountMetadata;
pub use state::{token_account_amount, token_account_mint, MerchantBalance};
pub use transaction_builders::*;
