pub mod add_approver;
pub mod approve_withdrawal;
pub mod check_balance;
pub mod create_ecosystem;
pub mod create_token_account;
pub mod deposit;
pub mod initialize;
pub mod remove_approver;
pub mod request_withdrawal;
pub mod run_all;
