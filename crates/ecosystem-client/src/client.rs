/*!
# Ecosystem Client Implementation

Operation drivers: each one reads whatever ledger metadata its instruction
needs, builds the unsigned transaction through the SDK, signs it once and
hands it to the submission engine. Drivers never retry on their own.
*/

use crate::{
    errors::{ClientError, ClientResult},
    types::{
        ApproveWithdrawalParams, BalanceReport, BalanceState, CreateEcosystemParams,
        CreateEcosystemResult, CreateTokenAccountResult, DepositParams, DepositResult,
        InitializeResult, OperationResult, WithdrawalRequestResult,
    },
};
use ecosystem_sdk::{
    build_add_approver_tx, build_approve_withdrawal_request_tx, build_create_ecosystem_tx,
    build_create_token_account_tx, build_create_withdrawal_request_tx, build_deposit_ecosystem_tx,
    build_initialize_tx, build_remove_approver_tx, instruction, token_account_amount,
    token_account_mint, AccountMetadata, AddressFinder, MerchantBalance, DEFAULT_COMPUTE_UNITS,
    SPL_TOKEN_PROGRAM_ID, TOKEN_2022_PROGRAM_ID, WITHDRAWAL_OUTPUT_MINT,
};
use ecosystem_tx::{
    Commitment, LedgerClient, RpcClient, RpcLedger, SignedTransaction, SubmitConfig, TxError,
    TxSubmitter,
};
use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signature},
    signer::{signers::Signers, Signer},
    transaction::Transaction,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Drives ecosystem program operations against one ledger.
pub struct EcosystemClient {
    address_finder: AddressFinder,
    ledger: Arc<dyn LedgerClient>,
    submitter: TxSubmitter,
    submit_config: SubmitConfig,
    compute_units: u32,
}

impl EcosystemClient {
    pub fn new(ledger: Arc<dyn LedgerClient>) -> Self {
        Self {
            address_finder: AddressFinder::default(),
            submitter: TxSubmitter::new(ledger.clone()),
            ledger,
            submit_config: SubmitConfig::standard(),
            compute_units: DEFAULT_COMPUTE_UNITS,
        }
    }

    /// Client over a JSON-RPC node, reading accounts at `commitment`.
    pub fn new_with_rpc_url(rpc_url: String, commitment: Commitment) -> Self {
        let rpc_client = Arc::new(RpcClient::new_with_commitment(
            rpc_url,
            commitment.to_config(),
        ));
        Self::new(Arc::new(RpcLedger::with_commitment(rpc_client, commitment)))
    }

    pub fn with_address_finder(mut self, address_finder: AddressFinder) -> Self {
        self.address_finder = address_finder;
        self
    }

    pub fn with_submit_config(mut self, submit_config: SubmitConfig) -> Self {
        self.submit_config = submit_config;
        self
    }

    /// Compute unit limit for create-ecosystem and deposit.
    pub fn with_compute_units(mut self, compute_units: u32) -> Self {
        self.compute_units = compute_units;
        self
    }

    pub fn address_finder(&self) -> &AddressFinder {
        &self.address_finder
    }

    pub fn submit_config(&self) -> &SubmitConfig {
        &self.submit_config
    }

    pub fn ledger(&self) -> &Arc<dyn LedgerClient> {
        &self.ledger
    }

    // ================================================================================================
    // Operations
    // ================================================================================================

    /// Create the global config, unless it already exists.
    pub async fn initialize(&self, payer: &Keypair) -> ClientResult<InitializeResult> {
        let (config, _) = self.address_finder.find_config_address()?;
        debug!(%config, payer = %payer.pubkey(), "Initializing config");

        match self.ledger.account(&config).await {
            Ok(Some(_)) => {
                info!(%config, "Config already exists");
                return Ok(InitializeResult {
                    config,
                    signature: None,
                });
            }
            Ok(None) => {}
            Err(e) => warn!(%config, error = %e, "Could not check for existing config"),
        }

        let tx = build_initialize_tx(&self.address_finder, &payer.pubkey())?;
        let signature = self.sign_and_submit("initialize", tx, &[payer]).await?;

        info!(%config, owner = %payer.pubkey(), "Config initialized");
        Ok(InitializeResult {
            config,
            signature: Some(signature),
        })
    }

    /// Create an ecosystem under a freshly generated mint.
    pub async fn create_ecosystem(
        &self,
        payer: &Keypair,
        params: &CreateEcosystemParams,
    ) -> ClientResult<CreateEcosystemResult> {
        self.create_ecosystem_with_mint(payer, &Keypair::new(), params)
            .await
    }

    /// Create an ecosystem under `mint`, which co-signs the transaction.
    pub async fn create_ecosystem_with_mint(
        &self,
        payer: &Keypair,
        mint: &Keypair,
        params: &CreateEcosystemParams,
    ) -> ClientResult<CreateEcosystemResult> {
        let mint_pubkey = mint.pubkey();
        let collateral_token_program = self.token_program_of(&params.collateral_token_mint).await?;

        let metadata = AccountMetadata {
            collateral_token_program: Some(collateral_token_program),
            ..AccountMetadata::default()
        };
        let ix_data = instruction::CreateEcosystem {
            decimals: params.decimals,
            name: params.name.clone(),
            symbol: params.symbol.clone(),
            uri: params.uri.clone(),
            transfer_hook_program_id: params.transfer_hook_program_id,
            ecosystem_partner_wallet: params
                .ecosystem_partner_wallet
                .unwrap_or_else(|| payer.pubkey()),
            max_minting_cap: params.max_minting_cap,
            withdrawal_fee_basis_points: params.withdrawal_fee_basis_points,
            deposit_fee_basis_points: params.deposit_fee_basis_points,
            collateral_token_mint: params.collateral_token_mint,
        };

        let (ecosystem_config, _) = self
            .address_finder
            .find_ecosystem_config_address(&mint_pubkey)?;
        let (fee_vault, _) = self.address_finder.find_fee_vault_address(&mint_pubkey)?;
        let (collateral_vault, _) = self
            .address_finder
            .find_collateral_vault_address(&mint_pubkey)?;

        debug!(
            mint = %mint_pubkey,
            %ecosystem_config,
            %fee_vault,
            %collateral_vault,
            collateral_mint = %params.collateral_token_mint,
            "Creating ecosystem"
        );

        let tx = build_create_ecosystem_tx(
            &self.address_finder,
            &payer.pubkey(),
            &mint_pubkey,
            &metadata,
            ix_data,
            self.compute_units,
        )?;
        let signature = self
            .sign_and_submit("create_ecosystem", tx, &[payer, mint])
            .await?;

        info!(mint = %mint_pubkey, %ecosystem_config, "Ecosystem created");
        Ok(CreateEcosystemResult {
            mint: mint_pubkey,
            ecosystem_config,
            fee_vault,
            collateral_vault,
            signature,
        })
    }

    /// Create the payer's associated token account for `mint`, unless it exists.
    pub async fn create_token_account(
        &self,
        payer: &Keypair,
        mint: &Pubkey,
    ) -> ClientResult<CreateTokenAccountResult> {
        let token_program = self.token_program_of(mint).await?;
        let (tx, token_account) =
            build_create_token_account_tx(&self.address_finder, &payer.pubkey(), mint, &token_program);

        if self.ledger.account(&token_account).await?.is_some() {
            info!(%token_account, "Token account already exists");
            return Ok(CreateTokenAccountResult {
                token_account,
                signature: None,
            });
        }

        let signature = self
            .sign_and_submit("create_token_account", tx, &[payer])
            .await?;

        info!(%token_account, %mint, "Token account created");
        Ok(CreateTokenAccountResult {
            token_account,
            signature: Some(signature),
        })
    }

    /// Deposit collateral and mint ecosystem tokens to the payer.
    pub async fn deposit(
        &self,
        payer: &Keypair,
        params: &DepositParams,
    ) -> ClientResult<DepositResult> {
        let payer_pubkey = payer.pubkey();
        let mint = params.ecosystem_mint;

        let (ecosystem_config, _) = self.address_finder.find_ecosystem_config_address(&mint)?;
        if self.ledger.account(&ecosystem_config).await?.is_none() {
            return Err(ClientError::EcosystemNotFound(mint));
        }

        let (mint_account, collateral_account, token_accounts) = futures::try_join!(
            self.ledger.account(&mint),
            self.ledger.account(&params.user_collateral_account),
            self.ledger.token_accounts_by_owner(&payer_pubkey, &mint),
        )?;

        let mint_account = mint_account.ok_or(ClientError::MintNotFound(mint))?;
        let collateral_account = collateral_account.ok_or_else(|| {
            ClientError::AccountNotFound(format!(
                "collateral token account {}",
                params.user_collateral_account
            ))
        })?;
        let user_ecosystem_token_account = token_accounts.first().copied().ok_or(
            ClientError::NoEcosystemTokenAccount {
                owner: payer_pubkey,
                mint,
            },
        )?;

        let metadata = AccountMetadata {
            collateral_token_program: Some(recognized_token_program(
                &params.user_collateral_account,
                collateral_account.owner,
            )?),
            collateral_token_mint: Some(token_account_mint(&collateral_account.data)?),
            ecosystem_token_program: Some(recognized_token_program(&mint, mint_account.owner)?),
            user_ecosystem_token_account: Some(user_ecosystem_token_account),
            ..AccountMetadata::default()
        };

        debug!(
            %mint,
            %user_ecosystem_token_account,
            user_collateral_account = %params.user_collateral_account,
            amount = params.amount,
            "Depositing"
        );

        let tx = build_deposit_ecosystem_tx(
            &self.address_finder,
            payer_pubkey,
            mint,
            params.user_collateral_account,
            &metadata,
            params.amount,
            self.compute_units,
        )?;
        let signature = self.sign_and_submit("deposit", tx, &[payer]).await?;

        let ecosystem_token_balance = match self.token_balance(&user_ecosystem_token_account).await {
            Ok(balance) => Some(balance),
            Err(e) => {
                warn!(%user_ecosystem_token_account, error = %e, "Could not read token balance");
                None
            }
        };

        info!(%signature, amount = params.amount, ?ecosystem_token_balance, "Deposit complete");
        Ok(DepositResult {
            signature,
            user_ecosystem_token_account,
            ecosystem_token_balance,
        })
    }

    pub async fn add_approver(
        &self,
        payer: &Keypair,
        approver: &Pubkey,
    ) -> ClientResult<OperationResult> {
        debug!(%approver, "Adding approver");
        let tx = build_add_approver_tx(&self.address_finder, &payer.pubkey(), approver)?;
        let signature = self.sign_and_submit("add_approver", tx, &[payer]).await?;

        info!(%approver, "Approver added");
        Ok(OperationResult { signature })
    }

    pub async fn remove_approver(
        &self,
        payer: &Keypair,
        approver: &Pubkey,
    ) -> ClientResult<OperationResult> {
        debug!(%approver, "Removing approver");
        let tx = build_remove_approver_tx(&self.address_finder, &payer.pubkey(), approver)?;
        let signature = self.sign_and_submit("remove_approver", tx, &[payer]).await?;

        info!(%approver, "Approver removed");
        Ok(OperationResult { signature })
    }

    /// Open a withdrawal request; `merchant` defaults to the payer.
    pub async fn request_withdrawal(
        &self,
        payer: &Keypair,
        ecosystem_mint: &Pubkey,
        merchant: Option<Pubkey>,
    ) -> ClientResult<WithdrawalRequestResult> {
        let merchant = merchant.unwrap_or_else(|| payer.pubkey());
        let (ecosystem_config, _) = self
            .address_finder
            .find_ecosystem_config_address(ecosystem_mint)?;
        let (merchant_balance, _) = self
            .address_finder
            .find_merchant_balance_address(&merchant, ecosystem_mint)?;
        let (withdrawal_request, _) = self
            .address_finder
            .find_withdrawal_request_address(&merchant, &ecosystem_config)?;

        debug!(%merchant, %merchant_balance, %withdrawal_request, "Creating withdrawal request");

        let tx = build_create_withdrawal_request_tx(
            &self.address_finder,
            &payer.pubkey(),
            &merchant,
            ecosystem_mint,
        )?;
        let signature = self
            .sign_and_submit("request_withdrawal", tx, &[payer])
            .await?;

        info!(%withdrawal_request, "Withdrawal request created");
        Ok(WithdrawalRequestResult {
            withdrawal_request,
            merchant_balance,
            signature,
        })
    }

    /// Approve a merchant's withdrawal request; `approver` signs and pays.
    pub async fn approve_withdrawal(
        &self,
        approver: &Keypair,
        params: &ApproveWithdrawalParams,
    ) -> ClientResult<OperationResult> {
        let output_mint_token_program = self.token_program_of(&WITHDRAWAL_OUTPUT_MINT).await?;
        let metadata = AccountMetadata {
            output_mint_token_program: Some(output_mint_token_program),
            ..AccountMetadata::default()
        };

        debug!(
            merchant = %params.merchant,
            merchant_token_account = %params.merchant_token_account,
            "Approving withdrawal"
        );

        let tx = build_approve_withdrawal_request_tx(
            &self.address_finder,
            &approver.pubkey(),
            &params.ecosystem_mint,
            &params.merchant,
            &params.merchant_token_account,
            &metadata,
        )?;
        let signature = self
            .sign_and_submit("approve_withdrawal", tx, &[approver])
            .await?;

        info!(merchant = %params.merchant, "Withdrawal approved");
        Ok(OperationResult { signature })
    }

    /// Read and decode a merchant's balance account. Never submits anything.
    pub async fn check_balance(
        &self,
        ecosystem_mint: &Pubkey,
        merchant: &Pubkey,
    ) -> ClientResult<BalanceReport> {
        let (address, _) = self
            .address_finder
            .find_merchant_balance_address(merchant, ecosystem_mint)?;
        let (ecosystem_config, _) = self
            .address_finder
            .find_ecosystem_config_address(ecosystem_mint)?;

        let state = match self.ledger.account(&address).await? {
            None => BalanceState::Missing,
            Some(account) => match MerchantBalance::try_from_bytes(&account.data) {
                Ok(balance) => BalanceState::Decoded {
                    owner: account.owner,
                    data_len: account.data.len(),
                    balance,
                },
                Err(e) => {
                    debug!(%address, error = %e, "Merchant balance not decodable");
                    BalanceState::Undecoded {
                        owner: account.owner,
                        data: account.data,
                    }
                }
            },
        };

        Ok(BalanceReport {
            address,
            ecosystem_config,
            state,
        })
    }

    // ================================================================================================
    // Ledger Metadata
    // ================================================================================================

    /// Token program owning `mint`: legacy SPL Token or Token-2022.
    pub async fn token_program_of(&self, mint: &Pubkey) -> ClientResult<Pubkey> {
        let account = self
            .ledger
            .account(mint)
            .await?
            .ok_or(ClientError::MintNotFound(*mint))?;
        recognized_token_program(mint, account.owner)
    }

    pub async fn token_balance(&self, token_account: &Pubkey) -> ClientResult<u64> {
        let account = self
            .ledger
            .account(token_account)
            .await?
            .ok_or_else(|| ClientError::AccountNotFound(token_account.to_string()))?;
        Ok(token_account_amount(&account.data)?)
    }

    // ================================================================================================
    // Submission
    // ================================================================================================

    /// Anchor, sign once and submit. Engine errors are tagged with `operation`.
    async fn sign_and_submit<T>(
        &self,
        operation: &'static str,
        transaction: Transaction,
        signers: &T,
    ) -> ClientResult<Signature>
    where
        T: Signers + ?Sized,
    {
        let tagged = |source: TxError| ClientError::Operation { operation, source };

        let anchor = self
            .ledger
            .latest_anchor(self.submit_config.preflight_commitment)
            .await
            .map_err(|e| tagged(TxError::Ledger(e)))?;
        let payload = SignedTransaction::sign(transaction, signers, anchor).map_err(tagged)?;

        debug!(operation, signature = %payload.signature(), "Submitting");
        self.submitter
            .submit(&payload, &self.submit_config)
            .await
            .map_err(tagged)
    }
}

fn recognized_token_program(address: &Pubkey, owner: Pubkey) -> ClientResult<Pubkey> {
    if owner == TOKEN_2022_PROGRAM_ID || owner == SPL_TOKEN_PROGRAM_ID {
        Ok(owner)
    } else {
        Err(ClientError::UnrecognizedTokenProgram {
            address: *address,
            owner,
        })
    }
}
