use anchor_lang::AccountDeserialize;
use async_trait::async_trait;
use futures::try_join;
use solana_sdk::{account::Account, pubkey::Pubkey, transaction::Transaction};
use spl_token::native_mint;

use crate::batch::chunked_fetch_multiple_vault_accounts;
use crate::clock::get_onchain_time;
use crate::config::VaultConfig;
use crate::connection::AccountReader;
use crate::error::{checked_amount, Result, VaultClientError};
use crate::instructions::{deposit_instruction, withdraw_instruction, Deposit, VaultAction, Withdraw};
use crate::pda::{derive_partner_pda, get_associated_token_address, get_vault_pdas, VaultPdas};
use crate::state::{AffiliateInfo, Partner, VaultState};
use crate::token::{
    get_lp_supply, get_or_create_ata_instruction, get_token_balance, unwrap_sol_instruction,
    wrap_sol_instructions,
};

/// Public contract of a vault client.
#[async_trait]
pub trait VaultImplementation {
    /// LP tokens held by `owner`.
    async fn get_user_balance(&self, owner: &Pubkey) -> Result<u64>;

    /// Outstanding LP supply.
    async fn get_vault_supply(&self) -> Result<u64>;

    /// Underlying tokens `owner` could withdraw right now.
    async fn get_withdrawable_amount(&self, owner: &Pubkey) -> Result<u64>;

    /// Unsigned transaction depositing `base_token_amount` for `owner`.
    async fn deposit(&self, owner: &Pubkey, base_token_amount: u64) -> Result<Transaction>;

    /// Unsigned transaction burning `unmint_amount` LP tokens of `owner`.
    async fn withdraw(&self, owner: &Pubkey, unmint_amount: u64) -> Result<Transaction>;

    async fn get_affiliate_info(&self) -> Result<AffiliateInfo>;
}

/// Vault client for a single token mint.
///
/// Holds configuration only. Every call derives its addresses and reads the
/// chain afresh.
pub struct VaultClient<R> {
    reader: R,
    token_mint: Pubkey,
    config: VaultConfig,
}

fn decode_owned<T: AccountDeserialize>(
    address: &Pubkey,
    account: &Account,
    owner: &Pubkey,
    expected: &'static str,
) -> Result<T> {
    if account.owner != *owner {
        return Err(VaultClientError::ShapeMismatch {
            address: *address,
            expected,
            reason: format!("owned by {}", account.owner),
        });
    }
    T::try_deserialize(&mut account.data.as_slice()).map_err(|e| VaultClientError::ShapeMismatch {
        address: *address,
        expected,
        reason: e.to_string(),
    })
}

impl<R: AccountReader> VaultClient<R> {
    pub fn new(reader: R, token_mint: Pubkey, config: VaultConfig) -> Self {
        Self {
            reader,
            token_mint,
            config,
        }
    }

    pub fn reader(&self) -> &R {
        &self.reader
    }

    pub fn token_mint(&self) -> &Pubkey {
        &self.token_mint
    }

    pub fn config(&self) -> &VaultConfig {
        &self.config
    }

    pub fn pdas(&self) -> Result<VaultPdas> {
        get_vault_pdas(
            &self.token_mint,
            &self.config.program_id,
            Some(&self.config.base_key),
        )
    }

    fn is_native(&self) -> bool {
        self.token_mint == native_mint::ID
    }

    /// Current vault account.
    pub async fn get_vault_state(&self) -> Result<VaultState> {
        let vault = self.pdas()?.vault;
        let account = self
            .reader
            .get_account(&vault)
            .await?
            .ok_or(VaultClientError::AccountNotFound {
                address: vault,
                kind: "vault",
            })?;
        decode_owned(&vault, &account, &self.config.program_id, "vault")
    }

    /// Vault accounts for many mints at once, in chunks of `config.chunk_size`.
    ///
    /// Mints without a vault are skipped.
    pub async fn fetch_vault_states(
        reader: &R,
        token_mints: &[Pubkey],
        config: &VaultConfig,
    ) -> Result<Vec<VaultState>> {
        let vaults = token_mints
            .iter()
            .map(|mint| {
                get_vault_pdas(mint, &config.program_id, Some(&config.base_key))
                    .map(|pdas| pdas.vault)
            })
            .collect::<Result<Vec<_>>>()?;
        chunked_fetch_multiple_vault_accounts(
            reader,
            &vaults,
            &config.program_id,
            config.chunk_size,
        )
        .await
    }

    fn action_accounts(
        &self,
        pdas: &VaultPdas,
        user: &Pubkey,
        user_token: Pubkey,
        user_lp: Pubkey,
    ) -> VaultAction {
        VaultAction {
            vault: pdas.vault,
            token_vault: pdas.token_vault,
            lp_mint: pdas.lp_mint,
            user_token,
            user_lp,
            user: *user,
            token_program: spl_token::ID,
        }
    }
}

#[async_trait]
impl<R: AccountReader> VaultImplementation for VaultClient<R> {
    async fn get_user_balance(&self, owner: &Pubkey) -> Result<u64> {
        let user_lp = get_associated_token_address(&self.pdas()?.lp_mint, owner)?;
        get_token_balance(&self.reader, &user_lp).await
    }

    async fn get_vault_supply(&self) -> Result<u64> {
        get_lp_supply(&self.reader, &self.pdas()?.lp_mint).await
    }

    async fn get_withdrawable_amount(&self, owner: &Pubkey) -> Result<u64> {
        let lp_mint = self.pdas()?.lp_mint;
        let (vault, current_time, lp_supply, user_lp) = try_join!(
            self.get_vault_state(),
            get_onchain_time(&self.reader),
            get_lp_supply(&self.reader, &lp_mint),
            self.get_user_balance(owner),
        )?;

        if lp_supply == 0 {
            return Ok(0);
        }

        let unlocked = vault.unlocked_amount(current_time)?;
        let amount = u128::from(user_lp)
            .checked_mul(u128::from(unlocked))
            .ok_or(VaultClientError::MathOverflow)?
            / u128::from(lp_supply);
        checked_amount(amount)
    }

    async fn deposit(&self, owner: &Pubkey, base_token_amount: u64) -> Result<Transaction> {
        let pdas = self.pdas()?;
        let (user_token, user_lp) = try_join!(
            get_or_create_ata_instruction(&self.token_mint, owner, &self.reader, None),
            get_or_create_ata_instruction(&pdas.lp_mint, owner, &self.reader, None),
        )?;
        let (user_token, create_user_token) = user_token.into_parts();
        let (user_lp, create_user_lp) = user_lp.into_parts();

        let mut instructions = Vec::new();
        instructions.extend(create_user_token);
        instructions.extend(create_user_lp);
        if self.is_native() {
            instructions.extend(wrap_sol_instructions(owner, &user_token, base_token_amount));
        }

        let accounts = self.action_accounts(&pdas, owner, user_token, user_lp);
        instructions.push(deposit_instruction(
            &self.config.program_id,
            &accounts,
            Deposit {
                token_amount: base_token_amount,
                minimum_lp_token_amount: 0,
            },
        ));

        if self.is_native() {
            instructions.push(unwrap_sol_instruction(owner)?);
        }

        Ok(Transaction::new_with_payer(&instructions, Some(owner)))
    }

    async fn withdraw(&self, owner: &Pubkey, unmint_amount: u64) -> Result<Transaction> {
        let pdas = self.pdas()?;
        let (user_token, create_user_token) =
            get_or_create_ata_instruction(&self.token_mint, owner, &self.reader, None)
                .await?
                .into_parts();
        let user_lp = get_associated_token_address(&pdas.lp_mint, owner)?;

        let mut instructions = Vec::new();
        instructions.extend(create_user_token);

        let accounts = self.action_accounts(&pdas, owner, user_token, user_lp);
        instructions.push(withdraw_instruction(
            &self.config.program_id,
            &accounts,
            Withdraw {
                unmint_amount,
                min_out_amount: 0,
            },
        ));

        if self.is_native() {
            instructions.push(unwrap_sol_instruction(owner)?);
        }

        Ok(Transaction::new_with_payer(&instructions, Some(owner)))
    }

    async fn get_affiliate_info(&self) -> Result<AffiliateInfo> {
        let partner_wallet = self
            .config
            .affiliate_id
            .ok_or(VaultClientError::AffiliateNotConfigured)?;
        let vault = self.pdas()?.vault;
        let partner_token = get_associated_token_address(&self.token_mint, &partner_wallet)?;
        let (partner, _) =
            derive_partner_pda(&vault, &partner_token, &self.config.affiliate_program_id)?;

        let account = self
            .reader
            .get_account(&partner)
            .await?
            .ok_or(VaultClientError::AccountNotFound {
                address: partner,
                kind: "affiliate partner",
            })?;
        let partner_state: Partner = decode_owned(
            &partner,
            &account,
            &self.config.affiliate_program_id,
            "affiliate partner",
        )?;

        Ok(partner_state.into())
    }
}
