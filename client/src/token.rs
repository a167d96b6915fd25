use anchor_lang::solana_program::msg;
use anchor_lang::AccountDeserialize;
use anchor_spl::token::TokenAccount;
use solana_sdk::{
    account::Account,
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    system_instruction,
};
use spl_associated_token_account::instruction::create_associated_token_account;
use spl_token::native_mint;

use crate::connection::AccountReader;
use crate::constants::SYNC_NATIVE_OPCODE;
use crate::error::{Result, VaultClientError};
use crate::pda::get_associated_token_address;

/// Outcome of looking up an associated token account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AtaResolution {
    /// The account exists; nothing to create.
    Found(Pubkey),
    /// The account is absent; `create_instruction` must run before it is used.
    NotFound {
        address: Pubkey,
        create_instruction: Instruction,
    },
}

impl AtaResolution {
    pub fn address(&self) -> Pubkey {
        match self {
            Self::Found(address) | Self::NotFound { address, .. } => *address,
        }
    }

    pub fn create_instruction(&self) -> Option<&Instruction> {
        match self {
            Self::Found(_) => None,
            Self::NotFound {
                create_instruction, ..
            } => Some(create_instruction),
        }
    }

    pub fn into_parts(self) -> (Pubkey, Option<Instruction>) {
        match self {
            Self::Found(address) => (address, None),
            Self::NotFound {
                address,
                create_instruction,
            } => (address, Some(create_instruction)),
        }
    }
}

/// Resolves the owner's ATA for `mint` with a single account read.
///
/// Only a definitive "not found" yields a creation instruction, funded by
/// `payer` or else by `owner`. Read errors propagate.
pub async fn get_or_create_ata_instruction<R>(
    mint: &Pubkey,
    owner: &Pubkey,
    reader: &R,
    payer: Option<&Pubkey>,
) -> Result<AtaResolution>
where
    R: AccountReader + ?Sized,
{
    let address = get_associated_token_address(mint, owner)?;

    match reader.get_account(&address).await {
        Ok(Some(_)) => Ok(AtaResolution::Found(address)),
        Ok(None) => {
            let payer = payer.unwrap_or(owner);
            let create_instruction =
                create_associated_token_account(payer, owner, mint, &spl_token::ID);
            Ok(AtaResolution::NotFound {
                address,
                create_instruction,
            })
        }
        Err(e) => {
            msg!("Error::get_or_create_ata_instruction {}: {}", address, e);
            Err(e)
        }
    }
}

/// Decodes a token account. Absent stays absent; anything else that is not a
/// token account is a shape mismatch.
pub fn deserialize_token_account(
    address: &Pubkey,
    account: Option<&Account>,
) -> Result<Option<TokenAccount>> {
    let Some(account) = account else {
        return Ok(None);
    };

    if account.owner != spl_token::ID {
        return Err(VaultClientError::ShapeMismatch {
            address: *address,
            expected: "token account",
            reason: format!("owned by {}", account.owner),
        });
    }

    TokenAccount::try_deserialize(&mut account.data.as_slice())
        .map(Some)
        .map_err(|e| VaultClientError::ShapeMismatch {
            address: *address,
            expected: "token account",
            reason: e.to_string(),
        })
}

/// Balance of a token account. A missing account holds nothing.
pub async fn get_token_balance<R>(reader: &R, address: &Pubkey) -> Result<u64>
where
    R: AccountReader + ?Sized,
{
    let account = reader.get_account(address).await?;
    Ok(deserialize_token_account(address, account.as_ref())?
        .map_or(0, |token_account| token_account.amount))
}

pub async fn get_lp_supply<R>(reader: &R, lp_mint: &Pubkey) -> Result<u64>
where
    R: AccountReader + ?Sized,
{
    reader.get_token_supply(lp_mint).await
}

/// `SyncNative` for a wrapped SOL account.
pub fn sync_native_instruction(account: &Pubkey) -> Instruction {
    Instruction {
        program_id: spl_token::ID,
        accounts: vec![AccountMeta::new(*account, false)],
        data: vec![SYNC_NATIVE_OPCODE],
    }
}

/// Moves `amount` lamports into the wrapped SOL account `to`, then syncs it.
///
/// The order matters: syncing first would miss the transfer.
pub fn wrap_sol_instructions(from: &Pubkey, to: &Pubkey, amount: u64) -> [Instruction; 2] {
    [
        system_instruction::transfer(from, to, amount),
        sync_native_instruction(to),
    ]
}

/// Closes the wallet's wrapped SOL ATA, returning its lamports to the wallet.
pub fn unwrap_sol_instruction(wallet: &Pubkey) -> Result<Instruction> {
    let wsol_ata = get_associated_token_address(&native_mint::ID, wallet)?;
    Ok(spl_token::instruction::close_account(
        &spl_token::ID,
        &wsol_ata,
        wallet,
        wallet,
        &[],
    )?)
}
