use solana_sdk::pubkey::Pubkey;

use crate::constants::{LP_MINT_PREFIX, TOKEN_VAULT_PREFIX, VAULT_BASE_KEY, VAULT_PREFIX};
use crate::error::{Result, VaultClientError};

/// Addresses the vault program derives for one token mint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VaultPdas {
    pub vault: Pubkey,
    pub vault_bump: u8,
    pub token_vault: Pubkey,
    pub token_vault_bump: u8,
    pub lp_mint: Pubkey,
    pub lp_mint_bump: u8,
}

fn find_pda(seeds: &[&[u8]], program_id: &Pubkey, seed: &'static str) -> Result<(Pubkey, u8)> {
    Pubkey::try_find_program_address(seeds, program_id).ok_or(VaultClientError::Derivation {
        seed,
        program_id: *program_id,
    })
}

/// Derive vault PDA
pub fn derive_vault_pda(
    token_mint: &Pubkey,
    base_key: &Pubkey,
    program_id: &Pubkey,
) -> Result<(Pubkey, u8)> {
    find_pda(
        &[VAULT_PREFIX, token_mint.as_ref(), base_key.as_ref()],
        program_id,
        "vault",
    )
}

/// Derive token vault PDA
pub fn derive_token_vault_pda(vault: &Pubkey, program_id: &Pubkey) -> Result<(Pubkey, u8)> {
    find_pda(&[TOKEN_VAULT_PREFIX, vault.as_ref()], program_id, "token_vault")
}

/// Derive LP mint PDA
pub fn derive_lp_mint_pda(vault: &Pubkey, program_id: &Pubkey) -> Result<(Pubkey, u8)> {
    find_pda(&[LP_MINT_PREFIX, vault.as_ref()], program_id, "lp_mint")
}

/// Derives the vault, its token vault and its LP mint in one pass.
///
/// `base_key` falls back to [`VAULT_BASE_KEY`], so passing the default
/// explicitly yields the same addresses as omitting it.
pub fn get_vault_pdas(
    token_mint: &Pubkey,
    program_id: &Pubkey,
    base_key: Option<&Pubkey>,
) -> Result<VaultPdas> {
    let base_key = base_key.unwrap_or(&VAULT_BASE_KEY);
    let (vault, vault_bump) = derive_vault_pda(token_mint, base_key, program_id)?;
    let (token_vault, token_vault_bump) = derive_token_vault_pda(&vault, program_id)?;
    let (lp_mint, lp_mint_bump) = derive_lp_mint_pda(&vault, program_id)?;

    Ok(VaultPdas {
        vault,
        vault_bump,
        token_vault,
        token_vault_bump,
        lp_mint,
        lp_mint_bump,
    })
}

/// Derive affiliate partner PDA
pub fn derive_partner_pda(
    vault: &Pubkey,
    partner_token: &Pubkey,
    affiliate_program_id: &Pubkey,
) -> Result<(Pubkey, u8)> {
    find_pda(
        &[vault.as_ref(), partner_token.as_ref()],
        affiliate_program_id,
        "partner",
    )
}

/// Canonical associated token address for `(mint, owner)` under the classic token program.
///
/// Owners may be off-curve (PDAs). Exhausting the bump search is reported
/// instead of panicking.
pub fn get_associated_token_address(mint: &Pubkey, owner: &Pubkey) -> Result<Pubkey> {
    find_pda(
        &[owner.as_ref(), spl_token::ID.as_ref(), mint.as_ref()],
        &spl_associated_token_account::ID,
        "associated_token",
    )
    .map(|(address, _)| address)
}
