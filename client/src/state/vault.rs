use anchor_lang::prelude::*;

use crate::constants::LOCKED_PROFIT_DEGRADATION_DENOMINATOR;
use crate::error::{checked_amount, Result, VaultClientError};

/// Maximum number of lending strategies a vault can route liquidity to.
pub const MAX_STRATEGY: usize = 30;

/// Vault account as laid out by the vault program. Read-only on the client.
#[account]
#[derive(Debug, PartialEq, Eq)]
pub struct Vault {
    /// Non-zero while deposits and withdrawals are accepted
    pub enabled: u8,
    /// Bump seeds recorded at initialization
    pub bumps: VaultBumps,
    /// Total liquidity held across the token vault and all strategies
    pub total_amount: u64,
    /// The token account that holds idle liquidity
    pub token_vault: Pubkey,
    /// The LP token account collecting performance fees
    pub fee_vault: Pubkey,
    /// The mint of the underlying token
    pub token_mint: Pubkey,
    /// The LP mint issued against deposits
    pub lp_mint: Pubkey,
    /// Strategy accounts, unused slots hold the default pubkey
    pub strategies: [Pubkey; MAX_STRATEGY],
    /// Base key the vault PDA was derived with
    pub base: Pubkey,
    pub admin: Pubkey,
    pub operator: Pubkey,
    /// Profit released linearly to depositors
    pub locked_profit_tracker: LockedProfitTracker,
}

/// Same account, under the name callers of the facade use.
pub type VaultState = Vault;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VaultBumps {
    pub vault_bump: u8,
    pub token_vault_bump: u8,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LockedProfitTracker {
    pub last_updated_locked_profit: u64,
    pub last_report: u64,
    pub locked_profit_degradation: u64,
}

impl LockedProfitTracker {
    /// Profit still locked at `current_time`.
    ///
    /// A clock behind `last_report` counts as no elapsed time.
    pub fn locked_profit(&self, current_time: i64) -> Result<u64> {
        let elapsed = i128::from(current_time) - i128::from(self.last_report);
        let elapsed = u128::try_from(elapsed).unwrap_or(0);
        let locked_fund_ratio = elapsed
            .checked_mul(u128::from(self.locked_profit_degradation))
            .ok_or(VaultClientError::MathOverflow)?;

        if locked_fund_ratio > LOCKED_PROFIT_DEGRADATION_DENOMINATOR {
            return Ok(0);
        }

        let locked = u128::from(self.last_updated_locked_profit)
            .checked_mul(LOCKED_PROFIT_DEGRADATION_DENOMINATOR - locked_fund_ratio)
            .ok_or(VaultClientError::MathOverflow)?
            / LOCKED_PROFIT_DEGRADATION_DENOMINATOR;

        checked_amount(locked)
    }
}

impl Vault {
    /// Strategies actually in use.
    pub fn active_strategies(&self) -> impl Iterator<Item = &Pubkey> {
        self.strategies.iter().filter(|strategy| **strategy != Pubkey::default())
    }

    pub fn locked_profit(&self, current_time: i64) -> Result<u64> {
        self.locked_profit_tracker.locked_profit(current_time)
    }

    /// Liquidity backing LP tokens at `current_time`.
    pub fn unlocked_amount(&self, current_time: i64) -> Result<u64> {
        self.total_amount
            .checked_sub(self.locked_profit(current_time)?)
            .ok_or(VaultClientError::MathOverflow)
    }
}
