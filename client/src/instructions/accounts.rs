use anchor_lang::prelude::*;

/// Accounts taken by the vault's `deposit` and `withdraw` instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VaultAction {
    /// The vault PDA
    pub vault: Pubkey,
    /// The vault's idle liquidity account
    pub token_vault: Pubkey,
    /// The vault's LP mint
    pub lp_mint: Pubkey,
    /// The user's token account for the underlying mint
    pub user_token: Pubkey,
    /// The user's LP token account
    pub user_lp: Pubkey,
    pub user: Pubkey,
    pub token_program: Pubkey,
}

impl ToAccountMetas for VaultAction {
    fn to_account_metas(&self, is_signer: Option<bool>) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new(self.vault, false),
            AccountMeta::new(self.token_vault, false),
            AccountMeta::new(self.lp_mint, false),
            AccountMeta::new(self.user_token, false),
            AccountMeta::new(self.user_lp, false),
            AccountMeta::new_readonly(self.user, is_signer.unwrap_or(true)),
            AccountMeta::new_readonly(self.token_program, false),
        ]
    }
}
