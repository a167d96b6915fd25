use solana_sdk::pubkey::Pubkey;

use crate::constants::{AFFILIATE_PROGRAM_ID, DEFAULT_CHUNK_SIZE, VAULT_BASE_KEY};

/// Static addressing parameters for one deployment of the vault program.
///
/// Built once and never mutated by the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultConfig {
    /// The vault program
    pub program_id: Pubkey,
    /// Base key mixed into the vault PDA seeds
    pub base_key: Pubkey,
    /// The affiliate program owning partner accounts
    pub affiliate_program_id: Pubkey,
    /// Partner wallet, when deposits are routed through the affiliate program
    pub affiliate_id: Option<Pubkey>,
    /// Addresses per multi-account request
    pub chunk_size: usize,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            program_id: crate::ID,
            base_key: VAULT_BASE_KEY,
            affiliate_program_id: AFFILIATE_PROGRAM_ID,
            affiliate_id: None,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl VaultConfig {
    pub fn with_program_id(mut self, program_id: Pubkey) -> Self {
        self.program_id = program_id;
        self
    }

    pub fn with_base_key(mut self, base_key: Pubkey) -> Self {
        self.base_key = base_key;
        self
    }

    pub fn with_affiliate(mut self, affiliate_id: Pubkey) -> Self {
        self.affiliate_id = Some(affiliate_id);
        self
    }

    pub fn with_affiliate_program_id(mut self, affiliate_program_id: Pubkey) -> Self {
        self.affiliate_program_id = affiliate_program_id;
        self
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }
}
