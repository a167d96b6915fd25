use solana_sdk::{pubkey, pubkey::Pubkey};

/// Program that owns affiliate `Partner` accounts.
pub const AFFILIATE_PROGRAM_ID: Pubkey = pubkey!("GacY9YuN16HNRTy7ZWwULPccwvfFSBeNLuAQP7y38Du3");

/// Base key mixed into the vault seeds when the caller does not supply one.
pub const VAULT_BASE_KEY: Pubkey = pubkey!("HWzXGcGHy4tcpYfaRDCyLNzXqBTv3E6BttpCH2vJxArv");

pub const VAULT_PREFIX: &[u8] = b"vault";
pub const TOKEN_VAULT_PREFIX: &[u8] = b"token_vault";
pub const LP_MINT_PREFIX: &[u8] = b"lp_mint";

/// `SyncNative` in the SPL token instruction enum.
pub const SYNC_NATIVE_OPCODE: u8 = 17;

/// Upper bound on addresses per `getMultipleAccounts` request.
pub const DEFAULT_CHUNK_SIZE: usize = 100;

pub const LOCKED_PROFIT_DEGRADATION_DENOMINATOR: u128 = 1_000_000_000_000;
