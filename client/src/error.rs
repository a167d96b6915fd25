use solana_sdk::{program_error::ProgramError, pubkey::Pubkey};
use thiserror::Error;

/// Underlying cause reported by an [`crate::AccountReader`] implementation.
pub type TransportError = Box<dyn std::error::Error + Send + Sync>;

pub type Result<T> = std::result::Result<T, VaultClientError>;

#[derive(Debug, Error)]
pub enum VaultClientError {
    #[error("no off-curve bump found for {seed} address under program {program_id}")]
    Derivation {
        seed: &'static str,
        program_id: Pubkey,
    },

    #[error("{operation} failed for account {address}: {source}")]
    AccountRead {
        operation: &'static str,
        address: Pubkey,
        #[source]
        source: TransportError,
    },

    #[error("getMultipleAccounts failed for {count} accounts: {source}")]
    MultipleAccountsRead {
        count: usize,
        #[source]
        source: TransportError,
    },

    #[error("batched fetch failed at chunk {chunk}: {source}")]
    BatchRead {
        chunk: usize,
        #[source]
        source: Box<VaultClientError>,
    },

    #[error("account {address} is not a valid {expected}: {reason}")]
    ShapeMismatch {
        address: Pubkey,
        expected: &'static str,
        reason: String,
    },

    #[error("{kind} account {address} not found")]
    AccountNotFound { address: Pubkey, kind: &'static str },

    #[error("amount {0} does not fit in u64")]
    AmountOverflow(u128),

    #[error("math operation overflow")]
    MathOverflow,

    #[error("chunk size must be greater than zero")]
    InvalidChunkSize,

    #[error("no affiliate partner configured for this client")]
    AffiliateNotConfigured,

    #[error("failed to build instruction: {0}")]
    Instruction(#[from] ProgramError),
}

impl VaultClientError {
    pub(crate) fn account_read<E>(operation: &'static str, address: Pubkey, source: E) -> Self
    where
        E: Into<TransportError>,
    {
        Self::AccountRead {
            operation,
            address,
            source: source.into(),
        }
    }

    /// True when the failure came from the transport rather than from the data.
    pub fn is_transport(&self) -> bool {
        match self {
            Self::AccountRead { .. } | Self::MultipleAccountsRead { .. } => true,
            Self::BatchRead { source, .. } => source.is_transport(),
            _ => false,
        }
    }
}

/// Narrows an intermediate amount back to the on-chain width.
pub fn checked_amount(value: u128) -> Result<u64> {
    u64::try_from(value).map_err(|_| VaultClientError::AmountOverflow(value))
}
