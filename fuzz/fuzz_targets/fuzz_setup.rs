use std::collections::HashMap;
use std::sync::Mutex;

use arbitrary::Arbitrary;
use async_trait::async_trait;
use serde_json::Value;
use solana_sdk::{account::Account, program_pack::Pack, pubkey::Pubkey};
use vault_client::constants::VAULT_BASE_KEY;
use vault_client::{
    chunked_get_multiple_account_infos, get_vault_pdas, AccountReader, Result, VaultClientError,
};

// Custom error type for fuzzing
pub type FuzzResult<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// In-memory reader that records the size of every multi-account request
#[derive(Default)]
pub struct FuzzConnection {
    accounts: HashMap<Pubkey, Account>,
    failing: Option<Pubkey>,
    pub requests: Mutex<Vec<usize>>,
}

impl FuzzConnection {
    pub fn insert(&mut self, address: Pubkey, account: Account) {
        self.accounts.insert(address, account);
    }

    pub fn fail_on(&mut self, address: Pubkey) {
        self.failing = Some(address);
    }

    pub fn request_sizes(&self) -> Vec<usize> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl AccountReader for FuzzConnection {
    async fn get_account(&self, address: &Pubkey) -> Result<Option<Account>> {
        Ok(self.accounts.get(address).cloned())
    }

    async fn get_multiple_accounts(&self, addresses: &[Pubkey]) -> Result<Vec<Option<Account>>> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(addresses.len());
        }
        if let Some(failing) = &self.failing {
            if addresses.contains(failing) {
                return Err(VaultClientError::MultipleAccountsRead {
                    count: addresses.len(),
                    source: "injected failure".into(),
                });
            }
        }
        Ok(addresses
            .iter()
            .map(|address| self.accounts.get(address).cloned())
            .collect())
    }

    async fn get_parsed_account(&self, _address: &Pubkey) -> Result<Option<Value>> {
        Ok(None)
    }

    async fn get_token_supply(&self, mint: &Pubkey) -> Result<u64> {
        Err(VaultClientError::AccountNotFound {
            address: *mint,
            kind: "mint",
        })
    }
}

/// Token account whose balance records `index`
pub fn indexed_token_account(index: usize) -> Account {
    let state = spl_token::state::Account {
        mint: Pubkey::default(),
        owner: Pubkey::default(),
        amount: index as u64,
        state: spl_token::state::AccountState::Initialized,
        ..Default::default()
    };
    let mut data = vec![0u8; spl_token::state::Account::LEN];
    // packing an initialized account into a correctly sized buffer cannot fail
    let _ = spl_token::state::Account::pack(state, &mut data);
    Account {
        lamports: 1,
        data,
        owner: spl_token::ID,
        executable: false,
        rent_epoch: 0,
    }
}

// ============================================================================
// Chunked fetch
// ============================================================================

/// Fuzzable input for the index-preserving batched fetch
#[derive(Debug, Clone, Arbitrary)]
pub struct ChunkedFetchInput {
    /// One entry per address; `false` leaves the account absent
    pub present: Vec<bool>,
    /// Addresses per request (0 must be rejected)
    pub chunk_size: u8,
    /// Address index whose chunk fails, if any
    pub fail_at: Option<u16>,
}

pub async fn run_chunked_fetch_once(input: &ChunkedFetchInput) -> FuzzResult<()> {
    let addresses: Vec<Pubkey> = input.present.iter().map(|_| Pubkey::new_unique()).collect();
    let chunk_size = usize::from(input.chunk_size);

    let mut connection = FuzzConnection::default();
    for (index, (address, present)) in addresses.iter().zip(&input.present).enumerate() {
        if *present {
            connection.insert(*address, indexed_token_account(index));
        }
    }
    let failing = input
        .fail_at
        .map(usize::from)
        .filter(|index| *index < addresses.len());
    if let Some(index) = failing {
        connection.fail_on(addresses[index]);
    }

    let result = chunked_get_multiple_account_infos(&connection, &addresses, chunk_size).await;

    if chunk_size == 0 {
        assert!(matches!(result, Err(VaultClientError::InvalidChunkSize)));
        assert!(connection.request_sizes().is_empty());
        return Ok(());
    }

    // a failing chunk may stop later chunks from being issued
    let expected_requests = addresses.len().div_ceil(chunk_size);
    let sizes = connection.request_sizes();
    if failing.is_none() {
        assert_eq!(sizes.len(), expected_requests);
    } else {
        assert!(sizes.len() <= expected_requests);
    }
    assert!(sizes.iter().all(|size| *size <= chunk_size && *size > 0));

    match (result, failing) {
        (Err(VaultClientError::BatchRead { chunk, .. }), Some(index)) => {
            assert_eq!(chunk, index / chunk_size);
        }
        (Ok(accounts), None) => {
            assert_eq!(accounts.len(), addresses.len());
            for (index, (account, present)) in accounts.iter().zip(&input.present).enumerate() {
                assert_eq!(account.is_some(), *present);
                if let Some(account) = account {
                    let decoded = spl_token::state::Account::unpack(&account.data)?;
                    assert_eq!(decoded.amount, index as u64);
                }
            }
        }
        (other, failing) => panic!("unexpected outcome {other:?} with failing index {failing:?}"),
    }

    Ok(())
}

// ============================================================================
// PDA derivation
// ============================================================================

/// Fuzzable input for vault address derivation
#[derive(Debug, Clone, Arbitrary)]
pub struct VaultPdaInput {
    pub token_mint: [u8; 32],
    pub program_id: [u8; 32],
    pub base_key: Option<[u8; 32]>,
}

pub fn check_vault_pdas(input: &VaultPdaInput) -> FuzzResult<()> {
    let token_mint = Pubkey::new_from_array(input.token_mint);
    let program_id = Pubkey::new_from_array(input.program_id);
    let base_key = input.base_key.map(Pubkey::new_from_array);

    let first = get_vault_pdas(&token_mint, &program_id, base_key.as_ref())?;
    let second = get_vault_pdas(&token_mint, &program_id, base_key.as_ref())?;
    assert_eq!(first, second);

    let explicit = get_vault_pdas(
        &token_mint,
        &program_id,
        Some(base_key.as_ref().unwrap_or(&VAULT_BASE_KEY)),
    )?;
    assert_eq!(first, explicit);

    assert_ne!(first.vault, first.token_vault);
    assert_ne!(first.vault, first.lp_mint);
    assert_ne!(first.token_vault, first.lp_mint);

    Ok(())
}
