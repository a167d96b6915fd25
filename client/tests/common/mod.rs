#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anchor_lang::AccountSerialize;
use async_trait::async_trait;
use serde_json::{json, Value};
use solana_sdk::{account::Account, program_pack::Pack, pubkey::Pubkey, sysvar};
use tokio::sync::Barrier;
use vault_client::state::{LockedProfitTracker, Partner, Vault, VaultBumps, MAX_STRATEGY};
use vault_client::{AccountReader, Result, VaultClientError};

/// In-memory chain view with call accounting
#[derive(Default)]
pub struct MockConnection {
    accounts: Mutex<HashMap<Pubkey, Account>>,
    parsed: Mutex<HashMap<Pubkey, Value>>,
    supplies: Mutex<HashMap<Pubkey, u64>>,
    failing: Mutex<HashSet<Pubkey>>,
    batch_gate: Mutex<Option<Arc<Barrier>>>,
    pub account_calls: AtomicUsize,
    pub multiple_calls: AtomicUsize,
    pub largest_batch: AtomicUsize,
}

impl MockConnection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_account(&self, address: Pubkey, account: Account) {
        self.accounts.lock().unwrap().insert(address, account);
    }

    pub fn set_parsed(&self, address: Pubkey, data: Value) {
        self.parsed.lock().unwrap().insert(address, data);
    }

    pub fn set_supply(&self, mint: Pubkey, supply: u64) {
        self.supplies.lock().unwrap().insert(mint, supply);
    }

    /// Any read touching `address` fails as if the node dropped the request
    pub fn fail_on(&self, address: Pubkey) {
        self.failing.lock().unwrap().insert(address);
    }

    /// Every `get_multiple_accounts` call waits until `parties` calls are pending
    pub fn gate_batches(&self, parties: usize) {
        *self.batch_gate.lock().unwrap() = Some(Arc::new(Barrier::new(parties)));
    }

    pub fn set_clock(&self, unix_timestamp: i64) {
        self.set_parsed(sysvar::clock::ID, clock_json(unix_timestamp));
    }

    fn check(&self, operation: &'static str, address: &Pubkey) -> Result<()> {
        if self.failing.lock().unwrap().contains(address) {
            return Err(VaultClientError::AccountRead {
                operation,
                address: *address,
                source: "connection reset by peer".into(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl AccountReader for MockConnection {
    async fn get_account(&self, address: &Pubkey) -> Result<Option<Account>> {
        self.account_calls.fetch_add(1, Ordering::SeqCst);
        self.check("getAccountInfo", address)?;
        Ok(self.accounts.lock().unwrap().get(address).cloned())
    }

    async fn get_multiple_accounts(&self, addresses: &[Pubkey]) -> Result<Vec<Option<Account>>> {
        self.multiple_calls.fetch_add(1, Ordering::SeqCst);
        self.largest_batch.fetch_max(addresses.len(), Ordering::SeqCst);
        let gate = self.batch_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.wait().await;
        }
        if addresses
            .iter()
            .any(|address| self.failing.lock().unwrap().contains(address))
        {
            return Err(VaultClientError::MultipleAccountsRead {
                count: addresses.len(),
                source: "request timed out".into(),
            });
        }
        let accounts = self.accounts.lock().unwrap();
        Ok(addresses
            .iter()
            .map(|address| accounts.get(address).cloned())
            .collect())
    }

    async fn get_parsed_account(&self, address: &Pubkey) -> Result<Option<Value>> {
        self.check("getParsedAccountInfo", address)?;
        Ok(self.parsed.lock().unwrap().get(address).cloned())
    }

    async fn get_token_supply(&self, mint: &Pubkey) -> Result<u64> {
        self.check("getTokenSupply", mint)?;
        self.supplies
            .lock()
            .unwrap()
            .get(mint)
            .copied()
            .ok_or(VaultClientError::AccountRead {
                operation: "getTokenSupply",
                address: *mint,
                source: "Invalid param: not a Token mint".into(),
            })
    }
}

pub fn clock_json(unix_timestamp: i64) -> Value {
    json!({
        "program": "sysvar",
        "parsed": {
            "type": "clock",
            "info": {
                "epoch": 600,
                "epochStartTimestamp": unix_timestamp - 3_600,
                "leaderScheduleEpoch": 601,
                "slot": 260_000_000u64,
                "unixTimestamp": unix_timestamp,
            },
        },
        "space": 40,
    })
}

pub fn token_account(mint: &Pubkey, owner: &Pubkey, amount: u64) -> Account {
    let state = spl_token::state::Account {
        mint: *mint,
        owner: *owner,
        amount,
        state: spl_token::state::AccountState::Initialized,
        ..Default::default()
    };
    let mut data = vec![0u8; spl_token::state::Account::LEN];
    spl_token::state::Account::pack(state, &mut data).unwrap();
    Account {
        lamports: 2_039_280,
        data,
        owner: spl_token::ID,
        executable: false,
        rent_epoch: 0,
    }
}

pub fn vault_state(token_mint: &Pubkey, total_amount: u64, tracker: LockedProfitTracker) -> Vault {
    let pdas = vault_client::get_vault_pdas(token_mint, &vault_client::ID, None).unwrap();
    Vault {
        enabled: 1,
        bumps: VaultBumps {
            vault_bump: pdas.vault_bump,
            token_vault_bump: pdas.token_vault_bump,
        },
        total_amount,
        token_vault: pdas.token_vault,
        fee_vault: Pubkey::new_unique(),
        token_mint: *token_mint,
        lp_mint: pdas.lp_mint,
        strategies: [Pubkey::default(); MAX_STRATEGY],
        base: vault_client::constants::VAULT_BASE_KEY,
        admin: Pubkey::new_unique(),
        operator: Pubkey::new_unique(),
        locked_profit_tracker: tracker,
    }
}

pub fn program_account<T: AccountSerialize>(state: &T, owner: Pubkey) -> Account {
    let mut data = Vec::new();
    state.try_serialize(&mut data).unwrap();
    Account {
        lamports: 1_000_000,
        data,
        owner,
        executable: false,
        rent_epoch: 0,
    }
}

pub fn vault_account(state: &Vault) -> Account {
    program_account(state, vault_client::ID)
}

pub fn partner_account(state: &Partner) -> Account {
    program_account(state, vault_client::constants::AFFILIATE_PROGRAM_ID)
}
