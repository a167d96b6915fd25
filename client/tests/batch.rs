mod common;

use std::sync::atomic::Ordering;
use std::time::Duration;

use common::{token_account, vault_account, vault_state, MockConnection};
use solana_sdk::pubkey::Pubkey;
use tokio::time::timeout;
use vault_client::constants::DEFAULT_CHUNK_SIZE;
use vault_client::state::LockedProfitTracker;
use vault_client::{
    chunked_fetch_multiple_vault_accounts, chunked_get_multiple_account_infos, VaultClientError,
};

fn addresses(count: usize) -> Vec<Pubkey> {
    (0..count).map(|_| Pubkey::new_unique()).collect()
}

#[tokio::test]
async fn raw_fetch_keeps_absent_accounts_in_place() {
    let connection = MockConnection::new();
    let addresses = addresses(250);
    let mint = Pubkey::new_unique();
    let absent: Vec<usize> = (0..10).map(|i| i * 25 + 3).collect();

    for (index, address) in addresses.iter().enumerate() {
        if !absent.contains(&index) {
            connection.set_account(*address, token_account(&mint, address, index as u64));
        }
    }

    let accounts = chunked_get_multiple_account_infos(&connection, &addresses, DEFAULT_CHUNK_SIZE)
        .await
        .unwrap();

    assert_eq!(accounts.len(), 250);
    assert_eq!(connection.multiple_calls.load(Ordering::SeqCst), 3);
    assert_eq!(connection.largest_batch.load(Ordering::SeqCst), 100);

    let missing: Vec<usize> = accounts
        .iter()
        .enumerate()
        .filter(|(_, account)| account.is_none())
        .map(|(index, _)| index)
        .collect();
    assert_eq!(missing, absent);

    // the amount doubles as the original index
    for (index, account) in accounts.iter().enumerate() {
        if let Some(account) = account {
            let amount = u64::from_le_bytes(account.data[64..72].try_into().unwrap());
            assert_eq!(amount, index as u64);
        }
    }
}

#[tokio::test]
async fn typed_fetch_drops_absent_and_foreign_accounts() {
    let connection = MockConnection::new();
    let mints = addresses(7);
    let mut vault_addresses = Vec::new();
    let mut expected = Vec::new();

    for (index, mint) in mints.iter().enumerate() {
        let vault = vault_client::get_vault_pdas(mint, &vault_client::ID, None)
            .unwrap()
            .vault;
        vault_addresses.push(vault);
        match index % 3 {
            0 => {
                let state = vault_state(mint, index as u64, LockedProfitTracker::default());
                connection.set_account(vault, vault_account(&state));
                expected.push(state);
            }
            1 => connection.set_account(vault, token_account(mint, &vault, 1)),
            _ => {}
        }
    }

    let vaults =
        chunked_fetch_multiple_vault_accounts(&connection, &vault_addresses, &vault_client::ID, 2)
            .await
            .unwrap();

    assert_eq!(vaults, expected);
    assert_eq!(connection.multiple_calls.load(Ordering::SeqCst), 4);
}

#[tokio::test]
async fn empty_input_issues_no_requests() {
    let connection = MockConnection::new();

    let raw = chunked_get_multiple_account_infos(&connection, &[], DEFAULT_CHUNK_SIZE)
        .await
        .unwrap();
    let typed =
        chunked_fetch_multiple_vault_accounts(&connection, &[], &vault_client::ID, DEFAULT_CHUNK_SIZE)
            .await
            .unwrap();

    assert!(raw.is_empty());
    assert!(typed.is_empty());
    assert_eq!(connection.multiple_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn one_failing_chunk_fails_the_whole_batch() {
    let connection = MockConnection::new();
    let addresses = addresses(30);
    for address in &addresses {
        connection.set_account(*address, token_account(address, address, 1));
    }
    connection.fail_on(addresses[17]);

    let err = chunked_get_multiple_account_infos(&connection, &addresses, 10)
        .await
        .unwrap_err();

    match err {
        VaultClientError::BatchRead { chunk, source } => {
            assert_eq!(chunk, 1);
            assert!(matches!(
                *source,
                VaultClientError::MultipleAccountsRead { count: 10, .. }
            ));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn zero_chunk_size_is_an_error_not_a_hang() {
    let connection = MockConnection::new();
    let err = chunked_get_multiple_account_infos(&connection, &addresses(3), 0)
        .await
        .unwrap_err();
    assert!(matches!(err, VaultClientError::InvalidChunkSize));
}

#[tokio::test]
async fn chunks_are_requested_concurrently() {
    let connection = MockConnection::new();
    let addresses = addresses(250);
    connection.gate_batches(3);

    let accounts = timeout(
        Duration::from_secs(5),
        chunked_get_multiple_account_infos(&connection, &addresses, DEFAULT_CHUNK_SIZE),
    )
    .await
    .expect("chunks were awaited one after another")
    .unwrap();

    assert_eq!(accounts.len(), 250);
    assert_eq!(connection.multiple_calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn typed_chunks_are_requested_concurrently() {
    let connection = MockConnection::new();
    let addresses = addresses(4);
    connection.gate_batches(2);

    let vaults = timeout(
        Duration::from_secs(5),
        chunked_fetch_multiple_vault_accounts(&connection, &addresses, &vault_client::ID, 2),
    )
    .await
    .expect("chunks were awaited one after another")
    .unwrap();

    assert!(vaults.is_empty());
}
