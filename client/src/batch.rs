use anchor_lang::AccountDeserialize;
use futures::future::try_join_all;
use solana_sdk::{account::Account, pubkey::Pubkey};

use crate::connection::{fetch_multiple, AccountReader};
use crate::error::{Result, VaultClientError};
use crate::state::VaultState;

/// Splits `items` into consecutive slices of at most `size` elements.
pub fn chunks<T>(items: &[T], size: usize) -> Result<Vec<&[T]>> {
    if size == 0 {
        return Err(VaultClientError::InvalidChunkSize);
    }
    Ok(items.chunks(size).collect())
}

fn chunk_failed(chunk: usize, source: VaultClientError) -> VaultClientError {
    VaultClientError::BatchRead {
        chunk,
        source: Box::new(source),
    }
}

/// Typed fetch across chunks, keeping only accounts of `owner` that decode as `T`.
///
/// The result is shorter than `addresses` whenever an account is missing or
/// of another type, so it cannot be zipped back onto the input.
pub async fn chunked_fetch_multiple_accounts<T, R>(
    reader: &R,
    addresses: &[Pubkey],
    owner: &Pubkey,
    chunk_size: usize,
) -> Result<Vec<T>>
where
    T: AccountDeserialize + Send,
    R: AccountReader + ?Sized,
{
    let batches = chunks(addresses, chunk_size)?;

    let fetched = try_join_all(batches.into_iter().enumerate().map(|(index, chunk)| async move {
        fetch_multiple::<T, R>(reader, chunk, owner)
            .await
            .map_err(|e| chunk_failed(index, e))
    }))
    .await?;

    Ok(fetched.into_iter().flatten().flatten().collect())
}

/// Vault accounts of `program_id` at `addresses`, skipping anything that is not a vault.
pub async fn chunked_fetch_multiple_vault_accounts<R>(
    reader: &R,
    addresses: &[Pubkey],
    program_id: &Pubkey,
    chunk_size: usize,
) -> Result<Vec<VaultState>>
where
    R: AccountReader + ?Sized,
{
    chunked_fetch_multiple_accounts::<VaultState, R>(reader, addresses, program_id, chunk_size)
        .await
}

/// Raw fetch across chunks. Always as long as `addresses`, with `None` where
/// an account does not exist.
pub async fn chunked_get_multiple_account_infos<R>(
    reader: &R,
    addresses: &[Pubkey],
    chunk_size: usize,
) -> Result<Vec<Option<Account>>>
where
    R: AccountReader + ?Sized,
{
    let batches = chunks(addresses, chunk_size)?;

    let fetched = try_join_all(batches.into_iter().enumerate().map(|(index, chunk)| async move {
        reader
            .get_multiple_accounts(chunk)
            .await
            .map_err(|e| chunk_failed(index, e))
    }))
    .await?;

    Ok(fetched.into_iter().flatten().collect())
}
