use std::sync::Arc;

use anchor_lang::AccountDeserialize;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_client::rpc_request::RpcRequest;
use solana_client::rpc_response::Response;
use solana_sdk::{account::Account, pubkey::Pubkey};

use crate::error::{Result, VaultClientError};

/// Read-only view of the network the client needs.
///
/// A missing account is `Ok(None)`. `Err` is reserved for transport failures,
/// so callers never mistake an unreachable node for an empty account.
#[async_trait]
pub trait AccountReader: Send + Sync {
    async fn get_account(&self, address: &Pubkey) -> Result<Option<Account>>;

    /// One entry per requested address, in request order.
    async fn get_multiple_accounts(&self, addresses: &[Pubkey]) -> Result<Vec<Option<Account>>>;

    /// The account's `data` field in `jsonParsed` encoding.
    async fn get_parsed_account(&self, address: &Pubkey) -> Result<Option<Value>>;

    /// Raw supply of a mint, in base units.
    async fn get_token_supply(&self, mint: &Pubkey) -> Result<u64>;
}

/// Decodes `T` out of raw account data.
///
/// Absent accounts, accounts not owned by `owner` and accounts whose
/// discriminator or layout does not match all come back as `None`.
pub fn decode_account<T>(account: Option<&Account>, owner: &Pubkey) -> Option<T>
where
    T: AccountDeserialize,
{
    let account = account?;
    if account.owner != *owner {
        return None;
    }
    T::try_deserialize(&mut account.data.as_slice()).ok()
}

/// Typed multi-account fetch for accounts of `owner`, index-aligned with `addresses`.
pub async fn fetch_multiple<T, R>(
    reader: &R,
    addresses: &[Pubkey],
    owner: &Pubkey,
) -> Result<Vec<Option<T>>>
where
    T: AccountDeserialize,
    R: AccountReader + ?Sized,
{
    let accounts = reader.get_multiple_accounts(addresses).await?;
    Ok(accounts
        .iter()
        .map(|account| decode_account::<T>(account.as_ref(), owner))
        .collect())
}

#[async_trait]
impl<T: AccountReader + ?Sized> AccountReader for Arc<T> {
    async fn get_account(&self, address: &Pubkey) -> Result<Option<Account>> {
        (**self).get_account(address).await
    }

    async fn get_multiple_accounts(&self, addresses: &[Pubkey]) -> Result<Vec<Option<Account>>> {
        (**self).get_multiple_accounts(addresses).await
    }

    async fn get_parsed_account(&self, address: &Pubkey) -> Result<Option<Value>> {
        (**self).get_parsed_account(address).await
    }

    async fn get_token_supply(&self, mint: &Pubkey) -> Result<u64> {
        (**self).get_token_supply(mint).await
    }
}

#[derive(Deserialize)]
struct RpcParsedAccount {
    data: Value,
}

#[async_trait]
impl AccountReader for RpcClient {
    async fn get_account(&self, address: &Pubkey) -> Result<Option<Account>> {
        self.get_account_with_commitment(address, self.commitment())
            .await
            .map(|response| response.value)
            .map_err(|e| VaultClientError::account_read("getAccountInfo", *address, e))
    }

    async fn get_multiple_accounts(&self, addresses: &[Pubkey]) -> Result<Vec<Option<Account>>> {
        RpcClient::get_multiple_accounts(self, addresses)
            .await
            .map_err(|e| VaultClientError::MultipleAccountsRead {
                count: addresses.len(),
                source: Box::new(e),
            })
    }

    async fn get_parsed_account(&self, address: &Pubkey) -> Result<Option<Value>> {
        let params = json!([
            address.to_string(),
            { "encoding": "jsonParsed", "commitment": self.commitment().commitment },
        ]);
        self.send::<Response<Option<RpcParsedAccount>>>(RpcRequest::GetAccountInfo, params)
            .await
            .map(|response| response.value.map(|account| account.data))
            .map_err(|e| VaultClientError::account_read("getParsedAccountInfo", *address, e))
    }

    async fn get_token_supply(&self, mint: &Pubkey) -> Result<u64> {
        let supply = RpcClient::get_token_supply(self, mint)
            .await
            .map_err(|e| VaultClientError::account_read("getTokenSupply", *mint, e))?;
        supply
            .amount
            .parse()
            .map_err(|e| VaultClientError::ShapeMismatch {
                address: *mint,
                expected: "token supply",
                reason: format!("amount {:?}: {e}", supply.amount),
            })
    }
}
