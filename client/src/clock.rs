use serde::{Deserialize, Serialize};
use serde_json::Value;
use solana_sdk::{pubkey::Pubkey, sysvar};

use crate::connection::AccountReader;
use crate::error::{Result, VaultClientError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClockInfo {
    pub epoch: u64,
    pub epoch_start_timestamp: i64,
    pub leader_schedule_epoch: u64,
    pub slot: u64,
    pub unix_timestamp: i64,
}

/// Clock sysvar in the shape the `jsonParsed` encoding returns it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedClockState {
    pub info: ClockInfo,
    pub account_type: String,
    pub program: String,
    pub space: u64,
}

#[derive(Deserialize)]
struct ParsedAccountData {
    program: String,
    parsed: ParsedClock,
    space: u64,
}

#[derive(Deserialize)]
struct ParsedClock {
    #[serde(rename = "type")]
    account_type: String,
    info: ClockInfo,
}

fn shape_mismatch(address: Pubkey, reason: impl Into<String>) -> VaultClientError {
    VaultClientError::ShapeMismatch {
        address,
        expected: "parsed clock sysvar",
        reason: reason.into(),
    }
}

/// Decodes the `data` field of a `jsonParsed` clock sysvar account.
pub fn parse_clock(data: Value) -> Result<ParsedClockState> {
    let address = sysvar::clock::ID;
    let data: ParsedAccountData =
        serde_json::from_value(data).map_err(|e| shape_mismatch(address, e.to_string()))?;

    if data.program != "sysvar" {
        return Err(shape_mismatch(
            address,
            format!("parsed by {:?}", data.program),
        ));
    }
    if data.parsed.account_type != "clock" {
        return Err(shape_mismatch(
            address,
            format!("parsed as {:?}", data.parsed.account_type),
        ));
    }

    Ok(ParsedClockState {
        info: data.parsed.info,
        account_type: data.parsed.account_type,
        program: data.program,
        space: data.space,
    })
}

/// Reads the clock sysvar. Never cached: every call hits the network.
pub async fn get_onchain_clock<R>(reader: &R) -> Result<ParsedClockState>
where
    R: AccountReader + ?Sized,
{
    let data = reader
        .get_parsed_account(&sysvar::clock::ID)
        .await?
        .ok_or(VaultClientError::AccountNotFound {
            address: sysvar::clock::ID,
            kind: "clock sysvar",
        })?;
    parse_clock(data)
}

/// Network-agreed unix time.
pub async fn get_onchain_time<R>(reader: &R) -> Result<i64>
where
    R: AccountReader + ?Sized,
{
    Ok(get_onchain_clock(reader).await?.info.unix_timestamp)
}
