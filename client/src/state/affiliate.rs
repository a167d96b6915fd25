use anchor_lang::error::ErrorCode;
use anchor_lang::prelude::*;

use crate::constants::AFFILIATE_PROGRAM_ID;

/// Partner account of the affiliate program, one per `(vault, partner_token)`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct Partner {
    /// The partner's fee-receiving token account
    pub partner_token: Pubkey,
    /// The vault this partner earns on
    pub vault: Pubkey,
    /// Fee accrued but not yet claimed
    pub outstanding_fee: u64,
    /// Share of the vault's performance fee, in basis points
    pub fee_ratio: u64,
    /// Everything ever accrued (the program spells it "cummulative")
    pub cummulative_fee: u128,
}

/// Partner figures as reported to callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AffiliateInfo {
    pub partner_token: Pubkey,
    pub vault: Pubkey,
    pub outstanding_fee: u64,
    pub fee_ratio: u64,
    pub cumulative_fee: u128,
}

impl From<Partner> for AffiliateInfo {
    fn from(partner: Partner) -> Self {
        Self {
            partner_token: partner.partner_token,
            vault: partner.vault,
            outstanding_fee: partner.outstanding_fee,
            fee_ratio: partner.fee_ratio,
            cumulative_fee: partner.cummulative_fee,
        }
    }
}

// `#[account]` ties the owner to this crate's program id, so the affiliate
// partner spells out the same trait set by hand.
impl Discriminator for Partner {
    const DISCRIMINATOR: &'static [u8] = &[122, 43, 246, 239, 141, 56, 243, 182];
}

impl Owner for Partner {
    fn owner() -> Pubkey {
        AFFILIATE_PROGRAM_ID
    }
}

impl AccountSerialize for Partner {
    fn try_serialize<W: std::io::Write>(&self, writer: &mut W) -> Result<()> {
        writer
            .write_all(Self::DISCRIMINATOR)
            .map_err(|_| ErrorCode::AccountDidNotSerialize)?;
        AnchorSerialize::serialize(self, writer).map_err(|_| ErrorCode::AccountDidNotSerialize)?;
        Ok(())
    }
}

impl AccountDeserialize for Partner {
    fn try_deserialize(buf: &mut &[u8]) -> Result<Self> {
        if buf.len() < Self::DISCRIMINATOR.len() {
            return Err(ErrorCode::AccountDiscriminatorNotFound.into());
        }
        if &buf[..Self::DISCRIMINATOR.len()] != Self::DISCRIMINATOR {
            return Err(ErrorCode::AccountDiscriminatorMismatch.into());
        }
        Self::try_deserialize_unchecked(buf)
    }

    fn try_deserialize_unchecked(buf: &mut &[u8]) -> Result<Self> {
        let mut data: &[u8] = &buf[Self::DISCRIMINATOR.len()..];
        AnchorDeserialize::deserialize(&mut data)
            .map_err(|_| ErrorCode::AccountDidNotDeserialize.into())
    }
}
