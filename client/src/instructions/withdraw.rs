use anchor_lang::prelude::*;
use anchor_lang::InstructionData;
use solana_sdk::instruction::Instruction;

use super::VaultAction;

/// Arguments of the vault's `withdraw` instruction.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Withdraw {
    /// LP tokens burned
    pub unmint_amount: u64,
    /// Slippage floor on underlying tokens returned
    pub min_out_amount: u64,
}

impl Discriminator for Withdraw {
    const DISCRIMINATOR: &'static [u8] = &[183, 18, 70, 156, 148, 109, 161, 34];
}

impl InstructionData for Withdraw {}

pub fn withdraw_instruction(
    program_id: &Pubkey,
    accounts: &VaultAction,
    args: Withdraw,
) -> Instruction {
    Instruction {
        program_id: *program_id,
        accounts: accounts.to_account_metas(None),
        data: args.data(),
    }
}
