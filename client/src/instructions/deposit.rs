use anchor_lang::prelude::*;
use anchor_lang::InstructionData;
use solana_sdk::instruction::Instruction;

use super::VaultAction;

/// Arguments of the vault's `deposit` instruction.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Deposit {
    /// Underlying tokens moved into the vault
    pub token_amount: u64,
    /// Slippage floor on LP tokens minted
    pub minimum_lp_token_amount: u64,
}

impl Discriminator for Deposit {
    const DISCRIMINATOR: &'static [u8] = &[242, 35, 198, 137, 82, 225, 242, 182];
}

impl InstructionData for Deposit {}

pub fn deposit_instruction(program_id: &Pubkey, accounts: &VaultAction, args: Deposit) -> Instruction {
    Instruction {
        program_id: *program_id,
        accounts: accounts.to_account_metas(None),
        data: args.data(),
    }
}
