//! Client-side helpers for the dynamic vault program.
//!
//! The on-chain program owns all vault logic. This crate derives the addresses
//! it expects, resolves the token accounts a user needs, reads program state in
//! size-bounded batches and assembles unsigned deposit/withdraw transactions.

pub mod batch;
pub mod clock;
pub mod config;
pub mod connection;
pub mod constants;
pub mod error;
pub mod instructions;
pub mod pda;
pub mod state;
pub mod token;
pub mod vault;

use anchor_lang::prelude::*;

pub use batch::*;
pub use clock::*;
pub use config::VaultConfig;
pub use connection::{fetch_multiple, AccountReader};
pub use error::{Result, VaultClientError};
pub use pda::*;
pub use state::*;
pub use token::*;
pub use vault::{VaultClient, VaultImplementation};

declare_id!("24Uqj9JCLxUeoC3hGfh5W3s9FM9uCHDS2SG3LYwBpyTi");
