pub mod accounts;
pub mod deposit;
pub mod withdraw;

pub use accounts::*;
pub use deposit::*;
pub use withdraw::*;
