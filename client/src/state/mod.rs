pub mod affiliate;
pub mod vault;

pub use affiliate::*;
pub use vault::*;
