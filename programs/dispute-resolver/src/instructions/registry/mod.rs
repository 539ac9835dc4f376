pub mod wrap;
pub mod unwrap;
pub mod transfer;
pub mod pay_penalty;

pub use wrap::*;
pub use unwrap::*;
pub use transfer::*;
pub use pay_penalty::*;
