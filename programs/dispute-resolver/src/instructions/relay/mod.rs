pub mod send_vote;
pub mod send_claim;
pub mod lz_receive;

pub use send_vote::*;
pub use send_claim::*;
pub use lz_receive::*;
