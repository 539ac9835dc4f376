pub mod open_dispute;
pub mod cast_vote;
pub mod resolve_dispute;
pub mod take_collateral;

pub use open_dispute::*;
pub use cast_vote::*;
pub use resolve_dispute::*;
pub use take_collateral::*;
