pub mod config;
pub mod voting_nft;
pub mod dispute;
pub mod vote_record;
pub mod relay;
pub mod batch;

pub use config::*;
pub use voting_nft::*;
pub use dispute::*;
pub use vote_record::*;
pub use relay::*;
pub use batch::*;
