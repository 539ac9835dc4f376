pub mod init_config;
pub mod update_config;
pub mod set_penalty;
pub mod set_peer;

pub use init_config::*;
pub use update_config::*;
pub use set_penalty::*;
pub use set_peer::*;
