pub mod admin;
pub mod registry;
pub mod dispute;
pub mod rewards;
pub mod relay;
pub mod views;

pub use admin::*;
pub use registry::*;
pub use dispute::*;
pub use rewards::*;
pub use relay::*;
pub use views::*;
