pub mod dispute_views;
pub mod registry_views;

pub use dispute_views::*;
pub use registry_views::*;
