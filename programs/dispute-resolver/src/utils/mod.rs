pub mod math;
pub mod accounts;
