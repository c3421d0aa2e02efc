pub mod callspec;
pub mod config;
pub mod storage;
pub mod views;

pub use common_errors::*;
pub use common_structs::*;
