pub mod error;
pub mod grammar;
