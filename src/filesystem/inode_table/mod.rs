pub mod create;
pub mod remove;
pub mod stat;
