pub mod config;
pub mod member;
pub mod role;
pub mod setup;
pub mod team;
