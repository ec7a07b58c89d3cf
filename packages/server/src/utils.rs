pub mod config;
pub mod json;
pub mod test_setup;
