pub mod assignment;
pub mod member_service;
pub mod setup_service;
