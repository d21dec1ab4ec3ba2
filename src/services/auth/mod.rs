pub mod factory;
pub mod jwt;
pub mod password;
pub mod reset_token;

pub use factory::build_auth_service;
pub use jwt::AuthService;
