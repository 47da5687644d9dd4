//! Authentication utilities

mod jwt;
mod password;

pub use jwt::{Claims, JwtService, TokenPair, TokenSecrets, TokenType};
pub use password::PasswordService;
