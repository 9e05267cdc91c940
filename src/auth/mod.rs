//! Password hashing, session tokens and the cookie that carries them.

pub mod cookie;
pub mod password;
pub mod token;

pub use cookie::{SessionCookies, TOKEN_COOKIE};
pub use password::{HashCost, PasswordHasher};
pub use token::TokenIssuer;
