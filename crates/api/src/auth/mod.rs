//! Credential primitives: Argon2id password handling in [`password`],
//! HS256 access tokens and refresh-token minting in [`jwt`].

pub mod jwt;
pub mod password;
