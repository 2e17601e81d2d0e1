//! Session token primitives.
//!
//! - [`jwt`] -- HS256 session token generation and validation.

pub mod jwt;
