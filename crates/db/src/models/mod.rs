//! Row structs and insert DTOs.
//!
//! Each submodule contains a `FromRow` + `Serialize` struct matching a table
//! row and, where rows are created from outside the engine, a create DTO.

pub mod account;
pub mod activity;
pub mod coupon;
pub mod coupon_gift;
pub mod coupon_history;
pub mod leaderboard;
pub mod staff;
