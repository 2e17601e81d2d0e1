//! Pure domain logic for the event quest backend.
//!
//! Nothing in this crate touches the database. The `quest-db` engine and the
//! `quest-api` handlers build on the types, rules and errors defined here.

pub mod activity;
pub mod clock;
pub mod error;
pub mod friendship;
pub mod game_config;
pub mod identity;
pub mod leaderboard;
pub mod progression;
pub mod rewards;
pub mod roles;
pub mod tokens;
pub mod types;
