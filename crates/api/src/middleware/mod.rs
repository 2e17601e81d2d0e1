//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the principal from a JWT Bearer token.
//! - [`rbac::RequirePlayer`] -- Requires an attendee session.
//! - [`rbac::RequireBooth`] -- Requires a booth operator session.
//! - [`rbac::RequireStaff`] -- Requires a redemption counter session.

pub mod auth;
pub mod rbac;
