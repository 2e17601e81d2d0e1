//! Generation of unguessable lookup tokens (QR codes, coupon codes).

use uuid::Uuid;

/// A fresh random token: 32 lowercase hex characters from a v4 UUID.
pub fn generate_lookup_token() -> String {
    Uuid::new_v4().simple().to_string()
}
