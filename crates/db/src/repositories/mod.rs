//! Repository layer.
//!
//! Each repository is a zero-sized struct with async methods taking
//! `&mut PgConnection` as the first argument, so the same call works on a
//! pooled connection or inside an open transaction (`&mut *tx`).

pub mod account_repo;
pub mod activity_repo;
pub mod coupon_gift_repo;
pub mod coupon_history_repo;
pub mod coupon_repo;
pub mod friend_repo;
pub mod rank_repo;
pub mod staff_repo;
pub mod visit_repo;

pub use account_repo::AccountRepo;
pub use activity_repo::ActivityRepo;
pub use coupon_gift_repo::CouponGiftRepo;
pub use coupon_history_repo::CouponHistoryRepo;
pub use coupon_repo::CouponRepo;
pub use friend_repo::FriendRepo;
pub use rank_repo::RankRepo;
pub use staff_repo::StaffRepo;
pub use visit_repo::VisitRepo;
