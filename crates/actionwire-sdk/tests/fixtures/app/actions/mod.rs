//! Declarations behind the generated dispatch module in `router.rs`.

pub mod health;
pub mod users;
