//! Auth domain - password login, JWT sessions and role permissions
//!
//! Responsibilities:
//! - Username/password login with per-IP lockout
//! - JWT issuing and verification, session rows keyed by `jti`
//! - Admin seeding on first boot

pub mod activities;
pub mod data;
pub mod jwt;
pub mod models;
pub mod password;
pub mod throttle;

pub use jwt::{Claims, JwtService};
pub use models::{User, UserRole};
pub use throttle::LoginThrottle;
