//! Clinic Tour: role-aware onboarding walkthrough for the clinic portal.

pub mod config;
pub mod error;
pub mod store;
pub mod tour;
