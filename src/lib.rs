// src/lib.rs
//! Client library for a two-sided internship marketplace: candidates keep a
//! profile, fetch ranked recommendations and submit applications;
//! organizations post openings and review applicants.

pub mod api;
pub mod auth;
pub mod config;
pub mod errors;
pub mod facade;
pub mod models;
pub mod organization;
pub mod profile;
pub mod recommend;
pub mod session;
pub mod tracker;

pub use api::{HttpApi, MarketplaceApi};
pub use config::ClientConfig;
pub use errors::{ClientError, EngagementError};
pub use facade::EngagementFacade;
pub use models::{ApplicationStatus, JobPosting, ProfileFields, ProfileState};
pub use organization::OrganizationDesk;
pub use session::{Identity, Role, SessionStore};
