//! Shared types for the SkillPod waitlist.
//!
//! This crate provides:
//! - Boost actions and their point rewards (`BoostAction`, `SocialActions`)
//! - Request and response bodies for the HTTP API
//! - Error codes returned by the API

mod boost;
mod errors;
mod requests;
mod responses;

pub use boost::{BoostAction, SocialActions};
pub use errors::{ApiErrorBody, ErrorCode, UnknownBoostAction};
pub use requests::{AdminLoginRequest, ContactRequest, RegistrationRequest};
pub use responses::{
    AdminWaitlistResponse, ContactResponse, CountResponse, IncrementResponse,
    RegistrationResponse, WaitlistEntryView,
};
