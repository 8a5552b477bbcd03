//! Rust client for the SkillPod waitlist.
//!
//! # Features
//!
//! - **Boost tracking** - Tally boost actions and the preview rank during signup
//! - **Count sync** - Keep a displayed waitlist size fresh with a local cache,
//!   periodic refresh and optimistic increments
//! - **HTTP client** - Call the waitlist API (`client` feature)
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use waitlist_sdk::{CountSynchronizer, FileCountCache, SyncConfig, WaitlistClient, WaitlistConfig};
//!
//! let client = Arc::new(WaitlistClient::new(WaitlistConfig {
//!     base_url: "https://skillpod.app".to_string(),
//!     timeout: None,
//! })?);
//! let cache = Arc::new(FileCountCache::new("~/.cache/skillpod/count.json"));
//! let sync = Arc::new(CountSynchronizer::new(client, cache, SyncConfig::default()));
//!
//! sync.load().await;
//! let _poll = sync.start_polling();
//! println!("{} people on the waitlist", sync.get_count());
//! ```

mod boost;
mod cache;
#[cfg(feature = "client")]
mod client;
mod error;
mod sync;

pub use boost::BoostTracker;
pub use cache::{CachedCount, CountCache, FileCountCache, MemoryCountCache, is_stale};
#[cfg(feature = "client")]
pub use client::{WaitlistClient, WaitlistConfig};
pub use error::WaitlistSdkError;
pub use sync::{CountSource, CountSynchronizer, PollHandle, SyncConfig};

// Re-export shared types for convenience
pub use waitlist_types::{
    BoostAction, CountResponse, IncrementResponse, RegistrationRequest, RegistrationResponse,
    SocialActions, WaitlistEntryView,
};
