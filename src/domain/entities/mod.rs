pub mod counter;
pub mod waitlist_entry;
