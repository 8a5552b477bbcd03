pub mod admin;
pub mod contact;
pub mod counter;
pub mod registration;
