pub mod email;
pub mod http;
pub mod persistence;
