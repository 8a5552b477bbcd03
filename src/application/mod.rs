pub mod app_error;
pub mod email_templates;
pub mod jwt;
pub mod ranking;
pub mod use_cases;
pub mod validators;
