pub mod user;
pub mod auth;
pub mod classes;
pub mod announcements;
pub mod store;
pub mod tatame;
pub mod promotions;
pub mod finance;
pub mod settings;
pub mod dashboard;
