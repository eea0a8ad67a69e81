pub mod auth;
pub mod state;
pub mod dashboard;
pub mod classes;
pub mod announcements;
pub mod products;
pub mod cart;
pub mod tatame;
pub mod promotions;
pub mod finance;
pub mod users;
pub mod settings;
