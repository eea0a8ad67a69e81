pub mod auth;
pub use auth::AuthService;
pub mod payment_status;
pub mod booking;
pub mod cart;
pub mod checkout;
pub mod pix;
pub mod calendar;
pub mod finance;
pub mod subscription;
pub mod dashboard;
