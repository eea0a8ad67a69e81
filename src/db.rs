pub mod repository;
pub use repository::{Record, Table, UserTable};
pub mod pg;
pub mod memory;
pub mod tables;
pub use tables::Tables;

pub mod user_repo;
pub mod classes_repo;
pub mod announcements_repo;
pub mod store_repo;
pub mod tatame_repo;
pub mod promotions_repo;
pub mod settings_repo;
pub mod finance_repo;
