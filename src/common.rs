pub mod capabilities;
pub mod clock;
pub mod error;
pub mod validation;
