pub mod error_details;

pub use error_details::hide_error_details;
