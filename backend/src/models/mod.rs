//! Database models for the Marblecraft catalog and CMS.
//!
//! Each model corresponds to a table and provides type-safe CRUD operations
//! against the database using sqlx.

pub mod blog;
pub mod enquiry;
pub mod product;
pub mod user;

pub use blog::{Blog, Comment};
pub use enquiry::Enquiry;
pub use product::Product;
pub use user::AdminUser;
