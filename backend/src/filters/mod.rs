//! Pure query/filter pipeline shared by the public catalog and the admin
//! dashboard. Filtering composes with logical AND, sorting is applied after
//! filtering, and pagination slices the result last.

pub mod enquiries;
pub mod page;
pub mod products;

pub use page::{paginate, ListState, PageParams};
