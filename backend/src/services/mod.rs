pub mod auth_service;
pub mod blog_service;
pub mod enquiry_service;
pub mod product_cache;
pub mod product_service;

pub use auth_service::AuthService;
pub use blog_service::BlogService;
pub use enquiry_service::EnquiryService;
pub use product_cache::ProductListCache;
pub use product_service::ProductService;
