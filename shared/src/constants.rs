use std::time::Duration;

// JWT configuration
pub const JWT_ACCESS_TOKEN_EXPIRY: Duration = Duration::from_secs(12 * 60 * 60); // 12 hours

// Pagination defaults
pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 100;

// Product constraints
pub const MIN_PRODUCT_IMAGES: usize = 1;
pub const MAX_PRODUCT_IMAGES: usize = 7;

// Enquiry constraints
pub const MIN_ENQUIRY_QUANTITY: i32 = 1;
pub const MAX_ENQUIRY_QUANTITY: i32 = 9999;
pub const PHONE_DIGIT_COUNT: usize = 10;

// Product list cache
pub const PRODUCT_CACHE_TTL: Duration = Duration::from_secs(60);

// Date filter windows, in days
pub const WEEK_WINDOW_DAYS: i64 = 7;
pub const MONTH_WINDOW_DAYS: i64 = 30;
