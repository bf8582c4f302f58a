pub mod images;
pub mod jwt;
pub mod slug;
pub mod validation;
