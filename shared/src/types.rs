use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// Catalog enums
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "product_category", rename_all = "lowercase")]
pub enum ProductCategory {
    Marbles,
    Tiles,
    Handicraft,
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductCategory::Marbles => write!(f, "Marbles"),
            ProductCategory::Tiles => write!(f, "Tiles"),
            ProductCategory::Handicraft => write!(f, "Handicraft"),
        }
    }
}

impl FromStr for ProductCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "marbles" => Ok(ProductCategory::Marbles),
            "tiles" => Ok(ProductCategory::Tiles),
            "handicraft" => Ok(ProductCategory::Handicraft),
            other => Err(format!("unknown product category: {}", other)),
        }
    }
}

// Enquiry enums
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "enquiry_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum EnquiryStatus {
    Pending,
    Solved,
}

impl fmt::Display for EnquiryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnquiryStatus::Pending => write!(f, "pending"),
            EnquiryStatus::Solved => write!(f, "solved"),
        }
    }
}

// Admin user roles; gate which admin route groups are reachable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "admin_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AdminRole {
    SuperAdmin,
    Admin,
    ProductManager,
    ContentWriter,
    EnquiryHandler,
}

impl fmt::Display for AdminRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdminRole::SuperAdmin => write!(f, "super_admin"),
            AdminRole::Admin => write!(f, "admin"),
            AdminRole::ProductManager => write!(f, "product_manager"),
            AdminRole::ContentWriter => write!(f, "content_writer"),
            AdminRole::EnquiryHandler => write!(f, "enquiry_handler"),
        }
    }
}

// Filter and sort selectors shared by the admin dashboard and the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Solved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnquiryDateFilter {
    #[default]
    All,
    Today,
    Week,
    Month,
    Custom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductDateFilter {
    #[default]
    All,
    Week,
    Month,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EnquirySort {
    #[default]
    Newest,
    Oldest,
    Pending,
    Solved,
    QuantityHigh,
    QuantityLow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductSort {
    #[default]
    Newest,
    Enquired,
    Az,
    Za,
}
