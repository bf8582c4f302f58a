//! Derivation of product views: admin listing (search/category/date/sort)
//! and the public catalog (availability-first ordering). Pure, like the
//! enquiry pipeline; the `enquired` sort is a derived join computed from the
//! enquiry collection by the caller.

use crate::models::{Enquiry, Product};
use chrono::{DateTime, Duration, Utc};
use marblecraft_shared::{
    ProductCategory, ProductDateFilter, ProductSort, MONTH_WINDOW_DAYS, WEEK_WINDOW_DAYS,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::str::FromStr;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProductFilterParams {
    pub search: Option<String>,
    /// Category name or "all"; a value naming no known category matches
    /// no products.
    pub category: Option<String>,
    #[serde(default)]
    pub date_filter: ProductDateFilter,
    #[serde(default)]
    pub sort: ProductSort,
}

/// How often each product name appears across the enquiry collection. The
/// join key is the denormalized name snapshot, so renamed products simply
/// stop accumulating against their old name.
pub fn enquiry_counts(enquiries: &[Enquiry]) -> HashMap<String, usize> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for enquiry in enquiries {
        *counts.entry(enquiry.product_name.clone()).or_default() += 1;
    }
    counts
}

fn matches_search(product: &Product, query: &str, include_category: bool) -> bool {
    let needle = query.to_lowercase();
    let mut fields = vec![product.name.as_str(), product.description.as_str()];
    let category = product.category.to_string();
    if include_category {
        fields.push(category.as_str());
    }
    fields
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

fn matches_category(product: &Product, category: &str) -> bool {
    if category.eq_ignore_ascii_case("all") {
        return true;
    }
    // Exact-match semantics: a value naming no known category matches
    // nothing rather than everything
    match ProductCategory::from_str(category) {
        Ok(wanted) => product.category == wanted,
        Err(_) => false,
    }
}

fn matches_date(product: &Product, filter: ProductDateFilter, now: DateTime<Utc>) -> bool {
    let created = product.created_at.date_naive();
    match filter {
        ProductDateFilter::All => true,
        ProductDateFilter::Week => created >= (now - Duration::days(WEEK_WINDOW_DAYS)).date_naive(),
        ProductDateFilter::Month => {
            created >= (now - Duration::days(MONTH_WINDOW_DAYS)).date_naive()
        }
    }
}

pub fn apply_filters(
    products: &[Product],
    params: &ProductFilterParams,
    now: DateTime<Utc>,
) -> Vec<Product> {
    products
        .iter()
        .filter(|p| {
            params
                .search
                .as_deref()
                .filter(|q| !q.trim().is_empty())
                .map_or(true, |q| matches_search(p, q, true))
        })
        .filter(|p| params.category.as_deref().map_or(true, |c| matches_category(p, c)))
        .filter(|p| matches_date(p, params.date_filter, now))
        .cloned()
        .collect()
}

pub fn sort_products(
    products: &mut [Product],
    sort: ProductSort,
    enquiry_counts: &HashMap<String, usize>,
) {
    match sort {
        ProductSort::Newest => products.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        ProductSort::Enquired => products.sort_by(|a, b| {
            let count = |p: &Product| enquiry_counts.get(&p.name).copied().unwrap_or(0);
            count(b)
                .cmp(&count(a))
                .then_with(|| b.created_at.cmp(&a.created_at))
        }),
        ProductSort::Az => products.sort_by_key(|p| p.name.to_lowercase()),
        ProductSort::Za => {
            products.sort_by_key(|p| p.name.to_lowercase());
            products.reverse();
        }
    }
}

/// Admin product listing: filter with AND semantics, then order.
pub fn run(
    products: &[Product],
    params: &ProductFilterParams,
    enquiry_counts: &HashMap<String, usize>,
    now: DateTime<Utc>,
) -> Vec<Product> {
    let mut view = apply_filters(products, params, now);
    sort_products(&mut view, params.sort, enquiry_counts);
    view
}

/// Public catalog view: free-text search over name and description only
/// (category excluded), then availability as the primary sort criterion
/// with the user-selected sort as secondary.
pub fn catalog(
    products: &[Product],
    search: Option<&str>,
    sort: ProductSort,
    enquiry_counts: &HashMap<String, usize>,
) -> Vec<Product> {
    let mut view: Vec<Product> = products
        .iter()
        .filter(|p| {
            search
                .filter(|q| !q.trim().is_empty())
                .map_or(true, |q| matches_search(p, q, false))
        })
        .cloned()
        .collect();

    sort_products(&mut view, sort, enquiry_counts);
    // Stable sort keeps the secondary ordering within each availability group
    view.sort_by_key(|p| !p.in_stock);
    view
}

#[cfg(test)]
mod tests {
    use super::*;
    use marblecraft_shared::{EnquiryStatus, Specification};
    use rust_decimal::Decimal;
    use sqlx::types::Json;
    use uuid::Uuid;

    fn product(name: &str, category: ProductCategory, days_ago: i64, in_stock: bool) -> Product {
        let now = Utc::now();
        Product {
            id: Uuid::new_v4(),
            name: name.to_string(),
            category,
            description: format!("{} from our quarry collection", name),
            price: Decimal::from(100),
            images: vec!["/uploads/a.jpg".to_string()],
            specifications: Json(Vec::<Specification>::new()),
            in_stock,
            is_featured: false,
            display_order: None,
            created_at: now - Duration::days(days_ago),
            updated_at: now - Duration::days(days_ago),
        }
    }

    fn enquiry_for(product_name: &str) -> Enquiry {
        Enquiry {
            id: Enquiry::generate_id(),
            first_name: "Asha".to_string(),
            last_name: "Patel".to_string(),
            email: "asha@example.com".to_string(),
            phone: "9876543210".to_string(),
            product_category: ProductCategory::Marbles,
            product_name: product_name.to_string(),
            quantity: 1,
            message: String::new(),
            status: EnquiryStatus::Pending,
            created_at: Utc::now(),
        }
    }

    fn names(view: &[Product]) -> Vec<&str> {
        view.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn admin_search_includes_category_label() {
        let all = vec![
            product("Statuario", ProductCategory::Marbles, 0, true),
            product("Terracotta Vase", ProductCategory::Handicraft, 0, true),
        ];
        let params = ProductFilterParams {
            search: Some("handicraft".to_string()),
            ..Default::default()
        };
        let view = run(&all, &params, &HashMap::new(), Utc::now());
        assert_eq!(names(&view), vec!["Terracotta Vase"]);
    }

    #[test]
    fn category_filter_all_is_a_no_op() {
        let all = vec![
            product("Statuario", ProductCategory::Marbles, 0, true),
            product("Moroccan Tile", ProductCategory::Tiles, 0, true),
        ];
        let params = ProductFilterParams {
            category: Some("all".to_string()),
            ..Default::default()
        };
        assert_eq!(apply_filters(&all, &params, Utc::now()).len(), 2);

        let params = ProductFilterParams {
            category: Some("tiles".to_string()),
            ..Default::default()
        };
        assert_eq!(
            names(&apply_filters(&all, &params, Utc::now())),
            vec!["Moroccan Tile"]
        );
    }

    #[test]
    fn unknown_category_matches_no_products() {
        let all = vec![
            product("Statuario", ProductCategory::Marbles, 0, true),
            product("Moroccan Tile", ProductCategory::Tiles, 0, true),
        ];
        let params = ProductFilterParams {
            category: Some("tles".to_string()),
            ..Default::default()
        };
        assert!(apply_filters(&all, &params, Utc::now()).is_empty());
    }

    #[test]
    fn date_filter_windows() {
        let all = vec![
            product("Fresh", ProductCategory::Marbles, 2, true),
            product("Aging", ProductCategory::Marbles, 15, true),
            product("Legacy", ProductCategory::Marbles, 60, true),
        ];
        let now = Utc::now();

        let week = ProductFilterParams {
            date_filter: ProductDateFilter::Week,
            ..Default::default()
        };
        assert_eq!(names(&apply_filters(&all, &week, now)), vec!["Fresh"]);

        let month = ProductFilterParams {
            date_filter: ProductDateFilter::Month,
            ..Default::default()
        };
        assert_eq!(names(&apply_filters(&all, &month, now)), vec!["Fresh", "Aging"]);
    }

    #[test]
    fn enquired_sort_ranks_by_snapshot_name_count() {
        let all = vec![
            product("Quiet", ProductCategory::Marbles, 0, true),
            product("Popular", ProductCategory::Marbles, 5, true),
            product("Middling", ProductCategory::Marbles, 1, true),
        ];
        let enquiries = vec![
            enquiry_for("Popular"),
            enquiry_for("Popular"),
            enquiry_for("Popular"),
            enquiry_for("Middling"),
        ];
        let params = ProductFilterParams {
            sort: ProductSort::Enquired,
            ..Default::default()
        };
        let view = run(&all, &params, &enquiry_counts(&enquiries), Utc::now());
        assert_eq!(names(&view), vec!["Popular", "Middling", "Quiet"]);
    }

    #[test]
    fn alphabetical_sorts_are_case_insensitive() {
        let all = vec![
            product("carrara", ProductCategory::Marbles, 0, true),
            product("Botticino", ProductCategory::Marbles, 0, true),
            product("Agaria White", ProductCategory::Marbles, 0, true),
        ];
        let az = ProductFilterParams {
            sort: ProductSort::Az,
            ..Default::default()
        };
        assert_eq!(
            names(&run(&all, &az, &HashMap::new(), Utc::now())),
            vec!["Agaria White", "Botticino", "carrara"]
        );

        let za = ProductFilterParams {
            sort: ProductSort::Za,
            ..Default::default()
        };
        assert_eq!(
            names(&run(&all, &za, &HashMap::new(), Utc::now())),
            vec!["carrara", "Botticino", "Agaria White"]
        );
    }

    #[test]
    fn catalog_puts_in_stock_first_before_secondary_sort() {
        let all = vec![
            product("Aaa Sold Out", ProductCategory::Marbles, 0, false),
            product("Zzz Available", ProductCategory::Marbles, 0, true),
            product("Mmm Available", ProductCategory::Marbles, 0, true),
        ];
        let view = catalog(&all, None, ProductSort::Az, &HashMap::new());
        assert_eq!(
            names(&view),
            vec!["Mmm Available", "Zzz Available", "Aaa Sold Out"]
        );
    }

    #[test]
    fn catalog_search_ignores_category() {
        let all = vec![
            product("Terracotta Vase", ProductCategory::Handicraft, 0, true),
            product("Statuario", ProductCategory::Marbles, 0, true),
        ];
        // "handicraft" appears only as the category, which the public
        // catalog search does not consult
        let view = catalog(&all, Some("handicraft"), ProductSort::Newest, &HashMap::new());
        assert!(view.is_empty());

        let view = catalog(&all, Some("vase"), ProductSort::Newest, &HashMap::new());
        assert_eq!(names(&view), vec!["Terracotta Vase"]);
    }
}
