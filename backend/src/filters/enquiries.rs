//! Derivation of the admin enquiry view: given the full enquiry collection
//! and a parameter set, produce the filtered, ordered subset. Pure; all
//! active filters compose with logical AND, sorting is independent, and the
//! caller supplies `now` so results are deterministic.

use crate::models::Enquiry;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use marblecraft_shared::{
    EnquiryDateFilter, EnquirySort, StatusFilter, MONTH_WINDOW_DAYS, WEEK_WINDOW_DAYS,
};
use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EnquiryFilterParams {
    pub search: Option<String>,
    #[serde(default)]
    pub status: StatusFilter,
    #[serde(default)]
    pub date_filter: EnquiryDateFilter,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub quantity_min: Option<i32>,
    pub quantity_max: Option<i32>,
    #[serde(default)]
    pub sort: EnquirySort,
}

/// Case-insensitive substring match against first name, last name, email or
/// product name; any single field containing the query is a match.
fn matches_search(enquiry: &Enquiry, query: &str) -> bool {
    let needle = query.to_lowercase();
    [
        &enquiry.first_name,
        &enquiry.last_name,
        &enquiry.email,
        &enquiry.product_name,
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(&needle))
}

fn matches_status(enquiry: &Enquiry, filter: StatusFilter) -> bool {
    match filter {
        StatusFilter::All => true,
        StatusFilter::Pending => enquiry.status == marblecraft_shared::EnquiryStatus::Pending,
        StatusFilter::Solved => enquiry.status == marblecraft_shared::EnquiryStatus::Solved,
    }
}

/// Date filters compare the enquiry's creation date truncated to midnight
/// against a now-relative window. The custom range is inclusive on both
/// ends and only applies when both bounds are present.
fn matches_date(
    enquiry: &Enquiry,
    filter: EnquiryDateFilter,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    now: DateTime<Utc>,
) -> bool {
    let created = enquiry.created_at.date_naive();
    match filter {
        EnquiryDateFilter::All => true,
        EnquiryDateFilter::Today => created == now.date_naive(),
        EnquiryDateFilter::Week => created >= (now - Duration::days(WEEK_WINDOW_DAYS)).date_naive(),
        EnquiryDateFilter::Month => {
            created >= (now - Duration::days(MONTH_WINDOW_DAYS)).date_naive()
        }
        EnquiryDateFilter::Custom => match (start, end) {
            (Some(start), Some(end)) => created >= start && created <= end,
            _ => true,
        },
    }
}

fn matches_quantity(enquiry: &Enquiry, min: Option<i32>, max: Option<i32>) -> bool {
    min.map_or(true, |min| enquiry.quantity >= min)
        && max.map_or(true, |max| enquiry.quantity <= max)
}

pub fn apply_filters(
    enquiries: &[Enquiry],
    params: &EnquiryFilterParams,
    now: DateTime<Utc>,
) -> Vec<Enquiry> {
    enquiries
        .iter()
        .filter(|e| {
            params
                .search
                .as_deref()
                .filter(|q| !q.trim().is_empty())
                .map_or(true, |q| matches_search(e, q))
        })
        .filter(|e| matches_status(e, params.status))
        .filter(|e| matches_date(e, params.date_filter, params.start_date, params.end_date, now))
        .filter(|e| matches_quantity(e, params.quantity_min, params.quantity_max))
        .cloned()
        .collect()
}

pub fn sort_enquiries(enquiries: &mut [Enquiry], sort: EnquirySort) {
    use marblecraft_shared::EnquiryStatus;

    match sort {
        EnquirySort::Newest => enquiries.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        EnquirySort::Oldest => enquiries.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        EnquirySort::Pending | EnquirySort::Solved => {
            let hoisted = if sort == EnquirySort::Pending {
                EnquiryStatus::Pending
            } else {
                EnquiryStatus::Solved
            };
            // Matching entries first; within each status-priority group the
            // tie-break is newest-first.
            enquiries.sort_by(|a, b| {
                let rank = |e: &Enquiry| (e.status != hoisted) as u8;
                rank(a)
                    .cmp(&rank(b))
                    .then_with(|| b.created_at.cmp(&a.created_at))
            });
        }
        EnquirySort::QuantityHigh => enquiries.sort_by(|a, b| b.quantity.cmp(&a.quantity)),
        EnquirySort::QuantityLow => enquiries.sort_by(|a, b| a.quantity.cmp(&b.quantity)),
    }
}

/// Filter with AND semantics, then order. The full pipeline behind the
/// admin enquiry dashboard.
pub fn run(enquiries: &[Enquiry], params: &EnquiryFilterParams, now: DateTime<Utc>) -> Vec<Enquiry> {
    let mut view = apply_filters(enquiries, params, now);
    sort_enquiries(&mut view, params.sort);
    view
}
