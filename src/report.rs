// Report building: filter, sort, group and format fitting availabilities
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::product::{format_timestamp, AvailabilityRecord};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ReportEntry {
    pub product_id: u64,
    pub available_starttimes: Vec<AvailableStartTime>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AvailableStartTime {
    pub start_time: String,
    pub number_of_participants: i64,
}

impl From<&AvailabilityRecord> for AvailableStartTime {
    fn from(product: &AvailabilityRecord) -> Self {
        Self {
            start_time: format_timestamp(product.start_time()),
            number_of_participants: product.number_of_participants(),
        }
    }
}

// Window and headcount a slot has to satisfy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FitCriteria {
    pub window_start: NaiveDateTime,
    pub window_end: NaiveDateTime,
    pub travellers: u32,
}

pub struct ReportBuilder {
    criteria: FitCriteria,
}

impl ReportBuilder {
    pub fn new(criteria: FitCriteria) -> Self {
        Self { criteria }
    }

    pub fn build(&self, products: &[AvailabilityRecord]) -> Vec<ReportEntry> {
        let mut fit_products = self.filter(products);
        sort_products(&mut fit_products);
        group_products(&fit_products)
    }

    // Keep only the slots that fit, in input order
    pub fn filter<'a>(&self, products: &'a [AvailabilityRecord]) -> Vec<&'a AvailabilityRecord> {
        products
            .iter()
            .filter(|product| {
                product.fits(
                    &self.criteria.window_start,
                    &self.criteria.window_end,
                    self.criteria.travellers,
                )
            })
            .collect()
    }
}

/// Orders by product id, then start time.
///
/// The sort is stable: slots of the same product starting at the same minute
/// stay in the order they were filtered in.
pub fn sort_products(products: &mut [&AvailabilityRecord]) {
    products.sort_by(|a, b| {
        a.product_id()
            .cmp(&b.product_id())
            .then_with(|| a.start_time().cmp(b.start_time()))
    });
}

// Consecutive slots of one product collapse into a single entry
pub fn group_products(products: &[&AvailabilityRecord]) -> Vec<ReportEntry> {
    let mut report: Vec<ReportEntry> = Vec::new();

    for product in products {
        match report.last_mut() {
            Some(entry) if entry.product_id == product.product_id() => {
                entry.available_starttimes.push((*product).into());
            }
            _ => report.push(ReportEntry {
                product_id: product.product_id(),
                available_starttimes: vec![(*product).into()],
            }),
        }
    }

    report
}

pub fn to_pretty_json(report: &[ReportEntry]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}
