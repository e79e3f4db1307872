// Product finder: the pipeline entry point from document to report
use tracing::{debug, info};

use crate::client::AvailabilityClient;
use crate::config::FinderConfig;
use crate::error::{FinderError, Result};
use crate::product::AvailabilityRecord;
use crate::report::{FitCriteria, ReportBuilder, ReportEntry};
use crate::supplier::AvailabilityDocument;

pub const SAMPLE_JSON_PATH: &str = "samples/product_availabilities.json";

/// Validates every record of the document.
///
/// The first malformed record aborts the whole run; nothing is skipped.
pub fn parse_records(document: &AvailabilityDocument) -> Result<Vec<AvailabilityRecord>> {
    document
        .product_availabilities
        .iter()
        .enumerate()
        .map(|(index, value)| AvailabilityRecord::from_value(value).map_err(|e| e.at_record(index)))
        .collect()
}

pub fn find_products(
    document: &AvailabilityDocument,
    criteria: &FitCriteria,
) -> Result<Vec<ReportEntry>> {
    if criteria.travellers < 1 {
        return Err(FinderError::InvalidParty(i64::from(criteria.travellers)));
    }

    let products = parse_records(document)?;
    Ok(ReportBuilder::new(*criteria).build(&products))
}

pub struct ProductFinder<C: AvailabilityClient> {
    client: C,
}

impl<C: AvailabilityClient> ProductFinder<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub async fn run(&self, config: &FinderConfig) -> Result<Vec<ReportEntry>> {
        info!(
            url = %config.source_url,
            window_start = %config.criteria.window_start,
            window_end = %config.criteria.window_end,
            travellers = config.criteria.travellers,
            "searching product availabilities"
        );

        let document = self.client.fetch(&config.source_url).await?;
        let report = find_products(&document, &config.criteria)?;

        debug!(
            records = document.len(),
            products = report.len(),
            "report built"
        );
        Ok(report)
    }
}
