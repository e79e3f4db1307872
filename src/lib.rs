// Main library file for the product finder

// Export modules for each stage of the search
pub mod client;
pub mod config;
pub mod error;
pub mod finder;
pub mod product;
pub mod report;
pub mod supplier;

// Re-export key types for convenience
pub use client::{AvailabilityClient, HttpAvailabilityClient};
pub use config::{ClientConfig, FinderConfig};
pub use error::{FinderError, Result};
pub use finder::{find_products, parse_records, ProductFinder};
pub use product::{AvailabilityRecord, DATE_TIME_FORMAT};
pub use report::{AvailableStartTime, FitCriteria, ReportBuilder, ReportEntry};
pub use supplier::{AvailabilityDocument, RawAvailability};
