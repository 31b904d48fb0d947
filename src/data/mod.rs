//! Data module - VHI dataset loading and querying

mod loader;
mod query;
mod regions;

pub use loader::{load_directory, parse_region_file, DatasetLoad, LoaderError, VHI_SENTINEL};
pub use query::{
    filter_table, index_values, region_distributions, weekly_mean, IndexKind, QueryParams,
    SortConflict, SortOrder,
};
pub use regions::{region_name, REGIONS};
