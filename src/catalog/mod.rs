//! Cluster catalog: model, persistence, caching and queries

/// Cache construction and the query facade
pub mod cache;
/// Catalog data model and input mappings
pub mod model;
/// Text report and region summaries
pub mod report;
/// Blob persistence of the catalog
pub mod storage;

pub use cache::{CatalogOrigin, ClusterCache, ExtractionObserver};
pub use model::{ClusterCatalog, DiseaseCategory, DiseaseSet, RegionVolumes};
pub use report::{CatalogReport, RegionSummary};
pub use storage::CatalogStore;
