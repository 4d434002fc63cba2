//! Cluster cache: builds or loads the catalog once and answers queries over it

use crate::anatomy::Region;
use crate::catalog::model::{ClusterCatalog, DiseaseSet, RegionVolumes};
use crate::catalog::report::{CatalogReport, RegionSummary};
use crate::catalog::storage::CatalogStore;
use crate::extraction::{Cluster, VoxelIndex, extract_clusters};
use crate::io::error::{AnalysisError, ErrorContext, Result, WithContext};
use log::{debug, info, warn};
use num_traits::{Num, Zero};
use std::fmt::Debug;
use std::path::{Path, PathBuf};

/// Receives progress from the extraction pass
///
/// The pass only runs when no stored catalog was found, so an observer that never sees
/// `pass_started` proves the catalog was loaded.
pub trait ExtractionObserver {
    /// Called once before the first pair is extracted
    fn pass_started(&mut self, _total_pairs: usize) {}

    /// Called after each region/disease pair is extracted
    fn pair_extracted(&mut self, _region: Region, _disease: &str, _clusters: &[Cluster]) {}

    /// Called once after the last pair
    fn pass_finished(&mut self) {}
}

impl ExtractionObserver for () {}

/// How a cache obtained its catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogOrigin {
    /// Decoded from a stored blob
    Loaded,
    /// Computed by the extraction pass and then stored
    Computed,
}

/// Owner of the cluster catalog for one set of regions and diseases
///
/// Construction either loads a stored catalog or computes it over every region/disease
/// pair and stores it. The catalog is never modified afterwards; to recompute, remove the
/// stored blob and construct a new cache.
#[derive(Debug)]
pub struct ClusterCache {
    store: CatalogStore,
    catalog: ClusterCatalog,
    origin: CatalogOrigin,
}

impl ClusterCache {
    /// Load the catalog stored under `root`, or compute and store it
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A stored catalog exists but cannot be read or decoded
    /// - A disease and region volume differ in shape
    /// - The computed catalog cannot be written
    pub fn open<T, R>(
        root: impl Into<PathBuf>,
        regions: &RegionVolumes<R>,
        diseases: &DiseaseSet<T>,
    ) -> Result<Self>
    where
        T: Num + Copy + Debug,
        R: Zero + PartialEq + Copy,
    {
        Self::open_observed(root, regions, diseases, &mut ())
    }

    /// Same as [`ClusterCache::open`], reporting extraction progress to `observer`
    ///
    /// # Errors
    ///
    /// See [`ClusterCache::open`]
    pub fn open_observed<T, R>(
        root: impl Into<PathBuf>,
        regions: &RegionVolumes<R>,
        diseases: &DiseaseSet<T>,
        observer: &mut dyn ExtractionObserver,
    ) -> Result<Self>
    where
        T: Num + Copy + Debug,
        R: Zero + PartialEq + Copy,
    {
        let store = CatalogStore::new(root);

        if let Some(catalog) = store.load()? {
            info!("Loading existing clusters from {}", store.path().display());
            warn_on_drift(&catalog, regions, diseases);
            return Ok(Self {
                store,
                catalog,
                origin: CatalogOrigin::Loaded,
            });
        }

        info!("No existing clusters found, calculating clusters.");
        let catalog = compute_catalog(regions, diseases, observer)?;
        store.save(&catalog)?;
        info!(
            "Stored {} clusters over {} pairs at {}",
            catalog.cluster_count(),
            catalog.pair_count(),
            store.path().display()
        );

        Ok(Self {
            store,
            catalog,
            origin: CatalogOrigin::Computed,
        })
    }

    /// Whether the catalog was loaded or computed
    pub const fn origin(&self) -> CatalogOrigin {
        self.origin
    }

    /// The full catalog
    pub const fn catalog(&self) -> &ClusterCatalog {
        &self.catalog
    }

    /// Runtime directory the catalog is stored in
    pub fn root(&self) -> &Path {
        self.store.root()
    }

    /// Path of the stored blob
    pub fn storage_path(&self) -> PathBuf {
        self.store.path()
    }

    /// Clusters of one pair, largest radius first
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::NotCataloged`] if the pair is not in the catalog
    pub fn clusters(&self, region: Region, disease: &str) -> Result<&[Cluster]> {
        self.catalog
            .get(region, disease)
            .ok_or_else(|| AnalysisError::NotCataloged {
                region,
                disease: disease.to_string(),
            })
    }

    /// Check whether any cluster of `disease` was found in `region`
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::NotCataloged`] if the pair is not in the catalog
    pub fn has_disease(&self, region: Region, disease: &str) -> Result<bool> {
        Ok(!self.clusters(region, disease)?.is_empty())
    }

    /// Integer voxel centroid of the largest cluster, or `None` when there is none
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::NotCataloged`] if the pair is not in the catalog
    pub fn largest_cluster_centroid(
        &self,
        region: Region,
        disease: &str,
    ) -> Result<Option<VoxelIndex>> {
        Ok(self
            .clusters(region, disease)?
            .first()
            .map(Cluster::centroid_voxel))
    }

    /// Cluster counts of every disease in one region
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::NotCataloged`] if the region is not in the catalog
    pub fn region_summary(&self, region: Region) -> Result<RegionSummary> {
        let counts: Vec<(String, usize)> = self
            .catalog
            .diseases(region)
            .map(|disease| {
                let count = self.catalog.get(region, disease).map_or(0, <[Cluster]>::len);
                (disease.to_string(), count)
            })
            .collect();

        if counts.is_empty() {
            return Err(AnalysisError::NotCataloged {
                region,
                disease: String::from("*"),
            });
        }

        Ok(RegionSummary { region, counts })
    }

    /// Log the cluster count of every pair and the geometry of every cluster
    pub fn report(&self) {
        for line in CatalogReport::new(&self.catalog).to_string().lines() {
            info!("{line}");
        }
    }
}

/// Run the extraction over every region/disease pair
///
/// # Errors
///
/// Returns [`AnalysisError::ShapeMismatch`] naming the pair if a disease volume and a
/// region volume differ in shape
pub fn compute_catalog<T, R>(
    regions: &RegionVolumes<R>,
    diseases: &DiseaseSet<T>,
    observer: &mut dyn ExtractionObserver,
) -> Result<ClusterCatalog>
where
    T: Num + Copy + Debug,
    R: Zero + PartialEq + Copy,
{
    for (name, category) in diseases {
        if category.label.is_zero() {
            warn!(
                "Disease '{name}' uses label {:?}; every voxel outside a region will match it",
                category.label
            );
        }
    }

    observer.pass_started(regions.len() * diseases.len());

    let mut catalog = ClusterCatalog::new();
    for (&region, region_volume) in regions {
        for (name, category) in diseases {
            let clusters =
                extract_clusters(category.volume.view(), region_volume.view(), category.label)
                    .with_context(ErrorContext::pair(region, name))?;

            debug!(
                "{}: {} '{name}' clusters",
                region.short_name(),
                clusters.len()
            );
            observer.pair_extracted(region, name, &clusters);
            catalog.insert(region, name, clusters);
        }
    }

    observer.pass_finished();
    Ok(catalog)
}

fn warn_on_drift<T, R>(
    catalog: &ClusterCatalog,
    regions: &RegionVolumes<R>,
    diseases: &DiseaseSet<T>,
) {
    let names: Vec<&str> = diseases.keys().map(String::as_str).collect();
    let missing = catalog.missing_pairs(regions.keys().copied(), &names);
    if !missing.is_empty() {
        warn!(
            "Stored catalog lacks {} of the requested region/disease pairs; remove it to recompute",
            missing.len()
        );
    }
}
