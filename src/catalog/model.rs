//! Catalog data model and the input mappings it is computed from

use crate::anatomy::Region;
use crate::extraction::Cluster;
use ndarray::Array3;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Region mask volumes keyed by region
pub type RegionVolumes<R> = BTreeMap<Region, Array3<R>>;

/// Disease categories keyed by name
pub type DiseaseSet<T> = BTreeMap<String, DiseaseCategory<T>>;

/// Label volume of one disease category
///
/// Categories read from one multi-label volume share it instead of holding copies.
#[derive(Debug, Clone)]
pub struct DiseaseCategory<T> {
    /// Voxel value identifying this disease, expected to be nonzero
    pub label: T,
    /// Dense label volume on the shared voxel grid
    pub volume: Arc<Array3<T>>,
}

impl<T> DiseaseCategory<T> {
    /// Pair a qualifying label with an owned or shared volume
    pub fn new(label: T, volume: impl Into<Arc<Array3<T>>>) -> Self {
        Self {
            label,
            volume: volume.into(),
        }
    }
}

/// Clusters for every region/disease pair
///
/// Each pair present in the inputs has an entry, even when no clusters were found.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClusterCatalog {
    entries: BTreeMap<Region, BTreeMap<String, Vec<Cluster>>>,
}

impl ClusterCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the cluster sequence of one pair, replacing any previous entry
    pub fn insert(&mut self, region: Region, disease: &str, clusters: Vec<Cluster>) {
        self.entries
            .entry(region)
            .or_default()
            .insert(disease.to_string(), clusters);
    }

    /// Cluster sequence of one pair, largest radius first
    pub fn get(&self, region: Region, disease: &str) -> Option<&[Cluster]> {
        self.entries
            .get(&region)
            .and_then(|diseases| diseases.get(disease))
            .map(Vec::as_slice)
    }

    /// Check whether the pair has an entry
    pub fn contains(&self, region: Region, disease: &str) -> bool {
        self.get(region, disease).is_some()
    }

    /// Regions in id order
    pub fn regions(&self) -> impl Iterator<Item = Region> + '_ {
        self.entries.keys().copied()
    }

    /// Disease names cataloged for a region, in name order
    pub fn diseases(&self, region: Region) -> impl Iterator<Item = &str> + '_ {
        self.entries
            .get(&region)
            .into_iter()
            .flat_map(|diseases| diseases.keys().map(String::as_str))
    }

    /// Iterate every pair with its clusters
    pub fn iter(&self) -> impl Iterator<Item = (Region, &str, &[Cluster])> + '_ {
        self.entries.iter().flat_map(|(&region, diseases)| {
            diseases
                .iter()
                .map(move |(disease, clusters)| (region, disease.as_str(), clusters.as_slice()))
        })
    }

    /// Number of region/disease pairs
    pub fn pair_count(&self) -> usize {
        self.entries.values().map(BTreeMap::len).sum()
    }

    /// Total clusters across all pairs
    pub fn cluster_count(&self) -> usize {
        self.iter().map(|(_, _, clusters)| clusters.len()).sum()
    }

    /// Check if the catalog has no pairs
    pub fn is_empty(&self) -> bool {
        self.pair_count() == 0
    }

    /// Pairs of the given inputs that the catalog has no entry for
    pub fn missing_pairs<'a>(
        &self,
        regions: impl IntoIterator<Item = Region>,
        diseases: &'a [&'a str],
    ) -> Vec<(Region, &'a str)> {
        regions
            .into_iter()
            .flat_map(|region| diseases.iter().map(move |&disease| (region, disease)))
            .filter(|&(region, disease)| !self.contains(region, disease))
            .collect()
    }
}
