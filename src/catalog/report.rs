//! Human-readable renderings of the catalog

use crate::anatomy::Region;
use crate::catalog::model::ClusterCatalog;
use std::fmt;

/// Per-disease cluster counts of one region, as shown next to the viewer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionSummary {
    /// Region summarized
    pub region: Region,
    /// Disease names with their cluster counts, in name order
    pub counts: Vec<(String, usize)>,
}

impl RegionSummary {
    /// Cluster count of one disease, if cataloged
    pub fn count(&self, disease: &str) -> Option<usize> {
        self.counts
            .iter()
            .find(|(name, _)| name == disease)
            .map(|&(_, count)| count)
    }
}

impl fmt::Display for RegionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Anatomical region: {}", self.region.name())?;
        for (disease, count) in &self.counts {
            writeln!(f, "{} count: {count}", capitalize(disease))?;
        }
        Ok(())
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Cluster count of every pair and each cluster's radius and centroid, one line each
#[derive(Debug, Clone, Copy)]
pub struct CatalogReport<'a> {
    catalog: &'a ClusterCatalog,
}

impl<'a> CatalogReport<'a> {
    /// Report over a catalog
    pub const fn new(catalog: &'a ClusterCatalog) -> Self {
        Self { catalog }
    }
}

impl fmt::Display for CatalogReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (region, disease, clusters) in self.catalog.iter() {
            writeln!(
                f,
                "Region: {} has {} {disease} clusters",
                region.name(),
                clusters.len()
            )?;
            for cluster in clusters {
                let [z, y, x] = cluster.centroid;
                writeln!(
                    f,
                    "Radius (vox): {:.2}, Centroid (vox): [{z:.2}, {y:.2}, {x:.2}]",
                    cluster.radius
                )?;
            }
        }
        Ok(())
    }
}
