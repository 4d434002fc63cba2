//! Command-line interface for building and querying the cluster catalog of one case

use crate::anatomy::Region;
use crate::catalog::{CatalogStore, ClusterCache};
use crate::io::configuration::{DEFAULT_LOG_LEVEL, DEFAULT_RUNTIME_DIR_NAME};
use crate::io::error::{Result, WithContext};
use crate::io::logging::LogSettings;
use crate::io::progress::ProgressManager;
use crate::io::volume::{DiseaseSpec, load_disease_set, load_region_volumes, regions_dir};
use clap::Parser;
use log::info;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "lesionmap")]
#[command(
    author,
    version,
    about = "Find connected disease clusters inside anatomical regions"
)]
/// Command-line arguments for the cluster analysis tool
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Case directory containing a `regions/` folder of `<short_name>.npy` masks
    #[arg(value_name = "CASE_DIR")]
    pub case_dir: PathBuf,

    /// Label volume shared by diseases that do not name their own file
    #[arg(short, long, value_name = "FILE")]
    pub labels: Option<PathBuf>,

    /// Disease category as NAME=LABEL or NAME=LABEL:FILE (repeatable)
    #[arg(short, long = "disease", value_name = "SPEC", required = true)]
    pub diseases: Vec<DiseaseSpec>,

    /// Directory holding the stored catalog (defaults to CASE_DIR/interface_runtime)
    #[arg(long, value_name = "DIR")]
    pub runtime_dir: Option<PathBuf>,

    /// Region short name or id to summarize (repeatable)
    #[arg(short, long = "region", value_name = "REGION")]
    pub regions: Vec<Region>,

    /// Delete the stored catalog and recompute it
    #[arg(long)]
    pub rebuild: bool,

    /// Skip the full cluster report
    #[arg(long)]
    pub no_report: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Log level specification
    #[arg(long, default_value = DEFAULT_LOG_LEVEL)]
    pub log_level: String,

    /// Also write rotated log files to this directory
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,
}

impl Cli {
    /// Directory the catalog is stored in
    pub fn runtime_dir(&self) -> PathBuf {
        self.runtime_dir
            .clone()
            .unwrap_or_else(|| self.case_dir.join(DEFAULT_RUNTIME_DIR_NAME))
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Check if the full report should be logged
    pub const fn should_report(&self) -> bool {
        !self.no_report
    }

    /// Logger settings requested on the command line
    pub fn log_settings(&self) -> LogSettings {
        LogSettings {
            level: self.log_level.clone(),
            directory: self.log_dir.clone(),
        }
    }
}

/// Loads a case, opens its cluster cache and answers the requested queries
pub struct CaseProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl CaseProcessor {
    /// Create a new case processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Run the analysis according to CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if volumes cannot be loaded, the stored catalog is unusable,
    /// or a requested region is not part of the case
    pub fn process(&mut self) -> Result<ClusterCache> {
        let start_time = Instant::now();

        let regions = load_region_volumes(&regions_dir(&self.cli.case_dir))?;
        let diseases = load_disease_set(self.cli.labels.as_deref(), &self.cli.diseases)?;
        info!(
            "Loaded {} regions and {} diseases in {:.2?}",
            regions.len(),
            diseases.len(),
            start_time.elapsed()
        );

        let runtime_dir = self.cli.runtime_dir();
        if self.cli.rebuild && CatalogStore::new(&runtime_dir).remove()? {
            info!("Removed stored catalog under {}", runtime_dir.display());
        }

        let cache = match self.progress_manager {
            Some(ref mut pm) => ClusterCache::open_observed(&runtime_dir, &regions, &diseases, pm),
            None => ClusterCache::open(&runtime_dir, &regions, &diseases),
        }
        .with_operation("open cluster cache")?;

        if self.cli.should_report() {
            cache.report();
        }

        for &region in &self.cli.regions {
            self.summarize_region(&cache, region)?;
        }

        info!("Finished in {:.2?}", start_time.elapsed());
        Ok(cache)
    }

    fn summarize_region(&self, cache: &ClusterCache, region: Region) -> Result<()> {
        let summary = cache.region_summary(region)?;
        for line in summary.to_string().lines() {
            info!("{line}");
        }

        for spec in &self.cli.diseases {
            let present = cache.has_disease(region, &spec.name)?;
            match cache.largest_cluster_centroid(region, &spec.name)? {
                Some([z, y, x]) => info!(
                    "{} in {}: present={present}, largest cluster at voxel [{z}, {y}, {x}]",
                    spec.name,
                    region.short_name()
                ),
                None => info!(
                    "{} in {}: present={present}, no cluster",
                    spec.name,
                    region.short_name()
                ),
            }
        }

        Ok(())
    }
}
