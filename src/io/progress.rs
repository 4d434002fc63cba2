//! Progress display for the extraction pass over region/disease pairs

use crate::anatomy::Region;
use crate::catalog::cache::ExtractionObserver;
use crate::extraction::Cluster;
use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static PAIR_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    let template = format!(
        "[{{elapsed_precise}}] Pairs: [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
    );
    ProgressStyle::default_bar()
        .template(&template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Shows one bar advancing per extracted region/disease pair
///
/// The bar only appears when the catalog is computed; a loaded catalog shows nothing.
#[derive(Default)]
pub struct ProgressManager {
    bar: Option<ProgressBar>,
    clusters_found: usize,
}

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Clusters reported so far
    pub const fn clusters_found(&self) -> usize {
        self.clusters_found
    }

    /// Check whether a bar is currently displayed
    pub const fn is_active(&self) -> bool {
        self.bar.is_some()
    }
}

impl ExtractionObserver for ProgressManager {
    fn pass_started(&mut self, total_pairs: usize) {
        let bar = ProgressBar::new(total_pairs as u64);
        bar.set_style(PAIR_STYLE.clone());
        self.clusters_found = 0;
        self.bar = Some(bar);
    }

    fn pair_extracted(&mut self, region: Region, disease: &str, clusters: &[Cluster]) {
        self.clusters_found += clusters.len();
        if let Some(ref bar) = self.bar {
            bar.set_message(format!("{} / {disease}", region.short_name()));
            bar.inc(1);
        }
    }

    fn pass_finished(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}
