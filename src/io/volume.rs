//! Reading region masks and label volumes from `.npy` files

use crate::anatomy::Region;
use crate::catalog::model::{DiseaseCategory, DiseaseSet, RegionVolumes};
use crate::io::configuration::{REGIONS_DIR_NAME, VOLUME_EXTENSION};
use crate::io::error::{AnalysisError, Result, file_system_error, invalid_parameter};
use log::debug;
use ndarray::Array3;
use ndarray_npy::{ReadNpyError, ReadableElement, read_npy};
use num_traits::{ToPrimitive, Zero};
use std::collections::btree_map::Entry;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

/// Disease category requested on the command line
///
/// Parsed from `NAME=LABEL` or `NAME=LABEL:FILE`; without a file the shared label volume
/// is used.
#[derive(Debug, Clone, PartialEq)]
pub struct DiseaseSpec {
    /// Category name
    pub name: String,
    /// Qualifying label value
    pub label: f64,
    /// Volume holding this category, if not the shared one
    pub volume: Option<PathBuf>,
}

impl FromStr for DiseaseSpec {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self> {
        let (name, rest) = s
            .split_once('=')
            .ok_or_else(|| invalid_parameter("disease", &s, &"expected NAME=LABEL[:FILE]"))?;

        let name = name.trim();
        if name.is_empty() {
            return Err(invalid_parameter("disease", &s, &"name must not be empty"));
        }

        let (label_text, volume) = match rest.split_once(':') {
            Some((label, path)) => (label, Some(PathBuf::from(path.trim()))),
            None => (rest, None),
        };

        let label: i64 = label_text.trim().parse().map_err(|e| {
            invalid_parameter("disease", &s, &format!("label is not an integer: {e}"))
        })?;

        Ok(Self {
            name: name.to_string(),
            label: label as f64,
            volume,
        })
    }
}

type NpyResult<O> = std::result::Result<Array3<O>, ReadNpyError>;
type Reader<O> = fn(&Path) -> NpyResult<O>;

fn label_as<A>(path: &Path) -> NpyResult<f64>
where
    A: ReadableElement + ToPrimitive + Clone,
{
    let array: Array3<A> = read_npy(path)?;
    Ok(array.mapv(|value| value.to_f64().unwrap_or(f64::NAN)))
}

fn label_from_bool(path: &Path) -> NpyResult<f64> {
    let array: Array3<bool> = read_npy(path)?;
    Ok(array.mapv(|value| f64::from(u8::from(value))))
}

fn mask_as<A>(path: &Path) -> NpyResult<u8>
where
    A: ReadableElement + Zero + Clone,
{
    let array: Array3<A> = read_npy(path)?;
    Ok(array.mapv(|value| u8::from(!value.is_zero())))
}

fn mask_from_bool(path: &Path) -> NpyResult<u8> {
    let array: Array3<bool> = read_npy(path)?;
    Ok(array.mapv(u8::from))
}

const LABEL_READERS: [Reader<f64>; 11] = [
    label_as::<f64>,
    label_as::<f32>,
    label_as::<u8>,
    label_as::<i8>,
    label_as::<u16>,
    label_as::<i16>,
    label_as::<u32>,
    label_as::<i32>,
    label_as::<u64>,
    label_as::<i64>,
    label_from_bool,
];

const MASK_READERS: [Reader<u8>; 11] = [
    mask_as::<u8>,
    mask_from_bool,
    mask_as::<f64>,
    mask_as::<f32>,
    mask_as::<i8>,
    mask_as::<u16>,
    mask_as::<i16>,
    mask_as::<u32>,
    mask_as::<i32>,
    mask_as::<u64>,
    mask_as::<i64>,
];

// Tries each dtype in turn. A descriptor mismatch only means the dtype was wrong; any
// other failure comes from the reader whose dtype matched and is the one reported.
fn read_with<O>(path: &Path, readers: &[Reader<O>]) -> Result<Array3<O>> {
    let mut mismatch = None;
    for reader in readers {
        match reader(path) {
            Ok(volume) => {
                debug!("Read volume {:?} from {}", volume.dim(), path.display());
                return Ok(volume);
            }
            Err(e @ ReadNpyError::WrongDescriptor(_)) => mismatch = Some(e),
            Err(source) => {
                return Err(AnalysisError::VolumeLoad {
                    path: path.to_path_buf(),
                    source,
                });
            }
        }
    }

    match mismatch {
        Some(source) => Err(AnalysisError::VolumeLoad {
            path: path.to_path_buf(),
            source,
        }),
        None => Err(AnalysisError::InvalidSourceData {
            reason: format!("no volume reader accepted '{}'", path.display()),
        }),
    }
}

/// Read a 3D label volume of any common numeric or boolean dtype as `f64`
///
/// # Errors
///
/// Returns [`AnalysisError::VolumeLoad`] if the file is missing, is not a 3D array, or
/// holds an unsupported dtype
pub fn read_volume(path: &Path) -> Result<Array3<f64>> {
    read_with(path, &LABEL_READERS)
}

/// Read a 3D region mask of any common numeric or boolean dtype as `0`/`1` bytes
///
/// Nonzero voxels become `1`.
///
/// # Errors
///
/// Returns [`AnalysisError::VolumeLoad`] if the file is missing, is not a 3D array, or
/// holds an unsupported dtype
pub fn read_mask(path: &Path) -> Result<Array3<u8>> {
    read_with(path, &MASK_READERS)
}

/// Volume files in a directory, sorted by path
///
/// # Errors
///
/// Returns an error if the directory cannot be listed
pub fn volume_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|e| file_system_error(dir, "list volumes", e))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|e| file_system_error(dir, "list volumes", e))?
            .path();
        let is_volume = path.extension().and_then(|s| s.to_str()) == Some(VOLUME_EXTENSION);
        if is_volume && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Directory holding the region masks of a case
pub fn regions_dir(case_dir: &Path) -> PathBuf {
    case_dir.join(REGIONS_DIR_NAME)
}

/// Load every region mask in a directory, resolving each file to its region
///
/// # Errors
///
/// Returns an error if:
/// - The directory cannot be listed or holds no volumes
/// - A file name matches no region ([`AnalysisError::UnknownRegion`])
/// - Two files resolve to the same region
/// - A volume cannot be read
pub fn load_region_volumes(dir: &Path) -> Result<RegionVolumes<u8>> {
    let files = volume_files(dir)?;
    if files.is_empty() {
        return Err(AnalysisError::InvalidSourceData {
            reason: format!("no .{VOLUME_EXTENSION} region masks in '{}'", dir.display()),
        });
    }

    let mut regions = RegionVolumes::new();
    for file in files {
        let region = Region::from_file_name(&file)?;
        match regions.entry(region) {
            Entry::Occupied(_) => {
                return Err(AnalysisError::InvalidSourceData {
                    reason: format!(
                        "region '{}' is supplied more than once ('{}')",
                        region.short_name(),
                        file.display()
                    ),
                });
            }
            Entry::Vacant(slot) => {
                slot.insert(read_mask(&file)?);
            }
        }
        debug!("Loaded region {}", region.name());
    }

    Ok(regions)
}

/// Assemble disease categories from their specs
///
/// Specs without their own volume share the volume at `shared`, which is read once and
/// referenced by each of them.
///
/// # Errors
///
/// Returns an error if:
/// - A spec needs the shared volume but none was given
/// - Two specs use the same name
/// - A volume cannot be read
pub fn load_disease_set(shared: Option<&Path>, specs: &[DiseaseSpec]) -> Result<DiseaseSet<f64>> {
    let shared_volume = match shared {
        Some(path) if specs.iter().any(|spec| spec.volume.is_none()) => {
            Some(Arc::new(read_volume(path)?))
        }
        _ => None,
    };

    let mut diseases = DiseaseSet::new();
    for spec in specs {
        let volume = match (&spec.volume, &shared_volume) {
            (Some(path), _) => Arc::new(read_volume(path)?),
            (None, Some(volume)) => Arc::clone(volume),
            (None, None) => {
                return Err(invalid_parameter(
                    "labels",
                    &spec.name,
                    &"disease has no volume and no shared label volume was given",
                ));
            }
        };

        if diseases.contains_key(&spec.name) {
            return Err(invalid_parameter("disease", &spec.name, &"duplicate disease name"));
        }
        diseases.insert(spec.name.clone(), DiseaseCategory::new(spec.label, volume));
    }

    Ok(diseases)
}
