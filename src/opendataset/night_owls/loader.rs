use directories::UserDirs;
use once_cell::sync::OnceCell;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::io;
use std::ops::Index;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::annotation::{AnnotationEntry, AnnotationFile};
use crate::config::LoaderConfig;
use crate::dataset::{AttributeValue, Box2D, Catalog, Data, Dataset, LabeledBox2D, Segment};
use crate::error::{LoadError, LoadResult};

const CATALOG_JSON: &str = include_str!("catalog.json");
const TESTING_SEGMENT: &str = "testing";
const IGNORE_CATEGORY: &str = "ignore";

static CATALOG: OnceCell<Catalog> = OnceCell::new();

/// Catalog of the NightOwls dataset, parsed once per process
pub(super) fn catalog() -> LoadResult<&'static Catalog> {
    init_catalog(&CATALOG, CATALOG_JSON)
}

/// A failed parse leaves the cell empty so the error repeats on every call
fn init_catalog<'a>(cell: &'a OnceCell<Catalog>, source: &str) -> LoadResult<&'a Catalog> {
    cell.get_or_try_init(|| {
        debug!("Parsing NightOwls catalog");
        Catalog::from_json(source).map_err(LoadError::Catalog)
    })
}

/// The NightOwls night-time pedestrian detection dataset.
///
/// Expected layout under the root directory:
///
/// ```text
/// nightowls_training/        *.png
/// nightowls_training.json
/// nightowls_validation/      *.png
/// nightowls_validation.json
/// nightowls_testing/         *.png (optional, unannotated)
/// ```
///
/// Annotated segments get a box2d label per image with the `occluded`,
/// `difficult`, `truncated` and `pose` attributes and the tracking id as
/// instance.
#[derive(Debug, Clone)]
pub struct NightOwls {
    root: PathBuf,
    dataset: Dataset,
}

impl NightOwls {
    pub const NAME: &'static str = "NightOwls";

    /// Label schema shared by every NightOwls segment
    pub fn embedded_catalog() -> LoadResult<&'static Catalog> {
        catalog()
    }

    /// Load every segment found under `root` with default options
    pub fn load(root: impl AsRef<Path>) -> LoadResult<Self> {
        Self::load_with_config(root, &LoaderConfig::default())
    }

    pub fn load_with_config(root: impl AsRef<Path>, config: &LoaderConfig) -> LoadResult<Self> {
        let root = resolve_root(root.as_ref())?;
        let catalog = catalog()?;
        info!("Loading {} from {:?}", Self::NAME, root);

        let mut dataset = Dataset::new(Self::NAME);
        dataset.set_catalog(catalog.clone());

        for segment_name in &config.segments {
            let segment = dataset.create_segment(segment_name);
            load_annotated_segment(&root, segment, catalog, config)?;
        }

        let testing_dir = segment_dir(&root, TESTING_SEGMENT);
        if config.include_testing
            && !config.segments.iter().any(|s| s == TESTING_SEGMENT)
            && testing_dir.is_dir()
        {
            let segment = dataset.create_segment(TESTING_SEGMENT);
            load_unannotated_segment(&testing_dir, segment, config)?;
        }

        info!(
            "Loaded {} segments with {} images in total",
            dataset.len(),
            dataset.total_data()
        );
        Ok(Self { root, dataset })
    }

    /// Canonical root directory the dataset was loaded from
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn name(&self) -> &str {
        self.dataset.name()
    }

    pub fn catalog(&self) -> &Catalog {
        self.dataset.catalog()
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn into_dataset(self) -> Dataset {
        self.dataset
    }

    pub fn segments(&self) -> &[Segment] {
        self.dataset.segments()
    }

    pub fn segment(&self, name: &str) -> Option<&Segment> {
        self.dataset.segment(name)
    }

    /// Number of segments
    pub fn len(&self) -> usize {
        self.dataset.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dataset.is_empty()
    }
}

impl Index<usize> for NightOwls {
    type Output = Segment;

    fn index(&self, index: usize) -> &Segment {
        &self.dataset[index]
    }
}

impl<'a> IntoIterator for &'a NightOwls {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.dataset.segments().iter()
    }
}

fn segment_dir(root: &Path, segment: &str) -> PathBuf {
    root.join(format!("nightowls_{}", segment))
}

fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match UserDirs::new() {
        Some(dirs) => dirs.home_dir().join(rest),
        None => path.to_path_buf(),
    }
}

fn resolve_root(path: &Path) -> LoadResult<PathBuf> {
    let expanded = expand_home(path);
    let root = match fs::canonicalize(&expanded) {
        Ok(root) => root,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(LoadError::MissingDirectory(expanded))
        }
        Err(e) => return Err(LoadError::io(expanded, e)),
    };
    if !root.is_dir() {
        return Err(LoadError::MissingDirectory(root));
    }
    Ok(root)
}

fn load_annotated_segment(
    root: &Path,
    segment: &mut Segment,
    catalog: &Catalog,
    config: &LoaderConfig,
) -> LoadResult<()> {
    let label_path = root.join(format!("nightowls_{}.json", segment.name()));
    let image_dir = segment_dir(root, segment.name());
    info!("Reading annotations from: {:?}", label_path);

    let file = AnnotationFile::read(&label_path)?;

    let categories = file.category_names();
    if let Some(unknown) = categories.values().find(|name| !catalog.contains_category(name)) {
        return Err(LoadError::UnknownCategory {
            path: label_path,
            name: unknown.to_string(),
        });
    }
    let poses = file.pose_names();
    let mut by_image = file.annotations_by_image();

    let mut missing = 0;
    let mut seen = HashSet::new();
    let mut duplicates = 0;
    for image in &file.images {
        let path = image_dir.join(&image.file_name);
        if !seen.insert(image.id) {
            warn!(
                "Image id {} is declared more than once in {:?}; {:?} gets no boxes",
                image.id, label_path, image.file_name
            );
            duplicates += 1;
        }
        let annotations = by_image.remove(&image.id).unwrap_or_default();

        if config.skip_missing_images && !path.is_file() {
            debug!("Image missing on disk: {:?}", path);
            missing += 1;
            continue;
        }

        let mut boxes = Vec::with_capacity(annotations.len());
        for annotation in annotations {
            if let Some(labeled) = to_labeled_box(annotation, &categories, &poses, catalog, config)? {
                boxes.push(labeled);
            }
        }

        let mut data = Data::new(path);
        data.declared_size = image.width.zip(image.height);
        data.label.box2d = Some(boxes);
        segment.push(data);
    }

    if missing > 0 {
        warn!("Skipped {} images missing from {:?}", missing, image_dir);
    }
    if duplicates > 0 {
        warn!("Found {} duplicate image ids in {:?}", duplicates, label_path);
    }
    let orphans: usize = by_image.values().map(Vec::len).sum();
    if orphans > 0 {
        warn!(
            "Skipped {} annotations referring to undeclared images in {:?}",
            orphans, label_path
        );
    }

    info!("Found {} images in segment {:?}", segment.len(), segment.name());
    Ok(())
}

fn to_labeled_box(
    annotation: &AnnotationEntry,
    categories: &HashMap<u64, &str>,
    poses: &HashMap<u64, &str>,
    catalog: &Catalog,
    config: &LoaderConfig,
) -> LoadResult<Option<LabeledBox2D>> {
    let category = *categories
        .get(&annotation.category_id)
        .ok_or(LoadError::UnknownCategoryId {
            annotation_id: annotation.id,
            category_id: annotation.category_id,
        })?;

    if !config.include_ignore && (annotation.ignore || category == IGNORE_CATEGORY) {
        return Ok(None);
    }

    // x + w and y + h may overflow even when every component is finite
    let bbox = match *annotation.bbox.as_slice() {
        [x, y, w, h] if w >= 0.0 && h >= 0.0 => Some(Box2D::from_xywh(x, y, w, h)),
        _ => None,
    }
    .filter(|bbox| bbox.is_finite())
    .ok_or_else(|| LoadError::InvalidBox {
        annotation_id: annotation.id,
        bbox: annotation.bbox.clone(),
    })?;

    let mut labeled = LabeledBox2D::new(bbox, category);
    for (name, flag) in [
        ("occluded", annotation.occluded),
        ("difficult", annotation.difficult),
        ("truncated", annotation.truncated),
    ] {
        labeled
            .attributes
            .insert(name.to_string(), AttributeValue::Boolean(flag));
    }

    if let Some(pose_id) = annotation.pose_id {
        let pose = poses.get(&pose_id).ok_or(LoadError::UnknownPoseId {
            annotation_id: annotation.id,
            pose_id,
        })?;
        let value = AttributeValue::Text(pose.to_string());
        if let Some(info) = catalog.attribute("pose") {
            if !info.accepts(&value) {
                return Err(LoadError::InvalidAttribute {
                    name: info.name.clone(),
                    value: value.to_string(),
                });
            }
        }
        labeled.attributes.insert("pose".to_string(), value);
    }

    labeled.instance = annotation.tracking_id.map(|id| id.to_string());
    Ok(Some(labeled))
}

fn load_unannotated_segment(
    image_dir: &Path,
    segment: &mut Segment,
    config: &LoaderConfig,
) -> LoadResult<()> {
    info!("Reading images from: {:?}", image_dir);
    let entries = fs::read_dir(image_dir).map_err(|e| LoadError::io(image_dir, e))?;

    for entry in entries.flatten() {
        let path = entry.path();
        let accepted = path
            .extension()
            .map(|ext| config.accepts_extension(&ext.to_string_lossy()))
            .unwrap_or(false);
        if accepted && path.is_file() {
            segment.push(Data::new(path));
        }
    }
    segment.sort_by_path();

    info!("Found {} images in {:?}", segment.len(), image_dir);
    Ok(())
}
