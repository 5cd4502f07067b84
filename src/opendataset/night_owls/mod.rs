//! Dataloader of the NightOwls dataset.

mod annotation;
mod loader;

pub use loader::NightOwls;

/// Names this module publishes
pub(crate) const EXPORTS: &[&str] = &["NightOwls"];

#[cfg(test)]
mod tests {
    use super::*;
    use std::any::TypeId;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_exports_only_night_owls() {
        assert_eq!(EXPORTS, &["NightOwls"]);
    }

    #[test]
    fn test_reexport_is_the_loader_type() {
        assert_eq!(TypeId::of::<NightOwls>(), TypeId::of::<loader::NightOwls>());
        assert_eq!(
            TypeId::of::<crate::opendataset::NightOwls>(),
            TypeId::of::<loader::NightOwls>()
        );
    }

    #[test]
    fn test_load_through_reexport() {
        let temp = TempDir::new().unwrap();
        for segment in ["training", "validation"] {
            fs::create_dir_all(temp.path().join(format!("nightowls_{}", segment))).unwrap();
            fs::write(
                temp.path().join(format!("nightowls_{}.json", segment)),
                r#"{"images": [], "categories": [{"id": 1, "name": "pedestrian"}]}"#,
            )
            .unwrap();
        }

        let owls = NightOwls::load(temp.path()).unwrap();
        assert_eq!(owls.name(), NightOwls::NAME);
        assert_eq!(owls.dataset().segment_names(), vec!["training", "validation"]);
    }

    #[test]
    fn test_loader_errors_pass_through_unchanged() {
        let temp = TempDir::new().unwrap();
        let result = NightOwls::load(temp.path().join("missing"));
        assert!(matches!(
            result,
            Err(crate::error::LoadError::MissingDirectory(_))
        ));
    }

    #[test]
    fn test_repeated_access_yields_same_catalog() {
        let first = NightOwls::embedded_catalog().unwrap();
        let second = loader::catalog().unwrap();
        assert!(std::ptr::eq(first, second));
    }
}
