//! Loaders for publicly released datasets

pub mod night_owls;

pub use night_owls::NightOwls;

/// Public names of a dataset package, keyed by package name
pub fn exported_names(package: &str) -> Option<&'static [&'static str]> {
    match package {
        "night_owls" | "NightOwls" => Some(night_owls::EXPORTS),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exported_names() {
        assert_eq!(exported_names("night_owls"), Some(&["NightOwls"][..]));
        assert_eq!(exported_names("NightOwls"), Some(&["NightOwls"][..]));
        assert!(exported_names("KITTI").is_none());
    }
}
