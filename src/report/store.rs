//! Report persistence.
//!
//! Generated recap images are written under the reports directory as
//! `<guid>.png`, where the guid is a fresh v4 uuid in simple (32 hex
//! char) form. The file is fully written before the guid is handed back,
//! so a client that receives a guid can immediately fetch the image.

use std::path::{Path, PathBuf};

use image::GrayImage;
use uuid::Uuid;

use crate::error::RecapError;

#[derive(Debug, Clone)]
pub struct ReportStore {
    dir: PathBuf,
}

impl ReportStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Persist a rendered report and return its guid.
    pub fn save(&self, image: &GrayImage) -> Result<String, RecapError> {
        std::fs::create_dir_all(&self.dir)?;
        let guid = Uuid::new_v4().simple().to_string();
        let path = self.path_for(&guid);
        image
            .save(&path)
            .map_err(|e| RecapError::Report(format!("Failed to save {}: {}", path.display(), e)))?;
        Ok(guid)
    }

    pub fn path_for(&self, guid: &str) -> PathBuf {
        self.dir.join(format!("{}.png", guid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_writes_a_png_named_by_guid() {
        let dir = tempfile::tempdir().unwrap();
        let store = ReportStore::new(dir.path().join("reports"));
        let image = GrayImage::from_pixel(4, 4, image::Luma([255]));

        let guid = store.save(&image).unwrap();
        assert_eq!(guid.len(), 32);
        assert!(guid.chars().all(|c| c.is_ascii_hexdigit()));

        let path = store.path_for(&guid);
        assert!(path.exists());
        let bytes = std::fs::read(path).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
    }

    #[test]
    fn guids_are_unique_per_save() {
        let dir = tempfile::tempdir().unwrap();
        let store = ReportStore::new(dir.path());
        let image = GrayImage::from_pixel(1, 1, image::Luma([0]));
        let a = store.save(&image).unwrap();
        let b = store.save(&image).unwrap();
        assert_ne!(a, b);
    }
}
