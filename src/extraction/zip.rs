use std::path::Path;

use tracing::{debug, warn};

use crate::error::{ExtractionError, Result};

/// Extractor for the listing's ZIP archives.
pub struct ZipExtractor;

impl ZipExtractor {
    /// Unpack `archive_path` into `dest_dir`, returning the extracted
    /// member names as paths relative to `dest_dir`, in archive order.
    ///
    /// Directory members are created on disk but not recorded. Members
    /// whose paths would escape `dest_dir` are skipped with a warning and
    /// not recorded. A member copy failure aborts the remaining members of
    /// this archive. An archive that yields no recorded members is an
    /// [`ExtractionError::Empty`].
    pub fn extract(archive_path: &Path, dest_dir: &Path) -> Result<Vec<String>> {
        debug!(
            "Extracting {} into {}",
            archive_path.display(),
            dest_dir.display()
        );

        let file = std::fs::File::open(archive_path).map_err(|e| ExtractionError::Open {
            path: archive_path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let mut archive = zip::ZipArchive::new(file).map_err(|e| ExtractionError::Open {
            path: archive_path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let mut members = Vec::new();

        for i in 0..archive.len() {
            let entry = archive.by_index(i).map_err(|e| ExtractionError::Member {
                path: archive_path.to_path_buf(),
                member: format!("index {}", i),
                reason: e.to_string(),
            })?;

            if let Some(name) = Self::extract_entry(entry, dest_dir, archive_path)? {
                members.push(name);
            }
        }

        if members.is_empty() {
            return Err(ExtractionError::Empty {
                path: archive_path.to_path_buf(),
            }
            .into());
        }

        debug!(
            "Extracted {} members from {}",
            members.len(),
            archive_path.display()
        );
        Ok(members)
    }

    /// Write a single entry under `dest_dir`, creating parent directories
    /// as needed. Returns the recorded member name, or `None` for entries
    /// that produce no document (directories, unsafe paths).
    fn extract_entry(
        mut entry: zip::read::ZipFile<'_>,
        dest_dir: &Path,
        archive_path: &Path,
    ) -> Result<Option<String>> {
        let relative = match entry.enclosed_name() {
            Some(path) => path.to_path_buf(),
            None => {
                warn!(
                    "Skipping member {} of {}: unsafe path",
                    entry.name(),
                    archive_path.display()
                );
                return Ok(None);
            }
        };

        let member = relative.to_string_lossy().into_owned();
        let out_path = dest_dir.join(&relative);

        if entry.is_dir() {
            std::fs::create_dir_all(&out_path)
                .map_err(|e| Self::member_error(archive_path, &member, e))?;
            return Ok(None);
        }

        if let Some(parent) = out_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| Self::member_error(archive_path, &member, e))?;
        }

        let mut out = std::fs::File::create(&out_path)
            .map_err(|e| Self::member_error(archive_path, &member, e))?;
        std::io::copy(&mut entry, &mut out)
            .map_err(|e| Self::member_error(archive_path, &member, e))?;

        Ok(Some(member))
    }

    fn member_error(
        archive_path: &Path,
        member: &str,
        e: impl std::fmt::Display,
    ) -> ExtractionError {
        ExtractionError::Member {
            path: archive_path.to_path_buf(),
            member: member.to_string(),
            reason: e.to_string(),
        }
    }
}
