//! Archive extraction into per-archive scratch directories.
//!
//! Archives from the listing are plain ZIP files holding one or more
//! documents. Extraction fails fast within an archive; the orchestrator
//! keeps failures from spreading across archives.

mod zip;


pub use zip::ZipExtractor;
