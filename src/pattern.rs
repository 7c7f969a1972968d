//! Recognition of FASTQ filenames and derivation of sibling read files.
//!
//! Sequencers and demultiplexing pipelines name their output according to a
//! loose convention: the first-read ("R1") file of a sample is named
//! `<sample>_1.fastq.gz`, `<sample>_R1.fastq.gz` or, with bcl2fastq-style
//! lane indices, `<sample>_R1_001.fastq.gz`. The corresponding second read
//! only differs in the read number (`_R2_001`), so the whole file group can
//! be derived from the R1 filename alone.
//!
//! Instead of opaque regex capture groups, the filename is parsed into an
//! [`R1Parts`](R1Parts) structure, and sibling names are reconstructed
//! field by field. The grammar, written as a regex, is
//!
//! ```text
//! ^(?P<prefix>.*)_(?P<letter>R?)1(?P<lane_index>_\d+)?(?P<ext>\.(fq|fastq)(\.gz)?)$
//! ```
//!
//! where the read digit following `_R?` must be exactly `1`. Extension
//! matching is case-sensitive.
//!
//! # Example
//!
//! ```rust
//! use fastq_pairs::pattern::{get_rn_fastq, get_sample_id_from_r1, is_fastq_r1};
//! use std::path::Path;
//!
//! let r1 = Path::new("data/H4L1-4_S64_L001_R1_001.fastq.gz");
//! assert!(is_fastq_r1(r1));
//! assert_eq!(get_sample_id_from_r1(r1).unwrap(), "H4L1-4_S64_L001");
//! assert_eq!(
//!     get_rn_fastq(r1, 2).unwrap(),
//!     Path::new("data/H4L1-4_S64_L001_R2_001.fastq.gz")
//! );
//! ```

use memchr::memrchr;
use std::fmt;
use std::path::{Path, PathBuf};

pub type Result<T> = std::result::Result<T, PatternMismatch>;

/// Error returned when a path expected to name an R1 FASTQ file does not
/// match the R1 pattern. Carries the offending path.
///
/// Callers performing speculative matching should test with
/// [`is_fastq_r1`](is_fastq_r1) first instead of relying on this error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternMismatch {
    path: PathBuf,
}

impl PatternMismatch {
    #[inline]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        PatternMismatch { path: path.into() }
    }

    /// Returns the path that failed to match.
    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl fmt::Display for PatternMismatch {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "path did not match the R1 FASTQ pattern: {}",
            self.path.display()
        )
    }
}

impl std::error::Error for PatternMismatch {}

/// The dissected filename of an R1 FASTQ file.
///
/// All fields borrow from the filename the struct was parsed from.
/// [`with_read_number()`](R1Parts::with_read_number) reconstructs a sibling
/// filename, leaving every field other than the read number untouched
/// byte for byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct R1Parts<'a> {
    /// Everything before the `_R?1` read designator (the sample ID).
    pub prefix: &'a str,
    /// Whether the read number is preceded by the letter `R`.
    pub read_letter: bool,
    /// Optional numeric lane/index block following the read number,
    /// including its leading underscore (e.g. `_001`).
    pub lane_index: Option<&'a str>,
    /// File extension including the leading dot (e.g. `.fastq.gz`).
    pub extension: &'a str,
}

impl<'a> R1Parts<'a> {
    /// Parses an R1 FASTQ filename. Returns `None` if the name does not
    /// match the R1 grammar, in particular if the read digit is anything
    /// other than `1`.
    pub fn parse(name: &'a str) -> Option<Self> {
        let (stem, extension) = split_fastq_extension(name)?;
        // The prefix is greedy: a trailing `_1` is always taken as the read
        // designator, and a lane block is only split off if the name cannot
        // be matched without one (`x_1_1.fq` has prefix `x_1`, not `x`).
        if let Some((prefix, read_letter)) = split_read_designator(stem) {
            return Some(R1Parts {
                prefix,
                read_letter,
                lane_index: None,
                extension,
            });
        }
        let underscore = memrchr(b'_', stem.as_bytes())?;
        let (rest, lane_index) = stem.split_at(underscore);
        if lane_index.len() < 2 || !lane_index[1..].bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let (prefix, read_letter) = split_read_designator(rest)?;
        Some(R1Parts {
            prefix,
            read_letter,
            lane_index: Some(lane_index),
            extension,
        })
    }

    /// Builds the filename of the R`n` sibling, substituting only the read
    /// number. `with_read_number(1)` returns the original filename.
    pub fn with_read_number(&self, n: u32) -> String {
        let mut name = String::with_capacity(self.prefix.len() + self.extension.len() + 8);
        name.push_str(self.prefix);
        name.push('_');
        if self.read_letter {
            name.push('R');
        }
        name.push_str(&n.to_string());
        if let Some(lane_index) = self.lane_index {
            name.push_str(lane_index);
        }
        name.push_str(self.extension);
        name
    }
}

/// Splits `name` into stem and FASTQ extension (`.fq`/`.fastq`, optionally
/// followed by `.gz`). Returns `None` for non-FASTQ names.
fn split_fastq_extension(name: &str) -> Option<(&str, &str)> {
    let stem_len = name.len() - fastq_extension_len(name)?;
    Some(name.split_at(stem_len))
}

fn fastq_extension_len(name: &str) -> Option<usize> {
    let (rest, gz_len) = match name.strip_suffix(".gz") {
        Some(rest) => (rest, ".gz".len()),
        None => (name, 0),
    };
    if rest.ends_with(".fastq") {
        Some(".fastq".len() + gz_len)
    } else if rest.ends_with(".fq") {
        Some(".fq".len() + gz_len)
    } else {
        None
    }
}

/// Splits a trailing `_1` or `_R1` read designator off `stem`, returning
/// the remaining prefix and whether the `R` letter was present.
fn split_read_designator(stem: &str) -> Option<(&str, bool)> {
    let rest = stem.strip_suffix('1')?;
    if let Some(prefix) = rest.strip_suffix("_R") {
        Some((prefix, true))
    } else if let Some(prefix) = rest.strip_suffix('_') {
        Some((prefix, false))
    } else {
        None
    }
}

fn file_name(path: &Path) -> Option<&str> {
    path.file_name().and_then(|name| name.to_str())
}

/// Returns whether the filename of `path` looks like a FASTQ file
/// (`.fq`, `.fastq`, `.fq.gz` or `.fastq.gz`). Purely syntactic, the
/// filesystem is not consulted.
#[inline]
pub fn is_fastq(path: &Path) -> bool {
    file_name(path).map_or(false, |name| fastq_extension_len(name).is_some())
}

/// Returns whether `path` names a FASTQ file *and* exists as a regular file.
#[inline]
pub fn is_fastq_file(path: &Path) -> bool {
    is_fastq(path) && path.is_file()
}

/// Returns whether the filename of `path` matches the R1 FASTQ pattern.
/// Files of other read numbers (`_2.fq.gz`, `_R2.fastq`, ...) are rejected.
/// Purely syntactic, the filesystem is not consulted.
#[inline]
pub fn is_fastq_r1(path: &Path) -> bool {
    file_name(path).map_or(false, |name| R1Parts::parse(name).is_some())
}

/// Returns whether `path` matches the R1 pattern *and* exists as a
/// regular file.
#[inline]
pub fn is_fastq_r1_file(path: &Path) -> bool {
    is_fastq_r1(path) && path.is_file()
}

/// Extracts the sample ID from an R1 FASTQ path: the filename portion
/// before the read designator and extension. All members of one read group
/// share the same sample ID.
///
/// Fails with [`PatternMismatch`](PatternMismatch) if the filename does not
/// match the R1 pattern.
pub fn get_sample_id_from_r1(path: &Path) -> Result<String> {
    let parts = file_name(path)
        .and_then(R1Parts::parse)
        .ok_or_else(|| PatternMismatch::new(path))?;
    Ok(parts.prefix.to_string())
}

/// Derives the path of the R`n` file belonging to the same group as the
/// given R1 file, preserving prefix, the optional `R` letter, the optional
/// lane/index block and the extension exactly. `n` may be any positive
/// read number; for `n = 1` the returned path equals the input.
///
/// Fails with [`PatternMismatch`](PatternMismatch) if the filename does not
/// match the R1 pattern.
pub fn get_rn_fastq(path: &Path, n: u32) -> Result<PathBuf> {
    let parts = file_name(path)
        .and_then(R1Parts::parse)
        .ok_or_else(|| PatternMismatch::new(path))?;
    Ok(path.with_file_name(parts.with_read_number(n)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple() {
        let parts = R1Parts::parse("B001A001_1.fastq").unwrap();
        assert_eq!(
            parts,
            R1Parts {
                prefix: "B001A001",
                read_letter: false,
                lane_index: None,
                extension: ".fastq",
            }
        );
    }

    #[test]
    fn parse_lane_indexed() {
        let parts = R1Parts::parse("H4L1-4_S64_L001_R1_001.fastq.gz").unwrap();
        assert_eq!(
            parts,
            R1Parts {
                prefix: "H4L1-4_S64_L001",
                read_letter: true,
                lane_index: Some("_001"),
                extension: ".fastq.gz",
            }
        );
    }

    #[test]
    fn greedy_prefix_wins_over_lane_block() {
        // both readings are grammatical; the longer prefix is chosen
        let parts = R1Parts::parse("x_1_1.fq").unwrap();
        assert_eq!(parts.prefix, "x_1");
        assert_eq!(parts.lane_index, None);
    }

    #[test]
    fn rejects_other_read_numbers() {
        assert!(R1Parts::parse("B001A001_2.fq.gz").is_none());
        assert!(R1Parts::parse("H4L1-4_S64_L001_R2_001.fastq.gz").is_none());
        assert!(R1Parts::parse("sample_R3.fastq").is_none());
    }

    #[test]
    fn rejects_missing_designator() {
        assert!(R1Parts::parse("sample.fastq").is_none());
        assert!(R1Parts::parse("sampleR1.fastq").is_none());
        assert!(R1Parts::parse("sample_1.txt").is_none());
    }

    #[test]
    fn extension_is_case_sensitive() {
        assert!(!is_fastq(Path::new("a_1.FASTQ")));
        assert!(!is_fastq(Path::new("a_1.fq.GZ")));
    }
}
