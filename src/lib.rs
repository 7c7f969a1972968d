//! Discovery and pairing of FASTQ sequencing-read files on disk.
//!
//! Paired-end and multi-read sequencing runs produce one FASTQ file per
//! read number, named after a common sample prefix: `sample_R1.fastq.gz`
//! and `sample_R2.fastq.gz`, or with bcl2fastq lane indices,
//! `sample_R1_001.fastq.gz` and `sample_R2_001.fastq.gz`. This crate
//! recognizes those names, derives the sibling filenames and sample ID
//! from an R1 file, and walks directory trees to collect complete file
//! groups as a preprocessing step for genomic pipelines.
//!
//! * [`pattern`](pattern): filename recognition, sample-ID extraction and
//!   read-number substitution. Pure functions, no filesystem access except
//!   for the explicit `*_file` variants.
//! * [`group`](group): recursive discovery of R1 files, grouping of
//!   complete R1..R*n* sets and partitioning of FASTQ files by directory.
//! * [`fastq`](fastq): a minimal four-lines-per-record reader/writer and a
//!   reverse-complement helper.
//! * [`compression`](compression): extension-dispatched decompressing
//!   file opening (gzip, bzip2, xz, plain text).
//!
//! # Example
//!
//! Find all paired R1/R2 groups under a directory and print their
//! sample IDs:
//!
//! ```no_run
//! use fastq_pairs::group::find_grouped_fastq_files;
//! use fastq_pairs::pattern::get_sample_id_from_r1;
//! use std::path::PathBuf;
//!
//! let dirs = [PathBuf::from("sequencing_output")];
//! for group in find_grouped_fastq_files(&dirs, 2, false) {
//!     let group = group.unwrap();
//!     let sample_id = get_sample_id_from_r1(&group[0]).unwrap();
//!     println!("{}: {} files", sample_id, group.len());
//! }
//! ```
//!
//! # Errors
//!
//! Filename-level operations that require an R1 name
//! ([`get_sample_id_from_r1`](pattern::get_sample_id_from_r1),
//! [`get_rn_fastq`](pattern::get_rn_fastq)) fail with
//! [`PatternMismatch`](pattern::PatternMismatch) carrying the offending
//! path. An R1 file whose siblings are missing on disk is *not* an error:
//! the group is skipped and optionally reported (see
//! [`find_grouped_fastq_files`](group::find_grouped_fastq_files)).
//! Filesystem errors during traversal propagate as plain `io::Error`.

pub mod compression;
pub mod fastq;
pub mod group;
pub mod pattern;

pub use crate::fastq::reverse_complement;
pub use crate::group::{
    collect_fastq_files_by_directory, find_grouped_fastq_files, find_r1_fastq_files,
};
pub use crate::pattern::{
    get_rn_fastq, get_sample_id_from_r1, is_fastq, is_fastq_file, is_fastq_r1, is_fastq_r1_file,
    PatternMismatch,
};
