//! Discovery and grouping of FASTQ files in directory trees.
//!
//! [`find_r1_fastq_files()`](find_r1_fastq_files) walks a directory and
//! yields every R1 FASTQ file in it. [`find_grouped_fastq_files()`](find_grouped_fastq_files)
//! goes one step further: for each R1 file it derives the expected
//! R2..R*n* sibling paths and yields the complete group, R1 first. Groups
//! with missing members are never yielded; they are only reported on
//! stderr when `verbose` is set. Incompleteness is not an error.
//!
//! Both functions return lazy iterators; the filesystem is only touched as
//! items are pulled. Directory entries are visited in filename order, so
//! results are deterministic for a given tree. Filesystem errors during
//! the walk surface as `io::Error` items.
//!
//! # Example
//!
//! ```no_run
//! use std::path::PathBuf;
//!
//! let dirs = [PathBuf::from("run1"), PathBuf::from("run2")];
//! for group in fastq_pairs::group::find_grouped_fastq_files(&dirs, 2, true) {
//!     let group = group.unwrap();
//!     println!("R1: {}, R2: {}", group[0].display(), group[1].display());
//! }
//! ```

use crate::pattern::{get_rn_fastq, is_fastq, is_fastq_r1_file};
use std::collections::BTreeMap;
use std::io;
use std::io::Write;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// ANSI style for reported complete groups (bold green).
pub const GROUPED_FASTQ_COLOR: &str = "\x1b[01;32m";
/// ANSI style for reported incomplete groups (bold red).
pub const UNGROUPED_COLOR: &str = "\x1b[01;31m";
/// ANSI style reset.
pub const NO_COLOR: &str = "\x1b[00m";

/// Recursively finds all R1 FASTQ files under `directory`.
///
/// The returned iterator is lazy and yields paths in filename-sorted
/// walk order.
pub fn find_r1_fastq_files(directory: &Path) -> R1Files {
    R1Files {
        walk: WalkDir::new(directory).sort_by_file_name().into_iter(),
    }
}

/// Iterator over the R1 FASTQ files in a directory tree, created with
/// [`find_r1_fastq_files()`](find_r1_fastq_files).
pub struct R1Files {
    walk: walkdir::IntoIter,
}

impl Iterator for R1Files {
    type Item = io::Result<PathBuf>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.walk.next()? {
                Err(e) => return Some(Err(e.into())),
                Ok(entry) => {
                    let path = entry.into_path();
                    if is_fastq_r1_file(&path) {
                        return Some(Ok(path));
                    }
                }
            }
        }
    }
}

/// Finds complete groups of `n` read files (R1 through R`n`) under each of
/// the given directories.
///
/// For every discovered R1 file the sibling paths are derived with
/// [`get_rn_fastq`](crate::pattern::get_rn_fastq). If all `n` files exist,
/// the group is yielded as a vector of length `n` with the R1 file first.
/// Otherwise the group is skipped; with `verbose` set, the members that do
/// exist are reported on stderr, colorized distinctly from complete groups.
///
/// # Panics
///
/// Panics if `n` is zero.
pub fn find_grouped_fastq_files<P: AsRef<Path>>(
    directories: &[P],
    n: u32,
    verbose: bool,
) -> GroupedFastqFiles {
    assert!(n >= 1, "group size must be at least 1");
    let directories: Vec<PathBuf> = directories
        .iter()
        .map(|dir| dir.as_ref().to_path_buf())
        .collect();
    GroupedFastqFiles {
        directories: directories.into_iter(),
        current: None,
        n,
        verbose,
    }
}

/// Iterator over complete FASTQ file groups, created with
/// [`find_grouped_fastq_files()`](find_grouped_fastq_files).
pub struct GroupedFastqFiles {
    directories: std::vec::IntoIter<PathBuf>,
    current: Option<R1Files>,
    n: u32,
    verbose: bool,
}

impl Iterator for GroupedFastqFiles {
    type Item = io::Result<Vec<PathBuf>>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(files) = self.current.as_mut() {
                match files.next() {
                    Some(Ok(r1_fastq_file)) => {
                        if let Some(group) = try_group(r1_fastq_file, self.n, self.verbose) {
                            return Some(Ok(group));
                        }
                    }
                    Some(Err(e)) => return Some(Err(e)),
                    None => self.current = None,
                }
            } else {
                let directory = self.directories.next()?;
                self.current = Some(find_r1_fastq_files(&directory));
            }
        }
    }
}

/// Derives the putative group for an R1 file and checks it on disk.
fn try_group(r1_fastq_file: PathBuf, n: u32, verbose: bool) -> Option<Vec<PathBuf>> {
    let mut fastq_files = Vec::with_capacity(n as usize);
    fastq_files.push(r1_fastq_file);
    for i in 2..=n {
        // only called with paths that already passed is_fastq_r1_file
        let sibling =
            get_rn_fastq(&fastq_files[0], i).expect("path no longer matches the R1 FASTQ pattern");
        fastq_files.push(sibling);
    }

    if fastq_files.iter().all(|fq| fq.is_file()) {
        if verbose {
            let _ = report_grouped(io::stderr().lock(), &fastq_files);
        }
        Some(fastq_files)
    } else {
        if verbose {
            let _ = report_ungrouped(io::stderr().lock(), &fastq_files);
        }
        None
    }
}

fn report_grouped<W: Write>(mut out: W, fastq_files: &[PathBuf]) -> io::Result<()> {
    writeln!(
        out,
        "{}Found group of {} FASTQ files:{}",
        GROUPED_FASTQ_COLOR,
        fastq_files.len(),
        NO_COLOR
    )?;
    for fq in fastq_files {
        writeln!(out, "\t{}", fq.display())?;
    }
    Ok(())
}

fn report_ungrouped<W: Write>(mut out: W, fastq_files: &[PathBuf]) -> io::Result<()> {
    writeln!(
        out,
        "{}Found ungrouped FASTQ file(s):{}",
        UNGROUPED_COLOR, NO_COLOR
    )?;
    for fq in fastq_files {
        if fq.is_file() {
            writeln!(out, "\t{}", fq.display())?;
        }
    }
    Ok(())
}

/// Recursively finds all FASTQ files under `root` and groups them by their
/// containing directory, expressed relative to `root` (files directly in
/// `root` are keyed by the empty path). Directories without FASTQ files do
/// not appear in the mapping.
pub fn collect_fastq_files_by_directory(root: &Path) -> io::Result<BTreeMap<PathBuf, Vec<PathBuf>>> {
    let mut files_by_directory: BTreeMap<PathBuf, Vec<PathBuf>> = BTreeMap::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.into_path();
        if !is_fastq(&path) {
            continue;
        }
        let directory = path
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .strip_prefix(root)
            .unwrap_or_else(|_| Path::new(""))
            .to_path_buf();
        files_by_directory.entry(directory).or_default().push(path);
    }
    Ok(files_by_directory)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grouped_report_format() {
        let files = [PathBuf::from("a_R1.fq"), PathBuf::from("a_R2.fq")];
        let mut out = vec![];
        report_grouped(&mut out, &files).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "\x1b[01;32mFound group of 2 FASTQ files:\x1b[00m\n\ta_R1.fq\n\ta_R2.fq\n"
        );
    }

    #[test]
    fn ungrouped_report_lists_only_existing_files() {
        // neither file exists, so only the header line is printed
        let files = [PathBuf::from("a_R1.fq"), PathBuf::from("a_R2.fq")];
        let mut out = vec![];
        report_ungrouped(&mut out, &files).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "\x1b[01;31mFound ungrouped FASTQ file(s):\x1b[00m\n");
    }
}
