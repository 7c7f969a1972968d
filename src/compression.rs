//! Opening files that may be compressed, chosen by file extension.
//!
//! FASTQ files arrive gzipped more often than not, and occasionally as
//! bzip2 or xz. [`reader()`](reader) hides the difference behind a
//! `BufRead` trait object:
//!
//! ```no_run
//! use std::io::BufRead;
//! use std::path::Path;
//!
//! let reader = fastq_pairs::compression::reader(Path::new("reads_R1.fastq.gz")).unwrap();
//! let lines = reader.lines().count();
//! println!("{} lines", lines);
//! ```

use bzip2::read::BzDecoder;
use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io;
use std::io::{BufRead, BufReader};
use std::path::Path;
use xz2::read::XzDecoder;

/// Compression format of a file, determined from its final extension.
/// Unknown extensions are treated as uncompressed text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Text,
    Gzip,
    Bzip2,
    Xz,
}

impl Format {
    /// Determines the format from the last extension of `path`
    /// (case-sensitive: `gz`, `bz2` or `xz`).
    pub fn from_path(path: &Path) -> Format {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("gz") => Format::Gzip,
            Some("bz2") => Format::Bzip2,
            Some("xz") => Format::Xz,
            _ => Format::Text,
        }
    }
}

/// Opens `path` for buffered reading, decompressing according to
/// [`Format::from_path`](Format::from_path).
pub fn reader(path: &Path) -> io::Result<Box<dyn BufRead>> {
    let file = File::open(path)?;
    Ok(match Format::from_path(path) {
        Format::Text => Box::new(BufReader::new(file)),
        Format::Gzip => Box::new(BufReader::new(MultiGzDecoder::new(file))),
        Format::Bzip2 => Box::new(BufReader::new(BzDecoder::new(file))),
        Format::Xz => Box::new(BufReader::new(XzDecoder::new(file))),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_by_extension() {
        assert_eq!(Format::from_path(Path::new("a.fastq.gz")), Format::Gzip);
        assert_eq!(Format::from_path(Path::new("a.fq.bz2")), Format::Bzip2);
        assert_eq!(Format::from_path(Path::new("a.fastq.xz")), Format::Xz);
        assert_eq!(Format::from_path(Path::new("a.fastq")), Format::Text);
        assert_eq!(Format::from_path(Path::new("a")), Format::Text);
    }
}
