//! Minimal FASTQ record reading and writing.
//!
//! The reader takes the format at its word: a record is exactly four lines
//! (header, sequence, separator, quality), read with a fixed stride and no
//! content validation. Line endings (`\n` or `\r\n`) are stripped.
//!
//! # Example
//!
//! ```rust
//! use fastq_pairs::fastq::Reader;
//!
//! let input = b"@id1\nACGT\n+\nIIII\n@id2\nTGCA\n+\nIIII\n";
//! let mut reader = Reader::new(&input[..]);
//!
//! let mut output = vec![];
//! while let Some(record) = reader.read_next().unwrap() {
//!     record.write(&mut output).unwrap();
//! }
//! assert_eq!(output.as_slice(), &input[..]);
//! ```

use crate::compression;
use serde_derive::{Deserialize, Serialize};
use std::fmt;
use std::io;
use std::io::BufRead;
use std::path::Path;

pub type Result<T> = std::result::Result<T, Error>;

/// Error reading a FASTQ record.
#[derive(Debug)]
pub enum Error {
    /// `std::io::Error`
    Io(io::Error),
    /// The input ended in the middle of a record. The line index (0-based
    /// within the record, 1..=3) indicates which line was missing.
    UnexpectedEnd { line: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Io(e) => e.fmt(f),
            Error::UnexpectedEnd { line } => write!(
                f,
                "FASTQ record truncated: input ended before line {} of 4",
                line + 1
            ),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Error {
        Error::Io(e)
    }
}

/// A FASTQ record owning its data: the four raw lines with line
/// terminators stripped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnedRecord {
    /// Header line, including the leading `@`.
    pub head: Vec<u8>,
    pub seq: Vec<u8>,
    /// Separator line, including the leading `+` (and anything after it).
    pub sep: Vec<u8>,
    pub qual: Vec<u8>,
}

impl OwnedRecord {
    /// Writes the record in FASTQ format, each line terminated with `\n`.
    pub fn write<W: io::Write>(&self, mut writer: W) -> io::Result<()> {
        writer.write_all(&self.head)?;
        writer.write_all(b"\n")?;
        writer.write_all(&self.seq)?;
        writer.write_all(b"\n")?;
        writer.write_all(&self.sep)?;
        writer.write_all(b"\n")?;
        writer.write_all(&self.qual)?;
        writer.write_all(b"\n")
    }
}

/// Fixed-stride FASTQ parser reading four lines per record.
pub struct Reader<R: BufRead> {
    reader: R,
}

impl Reader<Box<dyn BufRead>> {
    /// Opens a FASTQ file, decompressing it according to its extension
    /// (see [`compression`](crate::compression)).
    pub fn from_path(path: &Path) -> io::Result<Self> {
        Ok(Reader::new(compression::reader(path)?))
    }
}

impl<R: BufRead> Reader<R> {
    #[inline]
    pub fn new(reader: R) -> Self {
        Reader { reader }
    }

    /// Reads the next record. Returns `Ok(None)` on clean end of input;
    /// input ending within a record is an
    /// [`UnexpectedEnd`](Error::UnexpectedEnd) error.
    pub fn read_next(&mut self) -> Result<Option<OwnedRecord>> {
        let mut record = OwnedRecord::default();
        let lines = [
            &mut record.head,
            &mut record.seq,
            &mut record.sep,
            &mut record.qual,
        ];
        for (i, line) in lines.into_iter().enumerate() {
            if !read_line(&mut self.reader, line)? {
                if i == 0 {
                    return Ok(None);
                }
                return Err(Error::UnexpectedEnd { line: i });
            }
        }
        Ok(Some(record))
    }

    /// Returns an iterator over all remaining records.
    #[inline]
    pub fn records(self) -> RecordsIter<R> {
        RecordsIter { reader: self }
    }
}

/// Iterator over [`OwnedRecord`](OwnedRecord)s, obtained from
/// [`Reader::records`](Reader::records).
pub struct RecordsIter<R: BufRead> {
    reader: Reader<R>,
}

impl<R: BufRead> Iterator for RecordsIter<R> {
    type Item = Result<OwnedRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.reader.read_next().transpose()
    }
}

/// Reads one line into `buf`, stripping `\n` / `\r\n`. Returns `false` if
/// the input is exhausted and nothing was read.
fn read_line<R: BufRead>(reader: &mut R, buf: &mut Vec<u8>) -> io::Result<bool> {
    if reader.read_until(b'\n', buf)? == 0 {
        return Ok(false);
    }
    if buf.last() == Some(&b'\n') {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    }
    Ok(true)
}

/// Returns the reverse complement of a DNA sequence. Bases are uppercased,
/// `A`/`T` and `C`/`G` are swapped, anything else becomes `N`.
pub fn reverse_complement(seq: &[u8]) -> Vec<u8> {
    seq.iter()
        .rev()
        .map(|b| match b.to_ascii_uppercase() {
            b'A' => b'T',
            b'T' => b'A',
            b'G' => b'C',
            b'C' => b'G',
            _ => b'N',
        })
        .collect()
}
