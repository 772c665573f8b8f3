use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use crate::error::{DataError, Result};

/// Where a CSV comes from: a path still to be opened, or a reader the
/// caller has already opened.
///
/// Either way the repository takes ownership and drops the handle as soon
/// as loading finishes or fails, which closes it.
pub enum DataSource<'a> {
    Path(PathBuf),
    Reader(Box<dyn Read + 'a>),
}

impl<'a> DataSource<'a> {
    pub fn from_reader<R: Read + 'a>(reader: R) -> Self {
        DataSource::Reader(Box::new(reader))
    }

    /// Produce the readable handle. Paths are opened here.
    pub fn open(self) -> Result<Box<dyn Read + 'a>> {
        match self {
            DataSource::Path(path) => {
                let file = File::open(&path).map_err(|source| DataError::Open { path, source })?;
                Ok(Box::new(BufReader::new(file)))
            }
            DataSource::Reader(reader) => Ok(reader),
        }
    }
}

impl fmt::Debug for DataSource<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Path(p) => f.debug_tuple("Path").field(p).finish(),
            DataSource::Reader(_) => f.write_str("Reader(..)"),
        }
    }
}

impl fmt::Display for DataSource<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Path(p) => write!(f, "{}", p.display()),
            DataSource::Reader(_) => f.write_str("<reader>"),
        }
    }
}

impl From<&str> for DataSource<'_> {
    fn from(path: &str) -> Self {
        DataSource::Path(PathBuf::from(path))
    }
}

impl From<String> for DataSource<'_> {
    fn from(path: String) -> Self {
        DataSource::Path(PathBuf::from(path))
    }
}

impl From<&Path> for DataSource<'_> {
    fn from(path: &Path) -> Self {
        DataSource::Path(path.to_path_buf())
    }
}

impl From<PathBuf> for DataSource<'_> {
    fn from(path: PathBuf) -> Self {
        DataSource::Path(path)
    }
}

impl From<&PathBuf> for DataSource<'_> {
    fn from(path: &PathBuf) -> Self {
        DataSource::Path(path.clone())
    }
}

impl From<File> for DataSource<'_> {
    fn from(file: File) -> Self {
        DataSource::from_reader(BufReader::new(file))
    }
}
