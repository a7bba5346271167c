//! Out-of-band identifier storage attached to a file.
//!
//! Not every platform or filesystem can hold extended attributes, so reads and
//! writes report `Unsupported` separately from "no value".

use std::io;
use std::path::Path;

use crate::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataRead {
    Value(String),
    Absent,
    Unsupported,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataWrite {
    Written,
    Unsupported,
}

/// Capability to read and write one metadata value on a file.
pub trait MetadataStore: Send + Sync {
    fn read(&self, path: &Path) -> Result<MetadataRead, Error>;

    fn write(&self, path: &Path, value: &str) -> Result<MetadataWrite, Error>;
}

/// Extended-attribute backed metadata, one namespaced attribute per file.
#[derive(Debug, Clone)]
pub struct XattrMetadata {
    name: String,
}

impl XattrMetadata {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl MetadataStore for XattrMetadata {
    fn read(&self, path: &Path) -> Result<MetadataRead, Error> {
        if !xattr::SUPPORTED_PLATFORM {
            return Ok(MetadataRead::Unsupported);
        }
        match xattr::get(path, &self.name) {
            Ok(Some(bytes)) => Ok(MetadataRead::Value(String::from_utf8_lossy(&bytes).into_owned())),
            Ok(None) => Ok(MetadataRead::Absent),
            Err(e) if is_unsupported(&e) => Ok(MetadataRead::Unsupported),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(Error::io(path, e)),
            Err(source) => Err(Error::Metadata { path: path.to_path_buf(), source }),
        }
    }

    fn write(&self, path: &Path, value: &str) -> Result<MetadataWrite, Error> {
        if !xattr::SUPPORTED_PLATFORM {
            return Ok(MetadataWrite::Unsupported);
        }
        match xattr::set(path, &self.name, value.as_bytes()) {
            Ok(()) => Ok(MetadataWrite::Written),
            Err(e) if is_unsupported(&e) => Ok(MetadataWrite::Unsupported),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(Error::io(path, e)),
            Err(source) => Err(Error::Metadata { path: path.to_path_buf(), source }),
        }
    }
}

#[cfg(unix)]
fn is_unsupported(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::Unsupported || err.raw_os_error() == Some(libc::ENOTSUP)
}

#[cfg(not(unix))]
fn is_unsupported(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::Unsupported
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xattr_roundtrip_or_unsupported() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let store = XattrMetadata::new("user.hashstore.test");

        match store.write(file.path(), "12").unwrap() {
            MetadataWrite::Written => {
                assert_eq!(store.read(file.path()).unwrap(), MetadataRead::Value("12".to_string()));
            }
            MetadataWrite::Unsupported => {
                assert_eq!(store.read(file.path()).unwrap(), MetadataRead::Unsupported);
            }
        }
    }

    #[test]
    fn test_xattr_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = XattrMetadata::new("user.hashstore.test");
        let missing = dir.path().join("missing");
        if xattr::SUPPORTED_PLATFORM {
            assert!(matches!(store.read(&missing), Err(Error::Io { .. })));
            assert!(matches!(store.write(&missing, "1"), Err(Error::Io { .. })));
        }
    }
}
