use crate::prelude::*;

use std::path::{Path, PathBuf};

use super::Error;

/// Path extensions
pub trait PathExt: Sized + AsRef<Path> {
    /// Push `path` onto `self` and return the result
    fn into_joined(self, path: impl AsRef<Path>) -> PathBuf;

    /// Get the path as a utf-8 string, create a report if it's not
    fn to_utf8(&self) -> Result<String, Error> {
        self.as_ref()
            .as_os_str()
            .to_os_string()
            .into_string()
            .map_err(|_| report!(Error::NotUTF8(self.as_ref().display().to_string())))
    }
}

impl PathExt for PathBuf {
    #[inline]
    fn into_joined(mut self, path: impl AsRef<Path>) -> PathBuf {
        self.push(path);
        self
    }
}

impl PathExt for &Path {
    #[inline]
    fn into_joined(self, path: impl AsRef<Path>) -> PathBuf {
        self.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn into_joined_empty_base() {
        let path = PathBuf::new().into_joined("metadata.json");
        assert_eq!(path, Path::new("metadata.json"));
    }

    #[cfg(unix)]
    #[test]
    fn into_joined_directory() {
        let path = Path::new("/tmp/out").into_joined("metadata.json");
        assert_eq!(path.to_utf8().unwrap(), "/tmp/out/metadata.json");
    }
}
