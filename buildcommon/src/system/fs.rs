use crate::prelude::*;

use std::ffi::OsString;
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use super::Error;

/// Write content to a file, replacing it atomically
///
/// The content is written and synced to `<path>.tmp` first, then renamed
/// over `path`. The temporary file is removed if any step fails, so `path`
/// either has the full new content or is left untouched. The file ends up
/// with mode 0644 on unix. The parent directory must already exist.
pub fn write_file_atomic(path: impl AsRef<Path>, content: impl AsRef<[u8]>) -> Result<(), Error> {
    let path = path.as_ref();
    let temp = temp_path(path);
    verboseln!("write '{}'", temp.display());
    let result = write_synced(&temp, content.as_ref()).and_then(|_| {
        verboseln!("mv '{}' '{}'", temp.display(), path.display());
        std::fs::rename(&temp, path).change_context_lazy(|| {
            Error::RenameFile(temp.display().to_string(), path.display().to_string())
        })
    });
    if result.is_err() && temp.exists() {
        verboseln!("rm '{}'", temp.display());
        let _ = std::fs::remove_file(&temp);
    }
    result
}

fn temp_path(path: &Path) -> PathBuf {
    let mut temp = OsString::from(path.as_os_str());
    temp.push(".tmp");
    PathBuf::from(temp)
}

fn write_synced(path: &Path, content: &[u8]) -> Result<(), Error> {
    // a stale temp file (or symlink) from a killed run must not be reused
    if path.symlink_metadata().is_ok() {
        verboseln!("rm '{}'", path.display());
        std::fs::remove_file(path)
            .change_context_lazy(|| Error::RemoveFile(path.display().to_string()))?;
    }
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o644);
    }
    let file = options
        .open(path)
        .change_context_lazy(|| Error::WriteFile(path.display().to_string()))?;
    // mode() is masked by umask
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(std::fs::Permissions::from_mode(0o644))
            .change_context_lazy(|| Error::WriteFile(path.display().to_string()))?;
    }
    let mut writer = BufWriter::new(file);
    writer
        .write_all(content)
        .change_context_lazy(|| Error::WriteFile(path.display().to_string()))?;
    writer
        .flush()
        .change_context_lazy(|| Error::WriteFile(path.display().to_string()))?;
    writer
        .get_ref()
        .sync_all()
        .change_context_lazy(|| Error::WriteFile(path.display().to_string()))
}

/// Append content to a file, creating it if needed
pub fn append_file(path: impl AsRef<Path>, content: impl AsRef<[u8]>) -> Result<(), Error> {
    let path = path.as_ref();
    let mut file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)
        .change_context_lazy(|| Error::WriteFile(path.display().to_string()))?;
    file.write_all(content.as_ref())
        .change_context_lazy(|| Error::WriteFile(path.display().to_string()))
}

/// Check that `path` exists and is a regular file
pub fn check_regular_file(path: impl AsRef<Path>) -> Result<(), Error> {
    let path = path.as_ref();
    let metadata = match std::fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(report!(e).change_context(Error::NotFound(path.display().to_string())));
        }
        Err(e) => {
            return Err(report!(e).change_context(Error::Stat(path.display().to_string())));
        }
    };
    if !metadata.is_file() {
        return Err(report!(Error::NotAFile(path.display().to_string())));
    }
    Ok(())
}
