/// Error messages
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    // === path operations ===
    #[error("path should be utf-8: {0}")]
    NotUTF8(String),

    // === file operations ===
    #[error("failed to write to `{0}`")]
    WriteFile(String),
    #[error("failed to remove file `{0}`")]
    RemoveFile(String),
    #[error("failed to rename `{0}` to `{1}`")]
    RenameFile(String, String),
    #[error("failed to stat `{0}`")]
    Stat(String),
    #[error("`{0}` does not exist")]
    NotFound(String),
    #[error("`{0}` is not a regular file")]
    NotAFile(String),

    // === process operations ===
    #[error("cannot find executable `{0}`")]
    Which(String),
    #[error("failed to spawn `{0}`")]
    Spawn(String),
    #[error("failed to execute `{0}`")]
    Subcommand(String),

    // === actions runner ===
    #[error("value of `{0}` contains the file command delimiter")]
    FileCommandDelimiter(String),
}
