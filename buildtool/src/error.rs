#[derive(Debug, thiserror::Error)]
pub enum Error {
    // inputs
    #[error("missing input '{0}' value")]
    MissingInput(&'static str),
    #[error("GITHUB_RUN_ID is empty")]
    MissingRunId,
    #[error("GITHUB_REPOSITORY is not in org/repo form: `{0}`")]
    MalformedRepository(String),

    // version
    #[error("failed to setup version using `{0}` command")]
    VersionCommand(String),

    // metadata file
    #[error("failed to serialize metadata")]
    Serialize,
    #[error("failed writing metadata into `{0}`")]
    Write(String),
    #[error("metadata file check failed for `{0}`")]
    PostWriteCheck(String),

    // step outputs
    #[error("failed to set `{0}` for subsequent steps")]
    Output(&'static str),
}
