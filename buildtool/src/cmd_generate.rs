use buildcommon::prelude::*;

use std::path::{Path, PathBuf};

use buildcommon::actions;

use crate::error::Error;
use crate::metadata::Metadata;
use crate::resolve;
use crate::version::{self, ProcessRunner};

/// Name of the step output and exported variable holding the file path
pub const OUTPUT_FILEPATH: &str = "filepath";

/// Inputs of the generator. Empty values are unset
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Config {
    pub branch: String,
    /// Directory to create the file in
    pub file_path: String,
    pub metadata_file_name: String,
    pub product: String,
    pub repo: String,
    pub org: String,
    pub sha: String,
    /// Version, or a command line printing it
    pub version: String,
}

/// Generate the metadata file and expose its path to subsequent steps
///
/// Returns the path of the created file
pub fn run(
    config: &Config,
    env: &impl EnvSource,
    runner: &impl ProcessRunner,
) -> Result<PathBuf, Error> {
    let path = create_metadata_json(config, env, runner)?;
    check_metadata_file(&path)?;

    let value = path
        .to_utf8()
        .change_context(Error::Output(OUTPUT_FILEPATH))?;
    actions::set_output(env, OUTPUT_FILEPATH, &value)
        .change_context(Error::Output(OUTPUT_FILEPATH))?;
    actions::set_env(env, OUTPUT_FILEPATH, &value)
        .change_context(Error::Output(OUTPUT_FILEPATH))?;

    infoln!("Success", "Created {} file", path.display());
    Ok(path)
}

/// Resolve the metadata and write it to `<file_path>/<metadata_file_name>`
pub fn create_metadata_json(
    config: &Config,
    env: &impl EnvSource,
    runner: &impl ProcessRunner,
) -> Result<PathBuf, Error> {
    let branch = resolve::branch(&config.branch, env);
    infoln!("Branch", "{}", branch);

    let path = metadata_path(config);

    let product = resolve::product(&config.product)?;
    infoln!("Product", "{}", product);

    let revision = resolve::sha(&config.sha, env);
    infoln!("SHA", "{}", revision);

    let org = resolve::org(&config.org);
    infoln!("Org", "{}", org);

    let repo = resolve::repo(&config.repo, env)?;
    infoln!("Repo", "{}", repo);

    let build_workflow_id = resolve::build_workflow_id(env)?;
    infoln!("Run", "{}", build_workflow_id);

    let version = version::resolve_version(&config.version, runner)?;
    infoln!("Version", "{}", version);

    let metadata = Metadata {
        branch,
        build_workflow_id,
        product,
        repo,
        org,
        revision,
        version,
    };

    infoln!("Creating", "metadata file in {}", path.display());
    metadata.write(&path)?;
    Ok(path)
}

/// Path of the metadata file: `<file_path>/<metadata_file_name>`
pub fn metadata_path(config: &Config) -> PathBuf {
    let file_name = resolve::metadata_file_name(&config.metadata_file_name);
    Path::new(&config.file_path).into_joined(file_name)
}

/// Check the metadata file is in place after writing it
fn check_metadata_file(path: &Path) -> Result<(), Error> {
    system::check_regular_file(path)
        .change_context_lazy(|| Error::PostWriteCheck(path.display().to_string()))
}
