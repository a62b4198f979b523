//! Resolution of metadata fields
//!
//! Each field comes from an explicit input, then the CI environment,
//! then a default. Empty values count as unset.
use buildcommon::prelude::*;

use crate::error::Error;

/// Organization used when no `org` input is given
pub const DEFAULT_ORG: &str = "hashicorp";

/// File name used when no `metadataFileName` input is given
pub const DEFAULT_METADATA_FILE_NAME: &str = "metadata.json";

pub const GITHUB_HEAD_REF: &str = "GITHUB_HEAD_REF";
pub const GITHUB_REF: &str = "GITHUB_REF";
pub const GITHUB_SHA: &str = "GITHUB_SHA";
pub const GITHUB_REPOSITORY: &str = "GITHUB_REPOSITORY";
pub const GITHUB_RUN_ID: &str = "GITHUB_RUN_ID";

/// Resolve a value from an explicit value, a fallback lookup
/// and a default, in that order
///
/// The fallback is only evaluated when the explicit value is empty.
/// Returns `None` if all of them are empty.
pub fn resolve(
    explicit: &str,
    fallback: impl FnOnce() -> String,
    default: Option<&str>,
) -> Option<String> {
    if !explicit.is_empty() {
        return Some(explicit.to_string());
    }
    let value = fallback();
    if !value.is_empty() {
        return Some(value);
    }
    default.filter(|x| !x.is_empty()).map(str::to_string)
}

/// Resolve the branch under build
///
/// The input is only used when GITHUB_HEAD_REF is empty (not a pull request).
/// Otherwise GITHUB_HEAD_REF wins, and GITHUB_REF without `refs/heads/`
/// is the last resort.
pub fn branch(explicit: &str, env: &impl EnvSource) -> String {
    let head_ref = env.var(GITHUB_HEAD_REF);
    let git_ref = env.var(GITHUB_REF);
    infoln!("Head ref", "{}={}", GITHUB_HEAD_REF, head_ref);
    infoln!("Ref", "{}={}", GITHUB_REF, git_ref);

    if !explicit.is_empty() && head_ref.is_empty() {
        return explicit.to_string();
    }
    resolve(
        &head_ref,
        || {
            git_ref
                .strip_prefix("refs/heads/")
                .unwrap_or(&git_ref)
                .to_string()
        },
        None,
    )
    .unwrap_or_default()
}

/// Resolve the metadata file name
pub fn metadata_file_name(explicit: &str) -> String {
    resolve(explicit, String::new, Some(DEFAULT_METADATA_FILE_NAME))
        .unwrap_or_else(|| DEFAULT_METADATA_FILE_NAME.to_string())
}

/// Resolve the product. Required
pub fn product(explicit: &str) -> Result<String, Error> {
    match resolve(explicit, String::new, None) {
        Some(product) => Ok(product),
        None => {
            hintln!("Consider", "Set the `product` input of the action");
            Err(report!(Error::MissingInput("product")))
                .attach_printable("set the `product` input of the action")
        }
    }
}

/// Resolve the commit SHA. May be empty
pub fn sha(explicit: &str, env: &impl EnvSource) -> String {
    resolve(explicit, || env.var(GITHUB_SHA), None).unwrap_or_default()
}

/// Resolve the repository owner
pub fn org(explicit: &str) -> String {
    resolve(explicit, String::new, Some(DEFAULT_ORG)).unwrap_or_else(|| DEFAULT_ORG.to_string())
}

/// Resolve the repository name
///
/// Without an input, this is the `repo` part of GITHUB_REPOSITORY (`org/repo`)
pub fn repo(explicit: &str, env: &impl EnvSource) -> Result<String, Error> {
    if !explicit.is_empty() {
        return Ok(explicit.to_string());
    }
    let repository = env.var(GITHUB_REPOSITORY);
    match repository.split('/').nth(1) {
        Some(name) if !name.is_empty() => Ok(name.to_string()),
        _ => {
            hintln!("Consider", "Set the `repo` input, or GITHUB_REPOSITORY to `org/repo`");
            Err(report!(Error::MalformedRepository(repository)))
                .attach_printable("set the `repo` input, or GITHUB_REPOSITORY to `org/repo`")
        }
    }
}

/// Resolve the CI run identifier. There is no input for it
pub fn build_workflow_id(env: &impl EnvSource) -> Result<String, Error> {
    match resolve("", || env.var(GITHUB_RUN_ID), None) {
        Some(id) => Ok(id),
        None => {
            hintln!("Consider", "Run the tool as a step of a GitHub Actions workflow");
            Err(report!(Error::MissingRunId))
                .attach_printable("the tool must run inside a GitHub Actions workflow")
        }
    }
}
