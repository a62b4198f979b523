use buildcommon::print;
use clap::{Args, Parser, ValueEnum};
use derive_more::derive::Deref;

use crate::cmd_generate::Config;

/// Generate a build metadata file in a GitHub Actions workflow
///
/// Every input can also be given through the `INPUT_<NAME>` variable
/// set by the Actions runner.
#[derive(Debug, Clone, PartialEq, Parser, Deref)]
#[clap(bin_name = "actions-metadata")]
pub struct Cli {
    /// Action inputs
    #[clap(flatten)]
    pub inputs: Inputs,

    /// Common options
    #[deref]
    #[clap(flatten)]
    pub options: CommonOptions,
}

impl Cli {
    pub fn apply_print_options(&self) {
        if self.verbose {
            print::verbose_on();
        }

        match self.color {
            Some(ColorOption::Never) => print::color_off(),
            Some(ColorOption::Always) => {
                // color is already on by default
            }
            None => print::auto_color(),
        }
    }
}

/// Inputs of the action
#[derive(Debug, Clone, PartialEq, Default, Args)]
pub struct Inputs {
    /// Branch under build
    ///
    /// Ignored when GITHUB_HEAD_REF is set. Defaults to GITHUB_REF
    /// without the `refs/heads/` prefix
    #[clap(long, env = "INPUT_BRANCH")]
    pub branch: Option<String>,

    /// Directory to create the metadata file in
    #[clap(long, env = "INPUT_FILEPATH")]
    pub file_path: Option<String>,

    /// Name of the metadata file [default: metadata.json]
    #[clap(long, env = "INPUT_METADATAFILENAME")]
    pub metadata_file_name: Option<String>,

    /// Name of the product (required)
    #[clap(long, env = "INPUT_PRODUCT")]
    pub product: Option<String>,

    /// Repository name. Defaults to the name part of GITHUB_REPOSITORY
    #[clap(long, env = "INPUT_REPO")]
    pub repo: Option<String>,

    /// Repository owner [default: hashicorp]
    #[clap(long, env = "INPUT_ORG")]
    pub org: Option<String>,

    /// Commit SHA. Defaults to GITHUB_SHA
    #[clap(long, env = "INPUT_SHA")]
    pub sha: Option<String>,

    /// Version of the product (required)
    ///
    /// A value containing a space is run as a command,
    /// and its output is used as the version
    #[clap(long, env = "INPUT_VERSION")]
    pub version: Option<String>,
}

impl Inputs {
    /// Convert to the generator config, trimming every value
    /// the same way the Actions toolkit does
    pub fn to_config(&self) -> Config {
        fn trimmed(value: &Option<String>) -> String {
            value.as_deref().unwrap_or_default().trim().to_string()
        }
        Config {
            branch: trimmed(&self.branch),
            file_path: trimmed(&self.file_path),
            metadata_file_name: trimmed(&self.metadata_file_name),
            product: trimmed(&self.product),
            repo: trimmed(&self.repo),
            org: trimmed(&self.org),
            sha: trimmed(&self.sha),
            version: trimmed(&self.version),
        }
    }
}

/// Common options
#[derive(Debug, Clone, PartialEq, Args)]
pub struct CommonOptions {
    /// Enable verbose output
    #[clap(short = 'V', long)]
    pub verbose: bool,

    /// Enable error trace
    #[clap(short = 'T', long)]
    pub trace: bool,

    /// Set output color option
    ///
    /// By default, color is enabled when stderr is terminal
    #[clap(long)]
    pub color: Option<ColorOption>,
}

/// Color options for output
#[derive(Debug, Clone, PartialEq, ValueEnum)]
pub enum ColorOption {
    Always,
    Never,
}
