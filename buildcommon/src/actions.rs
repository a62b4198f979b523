//! GitHub Actions runner protocol
//!
//! Inputs are passed in `INPUT_<NAME>` variables. Outputs and exported
//! variables are appended to the files named by `GITHUB_OUTPUT` and
//! `GITHUB_ENV`, falling back to the legacy workflow commands on stdout
//! when those are not set.
use crate::prelude::*;

use std::path::Path;

use crate::system::Error;

/// Delimiter for multi-line file command records
pub const DELIMITER: &str = "_GitHubActionsFileCommandDelimeter_";

/// Environment variable naming the step output file
pub const GITHUB_OUTPUT: &str = "GITHUB_OUTPUT";

/// Environment variable naming the exported environment file
pub const GITHUB_ENV: &str = "GITHUB_ENV";

/// Name of the environment variable holding the input `name`
///
/// The runner upper-cases the input name and replaces spaces with `_`
pub fn input_var(name: &str) -> String {
    format!("INPUT_{}", name.replace(' ', "_").to_uppercase())
}

/// Set an output of the current step
pub fn set_output(env: &impl EnvSource, name: &str, value: &str) -> Result<(), Error> {
    issue_file_command(env, GITHUB_OUTPUT, "set-output", name, value)
}

/// Export an environment variable to subsequent steps
pub fn set_env(env: &impl EnvSource, name: &str, value: &str) -> Result<(), Error> {
    issue_file_command(env, GITHUB_ENV, "set-env", name, value)
}

/// Print an error annotation for the workflow run
pub fn error(message: &str) {
    println!("::error::{}", escape_data(message));
}

/// Escape a message for a workflow command
pub fn escape_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Escape a property value for a workflow command
fn escape_property(value: &str) -> String {
    escape_data(value).replace(':', "%3A").replace(',', "%2C")
}

fn issue_file_command(
    env: &impl EnvSource,
    file_var: &str,
    legacy_command: &str,
    name: &str,
    value: &str,
) -> Result<(), Error> {
    let file = env.var(file_var);
    if file.is_empty() {
        verboseln!("{} is not set, using legacy {} command", file_var, legacy_command);
        println!(
            "::{} name={}::{}",
            legacy_command,
            escape_property(name),
            escape_data(value)
        );
        return Ok(());
    }

    let record = file_command_record(name, value)?;
    verboseln!("appending `{}` to {}", name, file_var);
    system::append_file(Path::new(&file), record)
}

/// Format a `name<<DELIMITER` record for a file command
pub fn file_command_record(name: &str, value: &str) -> Result<String, Error> {
    if name.contains(DELIMITER) || value.lines().any(|line| line == DELIMITER) {
        return Err(report!(Error::FileCommandDelimiter(name.to_string())));
    }
    Ok(format!("{name}<<{DELIMITER}\n{value}\n{DELIMITER}\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::env::env_map;

    #[test]
    fn input_var_is_upper_cased() {
        assert_eq!(input_var("filePath"), "INPUT_FILEPATH");
        assert_eq!(input_var("metadataFileName"), "INPUT_METADATAFILENAME");
        assert_eq!(input_var("my input"), "INPUT_MY_INPUT");
    }

    #[test]
    fn escape_data_escapes_control() {
        assert_eq!(escape_data("50% done\r\nnext"), "50%25 done%0D%0Anext");
    }

    #[test]
    fn file_command_record_format() {
        let record = file_command_record("filepath", "out/metadata.json").unwrap();
        assert_eq!(
            record,
            "filepath<<_GitHubActionsFileCommandDelimeter_\nout/metadata.json\n_GitHubActionsFileCommandDelimeter_\n"
        );
    }

    #[test]
    fn file_command_record_rejects_delimiter() {
        let value = format!("a\n{DELIMITER}\nb");
        let err = file_command_record("filepath", &value).unwrap_err();
        assert!(matches!(
            err.current_context(),
            Error::FileCommandDelimiter(name) if name == "filepath"
        ));
    }

    #[test]
    fn set_output_and_env_append_to_files() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("output");
        let exported = dir.path().join("env");
        std::fs::write(&output, "previous=1\n").unwrap();
        let env = env_map([
            (GITHUB_OUTPUT, output.to_str().unwrap()),
            (GITHUB_ENV, exported.to_str().unwrap()),
        ]);

        set_output(&env, "filepath", "out/metadata.json").unwrap();
        set_env(&env, "filepath", "out/metadata.json").unwrap();

        let record = file_command_record("filepath", "out/metadata.json").unwrap();
        assert_eq!(
            std::fs::read_to_string(&output).unwrap(),
            format!("previous=1\n{record}")
        );
        assert_eq!(std::fs::read_to_string(&exported).unwrap(), record);
    }
}
