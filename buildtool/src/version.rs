//! Version resolution, either a literal or the output of a command
use buildcommon::prelude::*;

use crate::error::Error;

/// Captured result of running a command
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    /// Exit code, `None` if the process was terminated by a signal
    pub code: Option<i32>,
}

impl CommandOutput {
    #[inline]
    pub fn is_success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs external commands
pub trait ProcessRunner {
    /// Run `program` with `args`, capturing stdout and stderr
    ///
    /// Only failing to run the program is an error. A non-zero exit is
    /// reported through [`CommandOutput::code`]
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput, system::Error>;
}

/// Runs commands as child processes
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput, system::Error> {
        let executable = which::which(program)
            .change_context_lazy(|| system::Error::Which(program.to_string()))?;
        verboseln!("found {} at {}", program, executable.display());
        let finished = system::Command::new(executable)
            .args(args)
            .piped()
            .spawn()?
            .wait()?;

        Ok(CommandOutput {
            stdout: finished.stdout,
            stderr: finished.stderr,
            code: finished.status.code(),
        })
    }
}

/// Resolve the version input
///
/// A value containing a space is a command line. It is split on
/// whitespace and run, and its stdout without the trailing newline is the
/// version. Any other value is used as is.
pub fn resolve_version(input: &str, runner: &impl ProcessRunner) -> Result<String, Error> {
    if input.is_empty() {
        return Err(report!(Error::MissingInput("version")))
            .attach_printable("the version or version command is not provided");
    }
    if !input.contains(' ') {
        return Ok(input.to_string());
    }
    run_version_command(input, runner)
}

fn run_version_command(command: &str, runner: &impl ProcessRunner) -> Result<String, Error> {
    let mut parts = command.split_whitespace();
    let Some(program) = parts.next() else {
        return Err(report!(Error::VersionCommand(command.to_string())))
            .attach_printable("the command is blank");
    };
    let args = parts.collect::<Vec<_>>();

    infoln!("Running", "{}", command);
    let output = runner
        .run(program, &args)
        .change_context_lazy(|| Error::VersionCommand(command.to_string()))
        .attach_printable_lazy(|| format!("program: {program}, args: {args:?}"))?;
    infoln!("stdout", "{}", output.stdout.trim());
    infoln!("stderr", "{}", output.stderr.trim());

    if !output.is_success() {
        let status = match output.code {
            Some(code) => format!("exit code {code}"),
            None => "a signal".to_string(),
        };
        return Err(report!(Error::VersionCommand(command.to_string())))
            .attach_printable(format!("{program} {args:?} terminated with {status}"))
            .attach_printable(format!("stderr: {}", output.stderr.trim()));
    }

    let version = output.stdout.strip_suffix('\n').unwrap_or(&output.stdout);
    if version.is_empty() {
        return Err(report!(Error::VersionCommand(command.to_string())))
            .attach_printable("the command produced no output");
    }
    Ok(version.to_string())
}

#[cfg(test)]
pub mod tests {
    use super::*;

    use std::cell::RefCell;

    /// Runner that returns a canned output and records the calls
    #[derive(Default)]
    pub struct FakeRunner {
        pub output: CommandOutput,
        pub calls: RefCell<Vec<(String, Vec<String>)>>,
    }

    impl FakeRunner {
        pub fn new(stdout: &str, stderr: &str, code: i32) -> Self {
            Self {
                output: CommandOutput {
                    stdout: stdout.to_string(),
                    stderr: stderr.to_string(),
                    code: Some(code),
                },
                calls: RefCell::default(),
            }
        }
    }

    impl ProcessRunner for FakeRunner {
        fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput, system::Error> {
            self.calls.borrow_mut().push((
                program.to_string(),
                args.iter().map(|x| x.to_string()).collect(),
            ));
            Ok(self.output.clone())
        }
    }

    /// Runner that cannot start any program
    pub struct MissingRunner;

    impl ProcessRunner for MissingRunner {
        fn run(&self, program: &str, _: &[&str]) -> Result<CommandOutput, system::Error> {
            Err(report!(system::Error::Which(program.to_string())))
        }
    }

    #[test]
    fn literal_version() {
        let runner = FakeRunner::default();
        assert_eq!(resolve_version("1.15.0", &runner).unwrap(), "1.15.0");
        assert!(runner.calls.borrow().is_empty());
    }

    #[test]
    fn empty_version() {
        let err = resolve_version("", &FakeRunner::default()).unwrap_err();
        assert!(matches!(
            err.current_context(),
            Error::MissingInput("version")
        ));
    }

    #[test]
    fn command_version() {
        let runner = FakeRunner::new("1.2.3\n", "", 0);
        let version = resolve_version("make  version", &runner).unwrap();
        assert_eq!(version, "1.2.3");
        assert_eq!(
            runner.calls.borrow().as_slice(),
            [("make".to_string(), vec!["version".to_string()])]
        );
    }

    #[test]
    fn command_version_strips_one_newline() {
        let runner = FakeRunner::new("1.2.3\n\n", "", 0);
        assert_eq!(resolve_version("make version", &runner).unwrap(), "1.2.3\n");
    }

    #[test]
    fn command_non_zero_exit() {
        let runner = FakeRunner::new("1.2.3\n", "no such target", 2);
        let err = resolve_version("make version", &runner).unwrap_err();
        assert!(matches!(
            err.current_context(),
            Error::VersionCommand(x) if x == "make version"
        ));
        let report = format!("{err:?}");
        assert!(report.contains("stderr: no such target"), "{report}");
        assert!(report.contains("exit code 2"), "{report}");
    }

    #[test]
    fn command_no_output() {
        for stdout in ["", "\n"] {
            let runner = FakeRunner::new(stdout, "", 0);
            let err = resolve_version("make version", &runner).unwrap_err();
            assert!(matches!(err.current_context(), Error::VersionCommand(_)));
        }
    }

    #[test]
    fn command_not_found() {
        let err = resolve_version("no-such-tool version", &MissingRunner).unwrap_err();
        assert!(matches!(err.current_context(), Error::VersionCommand(_)));
        assert!(err.contains::<system::Error>());
    }

    #[cfg(unix)]
    #[test]
    fn system_runner_echo() {
        let version = resolve_version("echo 1.2.3", &SystemRunner).unwrap();
        assert_eq!(version, "1.2.3");
    }

    #[cfg(unix)]
    #[test]
    fn system_runner_failure() {
        let err = resolve_version("sh -c false", &SystemRunner).unwrap_err();
        assert!(matches!(err.current_context(), Error::VersionCommand(_)));
    }
}
