pub mod backend;

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::DeployError;

pub const DEFAULT_PROGRAM: &str = "terraform";

/// Captured streams of a successful command.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Runs one provisioning tool subcommand to completion.
///
/// `args` excludes the program name. A non-zero exit must come back as
/// [`DeployError::ExternalCommandFailed`].
pub trait CommandRunner {
    fn run(&mut self, args: &[String]) -> Result<CommandOutput, DeployError>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &mut R {
    fn run(&mut self, args: &[String]) -> Result<CommandOutput, DeployError> {
        (**self).run(args)
    }
}

/// Spawns the real binary inside a fixed working directory.
#[derive(Debug, Clone)]
pub struct TerraformCli {
    program: PathBuf,
    working_dir: PathBuf,
}

impl TerraformCli {
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self::with_program(DEFAULT_PROGRAM, working_dir)
    }

    pub fn with_program(program: impl Into<PathBuf>, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            working_dir: working_dir.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }
}

impl CommandRunner for TerraformCli {
    fn run(&mut self, args: &[String]) -> Result<CommandOutput, DeployError> {
        let command = args.join(" ");
        tracing::debug!(
            program = %self.program.display(),
            dir = %self.working_dir.display(),
            %command,
            "running command"
        );

        let output = Command::new(&self.program)
            .args(args)
            .current_dir(&self.working_dir)
            .output()
            .map_err(|source| DeployError::Launch {
                program: self.program.display().to_string(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            tracing::error!(%command, code = ?output.status.code(), "command failed");
            return Err(DeployError::ExternalCommandFailed {
                command,
                code: output.status.code(),
                stderr,
            });
        }

        Ok(CommandOutput { stdout, stderr })
    }
}
