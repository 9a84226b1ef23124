// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Static-site generator invocation.
//!
//! The generator runs as a subprocess with structured argument passing:
//! program, argument list, fixed working directory, and one environment
//! variable carrying the identifier. No shell is involved, so the
//! identifier never reaches an interpolation context. The subprocess is
//! awaited without a timeout.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{error, info};

/// Captured output of a completed build.
#[derive(Debug, Clone)]
pub struct BuildOutput {
	pub stdout: String,
	pub stderr: String,
}

/// Errors from invoking the generator.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
	#[error("failed to spawn build program {program}: {source}")]
	Spawn {
		program: String,
		#[source]
		source: std::io::Error,
	},

	/// Non-zero exit. Carries the captured stderr as the diagnostic.
	#[error("build failed (exit code {exit_code:?}): {stderr}")]
	Failed {
		exit_code: Option<i32>,
		stderr: String,
	},
}

/// Seam between the workflow and the build subprocess.
#[async_trait]
pub trait BuildInvoker: Send + Sync {
	/// Run the generator for one identifier, blocking until it exits.
	async fn build(&self, identifier: &str) -> Result<BuildOutput, BuildError>;
}

/// Invoker that runs the configured build command as a subprocess.
pub struct CommandBuildInvoker {
	program: String,
	args: Vec<String>,
	project_dir: PathBuf,
	env_var: String,
}

impl CommandBuildInvoker {
	pub fn new(
		program: impl Into<String>,
		args: Vec<String>,
		project_dir: impl Into<PathBuf>,
		env_var: impl Into<String>,
	) -> Self {
		Self {
			program: program.into(),
			args,
			project_dir: project_dir.into(),
			env_var: env_var.into(),
		}
	}
}

#[async_trait]
impl BuildInvoker for CommandBuildInvoker {
	async fn build(&self, identifier: &str) -> Result<BuildOutput, BuildError> {
		info!(identifier = %identifier, program = %self.program, "starting static site build");

		let output = Command::new(&self.program)
			.args(&self.args)
			.env(&self.env_var, identifier)
			.current_dir(&self.project_dir)
			.output()
			.await
			.map_err(|source| BuildError::Spawn {
				program: self.program.clone(),
				source,
			})?;

		let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
		let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

		if !output.status.success() {
			error!(identifier = %identifier, stderr = %stderr, "static site build failed");
			return Err(BuildError::Failed {
				exit_code: output.status.code(),
				stderr,
			});
		}

		info!(identifier = %identifier, stdout = %stdout, "static site build completed");
		Ok(BuildOutput { stdout, stderr })
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use tempfile::TempDir;

	#[tokio::test]
	async fn test_successful_build_captures_stdout() {
		let dir = TempDir::new().unwrap();
		let invoker = CommandBuildInvoker::new(
			"sh",
			vec!["-c".to_string(), "echo rendered".to_string()],
			dir.path(),
			"PRERENDER_UID",
		);

		let output = invoker.build("u-1").await.unwrap();
		assert_eq!(output.stdout.trim(), "rendered");
	}

	#[tokio::test]
	async fn test_identifier_is_passed_via_environment() {
		let dir = TempDir::new().unwrap();
		let invoker = CommandBuildInvoker::new(
			"sh",
			vec!["-c".to_string(), "printf %s \"$PRERENDER_UID\"".to_string()],
			dir.path(),
			"PRERENDER_UID",
		);

		let output = invoker.build("my-site").await.unwrap();
		assert_eq!(output.stdout, "my-site");
	}

	#[tokio::test]
	async fn test_nonzero_exit_fails_closed_with_stderr() {
		let dir = TempDir::new().unwrap();
		let invoker = CommandBuildInvoker::new(
			"sh",
			vec![
				"-c".to_string(),
				"echo boom >&2; exit 3".to_string(),
			],
			dir.path(),
			"PRERENDER_UID",
		);

		let err = invoker.build("u-1").await.unwrap_err();
		match err {
			BuildError::Failed { exit_code, stderr } => {
				assert_eq!(exit_code, Some(3));
				assert_eq!(stderr.trim(), "boom");
			}
			other => panic!("expected Failed, got {other:?}"),
		}
	}

	#[tokio::test]
	async fn test_missing_program_is_spawn_error() {
		let dir = TempDir::new().unwrap();
		let invoker = CommandBuildInvoker::new(
			"definitely-not-a-real-program",
			vec![],
			dir.path(),
			"PRERENDER_UID",
		);

		let err = invoker.build("u-1").await.unwrap_err();
		assert!(matches!(err, BuildError::Spawn { .. }));
	}

	#[tokio::test]
	async fn test_identifier_with_shell_metacharacters_is_inert() {
		// Structured argument passing means a hostile identifier is just an
		// environment value, never evaluated.
		let dir = TempDir::new().unwrap();
		let invoker = CommandBuildInvoker::new(
			"sh",
			vec!["-c".to_string(), "printf %s \"$PRERENDER_UID\"".to_string()],
			dir.path(),
			"PRERENDER_UID",
		);

		let hostile = "x; rm -rf /tmp/nope $(whoami)";
		let output = invoker.build(hostile).await.unwrap();
		assert_eq!(output.stdout, hostile);
	}
}
