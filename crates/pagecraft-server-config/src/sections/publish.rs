// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Publish workflow configuration: build invocation and upload transport.

use std::path::PathBuf;

use serde::Deserialize;

/// Resolved publish configuration.
#[derive(Debug, Clone)]
pub struct PublishConfig {
	/// Working directory the static-site generator runs in.
	pub project_dir: PathBuf,
	/// Root under which the generator writes `{identifier}/index.html`.
	pub output_root: PathBuf,
	pub build_program: String,
	pub build_args: Vec<String>,
	/// Environment variable carrying the identifier into the build.
	pub build_env_var: String,
	pub upload_connect_timeout_secs: u64,
	pub upload_read_timeout_secs: u64,
}

impl Default for PublishConfig {
	fn default() -> Self {
		Self {
			project_dir: PathBuf::from("/ssr"),
			output_root: PathBuf::from("/ssr/dist/template-system/browser/builder"),
			build_program: "npx".to_string(),
			build_args: vec!["ng".to_string(), "build".to_string()],
			build_env_var: "PRERENDER_UID".to_string(),
			upload_connect_timeout_secs: 5,
			upload_read_timeout_secs: 30,
		}
	}
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PublishConfigLayer {
	pub project_dir: Option<PathBuf>,
	pub output_root: Option<PathBuf>,
	pub build_program: Option<String>,
	pub build_args: Option<Vec<String>>,
	pub build_env_var: Option<String>,
	pub upload_connect_timeout_secs: Option<u64>,
	pub upload_read_timeout_secs: Option<u64>,
}

impl PublishConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.project_dir.is_some() {
			self.project_dir = other.project_dir;
		}
		if other.output_root.is_some() {
			self.output_root = other.output_root;
		}
		if other.build_program.is_some() {
			self.build_program = other.build_program;
		}
		if other.build_args.is_some() {
			self.build_args = other.build_args;
		}
		if other.build_env_var.is_some() {
			self.build_env_var = other.build_env_var;
		}
		if other.upload_connect_timeout_secs.is_some() {
			self.upload_connect_timeout_secs = other.upload_connect_timeout_secs;
		}
		if other.upload_read_timeout_secs.is_some() {
			self.upload_read_timeout_secs = other.upload_read_timeout_secs;
		}
	}

	pub fn finalize(self) -> PublishConfig {
		let defaults = PublishConfig::default();
		PublishConfig {
			project_dir: self.project_dir.unwrap_or(defaults.project_dir),
			output_root: self.output_root.unwrap_or(defaults.output_root),
			build_program: self.build_program.unwrap_or(defaults.build_program),
			build_args: self.build_args.unwrap_or(defaults.build_args),
			build_env_var: self.build_env_var.unwrap_or(defaults.build_env_var),
			upload_connect_timeout_secs: self
				.upload_connect_timeout_secs
				.unwrap_or(defaults.upload_connect_timeout_secs),
			upload_read_timeout_secs: self
				.upload_read_timeout_secs
				.unwrap_or(defaults.upload_read_timeout_secs),
		}
	}
}
