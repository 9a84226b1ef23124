// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Partial configuration as produced by a single source.

use serde::Deserialize;

use crate::sections::{
	AuthConfigLayer, CorsConfigLayer, HttpConfigLayer, LlmConfigLayer, LoggingConfigLayer,
	PublishConfigLayer, StorageConfigLayer,
};

/// One source's view of the configuration. All fields optional; merging
/// layers in precedence order produces the effective configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfigLayer {
	pub http: Option<HttpConfigLayer>,
	pub cors: Option<CorsConfigLayer>,
	pub logging: Option<LoggingConfigLayer>,
	pub auth: Option<AuthConfigLayer>,
	pub llm: Option<LlmConfigLayer>,
	pub storage: Option<StorageConfigLayer>,
	pub publish: Option<PublishConfigLayer>,
}

macro_rules! merge_section {
	($self:ident, $other:ident, $field:ident) => {
		match (&mut $self.$field, $other.$field) {
			(Some(current), Some(incoming)) => current.merge(incoming),
			(current, Some(incoming)) => *current = Some(incoming),
			(_, None) => {}
		}
	};
}

impl ServerConfigLayer {
	/// Merge a higher-precedence layer into this one. Fields set in `other`
	/// win; unset fields keep the current value.
	pub fn merge(&mut self, other: Self) {
		merge_section!(self, other, http);
		merge_section!(self, other, cors);
		merge_section!(self, other, logging);
		merge_section!(self, other, auth);
		merge_section!(self, other, llm);
		merge_section!(self, other, storage);
		merge_section!(self, other, publish);
	}
}
