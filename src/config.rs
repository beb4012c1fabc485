//! Optional project configuration: a `py2cxx.toml` file with a single
//! `[project]` table, read with a plain `toml_edit::DocumentMut` parse
//! and explicit `ok_or_else`/`as_str` chains.

use anyhow::Context as _;

pub const CONFIG_FILE_NAME: &str = "py2cxx.toml";

#[derive(Debug, Clone)]
pub struct ProjectConfig {
	pub output_dir: String,
	pub quiet: bool,
}

impl Default for ProjectConfig {
	fn default() -> Self {
		Self { output_dir: "./build".to_owned(), quiet: false }
	}
}

impl ProjectConfig {
	/// Reads `py2cxx.toml` from the current directory if it exists,
	/// falling back to built-in defaults when it doesn't. A file that
	/// exists but fails to parse, or whose `[project]` fields are the
	/// wrong type, is reported as an error rather than silently ignored.
	pub fn load() -> anyhow::Result<Self> {
		let Ok(config_string) = std::fs::read_to_string(CONFIG_FILE_NAME) else {
			return Ok(Self::default());
		};

		let document: toml_edit::DocumentMut = config_string.parse().context("error parsing py2cxx.toml")?;
		let mut config = Self::default();

		let Some(project_table) = document.get("project") else {
			return Ok(config);
		};
		let project_table = project_table.as_table().ok_or_else(|| anyhow::anyhow!("py2cxx.toml: \"project\" must be a table"))?;

		if let Some(output_dir) = project_table.get("output_dir") {
			config.output_dir =
				output_dir.as_str().ok_or_else(|| anyhow::anyhow!("py2cxx.toml: \"project.output_dir\" must be a string"))?.to_owned();
		}
		if let Some(quiet) = project_table.get("quiet") {
			config.quiet = quiet.as_bool().ok_or_else(|| anyhow::anyhow!("py2cxx.toml: \"project.quiet\" must be a boolean"))?;
		}

		Ok(config)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults_match_the_documented_fallback() {
		let config = ProjectConfig::default();
		assert_eq!(config.output_dir, "./build");
		assert!(!config.quiet);
	}
}
