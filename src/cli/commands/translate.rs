//! The `translate` subcommand: the core operation, generalized from a
//! single file to an optional directory batch. Reads configuration,
//! prints one colored status line per pipeline stage, and writes the
//! result to disk.

use std::path::{Path, PathBuf};

use colored::Colorize as _;

use crate::config::ProjectConfig;
use crate::{analyzer, comments, emit, finalize, parser};

#[derive(clap::Parser)]
pub struct TranslateCommand {
	/// A single `.py` file, or a directory to translate every `.py` file
	/// in.
	path: PathBuf,

	/// Overrides the configured (or default) output directory.
	#[arg(long)]
	out: Option<String>,

	/// Suppresses per-stage status lines; failures are still reported.
	#[arg(long)]
	quiet: bool,
}

impl super::Py2cxxCommand for TranslateCommand {
	fn execute(&self) -> anyhow::Result<()> {
		let config = ProjectConfig::load()?;
		let output_dir = self.out.clone().unwrap_or(config.output_dir.clone());
		let quiet = self.quiet || config.quiet;

		let files = collect_source_files(&self.path)?;

		for file in files {
			let stem = file.file_stem().and_then(std::ffi::OsStr::to_str).unwrap_or("output").to_owned();
			let destination = if self.path.is_dir() { Path::new(&output_dir).join(&stem) } else { PathBuf::from(&output_dir) };

			if let Err(error) = translate_one(&file, &destination, quiet) {
				println!("{} {}: {error}", "Error:".bold().red(), file.display());
			}
		}

		Ok(())
	}
}

/// Collects every `.py` file under `path` (recursively, if it is a
/// directory) or `path` itself if it already names a `.py` file.
fn collect_source_files(path: &Path) -> anyhow::Result<Vec<PathBuf>> {
	if path.is_file() {
		return Ok(vec![path.to_path_buf()]);
	}

	let mut files = Vec::new();
	for entry in walkdir::WalkDir::new(path).into_iter().filter_entry(|entry| !is_hidden(entry)) {
		let entry = entry?;
		if entry.file_type().is_file() && entry.path().extension().is_some_and(|extension| extension == "py") {
			files.push(entry.path().to_path_buf());
		}
	}
	Ok(files)
}

fn is_hidden(entry: &walkdir::DirEntry) -> bool {
	entry.file_name().to_str().is_some_and(|name| name.starts_with('.'))
}

fn translate_one(source_path: &Path, destination_dir: &Path, quiet: bool) -> anyhow::Result<()> {
	let display_name = source_path.display().to_string();
	let source = std::fs::read_to_string(source_path).map_err(|error| anyhow::anyhow!("could not read {display_name}: {error}"))?;

	if !quiet {
		println!("{} {display_name}...", "Parsing".green().bold());
	}
	let module = parser::parse(&source, &display_name)?;

	if !quiet {
		println!("{} {display_name}...", "Analyzing".green().bold());
	}
	let mut result = analyzer::analyze(&module, &source);
	finalize::finalize(&mut result.unit);
	comments::reinject(&mut result.unit, &source, &result.claimed_lines, &result.inline_targets);

	if !quiet {
		println!("{} {display_name}...", "Emitting".green().bold());
	}
	let rendered = emit::emit(&result.unit);

	std::fs::create_dir_all(destination_dir).map_err(|error| anyhow::anyhow!("could not create {}: {error}", destination_dir.display()))?;
	let output_path = destination_dir.join("main.cpp");
	std::fs::write(&output_path, rendered).map_err(|error| anyhow::anyhow!("could not write {}: {error}", output_path.display()))?;

	println!(
		"{} {} ready at {} ({} statement{} degraded to comments)",
		"Done!".green().bold(),
		display_name.cyan(),
		output_path.display().to_string().cyan().bold(),
		result.degraded_statements,
		if result.degraded_statements == 1 { "" } else { "s" }
	);
	Ok(())
}
