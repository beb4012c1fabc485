//! The `check` subcommand: reports whether a C++ compiler is on `PATH`,
//! without ever invoking it, checking the preference order `clang++` →
//! `g++` → `cl`.

use colored::Colorize as _;

const CANDIDATES: [&str; 3] = ["clang++", "g++", "cl"];

#[derive(clap::Parser)]
pub struct CheckCommand;

impl super::Py2cxxCommand for CheckCommand {
	fn execute(&self) -> anyhow::Result<()> {
		for candidate in CANDIDATES {
			if let Ok(path) = which::which(candidate) {
				println!("{} {} found at {}", "Found:".bold().green(), candidate.cyan(), path.display());
				return Ok(());
			}
		}
		println!(
			"{} no C++ compiler was found on PATH (looked for {}).",
			"Not found:".bold().red(),
			CANDIDATES.join(", ").cyan()
		);
		Ok(())
	}
}
