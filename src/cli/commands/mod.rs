//! The CLI's subcommands: one `#[enum_dispatch]` trait shared by every
//! subcommand, and one enum variant per subcommand so adding a
//! subcommand never touches a match arm anywhere else.

pub mod check;
pub mod translate;

use check::CheckCommand;
use translate::TranslateCommand;

#[enum_dispatch::enum_dispatch]
pub trait Py2cxxCommand {
	fn execute(&self) -> anyhow::Result<()>;
}

#[derive(clap::Subcommand)]
#[enum_dispatch::enum_dispatch(Py2cxxCommand)]
pub enum SubCommand {
	Translate(TranslateCommand),
	Check(CheckCommand),
}
