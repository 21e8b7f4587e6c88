use std::path::PathBuf;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use refdoc_core::RefdocResult;
use refdoc_core::Subject;

/// Environment variable holding a `tracing` filter directive, e.g.
/// `REFDOC_LOG=refdoc_core=debug`.
pub const LOG_ENV: &str = "REFDOC_LOG";

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Generate MDX reference pages from documented TypeScript sources.",
	long_about = "refdoc reads a documented class, React component or hook from a TypeScript \
	              source file and renders an MDX reference page from its leading JSDoc comment, \
	              the interface of its first argument and, for classes, its constructor and \
	              public methods.\n\nQuick start:\n  refdoc init      Create a refdoc.toml\n  \
	              refdoc generate  Write every configured page\n  refdoc check     Verify every \
	              page is up to date"
)]
pub struct RefdocCli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	/// Path to the project root directory. Source paths are relative to it.
	#[arg(long, short, global = true)]
	pub path: Option<PathBuf>,

	/// Directory that destination paths are relative to, itself relative to
	/// the project root. Overrides `output_root` from refdoc.toml.
	#[arg(long, global = true)]
	pub output_root: Option<PathBuf>,

	/// Enable verbose output.
	#[arg(long, short, global = true, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, global = true, default_value_t = false)]
	pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
	/// Create a sample `refdoc.toml` in the project root.
	///
	/// If a config file already exists this command is a no-op and exits
	/// successfully.
	Init,
	/// Generate every reference page listed in refdoc.toml.
	///
	/// Subjects without a leading documentation comment are skipped with a
	/// warning. Exits with status 1 if any page could not be generated.
	Generate {
		/// Only generate the docs for these class, component or hook names.
		#[arg(long, value_name = "NAME")]
		only: Vec<String>,
	},
	/// Check that every generated reference page is up to date.
	///
	/// Exits with status 1 when a page is missing, out of date, or could not
	/// be generated. Ideal for CI pipelines.
	Check {
		/// Only check the docs for these class, component or hook names.
		#[arg(long, value_name = "NAME")]
		only: Vec<String>,

		/// Show a diff between each stale page and its expected content.
		#[arg(long, default_value_t = false)]
		diff: bool,

		/// Output format for check results.
		#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
		format: OutputFormat,
	},
	/// Generate a single reference page without a config file.
	Page {
		/// Source file containing the subject, relative to the project root.
		#[arg(long)]
		source_path: String,

		/// Output page, relative to the output root.
		#[arg(long)]
		destination_path: String,

		#[command(flatten)]
		subject: SubjectArgs,

		/// Description placed in the page front matter.
		#[arg(long)]
		description: Option<String>,
	},
	/// Print what would be extracted for a subject without writing anything.
	Inspect {
		/// Source file containing the subject, relative to the project root.
		#[arg(long)]
		source_path: String,

		#[command(flatten)]
		subject: SubjectArgs,

		/// Output format for the extracted reference.
		#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
		format: OutputFormat,
	},
}

/// The subject of a single page. Exactly one flag is accepted.
#[derive(Debug, Clone, Args)]
#[group(required = true, multiple = false)]
pub struct SubjectArgs {
	/// Document the class with this name.
	#[arg(long)]
	pub class_name: Option<String>,

	/// Document the React component with this name.
	#[arg(long)]
	pub component: Option<String>,

	/// Document the hook with this name.
	#[arg(long)]
	pub hook: Option<String>,
}

impl SubjectArgs {
	pub fn subject(&self) -> RefdocResult<Subject> {
		Subject::from_fields(
			self.class_name.clone(),
			self.component.clone(),
			self.hook.clone(),
		)
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
	/// Human-readable text output with colors and formatting.
	Text,
	/// JSON output for programmatic consumption.
	Json,
}
