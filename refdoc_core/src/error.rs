use miette::Diagnostic;
use thiserror::Error;

use crate::SubjectKind;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum RefdocError {
	#[error(transparent)]
	#[diagnostic(code(refdoc::io_error))]
	Io(#[from] std::io::Error),

	#[error("failed to read source file `{path}`: {reason}")]
	#[diagnostic(code(refdoc::read_source))]
	ReadSource { path: String, reason: String },

	#[error("unsupported source file: `{0}`")]
	#[diagnostic(
		code(refdoc::unsupported_source),
		help("supported extensions: ts, mts, cts, tsx, js, jsx, mjs, cjs")
	)]
	UnsupportedSource(String),

	#[error("failed to load the TypeScript grammar: {0}")]
	#[diagnostic(code(refdoc::language))]
	Language(String),

	#[error("failed to parse `{path}`: syntax error at {line}:{column}")]
	#[diagnostic(
		code(refdoc::parse),
		help("the source file must be valid TypeScript before docs can be generated")
	)]
	Parse {
		path: String,
		line: usize,
		column: usize,
	},

	#[error("{kind} `{name}` not found in `{path}`")]
	#[diagnostic(
		code(refdoc::subject_not_found),
		help("check the subject name and kind in the reference doc configuration")
	)]
	SubjectNotFound {
		kind: SubjectKind,
		name: String,
		path: String,
	},

	#[error("invalid reference doc subject: {0}")]
	#[diagnostic(
		code(refdoc::invalid_subject),
		help("set exactly one of `class_name`, `component` or `hook`")
	)]
	InvalidSubject(String),

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(refdoc::config_parse),
		help("check that refdoc.toml is valid TOML with a [[docs]] table array")
	)]
	ConfigParse(String),

	#[error("no config file found under `{0}`")]
	#[diagnostic(
		code(refdoc::missing_config),
		help("run `refdoc init` to create a refdoc.toml")
	)]
	MissingConfig(String),

	#[error("failed to write `{path}`: {reason}")]
	#[diagnostic(code(refdoc::write))]
	Write { path: String, reason: String },

	#[error("no reference doc configured for `{0}`")]
	#[diagnostic(
		code(refdoc::unknown_doc),
		help("`--only` takes a class, component or hook name listed in refdoc.toml")
	)]
	UnknownDoc(String),
}

pub type RefdocResult<T> = Result<T, RefdocError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
