use std::path::Path;
use std::path::PathBuf;

use crate::ExtractedReference;
use crate::GeneratorOptions;
use crate::ParameterSection;
use crate::ReferenceDocConfiguration;
use crate::RefdocError;
use crate::RefdocResult;
use crate::SourceFile;
use crate::Subject;
use crate::render_page;

/// Generates the reference page for one configured subject.
#[derive(Debug, Clone)]
pub struct ReferenceDoc {
	config: ReferenceDocConfiguration,
	options: GeneratorOptions,
}

/// What [`ReferenceDoc::generate`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateOutcome {
	/// The page was written to `destination`.
	Written { destination: PathBuf },
	/// The subject has no leading comment, so no page was written.
	Skipped,
}

/// What [`ReferenceDoc::check`] found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
	Fresh,
	Stale(StaleEntry),
	Skipped,
}

/// A page on disk that differs from what would be generated now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaleEntry {
	pub subject: Subject,
	pub destination: PathBuf,
	/// Current page content, or `None` when the page does not exist.
	pub current_content: Option<String>,
	pub expected_content: String,
}

impl StaleEntry {
	pub fn is_missing(&self) -> bool {
		self.current_content.is_none()
	}
}

/// A doc that could not be generated or checked during a batch run.
#[derive(Debug)]
pub struct DocFailure {
	pub subject: Subject,
	pub source_path: String,
	pub error: RefdocError,
}

/// Result of generating a batch of docs. Failures are collected so one bad
/// doc does not stop the rest.
#[derive(Debug, Default)]
pub struct GenerateReport {
	pub written: Vec<PathBuf>,
	pub skipped: Vec<Subject>,
	pub failures: Vec<DocFailure>,
}

impl GenerateReport {
	pub fn is_ok(&self) -> bool {
		self.failures.is_empty()
	}
}

/// Result of checking a batch of docs against the pages on disk.
#[derive(Debug, Default)]
pub struct CheckResult {
	pub fresh: Vec<Subject>,
	pub stale: Vec<StaleEntry>,
	pub skipped: Vec<Subject>,
	pub failures: Vec<DocFailure>,
}

impl CheckResult {
	/// Returns true if every page is up to date and no doc failed.
	pub fn is_ok(&self) -> bool {
		self.stale.is_empty() && self.failures.is_empty()
	}
}

impl ReferenceDoc {
	pub fn new(config: ReferenceDocConfiguration, options: GeneratorOptions) -> Self {
		Self { config, options }
	}

	pub fn config(&self) -> &ReferenceDocConfiguration {
		&self.config
	}

	pub fn source_path(&self) -> PathBuf {
		self.options.source_path(&self.config)
	}

	pub fn destination_path(&self) -> PathBuf {
		self.options.destination_path(&self.config)
	}

	/// Parse the source file and collect everything the page needs.
	///
	/// Returns `Ok(None)` and logs one warning when the subject has no
	/// leading comment. A subject that is not declared in the file is an
	/// error.
	pub fn extract(&self) -> RefdocResult<Option<ExtractedReference>> {
		let source = SourceFile::open(&self.source_path())?;
		let subject = &self.config.subject;

		if !source.has_declaration(subject) {
			return Err(RefdocError::SubjectNotFound {
				kind: subject.kind(),
				name: subject.name().to_string(),
				path: self.config.source_path.clone(),
			});
		}

		let Some(comment) = source
			.declaration_comment(subject)
			.filter(|comment| !comment.is_empty())
		else {
			tracing::warn!(
				"No comment found for {} in {}, skipping",
				subject,
				self.config.source_path
			);
			return Ok(None);
		};

		let interface = source.arg0_interface(subject);
		let (constructor, methods) = if subject.is_class() {
			let methods = source
				.public_method_definitions(subject.name())
				.into_iter()
				.filter(|method| !self.options.is_skipped_method(&method.signature))
				.collect();
			(source.constructor_definition(subject.name()), methods)
		} else {
			(None, vec![])
		};

		let parameters = ParameterSection::resolve(interface, constructor);

		tracing::debug!(
			path = %source.path().display(),
			subject = %subject,
			interface = matches!(parameters, ParameterSection::Interface(_)),
			methods = methods.len(),
			"extracted reference"
		);

		Ok(Some(ExtractedReference {
			subject: subject.clone(),
			comment: comment.text(),
			parameters,
			methods,
		}))
	}

	/// The rendered page, or `None` when the subject is skipped.
	pub fn generated_docs(&self) -> RefdocResult<Option<String>> {
		let Some(extracted) = self.extract()? else {
			return Ok(None);
		};

		Ok(Some(render_page(&self.config, &extracted, &self.options)))
	}

	/// Render the page and write it to the destination path.
	pub fn generate(&self) -> RefdocResult<GenerateOutcome> {
		let Some(page) = self.generated_docs()? else {
			return Ok(GenerateOutcome::Skipped);
		};

		let destination = self.destination_path();
		write_atomic(&destination, &page)?;

		tracing::info!(
			"Successfully autogenerated {} from {}",
			destination.display(),
			self.config.source_path
		);

		Ok(GenerateOutcome::Written { destination })
	}

	/// Compare the page that would be generated with the one on disk.
	pub fn check(&self) -> RefdocResult<CheckOutcome> {
		let Some(expected_content) = self.generated_docs()? else {
			return Ok(CheckOutcome::Skipped);
		};

		let destination = self.destination_path();
		let current = match std::fs::read(&destination) {
			Ok(bytes) => Some(bytes),
			Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
			Err(e) => return Err(e.into()),
		};

		if current.as_deref() == Some(expected_content.as_bytes()) {
			return Ok(CheckOutcome::Fresh);
		}

		// A page that is not UTF-8 is stale, shown lossily in diffs.
		let current_content = current.map(|bytes| String::from_utf8_lossy(&bytes).into_owned());

		Ok(CheckOutcome::Stale(StaleEntry {
			subject: self.config.subject.clone(),
			destination,
			current_content,
			expected_content,
		}))
	}

	fn failure(&self, error: RefdocError) -> DocFailure {
		DocFailure {
			subject: self.config.subject.clone(),
			source_path: self.config.source_path.clone(),
			error,
		}
	}
}

/// Generate every doc in order.
pub fn generate_all(
	docs: &[&ReferenceDocConfiguration],
	options: &GeneratorOptions,
) -> GenerateReport {
	let mut report = GenerateReport::default();

	for doc in docs {
		let reference = ReferenceDoc::new((*doc).clone(), options.clone());
		match reference.generate() {
			Ok(GenerateOutcome::Written { destination }) => report.written.push(destination),
			Ok(GenerateOutcome::Skipped) => report.skipped.push(doc.subject.clone()),
			Err(error) => report.failures.push(reference.failure(error)),
		}
	}

	report
}

/// Check every doc in order.
pub fn check_all(docs: &[&ReferenceDocConfiguration], options: &GeneratorOptions) -> CheckResult {
	let mut result = CheckResult::default();

	for doc in docs {
		let reference = ReferenceDoc::new((*doc).clone(), options.clone());
		match reference.check() {
			Ok(CheckOutcome::Fresh) => result.fresh.push(doc.subject.clone()),
			Ok(CheckOutcome::Stale(entry)) => result.stale.push(entry),
			Ok(CheckOutcome::Skipped) => result.skipped.push(doc.subject.clone()),
			Err(error) => result.failures.push(reference.failure(error)),
		}
	}

	result
}

/// Write through a temporary sibling file and rename it into place so the
/// destination never holds a partial page.
fn write_atomic(path: &Path, content: &str) -> RefdocResult<()> {
	let write_error = |reason: String| {
		RefdocError::Write {
			path: path.display().to_string(),
			reason,
		}
	};

	let Some(file_name) = path.file_name() else {
		return Err(write_error("destination is not a file path".to_string()));
	};

	if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
		std::fs::create_dir_all(parent).map_err(|e| write_error(e.to_string()))?;
	}

	let temp_path = path.with_file_name(format!(".{}.refdoc-tmp", file_name.to_string_lossy()));
	std::fs::write(&temp_path, content).map_err(|e| write_error(e.to_string()))?;

	if let Err(e) = std::fs::rename(&temp_path, path) {
		let _ = std::fs::remove_file(&temp_path);
		return Err(write_error(e.to_string()));
	}

	Ok(())
}
