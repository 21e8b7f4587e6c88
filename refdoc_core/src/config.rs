use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::RefdocError;
use crate::RefdocResult;
use crate::Subject;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] =
	["refdoc.toml", ".refdoc.toml", ".config/refdoc.toml"];

/// Destination paths are resolved one directory above the project root
/// unless configured otherwise.
pub const DEFAULT_OUTPUT_ROOT: &str = "..";

/// Path prefix shown in the auto-generation banner.
pub const DEFAULT_BANNER_PREFIX: &str = "CopilotKit";

/// Method signatures that never appear on class pages.
pub const DEFAULT_SKIP_METHODS: [&str; 2] = [
	"process(request: CopilotRuntimeChatCompletionRequest)",
	"process(request: CopilotRuntimeRequest)",
];

/// One reference page to generate: which declaration in which source file,
/// and where the rendered page goes.
///
/// ```toml
/// [[docs]]
/// source_path = "packages/runtime/src/lib/runtime/copilot-runtime.ts"
/// destination_path = "docs/reference/classes/CopilotRuntime.mdx"
/// class_name = "CopilotRuntime"
/// description = "The CopilotRuntime class."
/// ```
///
/// Exactly one of `class_name`, `component` and `hook` must be set.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawReferenceDoc")]
pub struct ReferenceDocConfiguration {
	/// Source file containing the subject, relative to the project root.
	pub source_path: String,
	/// Output page, relative to the output root.
	pub destination_path: String,
	pub subject: Subject,
	/// Optional front matter description.
	pub description: Option<String>,
}

impl ReferenceDocConfiguration {
	pub fn new(
		source_path: impl Into<String>,
		destination_path: impl Into<String>,
		subject: Subject,
	) -> Self {
		Self {
			source_path: source_path.into(),
			destination_path: destination_path.into(),
			subject,
			description: None,
		}
	}

	#[must_use]
	pub fn with_description(mut self, description: impl Into<String>) -> Self {
		self.description = Some(description.into());
		self
	}
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawReferenceDoc {
	#[serde(alias = "sourcePath")]
	source_path: String,
	#[serde(alias = "destinationPath")]
	destination_path: String,
	#[serde(default, alias = "className")]
	class_name: Option<String>,
	#[serde(default)]
	component: Option<String>,
	#[serde(default)]
	hook: Option<String>,
	#[serde(default)]
	description: Option<String>,
}

impl TryFrom<RawReferenceDoc> for ReferenceDocConfiguration {
	type Error = RefdocError;

	fn try_from(raw: RawReferenceDoc) -> Result<Self, Self::Error> {
		let subject = Subject::from_fields(raw.class_name, raw.component, raw.hook)?;

		Ok(Self {
			source_path: raw.source_path,
			destination_path: raw.destination_path,
			subject,
			description: raw.description.filter(|d| !d.trim().is_empty()),
		})
	}
}

/// Configuration loaded from a `refdoc.toml` file.
///
/// ```toml
/// output_root = ".."
/// banner_prefix = "CopilotKit"
/// skip_methods = ["process(request: CopilotRuntimeRequest)"]
///
/// [[docs]]
/// source_path = "packages/react-core/src/hooks/use-copilot-chat.ts"
/// destination_path = "docs/reference/hooks/useCopilotChat.mdx"
/// hook = "useCopilotChat"
/// ```
#[derive(Debug, Deserialize)]
pub struct RefdocConfig {
	/// Directory that destination paths are relative to, itself relative to
	/// the project root.
	#[serde(default = "default_output_root")]
	pub output_root: PathBuf,
	/// Prefix printed before the source path in the generated banner.
	#[serde(default = "default_banner_prefix")]
	pub banner_prefix: String,
	/// Exact method signatures left out of class pages.
	#[serde(default = "default_skip_methods")]
	pub skip_methods: Vec<String>,
	#[serde(default)]
	pub docs: Vec<ReferenceDocConfiguration>,
}

fn default_output_root() -> PathBuf {
	PathBuf::from(DEFAULT_OUTPUT_ROOT)
}

fn default_banner_prefix() -> String {
	DEFAULT_BANNER_PREFIX.to_string()
}

fn default_skip_methods() -> Vec<String> {
	DEFAULT_SKIP_METHODS.iter().map(ToString::to_string).collect()
}

impl RefdocConfig {
	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if the file does not exist.
	pub fn load(root: &Path) -> RefdocResult<Option<RefdocConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		let content = std::fs::read_to_string(&config_path)?;
		Self::from_toml(&content).map(Some)
	}

	/// Like [`RefdocConfig::load`] but a missing file is an error.
	pub fn load_required(root: &Path) -> RefdocResult<RefdocConfig> {
		Self::load(root)?.ok_or_else(|| RefdocError::MissingConfig(root.display().to_string()))
	}

	pub fn from_toml(content: &str) -> RefdocResult<RefdocConfig> {
		toml::from_str(content).map_err(|e| RefdocError::ConfigParse(e.to_string()))
	}

	/// Options for generating pages under `root`.
	pub fn generator_options(&self, root: &Path) -> GeneratorOptions {
		GeneratorOptions {
			root: root.to_path_buf(),
			output_root: self.output_root.clone(),
			banner_prefix: self.banner_prefix.clone(),
			skip_methods: self.skip_methods.clone(),
		}
	}

	/// The configured docs whose subject name is in `only`, in config order.
	/// An empty filter selects every doc. A name that matches nothing is an
	/// error.
	pub fn select(&self, only: &[String]) -> RefdocResult<Vec<&ReferenceDocConfiguration>> {
		if only.is_empty() {
			return Ok(self.docs.iter().collect());
		}

		if let Some(unknown) = only
			.iter()
			.find(|name| !self.docs.iter().any(|doc| doc.subject.name() == name.as_str()))
		{
			return Err(RefdocError::UnknownDoc(unknown.clone()));
		}

		Ok(self
			.docs
			.iter()
			.filter(|doc| only.iter().any(|name| name == doc.subject.name()))
			.collect())
	}
}

/// Settings shared by every page of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
	/// Project root. Source paths are relative to it.
	pub root: PathBuf,
	/// Destination paths are relative to `root.join(output_root)`.
	pub output_root: PathBuf,
	pub banner_prefix: String,
	pub skip_methods: Vec<String>,
}

impl Default for GeneratorOptions {
	fn default() -> Self {
		Self {
			root: PathBuf::from("."),
			output_root: default_output_root(),
			banner_prefix: default_banner_prefix(),
			skip_methods: default_skip_methods(),
		}
	}
}

impl GeneratorOptions {
	#[must_use]
	pub fn with_root(root: impl Into<PathBuf>) -> Self {
		Self {
			root: root.into(),
			..Self::default()
		}
	}

	#[must_use]
	pub fn with_output_root(mut self, output_root: impl Into<PathBuf>) -> Self {
		self.output_root = output_root.into();
		self
	}

	pub fn source_path(&self, doc: &ReferenceDocConfiguration) -> PathBuf {
		self.root.join(&doc.source_path)
	}

	pub fn destination_path(&self, doc: &ReferenceDocConfiguration) -> PathBuf {
		self.root.join(&self.output_root).join(&doc.destination_path)
	}

	pub fn is_skipped_method(&self, signature: &str) -> bool {
		self.skip_methods.iter().any(|skipped| skipped == signature)
	}
}
