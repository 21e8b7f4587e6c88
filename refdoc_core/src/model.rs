//! Read-only views extracted from a parsed source file. Everything here is
//! computed once per run and rendered into a single page.

use derive_more::Deref;
use derive_more::Display;
use serde::Serialize;

use crate::DEPRECATED_MARKER;
use crate::Subject;

/// A type expression as written in the source, with whitespace collapsed.
#[derive(Debug, Clone, PartialEq, Eq, Deref, Display, Serialize)]
#[serde(transparent)]
pub struct TypeExpression(String);

impl TypeExpression {
	/// Normalize a raw type: runs of whitespace become one space and the
	/// leading `|` of a multi-line union is dropped.
	pub fn new(raw: &str) -> Self {
		let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
		let collapsed = collapsed
			.strip_prefix("| ")
			.map_or(collapsed.as_str(), str::trim_start)
			.to_string();

		Self(collapsed)
	}

	/// Used for parameters that have no annotation.
	pub fn any() -> Self {
		Self("any".to_string())
	}

	/// The type as it may appear inside a double-quoted attribute.
	pub fn as_attribute(&self) -> String {
		attribute_value(&self.0)
	}
}

/// Double quotes cannot appear inside double-quoted `PropertyReference`
/// attributes, so they are rewritten to single quotes.
pub fn attribute_value(value: &str) -> String {
	value.replace('"', "'")
}

/// One field of a subject's configuration interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterfaceProperty {
	pub name: String,
	pub r#type: TypeExpression,
	pub comment: String,
	pub required: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub default_value: Option<String>,
}

impl InterfaceProperty {
	pub fn is_deprecated(&self) -> bool {
		self.comment.contains(DEPRECATED_MARKER)
	}
}

/// A named interface (or object type alias) and its fields in declaration
/// order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterfaceDefinition {
	pub name: String,
	pub properties: Vec<InterfaceProperty>,
}

/// A constructor or method parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameter {
	pub name: String,
	pub r#type: TypeExpression,
	pub comment: String,
	pub required: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub default_value: Option<String>,
}

/// A constructor or public method of a class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodDefinition {
	pub name: String,
	/// `name(param: Type, other?: Type)`
	pub signature: String,
	pub comment: String,
	pub parameters: Vec<Parameter>,
}

impl MethodDefinition {
	pub fn new(name: impl Into<String>, comment: String, parameters: Vec<Parameter>) -> Self {
		let name = name.into();
		let arguments = parameters
			.iter()
			.map(|parameter| {
				let optional = if parameter.required || parameter.default_value.is_some() {
					""
				} else {
					"?"
				};
				format!("{}{optional}: {}", parameter.name, parameter.r#type)
			})
			.collect::<Vec<_>>()
			.join(", ");

		Self {
			signature: format!("{name}({arguments})"),
			name,
			comment,
			parameters,
		}
	}

	/// The text between the signature's parentheses.
	pub fn arguments(&self) -> &str {
		self.signature
			.split_once('(')
			.and_then(|(_, rest)| rest.strip_suffix(')'))
			.unwrap_or_default()
	}
}

/// What fills the section under the page heading.
///
/// A configuration interface always takes precedence over a constructor:
/// when the subject's first argument resolves to an interface, the
/// constructor's own parameter list is not rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "source", content = "definition", rename_all = "lowercase")]
pub enum ParameterSection {
	Interface(InterfaceDefinition),
	Constructor(MethodDefinition),
	#[default]
	None,
}

impl ParameterSection {
	pub fn resolve(
		interface: Option<InterfaceDefinition>,
		constructor: Option<MethodDefinition>,
	) -> Self {
		match (interface, constructor) {
			(Some(interface), _) => Self::Interface(interface),
			(None, Some(constructor)) => Self::Constructor(constructor),
			(None, None) => Self::None,
		}
	}
}

/// Everything a reference page is rendered from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedReference {
	pub subject: Subject,
	/// The subject's leading documentation comment.
	pub comment: String,
	pub parameters: ParameterSection,
	/// Public methods of a class subject, minus skipped signatures.
	pub methods: Vec<MethodDefinition>,
}
