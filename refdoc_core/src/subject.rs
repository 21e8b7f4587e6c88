use derive_more::Display;
use serde::Serialize;

use crate::RefdocError;
use crate::RefdocResult;

/// The kind of API surface a reference page documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubjectKind {
	#[display("class")]
	Class,
	#[display("component")]
	Component,
	#[display("hook")]
	Hook,
}

impl SubjectKind {
	/// The heading placed above the property blocks of a page.
	pub fn section_heading(self) -> &'static str {
		match self {
			Self::Hook => "Parameters",
			Self::Component => "Properties",
			Self::Class => "Constructor Parameters",
		}
	}
}

/// The one declaration a reference page is generated for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "name", rename_all = "lowercase")]
pub enum Subject {
	Class(String),
	Component(String),
	Hook(String),
}

impl Subject {
	/// Build a subject from the three mutually exclusive configuration fields.
	/// Exactly one of them must be set.
	pub fn from_fields(
		class_name: Option<String>,
		component: Option<String>,
		hook: Option<String>,
	) -> RefdocResult<Self> {
		match (class_name, component, hook) {
			(Some(name), None, None) => Self::named(SubjectKind::Class, name),
			(None, Some(name), None) => Self::named(SubjectKind::Component, name),
			(None, None, Some(name)) => Self::named(SubjectKind::Hook, name),
			(None, None, None) => {
				Err(RefdocError::InvalidSubject(
					"no class, component or hook was given".to_string(),
				))
			}
			(class_name, component, hook) => {
				let set: Vec<String> = [
					class_name.map(|name| format!("class `{name}`")),
					component.map(|name| format!("component `{name}`")),
					hook.map(|name| format!("hook `{name}`")),
				]
				.into_iter()
				.flatten()
				.collect();

				Err(RefdocError::InvalidSubject(format!(
					"more than one subject was given: {}",
					set.join(", ")
				)))
			}
		}
	}

	fn named(kind: SubjectKind, name: String) -> RefdocResult<Self> {
		let name = name.trim().to_string();
		if name.is_empty() {
			return Err(RefdocError::InvalidSubject(format!(
				"the {kind} name is empty"
			)));
		}

		Ok(match kind {
			SubjectKind::Class => Self::Class(name),
			SubjectKind::Component => Self::Component(name),
			SubjectKind::Hook => Self::Hook(name),
		})
	}

	pub fn kind(&self) -> SubjectKind {
		match self {
			Self::Class(_) => SubjectKind::Class,
			Self::Component(_) => SubjectKind::Component,
			Self::Hook(_) => SubjectKind::Hook,
		}
	}

	pub fn name(&self) -> &str {
		match self {
			Self::Class(name) | Self::Component(name) | Self::Hook(name) => name,
		}
	}

	pub fn is_class(&self) -> bool {
		matches!(self, Self::Class(_))
	}
}

impl std::fmt::Display for Subject {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{} `{}`", self.kind(), self.name())
	}
}
