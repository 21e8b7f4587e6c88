//! Turns an [`ExtractedReference`] into the text of an MDX reference page.
//!
//! The output depends only on its inputs, so the same source and
//! configuration always produce byte-identical pages.

use crate::ExtractedReference;
use crate::GeneratorOptions;
use crate::InterfaceProperty;
use crate::MethodDefinition;
use crate::Parameter;
use crate::ParameterSection;
use crate::ReferenceDocConfiguration;
use crate::attribute_value;

const NESTED_INDENT: &str = "  ";

/// Render the full page for `doc`.
pub fn render_page(
	doc: &ReferenceDocConfiguration,
	extracted: &ExtractedReference,
	options: &GeneratorOptions,
) -> String {
	let mut page = String::new();

	page.push_str(&front_matter(doc));
	page.push_str(&banner(&options.banner_prefix, &doc.source_path));
	page.push_str(&format!("{}\n\n", extracted.comment));
	page.push_str(&format!("## {}\n\n", doc.subject.kind().section_heading()));

	match &extracted.parameters {
		ParameterSection::Interface(interface) => {
			for property in interface.properties.iter().filter(|p| !p.is_deprecated()) {
				page.push_str(&property_block(property));
			}
		}
		ParameterSection::Constructor(constructor) => {
			page.push_str(&format!("## {}\n\n", constructor.signature));
			page.push_str(&format!("{}\n\n", constructor.comment));
			for parameter in &constructor.parameters {
				page.push_str(&parameter_block(parameter, ""));
			}
		}
		ParameterSection::None => {}
	}

	for method in &extracted.methods {
		page.push_str(&method_block(method));
	}

	page
}

fn front_matter(doc: &ReferenceDocConfiguration) -> String {
	let mut front_matter = String::from("---\n");
	front_matter.push_str(&format!("title: \"{}\"\n", yaml_escape(doc.subject.name())));

	if let Some(description) = &doc.description {
		front_matter.push_str(&format!("description: \"{}\"\n", yaml_escape(description)));
	}

	front_matter.push_str("---\n\n");
	front_matter
}

/// The non-rendered warning block naming the file the page is generated
/// from.
fn banner(prefix: &str, source_path: &str) -> String {
	let location = if prefix.is_empty() {
		source_path.to_string()
	} else {
		format!("{}/{}", prefix.trim_end_matches('/'), source_path)
	};

	format!(
		"{{\n /*\n  * ATTENTION! DO NOT MODIFY THIS FILE!\n  * This page is auto-generated. If you \
		 want to make any changes to this page, changes must be made at:\n  * {location}\n  \
		 */\n}}\n"
	)
}

fn property_block(property: &InterfaceProperty) -> String {
	let open = open_tag(
		&property.name,
		&property.r#type.as_attribute(),
		property.required,
		property.default_value.as_deref(),
	);

	format!("{open}\n{}\n</PropertyReference>\n\n", property.comment)
}

fn parameter_block(parameter: &Parameter, indent: &str) -> String {
	let open = open_tag(
		&parameter.name,
		&parameter.r#type.as_attribute(),
		parameter.required,
		parameter.default_value.as_deref(),
	);

	format!(
		"{indent}{open}\n{}\n{indent}</PropertyReference>\n\n",
		indent_lines(&parameter.comment, indent)
	)
}

fn method_block(method: &MethodDefinition) -> String {
	let open = open_tag(&method.name, &attribute_value(method.arguments()), false, None);
	let mut block = format!("{open}\n{}\n\n", method.comment);

	for parameter in &method.parameters {
		block.push_str(&parameter_block(parameter, NESTED_INDENT));
	}

	block.push_str("</PropertyReference>\n\n");
	block
}

/// `<PropertyReference name="..." type="..." required default="...">`
fn open_tag(name: &str, type_value: &str, required: bool, default_value: Option<&str>) -> String {
	let mut attributes = vec![format!("name=\"{name}\""), format!("type=\"{type_value}\"")];

	if required {
		attributes.push("required".to_string());
	}

	if let Some(default_value) = default_value {
		attributes.push(format!("default=\"{}\"", attribute_value(default_value)));
	}

	format!("<PropertyReference {}>", attributes.join(" "))
}

fn indent_lines(text: &str, indent: &str) -> String {
	if indent.is_empty() {
		return text.to_string();
	}

	text.lines()
		.map(|line| {
			if line.trim().is_empty() {
				String::new()
			} else {
				format!("{indent}{line}")
			}
		})
		.collect::<Vec<_>>()
		.join("\n")
}

fn yaml_escape(value: &str) -> String {
	value.replace('\\', "\\\\").replace('"', "\\\"")
}
