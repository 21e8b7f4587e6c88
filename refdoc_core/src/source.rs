//! A narrow facade over the tree-sitter TypeScript grammar.
//!
//! Only the lookups needed to render a reference page are exposed: the
//! leading comment of a named declaration, the interface named by its first
//! argument, and a class's constructor and public methods. Nothing outside
//! this module touches the syntax tree.

use std::collections::HashSet;
use std::path::Path;
use std::path::PathBuf;

use tree_sitter::Language;
use tree_sitter::Node;
use tree_sitter::Parser;
use tree_sitter::Tree;

use crate::DocComment;
use crate::InterfaceDefinition;
use crate::InterfaceProperty;
use crate::MethodDefinition;
use crate::Parameter;
use crate::RefdocError;
use crate::RefdocResult;
use crate::Subject;
use crate::TypeExpression;
use crate::lexer::is_doc_comment;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DeclarationShape {
	Class,
	/// A function declaration, or a variable initialized with a function.
	Function,
	Interface,
	TypeAlias,
	/// Any other variable.
	Value,
}

#[derive(Debug, Clone, Copy)]
struct Declaration<'tree> {
	/// The top-level statement. Its preceding siblings hold the doc comment.
	anchor: Node<'tree>,
	/// The class, interface, type alias or function node itself.
	node: Node<'tree>,
	shape: DeclarationShape,
}

/// A parsed TypeScript or TSX source file.
pub struct SourceFile {
	path: PathBuf,
	source: String,
	tree: Tree,
}

impl std::fmt::Debug for SourceFile {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("SourceFile")
			.field("path", &self.path)
			.field("len", &self.source.len())
			.finish_non_exhaustive()
	}
}

impl SourceFile {
	/// Read and parse the file at `path`.
	pub fn open(path: &Path) -> RefdocResult<Self> {
		let source = std::fs::read_to_string(path).map_err(|e| {
			RefdocError::ReadSource {
				path: path.display().to_string(),
				reason: e.to_string(),
			}
		})?;

		Self::parse(path, source)
	}

	/// Parse `source` using the grammar selected by the extension of `path`.
	/// Any syntax error fails the parse.
	pub fn parse(path: impl Into<PathBuf>, source: impl Into<String>) -> RefdocResult<Self> {
		let path = path.into();
		let source = source.into();
		let language = language_for(&path)?;

		let mut parser = Parser::new();
		parser
			.set_language(&language)
			.map_err(|e| RefdocError::Language(e.to_string()))?;

		let tree = parser.parse(&source, None).ok_or_else(|| {
			RefdocError::Parse {
				path: path.display().to_string(),
				line: 1,
				column: 1,
			}
		})?;

		if let Some(error) = first_error(tree.root_node()) {
			let position = error.start_position();
			return Err(RefdocError::Parse {
				path: path.display().to_string(),
				line: position.row + 1,
				column: position.column + 1,
			});
		}

		tracing::debug!(path = %path.display(), "parsed source file");

		Ok(Self { path, source, tree })
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	/// Whether the subject is declared at the top level of this file with a
	/// shape that fits its kind.
	pub fn has_declaration(&self, subject: &Subject) -> bool {
		self.subject_declaration(subject).is_some()
	}

	/// The documentation comment directly preceding the subject's declaration.
	/// Line comments and decorators between the two are skipped.
	pub fn declaration_comment(&self, subject: &Subject) -> Option<DocComment> {
		let declaration = self.subject_declaration(subject)?;
		self.leading_comment(self.first_overload(declaration.anchor, subject.name()))
	}

	/// The interface named by the type of the subject's first argument. For a
	/// class this is the constructor's first parameter.
	pub fn arg0_interface(&self, subject: &Subject) -> Option<InterfaceDefinition> {
		let declaration = self.subject_declaration(subject)?;
		let function = match declaration.shape {
			DeclarationShape::Class => self.constructor_node(declaration.node)?,
			DeclarationShape::Function => declaration.node,
			_ => return None,
		};

		let parameter = parameter_nodes(function).into_iter().next()?;
		let type_node = annotation_type(parameter.child_by_field_name("type")?)?;

		self.type_definition(type_node)
	}

	/// A same-file interface or object type alias by name, with the
	/// properties of same-file base interfaces flattened in.
	pub fn interface(&self, name: &str) -> Option<InterfaceDefinition> {
		let mut visiting = HashSet::new();
		let properties = self.named_type_properties(name, &mut visiting)?;

		Some(InterfaceDefinition {
			name: name.to_string(),
			properties,
		})
	}

	pub fn constructor_definition(&self, class_name: &str) -> Option<MethodDefinition> {
		let class = self.class_declaration(class_name)?;
		let constructor = self.constructor_node(class.node)?;

		Some(self.method_definition(constructor))
	}

	/// Public methods of the class in declaration order. Private, protected
	/// and `#private` members, accessors and overload signatures are left
	/// out.
	pub fn public_method_definitions(&self, class_name: &str) -> Vec<MethodDefinition> {
		let Some(class) = self.class_declaration(class_name) else {
			return vec![];
		};

		class_members(class.node)
			.into_iter()
			.filter(|member| self.is_public_method(*member))
			.map(|member| self.method_definition(member))
			.collect()
	}

	fn text(&self, node: Node<'_>) -> &str {
		&self.source[node.byte_range()]
	}

	fn declarations(&self) -> Vec<(String, Declaration<'_>)> {
		let mut declarations = vec![];

		for statement in named_children(self.tree.root_node()) {
			self.collect_declarations(statement, statement, &mut declarations);
		}

		declarations
	}

	fn collect_declarations<'tree>(
		&'tree self,
		anchor: Node<'tree>,
		node: Node<'tree>,
		declarations: &mut Vec<(String, Declaration<'tree>)>,
	) {
		let shape = match node.kind() {
			"export_statement" => {
				if let Some(inner) = node.child_by_field_name("declaration") {
					self.collect_declarations(anchor, inner, declarations);
				}
				return;
			}
			"ambient_declaration" => {
				for inner in named_children(node) {
					self.collect_declarations(anchor, inner, declarations);
				}
				return;
			}
			"lexical_declaration" | "variable_declaration" => {
				for declarator in named_children(node) {
					if declarator.kind() != "variable_declarator" {
						continue;
					}
					let Some(name) = declarator.child_by_field_name("name") else {
						continue;
					};
					let declaration = match declarator
						.child_by_field_name("value")
						.and_then(function_like)
					{
						Some(function) => {
							Declaration {
								anchor,
								node: function,
								shape: DeclarationShape::Function,
							}
						}
						None => {
							Declaration {
								anchor,
								node: declarator,
								shape: DeclarationShape::Value,
							}
						}
					};
					declarations.push((self.text(name).to_string(), declaration));
				}
				return;
			}
			"class_declaration" | "abstract_class_declaration" => DeclarationShape::Class,
			"function_declaration" | "generator_function_declaration" => DeclarationShape::Function,
			"interface_declaration" => DeclarationShape::Interface,
			"type_alias_declaration" => DeclarationShape::TypeAlias,
			_ => return,
		};

		if let Some(name) = node.child_by_field_name("name") {
			declarations.push((
				self.text(name).to_string(),
				Declaration {
					anchor,
					node,
					shape,
				},
			));
		}
	}

	fn find_declaration(
		&self,
		name: &str,
		accepts: impl Fn(DeclarationShape) -> bool,
	) -> Option<Declaration<'_>> {
		self.declarations()
			.into_iter()
			.find(|(declared, declaration)| declared == name && accepts(declaration.shape))
			.map(|(_, declaration)| declaration)
	}

	fn subject_declaration(&self, subject: &Subject) -> Option<Declaration<'_>> {
		let accepts = |shape: DeclarationShape| {
			match subject {
				Subject::Class(_) => shape == DeclarationShape::Class,
				Subject::Component(_) => {
					matches!(
						shape,
						DeclarationShape::Class | DeclarationShape::Function | DeclarationShape::Value
					)
				}
				Subject::Hook(_) => {
					matches!(shape, DeclarationShape::Function | DeclarationShape::Value)
				}
			}
		};

		self.find_declaration(subject.name(), accepts)
	}

	fn class_declaration(&self, name: &str) -> Option<Declaration<'_>> {
		self.find_declaration(name, |shape| shape == DeclarationShape::Class)
	}

	fn leading_comment(&self, anchor: Node<'_>) -> Option<DocComment> {
		let mut sibling = anchor.prev_named_sibling();

		while let Some(node) = sibling {
			match node.kind() {
				"comment" => {
					let raw = self.text(node);
					if is_doc_comment(raw) {
						return Some(DocComment::parse(raw));
					}
				}
				"decorator" => {}
				_ => return None,
			}
			sibling = node.prev_named_sibling();
		}

		None
	}

	/// The first of the overload signatures directly preceding `node`, or
	/// `node` itself. TypeScript documents overloads on the first signature.
	fn first_overload<'tree>(&self, node: Node<'tree>, name: &str) -> Node<'tree> {
		let mut first = node;

		while let Some(previous) = first.prev_named_sibling() {
			if self.overload_name(previous) != Some(name) {
				break;
			}
			first = previous;
		}

		first
	}

	/// Name of a body-less `function_signature` or `method_signature`,
	/// looking through `export`.
	fn overload_name(&self, node: Node<'_>) -> Option<&str> {
		match node.kind() {
			"function_signature" | "method_signature" => {
				node.child_by_field_name("name").map(|name| self.text(name))
			}
			"export_statement" => {
				node.child_by_field_name("declaration")
					.and_then(|declaration| self.overload_name(declaration))
			}
			_ => None,
		}
	}

	fn constructor_node<'tree>(&'tree self, class: Node<'tree>) -> Option<Node<'tree>> {
		class_members(class).into_iter().find(|member| {
			member.kind() == "method_definition"
				&& member
					.child_by_field_name("name")
					.is_some_and(|name| self.text(name) == "constructor")
		})
	}

	fn is_public_method(&self, member: Node<'_>) -> bool {
		if member.kind() != "method_definition" {
			return false;
		}

		let Some(name) = member.child_by_field_name("name") else {
			return false;
		};

		if name.kind() == "private_property_identifier" || self.text(name) == "constructor" {
			return false;
		}

		!children(member).iter().any(|child| {
			match child.kind() {
				"get" | "set" => true,
				"accessibility_modifier" => matches!(self.text(*child), "private" | "protected"),
				_ => false,
			}
		})
	}

	fn method_definition(&self, member: Node<'_>) -> MethodDefinition {
		let name_node = member.child_by_field_name("name");
		let first = name_node.map_or(member, |name| self.first_overload(member, self.text(name)));
		let doc = self.leading_comment(first).unwrap_or_default();
		let name = name_node
			.map(|name| self.property_name(name))
			.unwrap_or_default();
		let parameters = parameter_nodes(member)
			.into_iter()
			.filter_map(|parameter| self.parameter(parameter, &doc))
			.collect();

		MethodDefinition::new(name, doc.text_without(&["param"]), parameters)
	}

	fn parameter(&self, node: Node<'_>, doc: &DocComment) -> Option<Parameter> {
		let (pattern, annotation, value, optional) = match node.kind() {
			"required_parameter" | "optional_parameter" => {
				(
					node.child_by_field_name("pattern")?,
					node.child_by_field_name("type"),
					node.child_by_field_name("value"),
					node.kind() == "optional_parameter",
				)
			}
			"identifier" => (node, None, None, false),
			_ => return None,
		};

		if pattern.kind() == "this" {
			return None;
		}

		let name = collapse_whitespace(self.text(pattern));
		let is_rest = pattern.kind() == "rest_pattern";
		let r#type = annotation
			.and_then(annotation_type)
			.map_or_else(TypeExpression::any, |node| TypeExpression::new(self.text(node)));
		let default_value = value.map(|value| collapse_whitespace(self.text(value)));
		let comment = doc.param(name.trim_start_matches("...")).unwrap_or_default();

		Some(Parameter {
			required: !optional && !is_rest && default_value.is_none(),
			name,
			r#type,
			comment,
			default_value,
		})
	}

	/// Resolve a type annotation to the properties it describes: a named
	/// interface or alias, an inline object type, or an intersection of them.
	fn type_definition(&self, type_node: Node<'_>) -> Option<InterfaceDefinition> {
		for name in self.type_reference_names(type_node) {
			if let Some(definition) = self.interface(&name) {
				return Some(definition);
			}
		}

		let mut visiting = HashSet::new();
		let properties = self.type_properties(type_node, &mut visiting)?;

		Some(InterfaceDefinition {
			name: collapse_whitespace(self.text(type_node)),
			properties,
		})
	}

	/// Candidate names for a type reference. `Partial<Options>` yields
	/// `Partial` and then `Options`.
	fn type_reference_names(&self, node: Node<'_>) -> Vec<String> {
		match node.kind() {
			"type_identifier" => vec![self.text(node).to_string()],
			"nested_type_identifier" => {
				let text = self.text(node);
				vec![text.rsplit('.').next().unwrap_or(text).to_string()]
			}
			"generic_type" => {
				let mut names = node
					.child_by_field_name("name")
					.map(|name| self.type_reference_names(name))
					.unwrap_or_default();

				if let Some(arguments) = node.child_by_field_name("type_arguments") {
					for argument in named_children(arguments) {
						names.extend(self.type_reference_names(argument));
					}
				}

				names
			}
			"parenthesized_type" => {
				named_children(node)
					.into_iter()
					.flat_map(|inner| self.type_reference_names(inner))
					.collect()
			}
			_ => vec![],
		}
	}

	fn named_type_properties(
		&self,
		name: &str,
		visiting: &mut HashSet<String>,
	) -> Option<Vec<InterfaceProperty>> {
		if !visiting.insert(name.to_string()) {
			return None;
		}

		let declaration = self.find_declaration(name, |shape| {
			matches!(shape, DeclarationShape::Interface | DeclarationShape::TypeAlias)
		})?;

		match declaration.shape {
			DeclarationShape::Interface => {
				let mut properties = vec![];

				for base in self.extended_types(declaration.node) {
					if let Some(inherited) = self.named_type_properties(&base, visiting) {
						merge_properties(&mut properties, inherited);
					}
				}

				if let Some(body) = declaration.node.child_by_field_name("body") {
					merge_properties(&mut properties, self.members(body));
				}

				Some(properties)
			}
			DeclarationShape::TypeAlias => {
				let value = declaration.node.child_by_field_name("value")?;
				self.type_properties(value, visiting)
			}
			_ => None,
		}
	}

	fn type_properties(
		&self,
		node: Node<'_>,
		visiting: &mut HashSet<String>,
	) -> Option<Vec<InterfaceProperty>> {
		match node.kind() {
			"object_type" => Some(self.members(node)),
			"parenthesized_type" => {
				let inner = named_children(node).into_iter().next()?;
				self.type_properties(inner, visiting)
			}
			"intersection_type" => {
				let mut properties = vec![];
				for part in named_children(node) {
					if let Some(part_properties) = self.type_properties(part, visiting) {
						merge_properties(&mut properties, part_properties);
					}
				}
				Some(properties)
			}
			"type_identifier" | "nested_type_identifier" | "generic_type" => {
				self.type_reference_names(node)
					.into_iter()
					.find_map(|name| self.named_type_properties(&name, visiting))
			}
			_ => None,
		}
	}

	fn extended_types(&self, interface: Node<'_>) -> Vec<String> {
		named_children(interface)
			.into_iter()
			.filter(|child| child.kind() == "extends_type_clause")
			.flat_map(named_children)
			.filter_map(|base| self.type_reference_names(base).into_iter().next())
			.collect()
	}

	fn members(&self, body: Node<'_>) -> Vec<InterfaceProperty> {
		named_children(body)
			.into_iter()
			.filter_map(|member| self.member(member))
			.collect()
	}

	fn member(&self, member: Node<'_>) -> Option<InterfaceProperty> {
		let r#type = match member.kind() {
			"property_signature" => {
				member
					.child_by_field_name("type")
					.and_then(annotation_type)
					.map_or_else(TypeExpression::any, |node| TypeExpression::new(self.text(node)))
			}
			"method_signature" => {
				let parameters = member
					.child_by_field_name("parameters")
					.map_or("()", |node| self.text(node));
				let returns = member
					.child_by_field_name("return_type")
					.and_then(annotation_type)
					.map_or("void", |node| self.text(node));
				TypeExpression::new(&format!("{parameters} => {returns}"))
			}
			_ => return None,
		};

		let name = self.property_name(member.child_by_field_name("name")?);
		let optional = children(member).iter().any(|child| child.kind() == "?");
		let doc = self.leading_comment(member).unwrap_or_default();

		Some(InterfaceProperty {
			name,
			r#type,
			comment: doc.property_text(),
			required: !optional,
			default_value: doc.default_value(),
		})
	}

	fn property_name(&self, node: Node<'_>) -> String {
		let text = self.text(node);
		match node.kind() {
			"string" => text.trim_matches(|c| c == '"' || c == '\'').to_string(),
			_ => text.to_string(),
		}
	}
}

fn language_for(path: &Path) -> RefdocResult<Language> {
	let extension = path
		.extension()
		.and_then(|extension| extension.to_str())
		.unwrap_or_default()
		.to_ascii_lowercase();

	match extension.as_str() {
		"ts" | "mts" | "cts" => Ok(tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into()),
		"tsx" | "jsx" | "js" | "mjs" | "cjs" => Ok(tree_sitter_typescript::LANGUAGE_TSX.into()),
		_ => Err(RefdocError::UnsupportedSource(path.display().to_string())),
	}
}

fn first_error(node: Node<'_>) -> Option<Node<'_>> {
	if node.is_error() || node.is_missing() {
		return Some(node);
	}

	if !node.has_error() {
		return None;
	}

	children(node).into_iter().find_map(first_error)
}

fn children(node: Node<'_>) -> Vec<Node<'_>> {
	let mut cursor = node.walk();
	node.children(&mut cursor).collect()
}

fn named_children(node: Node<'_>) -> Vec<Node<'_>> {
	let mut cursor = node.walk();
	node.named_children(&mut cursor).collect()
}

fn class_members(class: Node<'_>) -> Vec<Node<'_>> {
	class
		.child_by_field_name("body")
		.map(named_children)
		.unwrap_or_default()
}

/// The function inside a variable initializer, looking through wrappers
/// such as `forwardRef(...)`, `memo(...)` and `as` casts.
fn function_like(node: Node<'_>) -> Option<Node<'_>> {
	match node.kind() {
		"arrow_function" | "function_expression" | "function" | "generator_function" => Some(node),
		"call_expression" => {
			let arguments = node.child_by_field_name("arguments")?;
			named_children(arguments).into_iter().find_map(function_like)
		}
		"parenthesized_expression" | "as_expression" | "satisfies_expression" => {
			named_children(node).into_iter().next().and_then(function_like)
		}
		_ => None,
	}
}

fn parameter_nodes(function: Node<'_>) -> Vec<Node<'_>> {
	if let Some(parameters) = function.child_by_field_name("parameters") {
		return named_children(parameters)
			.into_iter()
			.filter(|node| matches!(node.kind(), "required_parameter" | "optional_parameter"))
			.collect();
	}

	function
		.child_by_field_name("parameter")
		.into_iter()
		.collect()
}

/// The type inside a `: Type` annotation.
fn annotation_type(annotation: Node<'_>) -> Option<Node<'_>> {
	named_children(annotation).into_iter().next()
}

/// Later properties replace earlier ones of the same name in place.
fn merge_properties(properties: &mut Vec<InterfaceProperty>, incoming: Vec<InterfaceProperty>) {
	for property in incoming {
		match properties.iter_mut().find(|existing| existing.name == property.name) {
			Some(existing) => *existing = property,
			None => properties.push(property),
		}
	}
}

fn collapse_whitespace(text: &str) -> String {
	text.split_whitespace().collect::<Vec<_>>().join(" ")
}
