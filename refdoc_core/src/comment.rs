use crate::lexer::comment_lines;

/// Tags whose value is rendered as a `default` attribute instead of being
/// left in the comment body.
const DEFAULT_TAGS: [&str; 2] = ["default", "defaultValue"];

/// The marker that hides a property from generated pages.
pub const DEPRECATED_MARKER: &str = "@deprecated";

/// A cleaned JSDoc comment split into its description and block tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocComment {
	lines: Vec<String>,
	description: Vec<String>,
	tags: Vec<DocTag>,
}

/// A block tag such as `@param name text` or `@default 10`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DocTag {
	name: String,
	/// Text after the tag name, one entry per source line.
	lines: Vec<String>,
}

impl DocTag {
	fn body(&self) -> String {
		self.lines.join("\n").trim().to_string()
	}

	fn raw_lines(&self) -> impl Iterator<Item = String> + '_ {
		self.lines.iter().enumerate().map(|(index, line)| {
			if index == 0 {
				if line.is_empty() {
					format!("@{}", self.name)
				} else {
					format!("@{} {line}", self.name)
				}
			} else {
				line.clone()
			}
		})
	}
}

impl DocComment {
	/// Parse a raw `/** ... */` comment.
	pub fn parse(raw: &str) -> Self {
		Self::from_lines(comment_lines(raw))
	}

	fn from_lines(lines: Vec<String>) -> Self {
		let mut description = vec![];
		let mut tags: Vec<DocTag> = vec![];
		let mut fence: Option<char> = None;

		for line in &lines {
			let trimmed = line.trim_start();

			if let Some(marker) = fence_marker(trimmed) {
				match fence {
					Some(open) if open == marker => fence = None,
					None => fence = Some(marker),
					Some(_) => {}
				}
			}

			if fence.is_none() {
				if let Some((name, rest)) = split_tag(trimmed) {
					tags.push(DocTag {
						name: name.to_string(),
						lines: vec![rest.to_string()],
					});
					continue;
				}
			}

			match tags.last_mut() {
				Some(tag) => tag.lines.push(line.clone()),
				None => description.push(line.clone()),
			}
		}

		Self {
			lines,
			description,
			tags,
		}
	}

	pub fn is_empty(&self) -> bool {
		self.lines.is_empty()
	}

	/// The whole comment without markers or gutter.
	pub fn text(&self) -> String {
		self.lines.join("\n")
	}

	/// The text before the first block tag.
	#[cfg(test)]
	pub(crate) fn description(&self) -> String {
		trim_blank_lines(&self.description).join("\n")
	}

	#[cfg(test)]
	pub(crate) fn tags(&self) -> &[DocTag] {
		&self.tags
	}

	/// Value of the `@default` (or `@defaultValue`) tag with whitespace
	/// collapsed.
	pub fn default_value(&self) -> Option<String> {
		let tag = self
			.tags
			.iter()
			.find(|tag| DEFAULT_TAGS.contains(&tag.name.as_str()))?;
		let value = tag.body().split_whitespace().collect::<Vec<_>>().join(" ");

		(!value.is_empty()).then_some(value)
	}

	/// The comment with the named block tags removed.
	pub fn text_without(&self, excluded: &[&str]) -> String {
		let mut lines: Vec<String> = self.description.clone();

		for tag in &self.tags {
			if excluded.contains(&tag.name.as_str()) {
				continue;
			}
			lines.extend(tag.raw_lines());
		}

		trim_blank_lines(&lines).join("\n")
	}

	/// The comment text used for a property: everything except the default
	/// value tags.
	pub fn property_text(&self) -> String {
		self.text_without(&DEFAULT_TAGS)
	}

	/// Description of the `@param` tag documenting `name`.
	pub fn param(&self, name: &str) -> Option<String> {
		self.tags
			.iter()
			.filter(|tag| tag.name == "param")
			.filter_map(|tag| parse_param(&tag.body()))
			.find(|(param, _)| param == name)
			.map(|(_, text)| text)
	}
}

/// Returns the fence character when the line opens or closes a fenced code
/// block.
fn fence_marker(trimmed: &str) -> Option<char> {
	if trimmed.starts_with("```") {
		Some('`')
	} else if trimmed.starts_with("~~~") {
		Some('~')
	} else {
		None
	}
}

/// Split `@name rest` into its parts. The name must be followed by
/// whitespace or the end of the line, so `@scope/package` is not a tag.
fn split_tag(trimmed: &str) -> Option<(&str, &str)> {
	let after_at = trimmed.strip_prefix('@')?;
	let name_len = after_at
		.find(|c: char| !c.is_ascii_alphanumeric())
		.unwrap_or(after_at.len());

	if name_len == 0 || !after_at[..name_len].starts_with(|c: char| c.is_ascii_alphabetic()) {
		return None;
	}

	let rest = &after_at[name_len..];
	if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
		return None;
	}

	Some((&after_at[..name_len], rest.trim()))
}

/// Parse the body of a `@param` tag into the parameter name and its text.
/// Accepts `{Type} name - text`, `[name=default] text` and `name text`.
fn parse_param(body: &str) -> Option<(String, String)> {
	let mut rest = body.trim_start();

	if rest.starts_with('{') {
		let mut depth = 0usize;
		let mut end = None;
		for (index, c) in rest.char_indices() {
			match c {
				'{' => depth += 1,
				'}' => {
					depth -= 1;
					if depth == 0 {
						end = Some(index);
						break;
					}
				}
				_ => {}
			}
		}
		rest = rest[end? + 1..].trim_start();
	}

	let name_end = rest.find(char::is_whitespace).unwrap_or(rest.len());
	let (raw_name, text) = rest.split_at(name_end);
	let name = raw_name
		.trim_start_matches('[')
		.trim_end_matches(']')
		.split('=')
		.next()
		.unwrap_or_default()
		.trim();

	if name.is_empty() {
		return None;
	}

	let text = text.trim_start();
	let text = text.strip_prefix('-').map_or(text, str::trim_start);

	Some((name.to_string(), text.trim().to_string()))
}

fn trim_blank_lines(lines: &[String]) -> &[String] {
	let start = lines.iter().position(|line| !line.trim().is_empty());
	let end = lines.iter().rposition(|line| !line.trim().is_empty());

	match (start, end) {
		(Some(start), Some(end)) => &lines[start..=end],
		_ => &[],
	}
}
