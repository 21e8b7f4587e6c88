use logos::Logos;

/// Raw tokens produced by logos for a `/** ... */` comment.
#[derive(Logos, Debug, PartialEq)]
enum RawToken {
	#[token("/**")]
	DocOpen,
	#[token("/*")]
	BlockOpen,
	#[token("*/")]
	Close,
	#[token("*")]
	Star,
	#[token("\n")]
	Newline,
	#[regex(r"[ \t\r]+")]
	Whitespace,
	#[regex(r"[^ \t\r\n*]+")]
	Text,
}

/// Context states for the walker.
enum LexerContext {
	/// Before the opening marker.
	Start,
	/// At the beginning of a line, where the `*` gutter may appear.
	LineStart,
	/// Inside the text of a line.
	Body,
	/// After the closing marker.
	Done,
}

/// Walks the logos token stream and rebuilds the comment body line by line
/// without the comment markers and gutter.
struct TokenWalker<'a> {
	source: &'a str,
	raw_tokens: Vec<(Result<RawToken, ()>, std::ops::Range<usize>)>,
	cursor: usize,
	context: LexerContext,
	/// The line currently being built.
	line: String,
	lines: Vec<String>,
}

impl<'a> TokenWalker<'a> {
	fn new(source: &'a str) -> Self {
		let raw_tokens: Vec<_> = RawToken::lexer(source).spanned().collect();

		Self {
			source,
			raw_tokens,
			cursor: 0,
			context: LexerContext::Start,
			line: String::new(),
			lines: vec![],
		}
	}

	fn current_slice(&self) -> &'a str {
		let (_, span) = &self.raw_tokens[self.cursor];
		&self.source[span.clone()]
	}

	fn push_slice(&mut self) {
		let slice = self.current_slice();
		self.line.push_str(slice);
		self.cursor += 1;
	}

	fn finish_line(&mut self) {
		let line = std::mem::take(&mut self.line);
		self.lines.push(line.trim_end().to_string());
	}

	/// Consume the gutter `*` and at most one space after it.
	fn skip_gutter(&mut self) {
		self.cursor += 1;

		let Some((Ok(RawToken::Whitespace), _)) = self.raw_tokens.get(self.cursor) else {
			return;
		};

		let whitespace = self.current_slice();
		self.line.push_str(&whitespace[1..]);
		self.cursor += 1;
	}

	fn process(&mut self) {
		while self.cursor < self.raw_tokens.len() {
			let (result, _) = &self.raw_tokens[self.cursor];

			match self.context {
				LexerContext::Start => {
					if matches!(result, Ok(RawToken::DocOpen | RawToken::BlockOpen)) {
						self.context = LexerContext::Body;
					}
					self.cursor += 1;
				}
				LexerContext::LineStart => {
					match result {
						Ok(RawToken::Whitespace) => self.cursor += 1,
						Ok(RawToken::Star) => {
							self.skip_gutter();
							self.context = LexerContext::Body;
						}
						Ok(RawToken::Close) => {
							self.finish_line();
							self.context = LexerContext::Done;
						}
						Ok(RawToken::Newline) => {
							self.finish_line();
							self.cursor += 1;
						}
						_ => self.context = LexerContext::Body,
					}
				}
				LexerContext::Body => {
					match result {
						Ok(RawToken::Newline) => {
							self.finish_line();
							self.context = LexerContext::LineStart;
							self.cursor += 1;
						}
						Ok(RawToken::Close) => {
							self.finish_line();
							self.context = LexerContext::Done;
						}
						// Logos errors carry text we still want to keep.
						_ => self.push_slice(),
					}
				}
				LexerContext::Done => break,
			}
		}

		if !self.line.is_empty() {
			self.finish_line();
		}
	}
}

/// Returns true for `/** ... */` documentation comments. Line comments,
/// plain block comments and the empty `/**/` are not documentation.
pub fn is_doc_comment(raw: &str) -> bool {
	raw.starts_with("/**") && !raw.starts_with("/**/")
}

/// Strip the comment markers and `*` gutter from a block comment, returning
/// its lines. Indentation after the gutter's single space is preserved and
/// leading/trailing blank lines are dropped.
pub fn comment_lines(raw: &str) -> Vec<String> {
	let mut walker = TokenWalker::new(raw);
	walker.process();

	let mut lines = walker.lines;
	if let Some(first) = lines.first_mut() {
		*first = first.trim_start().to_string();
	}

	let start = lines.iter().position(|line| !line.trim().is_empty());
	let end = lines.iter().rposition(|line| !line.trim().is_empty());

	match (start, end) {
		(Some(start), Some(end)) => lines.drain(start..=end).collect(),
		_ => vec![],
	}
}
