//! `refdoc_core` generates MDX reference pages for the public API of a
//! TypeScript library. Each page documents one subject (a class, a React
//! component or a hook) and is built from the subject's leading JSDoc
//! comment, the interface of its first argument and, for classes, the
//! constructor and public methods.
//!
//! ## Processing Pipeline
//!
//! ```text
//! refdoc.toml
//!   -> Config ([[docs]] entries, output root, banner prefix, skipped methods)
//!   -> Source facade (tree-sitter parse, narrow declaration lookups)
//!   -> Comment lexer (JSDoc markers, gutter and block tags)
//!   -> Model (properties, parameters, methods, explicit section precedence)
//!   -> Renderer (front matter, banner, PropertyReference blocks)
//!   -> Engine (atomic write, staleness check, batch reports)
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use refdoc_core::GeneratorOptions;
//! use refdoc_core::ReferenceDoc;
//! use refdoc_core::ReferenceDocConfiguration;
//! use refdoc_core::Subject;
//!
//! let config = ReferenceDocConfiguration::new(
//! 	"packages/react-core/src/hooks/use-copilot-chat.ts",
//! 	"docs/reference/hooks/useCopilotChat.mdx",
//! 	Subject::Hook("useCopilotChat".to_string()),
//! );
//! let doc = ReferenceDoc::new(config, GeneratorOptions::with_root("."));
//! doc.generate()?;
//! # Ok::<(), refdoc_core::RefdocError>(())
//! ```

pub use comment::*;
pub use config::*;
pub use engine::*;
pub use error::*;
pub use model::*;
pub use render::*;
pub use source::*;
pub use subject::*;

mod comment;
pub mod config;
mod engine;
#[allow(unused_assignments)]
mod error;
pub(crate) mod lexer;
mod model;
mod render;
pub mod source;
mod subject;

#[cfg(test)]
mod __fixtures;
