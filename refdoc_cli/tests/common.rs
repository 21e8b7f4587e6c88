#![allow(dead_code)]

use std::path::Path;
use std::path::PathBuf;

use assert_cmd::Command;
use insta_cmd::get_cargo_bin;
use tempfile::TempDir;

pub const CHAT_HOOK_SOURCE: &str = r#"/**
 * Options for useCopilotChat.
 */
export interface UseCopilotChatOptions {
  /** The chat id. */
  id: string;
  /**
   * Initial messages.
   * @default []
   */
  initialMessages?: Message[];
  /**
   * @deprecated use `id`
   */
  chatId?: string;
}

/**
 * A hook for chatting with the copilot.
 */
export function useCopilotChat(options: UseCopilotChatOptions) {
  return options;
}
"#;

pub const RUNTIME_SOURCE: &str = r#"/**
 * The CopilotRuntime class.
 */
export class CopilotRuntime {
  /**
   * Create a runtime.
   * @param endpoint The endpoint to call.
   */
  constructor(endpoint: string) {}

  /** Process a request. */
  process(request: CopilotRuntimeRequest) {}

  /**
   * Run an action.
   * @param name The action name.
   */
  runAction(name: string): void {}
}
"#;

pub const UNDOCUMENTED_SOURCE: &str = r#"export function useUndocumented(options: { enabled: boolean }) {
  return options.enabled;
}
"#;

pub const HOOK_DOC: &str = r#"
[[docs]]
source_path = "src/use-copilot-chat.ts"
destination_path = "docs/reference/useCopilotChat.mdx"
hook = "useCopilotChat"
description = "The useCopilotChat hook."
"#;

pub const RUNTIME_DOC: &str = r#"
[[docs]]
source_path = "src/runtime.ts"
destination_path = "docs/reference/CopilotRuntime.mdx"
class_name = "CopilotRuntime"
"#;

pub fn refdoc_cmd() -> Command {
	let mut cmd = Command::new(get_cargo_bin("refdoc"));
	cmd.env("NO_COLOR", "1");
	cmd.env_remove("REFDOC_LOG");
	cmd
}

/// A temporary directory with the project under `repo/`. Pages land in the
/// temporary directory itself because the default output root is `..`.
pub struct Project {
	pub tmp: TempDir,
}

impl Project {
	pub fn new(config: Option<&str>, files: &[(&str, &str)]) -> Self {
		let tmp = tempfile::tempdir().unwrap_or_else(|e| panic!("tempdir: {e}"));
		let project = Self { tmp };

		std::fs::create_dir_all(project.root()).unwrap_or_else(|e| panic!("mkdir: {e}"));
		if let Some(config) = config {
			project.write("refdoc.toml", config);
		}
		for (path, content) in files {
			project.write(path, content);
		}

		project
	}

	pub fn root(&self) -> PathBuf {
		self.tmp.path().join("repo")
	}

	/// Path of a generated page under the default output root.
	pub fn page(&self, destination: &str) -> PathBuf {
		self.tmp.path().join(destination)
	}

	pub fn write(&self, relative: &str, content: &str) {
		write_file(&self.root(), relative, content);
	}
}

pub fn write_file(root: &Path, relative: &str, content: &str) {
	let path = root.join(relative);
	if let Some(parent) = path.parent() {
		std::fs::create_dir_all(parent).unwrap_or_else(|e| panic!("mkdir: {e}"));
	}
	std::fs::write(&path, content).unwrap_or_else(|e| panic!("write {}: {e}", path.display()));
}
