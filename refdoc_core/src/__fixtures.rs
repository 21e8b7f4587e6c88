use std::path::Path;

use tempfile::TempDir;

use crate::GeneratorOptions;
use crate::ReferenceDocConfiguration;
use crate::Subject;

pub(crate) const RUNTIME_SOURCE: &str = r#"import { CopilotRuntimeRequest } from "./types";

/**
 * Options for the runtime.
 */
export interface CopilotRuntimeOptions {
  /**
   * The endpoint to call.
   */
  endpoint: string;

  /**
   * How many retries.
   * @default 3
   */
  retries?: number;

  /**
   * @deprecated use `endpoint` instead
   */
  url?: string;

  /** The mode of the runtime. */
  mode?: "fast" | "slow";
}

/**
 * The CopilotRuntime class.
 *
 * ```ts
 * const runtime = new CopilotRuntime();
 * ```
 */
export class CopilotRuntime {
  constructor(options?: CopilotRuntimeOptions) {}

  /**
   * Process a request.
   */
  async process(request: CopilotRuntimeRequest) {}

  /**
   * Run an action.
   * @param name - The action name.
   * @param args The action arguments.
   */
  runAction(name: string, args?: Record<string, unknown>): void {}

  private secret(): void {}

  get value(): number {
    return 1;
  }
}
"#;

pub(crate) const RUNTIME_PAGE: &str = r#"---
title: "CopilotRuntime"
description: "The runtime."
---

{
 /*
  * ATTENTION! DO NOT MODIFY THIS FILE!
  * This page is auto-generated. If you want to make any changes to this page, changes must be made at:
  * CopilotKit/src/runtime.ts
  */
}
The CopilotRuntime class.

```ts
const runtime = new CopilotRuntime();
```

## Constructor Parameters

<PropertyReference name="endpoint" type="string" required>
The endpoint to call.
</PropertyReference>

<PropertyReference name="retries" type="number" default="3">
How many retries.
</PropertyReference>

<PropertyReference name="mode" type="'fast' | 'slow'">
The mode of the runtime.
</PropertyReference>

<PropertyReference name="runAction" type="name: string, args?: Record<string, unknown>">
Run an action.

  <PropertyReference name="name" type="string" required>
  The action name.
  </PropertyReference>

  <PropertyReference name="args" type="Record<string, unknown>">
  The action arguments.
  </PropertyReference>

</PropertyReference>

"#;

pub(crate) const CHAT_HOOK_SOURCE: &str = r#"/**
 * Options for useCopilotChat.
 */
export interface UseCopilotChatOptions {
  /** The chat id. */
  id: string;
  /**
   * Initial messages.
   * @defaultValue []
   */
  initialMessages?: Message[];
  /** Called when the response is complete. */
  onFinish?(message: Message): void;
}

/**
 * A hook for chatting with the copilot.
 */
// keep in sync with the chat context
export function useCopilotChat(options: UseCopilotChatOptions) {
  return options;
}
"#;

pub(crate) const CHAT_HOOK_PAGE: &str = r#"---
title: "useCopilotChat"
---

{
 /*
  * ATTENTION! DO NOT MODIFY THIS FILE!
  * This page is auto-generated. If you want to make any changes to this page, changes must be made at:
  * CopilotKit/src/use-copilot-chat.ts
  */
}
A hook for chatting with the copilot.

## Parameters

<PropertyReference name="id" type="string" required>
The chat id.
</PropertyReference>

<PropertyReference name="initialMessages" type="Message[]" default="[]">
Initial messages.
</PropertyReference>

<PropertyReference name="onFinish" type="(message: Message) => void">
Called when the response is complete.
</PropertyReference>

"#;

pub(crate) const PROVIDER_COMPONENT_SOURCE: &str = r#"import React from "react";

type Base = {
  /** Child nodes. */
  children?: React.ReactNode;
};

interface CopilotKitProps extends Base {
  /** The runtime url. */
  runtimeUrl: string;
  /** Child nodes, required here. */
  children: React.ReactNode;
}

/**
 * The CopilotKit provider.
 */
export const CopilotKit = React.memo((props: CopilotKitProps) => {
  return <div>{props.children}</div>;
});
"#;

pub(crate) const GREETER_SOURCE: &str = r#"/**
 * Greets people.
 */
export class Greeter {
  /**
   * Create a greeter.
   * @param name Who to greet.
   * @param count How many times.
   */
  constructor(name: string, count = 2) {}

  greet(): string {
    return "hello";
  }
}
"#;

pub(crate) const OVERLOADED_SOURCE: &str = r#"/**
 * A class with overloads.
 */
export class Overloaded {
  run(a: string): void;
  run(a: string, b?: number): void {}

  #hidden() {}

  protected guarded() {}

  static create(): Overloaded {
    return new Overloaded();
  }

  set size(value: number) {}
}
"#;

pub(crate) const OVERLOADED_HOOK_SOURCE: &str = r#"/**
 * A hook with overloads.
 */
export function useThing(a: string): void;
export function useThing(a: number): void;
export function useThing(a: any) {}
"#;

pub(crate) const OVERLOADED_COMPONENT_SOURCE: &str = r#"/**
 * A component with overloads.
 */
function Thing(props: { label: string }): null;
function Thing(props: { count: number }): null;
function Thing(props: any) {
  return null;
}
"#;

pub(crate) const DOCUMENTED_OVERLOADS_SOURCE: &str = r#"/**
 * A class with documented overloads.
 */
export class Thing {
  /**
   * Run it.
   * @param a The a.
   */
  run(a: string): void;
  run(a: number): void;
  run(a: any) {}

  stop(): void;
  /** Stop it. */
  stop() {}
}
"#;

pub(crate) const PROCESSOR_SOURCE: &str = r#"/**
 * A runtime with request processing.
 */
export class Processor {
  /** Process a chat completion. */
  process(request: CopilotRuntimeChatCompletionRequest) {}

  /** Process a request. */
  process(request: CopilotRuntimeRequest) {}

  /** Run an action. */
  runAction(name: string) {}
}
"#;

pub(crate) const UNDOCUMENTED_HOOK_SOURCE: &str = r#"export function useUndocumented(options: { enabled: boolean }) {
  return options.enabled;
}
"#;

pub(crate) const QUOTED_TYPES_SOURCE: &str = r#"export interface StatusProps {
  /** Status labels. */
  labels: Record<"ok" | "error", string>;
}

/**
 * Shows a status.
 */
export function StatusBadge(props: Partial<StatusProps>) {
  return null;
}
"#;

pub(crate) const CYCLIC_SOURCE: &str = r#"interface A extends B {
  /** From A. */
  a: string;
}

interface B extends A {
  /** From B. */
  b: string;
}

/**
 * Uses a cyclic interface.
 */
export function useCycle(options: A) {}
"#;

pub(crate) fn runtime_doc() -> ReferenceDocConfiguration {
	ReferenceDocConfiguration::new(
		"src/runtime.ts",
		"docs/reference/CopilotRuntime.mdx",
		Subject::Class("CopilotRuntime".to_string()),
	)
	.with_description("The runtime.")
}

pub(crate) fn chat_hook_doc() -> ReferenceDocConfiguration {
	ReferenceDocConfiguration::new(
		"src/use-copilot-chat.ts",
		"docs/reference/useCopilotChat.mdx",
		Subject::Hook("useCopilotChat".to_string()),
	)
}

/// A temporary directory with the project checked out under `repo/`, so the
/// default output root (`..`) stays inside the temporary directory.
pub(crate) fn project_with(files: &[(&str, &str)]) -> TempDir {
	let tmp = tempfile::tempdir().unwrap_or_else(|e| panic!("tempdir: {e}"));
	for (path, content) in files {
		write_file(&tmp.path().join("repo"), path, content);
	}
	tmp
}

pub(crate) fn write_file(root: &Path, relative: &str, content: &str) {
	let path = root.join(relative);
	if let Some(parent) = path.parent() {
		std::fs::create_dir_all(parent).unwrap_or_else(|e| panic!("mkdir: {e}"));
	}
	std::fs::write(&path, content).unwrap_or_else(|e| panic!("write {}: {e}", path.display()));
}

pub(crate) fn options_for(tmp: &TempDir) -> GeneratorOptions {
	GeneratorOptions::with_root(tmp.path().join("repo"))
}
