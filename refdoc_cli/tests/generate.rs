mod common;

use common::CHAT_HOOK_SOURCE;
use common::HOOK_DOC;
use common::Project;
use common::RUNTIME_DOC;
use common::RUNTIME_SOURCE;
use common::UNDOCUMENTED_SOURCE;
use predicates::prelude::PredicateBooleanExt;
use refdoc_core::AnyEmptyResult;

#[test]
fn generate_writes_configured_pages() -> AnyEmptyResult {
	let project = Project::new(
		Some(&format!("{HOOK_DOC}{RUNTIME_DOC}")),
		&[
			("src/use-copilot-chat.ts", CHAT_HOOK_SOURCE),
			("src/runtime.ts", RUNTIME_SOURCE),
		],
	);

	common::refdoc_cmd()
		.arg("generate")
		.arg("--path")
		.arg(project.root())
		.assert()
		.success()
		.stdout(predicates::str::contains("2 page(s) written, 0 skipped, 0 failed"))
		.stderr(predicates::str::contains("Successfully autogenerated"));

	let hook_page = std::fs::read_to_string(project.page("docs/reference/useCopilotChat.mdx"))?;
	assert!(hook_page.starts_with(
		"---\ntitle: \"useCopilotChat\"\ndescription: \"The useCopilotChat hook.\"\n---\n\n"
	));
	assert!(hook_page.contains("  * CopilotKit/src/use-copilot-chat.ts\n"));
	assert!(hook_page.contains("## Parameters\n\n"));
	assert!(hook_page.contains(
		"<PropertyReference name=\"initialMessages\" type=\"Message[]\" default=\"[]\">"
	));
	assert!(!hook_page.contains("chatId"));

	let class_page = std::fs::read_to_string(project.page("docs/reference/CopilotRuntime.mdx"))?;
	assert!(class_page.contains("## Constructor Parameters\n\n## constructor(endpoint: string)\n\n"));
	assert!(class_page.contains("<PropertyReference name=\"runAction\" type=\"name: string\">"));
	assert!(!class_page.contains("name=\"process\""));

	Ok(())
}

#[test]
fn generate_is_repeatable() -> AnyEmptyResult {
	let project = Project::new(Some(HOOK_DOC), &[("src/use-copilot-chat.ts", CHAT_HOOK_SOURCE)]);
	let page = project.page("docs/reference/useCopilotChat.mdx");

	common::refdoc_cmd()
		.arg("generate")
		.arg("--path")
		.arg(project.root())
		.assert()
		.success();
	let first = std::fs::read(&page)?;

	common::refdoc_cmd()
		.arg("generate")
		.arg("--path")
		.arg(project.root())
		.assert()
		.success();
	let second = std::fs::read(&page)?;

	assert_eq!(first, second);

	Ok(())
}

#[test]
fn generate_skips_subjects_without_comments() -> AnyEmptyResult {
	let config = r#"
[[docs]]
source_path = "src/use-undocumented.ts"
destination_path = "docs/reference/useUndocumented.mdx"
hook = "useUndocumented"
"#;
	let project = Project::new(Some(config), &[("src/use-undocumented.ts", UNDOCUMENTED_SOURCE)]);

	common::refdoc_cmd()
		.arg("generate")
		.arg("--path")
		.arg(project.root())
		.assert()
		.success()
		.stdout(predicates::str::contains("skipped hook `useUndocumented`"))
		.stderr(predicates::str::contains("No comment found"));

	assert!(!project.page("docs/reference/useUndocumented.mdx").exists());

	Ok(())
}

#[test]
fn generate_reports_missing_subjects_and_continues() -> AnyEmptyResult {
	let config = format!(
		"{HOOK_DOC}\n[[docs]]\nsource_path = \"src/runtime.ts\"\ndestination_path = \
		 \"docs/reference/Missing.mdx\"\nclass_name = \"Missing\"\n"
	);
	let project = Project::new(
		Some(&config),
		&[
			("src/use-copilot-chat.ts", CHAT_HOOK_SOURCE),
			("src/runtime.ts", RUNTIME_SOURCE),
		],
	);

	common::refdoc_cmd()
		.arg("generate")
		.arg("--path")
		.arg(project.root())
		.assert()
		.code(1)
		.stdout(predicates::str::contains("1 page(s) written, 0 skipped, 1 failed"))
		.stderr(predicates::str::contains("class `Missing` not found in `src/runtime.ts`"));

	assert!(project.page("docs/reference/useCopilotChat.mdx").exists());

	Ok(())
}

#[test]
fn generate_only_selects_named_docs() -> AnyEmptyResult {
	let project = Project::new(
		Some(&format!("{HOOK_DOC}{RUNTIME_DOC}")),
		&[
			("src/use-copilot-chat.ts", CHAT_HOOK_SOURCE),
			("src/runtime.ts", RUNTIME_SOURCE),
		],
	);

	common::refdoc_cmd()
		.arg("generate")
		.arg("--only")
		.arg("CopilotRuntime")
		.arg("--path")
		.arg(project.root())
		.assert()
		.success()
		.stdout(predicates::str::contains("1 page(s) written"));

	assert!(project.page("docs/reference/CopilotRuntime.mdx").exists());
	assert!(!project.page("docs/reference/useCopilotChat.mdx").exists());

	Ok(())
}

#[test]
fn generate_rejects_unknown_only_names() {
	let project = Project::new(Some(HOOK_DOC), &[("src/use-copilot-chat.ts", CHAT_HOOK_SOURCE)]);

	common::refdoc_cmd()
		.arg("generate")
		.arg("--only")
		.arg("useMissing")
		.arg("--path")
		.arg(project.root())
		.assert()
		.code(2)
		.stderr(predicates::str::contains("no reference doc configured for `useMissing`"));
}

#[test]
fn generate_requires_a_config_file() {
	let project = Project::new(None, &[]);

	common::refdoc_cmd()
		.arg("generate")
		.arg("--path")
		.arg(project.root())
		.assert()
		.code(2)
		.stderr(predicates::str::contains("no config file found"));
}

#[test]
fn generate_reports_invalid_config() {
	let config = "[[docs]]\nsource_path = \"a.ts\"\ndestination_path = \"a.mdx\"\nclass_name = \
	              \"A\"\nhook = \"useA\"\n";
	let project = Project::new(Some(config), &[]);

	common::refdoc_cmd()
		.arg("generate")
		.arg("--path")
		.arg(project.root())
		.assert()
		.code(2)
		.stderr(predicates::str::contains("failed to parse config file"));
}

#[test]
fn output_root_flag_overrides_config() -> AnyEmptyResult {
	let config = format!("output_root = \"..\"\n{HOOK_DOC}");
	let project = Project::new(Some(&config), &[("src/use-copilot-chat.ts", CHAT_HOOK_SOURCE)]);

	common::refdoc_cmd()
		.arg("generate")
		.arg("--output-root")
		.arg("site")
		.arg("--path")
		.arg(project.root())
		.assert()
		.success();

	assert!(
		project
			.root()
			.join("site/docs/reference/useCopilotChat.mdx")
			.exists()
	);
	assert!(!project.page("docs/reference/useCopilotChat.mdx").exists());

	Ok(())
}

#[test]
fn verbose_logs_extraction_details() {
	let project = Project::new(Some(HOOK_DOC), &[("src/use-copilot-chat.ts", CHAT_HOOK_SOURCE)]);

	common::refdoc_cmd()
		.arg("generate")
		.arg("--verbose")
		.arg("--path")
		.arg(project.root())
		.assert()
		.success()
		.stderr(predicates::str::contains("extracted reference").and(predicates::str::contains("DEBUG")));
}
