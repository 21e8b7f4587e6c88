use std::path::Path;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use owo_colors::OwoColorize;
use refdoc_cli::Commands;
use refdoc_cli::LOG_ENV;
use refdoc_cli::OutputFormat;
use refdoc_cli::RefdocCli;
use refdoc_cli::SubjectArgs;
use refdoc_core::CheckResult;
use refdoc_core::DocFailure;
use refdoc_core::ExtractedReference;
use refdoc_core::GenerateOutcome;
use refdoc_core::GeneratorOptions;
use refdoc_core::ParameterSection;
use refdoc_core::ReferenceDoc;
use refdoc_core::ReferenceDocConfiguration;
use refdoc_core::RefdocConfig;
use refdoc_core::check_all;
use refdoc_core::generate_all;
use similar::ChangeTag;
use similar::TextDiff;
use tracing_subscriber::EnvFilter;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,yellow) => {
		if color_enabled() {
			format!("{}", $text.yellow())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,bold) => {
		if color_enabled() {
			format!("{}", $text.bold())
		} else {
			format!("{}", $text)
		}
	};
}

const SAMPLE_CONFIG: &str = "# refdoc configuration\n\n# Destination paths are resolved \
                             against this directory, relative to the project root.\noutput_root \
                             = \"..\"\n\n# Shown before the source path in the \"do not modify\" \
                             banner of every page.\nbanner_prefix = \"CopilotKit\"\n\n# One \
                             [[docs]] entry per reference page. Set exactly one of `class_name`, \
                             `component` or `hook`.\n# [[docs]]\n# source_path = \
                             \"packages/react-core/src/hooks/use-copilot-chat.ts\"\n# \
                             destination_path = \"docs/reference/hooks/useCopilotChat.mdx\"\n# \
                             hook = \"useCopilotChat\"\n# description = \"The useCopilotChat \
                             hook.\"\n";

fn main() {
	let args = RefdocCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color
		&& std::env::var_os("NO_COLOR").is_none()
		&& supports_color::on(supports_color::Stream::Stderr).is_some();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	init_logging(args.verbose, use_color);

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	let result = match &args.command {
		Some(Commands::Init) => run_init(&args),
		Some(Commands::Generate { only }) => run_generate(&args, only),
		Some(Commands::Check { only, diff, format }) => run_check(&args, only, *diff, *format),
		Some(Commands::Page {
			source_path,
			destination_path,
			subject,
			description,
		}) => {
			run_page(
				&args,
				source_path,
				destination_path,
				subject,
				description.as_deref(),
			)
		}
		Some(Commands::Inspect {
			source_path,
			subject,
			format,
		}) => run_inspect(&args, source_path, subject, *format),
		None => {
			eprintln!("No subcommand specified. Run `refdoc --help` for usage.");
			process::exit(1);
		}
	};

	if let Err(e) = result {
		match e.downcast::<refdoc_core::RefdocError>() {
			Ok(refdoc_err) => {
				let report: miette::Report = (*refdoc_err).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
			}
		}
		process::exit(2);
	}
}

/// Logs go to stderr so page output and JSON on stdout stay clean.
fn init_logging(verbose: bool, use_color: bool) {
	let level = if verbose { "debug" } else { "info" };
	let filter = EnvFilter::try_from_env(LOG_ENV)
		.unwrap_or_else(|_| EnvFilter::new(format!("refdoc_core={level},refdoc={level}")));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_ansi(use_color)
		.with_target(false)
		.without_time()
		.try_init()
		.ok();
}

fn resolve_root(args: &RefdocCli) -> PathBuf {
	args.path
		.clone()
		.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

fn generator_options(
	args: &RefdocCli,
	root: &Path,
	config: Option<&RefdocConfig>,
) -> GeneratorOptions {
	let options = config.map_or_else(
		|| GeneratorOptions::with_root(root),
		|config| config.generator_options(root),
	);

	match &args.output_root {
		Some(output_root) => options.with_output_root(output_root.clone()),
		None => options,
	}
}

fn run_init(args: &RefdocCli) -> Result<(), Box<dyn std::error::Error>> {
	let root = resolve_root(args);

	if let Some(existing) = RefdocConfig::resolve_path(&root) {
		println!("Config file already exists: {}", existing.display());
		return Ok(());
	}

	let config_path = root.join("refdoc.toml");
	std::fs::write(&config_path, SAMPLE_CONFIG)?;
	println!("Created {}", config_path.display());
	println!();
	println!("Next steps:");
	println!("  1. Add a [[docs]] entry for each class, component or hook");
	println!("  2. Run `refdoc generate` to write the reference pages");
	println!("  3. Run `refdoc check` in CI to keep them up to date");

	Ok(())
}

fn run_generate(args: &RefdocCli, only: &[String]) -> Result<(), Box<dyn std::error::Error>> {
	let root = resolve_root(args);
	let config = RefdocConfig::load_required(&root)?;
	let options = generator_options(args, &root, Some(&config));
	let docs = config.select(only)?;

	tracing::debug!(root = %root.display(), docs = docs.len(), "generating reference docs");

	let report = generate_all(&docs, &options);

	for destination in &report.written {
		println!("{} {}", colored!("wrote", green), make_relative(destination, &root));
	}
	for subject in &report.skipped {
		println!(
			"{} {subject} (no leading comment)",
			colored!("skipped", yellow)
		);
	}

	let is_ok = report.is_ok();
	let failed = report.failures.len();
	print_failures(report.failures);

	println!(
		"{} page(s) written, {} skipped, {failed} failed",
		report.written.len(),
		report.skipped.len()
	);

	if !is_ok {
		process::exit(1);
	}

	Ok(())
}

fn run_check(
	args: &RefdocCli,
	only: &[String],
	show_diff: bool,
	format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
	let root = resolve_root(args);
	let config = RefdocConfig::load_required(&root)?;
	let options = generator_options(args, &root, Some(&config));
	let docs = config.select(only)?;
	let result = check_all(&docs, &options);
	let is_ok = result.is_ok();

	match format {
		OutputFormat::Json => print_check_json(&result, &root),
		OutputFormat::Text if is_ok => {
			println!("Check passed: all reference pages are up to date.");
			for subject in &result.skipped {
				println!(
					"{} {subject} (no leading comment)",
					colored!("skipped", yellow)
				);
			}
		}
		OutputFormat::Text => {
			eprintln!("Check failed.");
			eprintln!("  stale pages: {}", result.stale.len());
			eprintln!("  failed docs: {}", result.failures.len());

			if !result.stale.is_empty() {
				eprintln!();
				eprintln!("Stale pages:");
				for entry in &result.stale {
					let state = if entry.is_missing() {
						"missing"
					} else {
						"out of date"
					};
					eprintln!(
						"  {} at {} ({state})",
						entry.subject,
						make_relative(&entry.destination, &root)
					);

					if show_diff {
						print_diff(
							entry.current_content.as_deref().unwrap_or_default(),
							&entry.expected_content,
						);
					}
				}
			}

			print_failures(result.failures);
			eprintln!();
			eprintln!("Run `refdoc generate` to update them.");
		}
	}

	if !is_ok {
		process::exit(1);
	}

	Ok(())
}

fn run_page(
	args: &RefdocCli,
	source_path: &str,
	destination_path: &str,
	subject: &SubjectArgs,
	description: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
	let root = resolve_root(args);
	let config = RefdocConfig::load(&root)?;
	let options = generator_options(args, &root, config.as_ref());

	let mut doc = ReferenceDocConfiguration::new(source_path, destination_path, subject.subject()?);
	if let Some(description) = description.filter(|d| !d.trim().is_empty()) {
		doc = doc.with_description(description);
	}

	match ReferenceDoc::new(doc, options).generate()? {
		GenerateOutcome::Written { destination } => {
			println!("{} {}", colored!("wrote", green), make_relative(&destination, &root));
		}
		GenerateOutcome::Skipped => {
			println!(
				"{} nothing written, the subject has no leading comment",
				colored!("skipped", yellow)
			);
		}
	}

	Ok(())
}

fn run_inspect(
	args: &RefdocCli,
	source_path: &str,
	subject: &SubjectArgs,
	format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
	let root = resolve_root(args);
	let config = RefdocConfig::load(&root)?;
	let options = generator_options(args, &root, config.as_ref());
	let subject = subject.subject()?;
	let doc = ReferenceDocConfiguration::new(source_path, String::new(), subject.clone());

	let Some(extracted) = ReferenceDoc::new(doc, options).extract()? else {
		eprintln!("{} {subject} has no leading comment", colored!("skipped", yellow));
		process::exit(1);
	};

	match format {
		OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&extracted)?),
		OutputFormat::Text => print_extracted(&extracted, source_path),
	}

	Ok(())
}

fn print_extracted(extracted: &ExtractedReference, source_path: &str) {
	println!("{} ({source_path})", colored!(extracted.subject.to_string(), bold));
	println!();
	for line in extracted.comment.lines() {
		println!("  {line}");
	}

	println!();
	match &extracted.parameters {
		ParameterSection::Interface(interface) => {
			println!("{}", colored!(format!("Interface {}", interface.name), bold));
			for property in &interface.properties {
				let optional = if property.required { "" } else { "?" };
				let default_value = property
					.default_value
					.as_ref()
					.map(|value| format!(" = {value}"))
					.unwrap_or_default();
				let deprecated = if property.is_deprecated() {
					format!(" {}", colored!("(deprecated)", yellow))
				} else {
					String::new()
				};
				println!(
					"  {}{optional}: {}{default_value}{deprecated}",
					property.name, property.r#type
				);
			}
		}
		ParameterSection::Constructor(constructor) => {
			println!("{}", colored!("Constructor", bold));
			println!("  {}", constructor.signature);
		}
		ParameterSection::None => println!("No parameters"),
	}

	if !extracted.methods.is_empty() {
		println!();
		println!("{}", colored!("Methods", bold));
		for method in &extracted.methods {
			println!("  {}", method.signature);
		}
	}
}

fn print_check_json(result: &CheckResult, root: &Path) {
	let stale: Vec<serde_json::Value> = result
		.stale
		.iter()
		.map(|entry| {
			serde_json::json!({
				"kind": entry.subject.kind(),
				"name": entry.subject.name(),
				"destination": make_relative(&entry.destination, root),
				"missing": entry.is_missing(),
			})
		})
		.collect();
	let failures: Vec<serde_json::Value> = result
		.failures
		.iter()
		.map(|failure| {
			serde_json::json!({
				"kind": failure.subject.kind(),
				"name": failure.subject.name(),
				"source": failure.source_path,
				"message": failure.error.to_string(),
			})
		})
		.collect();
	let names = |subjects: &[refdoc_core::Subject]| {
		subjects
			.iter()
			.map(|subject| subject.name().to_string())
			.collect::<Vec<_>>()
	};

	let output = serde_json::json!({
		"ok": result.is_ok(),
		"fresh": names(result.fresh.as_slice()),
		"skipped": names(result.skipped.as_slice()),
		"stale": stale,
		"failures": failures,
	});
	println!("{output}");
}

fn print_failures(failures: Vec<DocFailure>) {
	for failure in failures {
		eprintln!(
			"{} {} ({})",
			colored!("failed", red),
			failure.subject,
			failure.source_path
		);
		let report = miette::Report::new(failure.error);
		eprintln!("{report:?}");
	}
}

/// Print a unified diff between two strings, colorized.
fn print_diff(current: &str, expected: &str) {
	let diff = TextDiff::from_lines(current, expected);
	for change in diff.iter_all_changes() {
		match change.tag() {
			ChangeTag::Delete => {
				eprint!("  {}", colored!(format!("-{change}"), red));
			}
			ChangeTag::Insert => {
				eprint!("  {}", colored!(format!("+{change}"), green));
			}
			ChangeTag::Equal => {
				eprint!("   {change}");
			}
		}
	}
}

/// Make a path relative to root for display purposes.
fn make_relative(path: &Path, root: &Path) -> String {
	path.strip_prefix(root)
		.unwrap_or(path)
		.display()
		.to_string()
}
