use std::path::PathBuf;

use clap::{Arg, ArgAction, Command};
use label_tree::{AppLabels, GeneratorConfig, Section, load_labels};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let matches = Command::new("label-tree")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Build the localization label tree from label input")
        .arg(
            Arg::new("input")
                .help("Records file (JSON array) or directory of <lang>.json files")
                .index(1),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("JSON configuration file"),
        )
        .arg(
            Arg::new("name")
                .long("name")
                .short('n')
                .help("Root name (default: AppLocalizations)"),
        )
        .arg(
            Arg::new("languages")
                .long("languages")
                .short('l')
                .help("Supported language codes, comma separated (e.g. en,fr)")
                .value_delimiter(','),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print the whole tree as JSON")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log every section, label and case as it is created")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let default_level = if matches.get_flag("verbose") {
        "debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let mut config = match matches.get_one::<String>("config") {
        Some(path) => GeneratorConfig::load(&PathBuf::from(path))?,
        None => GeneratorConfig::default(),
    };
    config.merge_cli(
        matches.get_one::<String>("name").cloned(),
        matches
            .get_many::<String>("languages")
            .map(|values| values.cloned().collect()),
        matches.get_one::<String>("input").map(PathBuf::from),
    );

    let Some(input) = config.input.clone() else {
        eprintln!("❌ No input given. Pass a file or directory, or set \"input\" in the config");
        return Err("Missing input".into());
    };

    let mut app = config.app_labels()?;
    if let Err(e) = load_labels(&input, &mut app) {
        eprintln!("❌ Failed to build labels from {}: {}", input.display(), e);
        return Err(e.into());
    }

    for gap in app.coverage_gaps() {
        warn!(
            "Missing '{}' translation for {} ({})",
            gap.language_code, gap.label, gap.condition
        );
    }
    info!(
        "Built {} labels in {} categories",
        app.all_labels().len(),
        app.categories().len()
    );

    if matches.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&app)?);
    } else {
        print_summary(&app);
    }
    Ok(())
}

fn print_summary(app: &AppLabels) {
    println!("📦 {} [{}]", app.section.normalized_name(), app.languages.join(", "));
    print_section(&app.section, 1);

    let categories = app.categories();
    if !categories.is_empty() {
        println!();
        println!("🏷️  Categories:");
        for category in categories {
            println!("   {}: {}", category.name, category.values.join(", "));
        }
    }
}

fn print_section(section: &Section, depth: usize) {
    let indent = "  ".repeat(depth);
    for label in &section.labels {
        let placeholders: Vec<String> = label
            .templated_values()
            .iter()
            .map(|v| format!("{}: {}", v.key, v.value_type))
            .collect();
        println!(
            "{}{} ({} case{}) [{}]",
            indent,
            label.camel_key(),
            label.cases.len(),
            if label.cases.len() == 1 { "" } else { "s" },
            placeholders.join(", ")
        );
    }
    for child in &section.children {
        println!("{}{}/  {}", indent, child.camel_key(), child.normalized_name());
        print_section(child, depth + 1);
    }
}
