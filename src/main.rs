use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fhir::visitors::{ElementCounter, PathCollector, ReferenceIndex, unrecognized_modifier_extensions};
use fhir::{BuildOptions, Node, SKIP_VALIDATION_ENV, ValueRef, Visitor};
use fhir_types::FhirString;

mod sample;

#[derive(Parser)]
#[command(name = "citation")]
#[command(about = "Inspect a FHIR Citation record tree")]
struct Cli {
    /// Build records without structural validation (overrides CITATION_SKIP_VALIDATION)
    #[arg(long, global = true)]
    skip_validation: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the record tree, one node or value per line
    Outline,
    /// List the path of every node and value
    Paths,
    /// List every reference with its target kind
    References,
    /// Count records per element type
    Summary,
    /// Report modifier extensions that are not understood
    CheckModifiers {
        /// Modifier extension URL this consumer understands (repeatable)
        #[arg(long = "known")]
        known: Vec<String>,
    },
}

/// Indented rendering of a record tree.
#[derive(Default)]
struct Outline {
    depth: usize,
    lines: Vec<String>,
}

impl Outline {
    fn label(name: &str, index: Option<usize>) -> String {
        match index {
            Some(i) => format!("{name}[{i}]"),
            None => name.to_owned(),
        }
    }

    fn indent(&self) -> String {
        "  ".repeat(self.depth)
    }
}

impl<'a> Visitor<'a> for Outline {
    fn visit_start(&mut self, name: &str, index: Option<usize>, node: Node<'a>) {
        let label = Self::label(name, index);
        let line = if label == node.element_name() {
            format!("{}{label}", self.indent())
        } else {
            format!("{}{label} ({})", self.indent(), node.element_name())
        };
        self.lines.push(line);
        self.depth += 1;
    }

    fn visit_end(&mut self, _name: &str, _index: Option<usize>, _node: Node<'a>) {
        self.depth = self.depth.saturating_sub(1);
    }

    fn visit_value(&mut self, name: &str, index: Option<usize>, value: ValueRef<'a>) {
        let label = Self::label(name, index);
        self.lines.push(format!("{}{label}: {value}", self.indent()));
    }
}

/// Validation toggle: the CLI flag wins, then the environment.
fn build_options(skip_validation: bool) -> anyhow::Result<BuildOptions> {
    if skip_validation {
        return Ok(BuildOptions::unchecked());
    }
    Ok(BuildOptions::from_env_value(
        std::env::var(SKIP_VALIDATION_ENV).ok(),
    )?)
}

/// Entry point for the `citation` inspection tool.
///
/// # Environment Variables
/// - `CITATION_SKIP_VALIDATION`: build records without structural validation (default: false)
/// - `RUST_LOG`: log filter (default: `citation=info`)
fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("citation=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let options = build_options(cli.skip_validation)?;
    let citation = sample::einstein_1905(options)?;
    tracing::debug!(validate = options.validate(), "sample citation built");

    match cli.command {
        Some(Commands::Outline) => {
            let mut outline = Outline::default();
            citation.accept(&mut outline);
            for line in outline.lines {
                println!("{line}");
            }
        }
        Some(Commands::Paths) => {
            let mut collector = PathCollector::new();
            citation.accept(&mut collector);
            for path in collector.paths() {
                println!("{path}");
            }
        }
        Some(Commands::References) => {
            let mut index = ReferenceIndex::new();
            citation.accept(&mut index);
            for entry in index.references() {
                println!(
                    "{} -> {} ({})",
                    entry.path,
                    entry.reference.reference().map_or("-", FhirString::as_str),
                    entry.target_kind().unwrap_or("unresolved")
                );
            }
        }
        Some(Commands::Summary) => {
            let mut counter = ElementCounter::new();
            citation.accept(&mut counter);
            for (element, count) in counter.counts() {
                println!("{count:>4}  {element}");
            }
            println!(
                "{:>4}  records, {} primitive values",
                counter.total_elements(),
                counter.values()
            );
        }
        Some(Commands::CheckModifiers { known }) => {
            let known: Vec<&str> = known.iter().map(String::as_str).collect();
            let unrecognized = unrecognized_modifier_extensions(&citation, &known);
            if !unrecognized.is_empty() {
                for path in &unrecognized {
                    println!("{path}");
                }
                anyhow::bail!(
                    "{} modifier extension(s) not understood; the record must not be processed",
                    unrecognized.len()
                );
            }
            tracing::info!("no unrecognized modifier extensions");
        }
        None => {
            println!("Use 'citation --help' for commands");
        }
    }

    Ok(())
}
