use anyhow::Context;
use clap::{Parser, Subcommand};
use dotenv::dotenv;

use audience_rules::audience::attributes::{AttributeGroup, AttributeRegistry};
use audience_rules::audience::condition::{validate, Evaluator, TestResult, ValidationResult};
use audience_rules::audience::content::{validate_content, ContentConfiguration};
use audience_rules::audience::fallback::{validate_fallbacks, FallbackConfiguration};
use audience_rules::audience::loader;
use audience_rules::audience::server;
use audience_rules::audience::template::{ContentSourceType, TokenRenderer};
use audience_rules::audience::user::sample_users;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Attribute registry file overriding the built-in attributes
    #[arg(long, global = true, env = "AUDIENCE_RULES_ATTRIBUTES")]
    attributes: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluate a condition against users
    Evaluate {
        /// Path to the condition file
        #[arg(short, long)]
        condition: String,

        /// Path to a user roster; defaults to the sample users
        #[arg(short, long)]
        users: Option<String>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check a condition for authoring errors
    Validate {
        /// Path to the condition file
        #[arg(short, long)]
        condition: String,
    },
    /// Check a rule's content source configuration
    ValidateContent {
        /// Path to the content configuration file
        #[arg(short, long)]
        file: String,
    },
    /// Check a rule's fallback plan
    ValidateFallbacks {
        /// Path to the fallback configuration file
        #[arg(short, long)]
        file: String,
    },
    /// List known attributes
    Attributes {
        /// Only show attributes in this group
        #[arg(short, long)]
        group: Option<String>,
    },
    /// Render tokenized copy with sample data
    Render {
        /// Template text, e.g. "{{lead.title|Our pick}}"
        #[arg(short, long)]
        template: String,

        /// Content source: CMS, TargetedLead or ProductReco
        #[arg(short, long)]
        source: String,
    },
    /// Start the HTTP API
    Serve {
        #[arg(short, long, env = "AUDIENCE_RULES_PORT", default_value_t = 3001)]
        port: u16,
    },
}

fn load_registry(path: Option<&str>) -> anyhow::Result<AttributeRegistry> {
    match path {
        Some(path) => loader::load_registry(path)
            .with_context(|| format!("Failed to load attributes from {}", path)),
        None => Ok(AttributeRegistry::default()),
    }
}

fn print_result(result: &TestResult) {
    let verdict = if result.matches { "MATCH" } else { "NO MATCH" };
    println!("{} {} ({})", verdict, result.user.user_id, result.user.name);
    for entry in &result.evaluation_trace {
        let mark = if entry.result { "✓" } else { "✗" };
        println!("    {} [{}] {}", mark, entry.node_id, entry.reason);
    }
}

fn report(validation: &ValidationResult) -> anyhow::Result<()> {
    for error in &validation.errors {
        println!("error: {}", error);
    }
    for warning in &validation.warnings {
        println!("warning: {}", warning);
    }
    if !validation.is_valid {
        anyhow::bail!("{} error(s) found", validation.errors.len());
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();

    let args = Args::parse();
    let registry = load_registry(args.attributes.as_deref())?;

    match args.command {
        Commands::Evaluate {
            condition,
            users,
            json,
        } => {
            let root = loader::load_condition(&condition)
                .with_context(|| format!("Failed to load condition from {}", condition))?;
            let users = match users {
                Some(path) => loader::load_users(&path)
                    .with_context(|| format!("Failed to load users from {}", path))?,
                None => sample_users().to_vec(),
            };

            log::info!("Evaluating {} against {} users", condition, users.len());
            let results = Evaluator::new(&registry).test_condition_against_users(&root, &users);

            if json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else {
                for result in &results {
                    print_result(result);
                }
                let matched = results.iter().filter(|r| r.matches).count();
                println!("{}/{} users matched", matched, results.len());
            }
        }
        Commands::Validate { condition } => {
            let root = loader::load_condition(&condition)
                .with_context(|| format!("Failed to load condition from {}", condition))?;
            report(&validate(&root, &registry))?;
            println!("Condition is valid");
        }
        Commands::ValidateContent { file } => {
            let config: ContentConfiguration = loader::load_document(&file)
                .with_context(|| format!("Failed to load content configuration from {}", file))?;
            let result = validate_content(&config);
            report(&result.validation)?;
            if !result.has_content {
                println!("warning: no content source is active");
            }
            println!("Content configuration is valid");
        }
        Commands::ValidateFallbacks { file } => {
            let config: FallbackConfiguration = loader::load_document(&file)
                .with_context(|| format!("Failed to load fallback configuration from {}", file))?;
            let result = validate_fallbacks(&config);
            report(&result.validation)?;
            println!("Fallback configuration is valid");
        }
        Commands::Attributes { group } => {
            let attributes = match group {
                Some(group) => registry.by_group(&AttributeGroup::from(group)),
                None => registry.all().iter().collect(),
            };
            for attr in attributes {
                let options = if attr.options.is_empty() {
                    String::new()
                } else {
                    format!(" [{}]", attr.options.join(", "))
                };
                println!(
                    "{:<24} {:<13} {:<10} {}{}",
                    attr.id,
                    attr.attribute_type.as_str(),
                    attr.group.as_str(),
                    attr.label,
                    options
                );
                let available = attr.attribute_type.available_comparisons();
                let comparisons: Vec<&str> = available.iter().map(|c| c.label()).collect();
                println!("{:<24} {}", "", comparisons.join(" | "));
            }
        }
        Commands::Render { template, source } => {
            let source: ContentSourceType = source.parse()?;
            let renderer = TokenRenderer::new()?;
            println!("{}", renderer.render(&template, source));
        }
        Commands::Serve { port } => {
            server::serve(port, registry).await?;
        }
    }

    Ok(())
}
