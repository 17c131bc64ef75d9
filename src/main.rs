use anyhow::{Context, Result};
use bucketry::config::{load_group_spec, GroupSpec};
use bucketry::entries::array_values;
use bucketry::group::AggregationPolicy;
use bucketry::kvp::split_key_value_pairs;
use clap::{ArgGroup, Parser, Subcommand};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, error, trace};

/// Group runtime entities into named buckets
#[derive(Parser)]
#[command(name = "bucketry")]
#[command(about = "Bucketry - Group entries by path, label, multi-value or key=value keys", long_about = None)]
struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Group the entries of a JSON or YAML array and print the buckets
    #[command(group(
        ArgGroup::new("source")
            .required(true)
            .args(["path", "label", "spec"]),
    ))]
    Group {
        /// File holding a JSON or YAML array of entries
        #[arg(short, long)]
        input: PathBuf,

        /// Dotted path of the grouping key (e.g. "Env.VIRTUAL_HOST")
        #[arg(long)]
        path: Option<String>,

        /// Label whose value is the grouping key
        #[arg(long)]
        label: Option<String>,

        /// Grouping spec file (YAML, TOML or JSON)
        #[arg(long)]
        spec: Option<PathBuf>,

        /// Split keys on this separator and file entries under every piece
        #[arg(long, value_name = "SEP", conflicts_with_all = ["kvp", "spec"])]
        multi: Option<String>,

        /// Parse keys as a key=value list and file entries under every key
        #[arg(long, num_args = 2, value_names = ["LIST_SEP", "KVP_SEP"], conflicts_with = "spec")]
        kvp: Option<Vec<String>>,

        /// Key for list items without a key=value separator
        #[arg(long, requires = "kvp")]
        default_key: Option<String>,

        /// Print only the sorted bucket names
        #[arg(long)]
        keys_only: bool,
    },
    /// Split a key=value list and print the resulting map
    Split {
        /// String to split
        input: String,

        #[arg(long, default_value = ",")]
        list_sep: String,

        #[arg(long, default_value = "=")]
        kvp_sep: String,

        /// Key for list items without a key=value separator
        #[arg(long)]
        default_key: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr)
        .with_target(cli.verbose >= 2)
        .init();

    debug!("Bucketry started with verbosity level: {}", cli.verbose);
    trace!("Full CLI args: {:?}", std::env::args().collect::<Vec<_>>());

    let result = match cli.command {
        Commands::Group {
            input,
            path,
            label,
            spec,
            multi,
            kvp,
            default_key,
            keys_only,
        } => build_spec(path, label, spec, multi, kvp, default_key)
            .and_then(|spec| run_group(&input, &spec, keys_only)),
        Commands::Split {
            input,
            list_sep,
            kvp_sep,
            default_key,
        } => run_split(&input, &list_sep, &kvp_sep, default_key.as_deref()),
    };

    if let Err(e) = result {
        error!("Fatal error: {:#}", e);
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn build_spec(
    path: Option<String>,
    label: Option<String>,
    spec: Option<PathBuf>,
    multi: Option<String>,
    kvp: Option<Vec<String>>,
    default_key: Option<String>,
) -> Result<GroupSpec> {
    if let Some(spec_path) = spec {
        return load_group_spec(&spec_path);
    }

    let policy = match (multi, kvp.as_deref()) {
        (Some(separator), _) => AggregationPolicy::multi(separator),
        (None, Some([list_sep, kvp_sep])) => {
            AggregationPolicy::key_value_pairs(list_sep, kvp_sep, default_key.as_deref())
        }
        _ => AggregationPolicy::Single,
    };

    let spec = GroupSpec {
        path,
        label,
        policy,
    };
    spec.validate()?;
    Ok(spec)
}

fn load_entries(input: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read entries from {}", input.display()))?;
    let value = match input.extension().and_then(|ext| ext.to_str()) {
        Some("yaml") | Some("yml") => serde_yaml::from_str(&content)
            .with_context(|| format!("Invalid YAML in {}", input.display()))?,
        _ => serde_json::from_str(&content)
            .with_context(|| format!("Invalid JSON in {}", input.display()))?,
    };
    Ok(value)
}

fn run_group(input: &Path, spec: &GroupSpec, keys_only: bool) -> Result<()> {
    let value = load_entries(input)?;
    let entries = array_values(spec.operation_name(), &value)?;
    debug!("Loaded {} entries from {}", entries.len(), input.display());

    let groups = spec.apply(entries)?;
    let output = if keys_only {
        let mut keys: Vec<_> = groups.into_keys().collect();
        keys.sort();
        serde_json::to_string_pretty(&keys)?
    } else {
        let sorted: BTreeMap<_, _> = groups.into_iter().collect();
        serde_json::to_string_pretty(&sorted)?
    };

    println!("{output}");
    Ok(())
}

fn run_split(input: &str, list_sep: &str, kvp_sep: &str, default_key: Option<&str>) -> Result<()> {
    let pairs: BTreeMap<_, _> = split_key_value_pairs(input, list_sep, kvp_sep, default_key)
        .into_iter()
        .collect();
    println!("{}", serde_json::to_string_pretty(&pairs)?);
    Ok(())
}
