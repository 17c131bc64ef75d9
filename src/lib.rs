//! # Bucketry
//!
//! Groups runtime entities, such as containers, into named buckets for
//! config-generating templates.
//!
//! ## Usage
//!
//! ```bash
//! bucketry group --input containers.json --path Env.VIRTUAL_HOST --multi ,
//! ```
//!
//! ## Modules
//!
//! - `entries` - Collection adapter over typed collections and JSON arrays
//! - `extract` - Key extractors: dotted-path lookup and label lookup
//! - `group` - Grouping engine, aggregation policies and the group-by operations
//! - `kvp` - Key=value list parsing with default-key fallback
//! - `config` - Declarative grouping specs loaded from YAML or TOML
//! - `container` - Runtime container record exposing env and labels
//! - `template` - Registers the grouping operations as `tera` functions
//! - `error` - Error types and error codes
pub mod config;
pub mod container;
pub mod entries;
pub mod error;
pub mod extract;
pub mod group;
pub mod kvp;
pub mod template;

pub use error::{GroupingError, Result};
pub use group::{
    group_by, group_by_keys, group_by_label, group_by_multi, group_by_multi_key_value_pairs,
    AggregationPolicy, GroupingResult,
};
