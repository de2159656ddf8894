//! Subcommand implementations.

pub mod annotations;
pub mod members;
pub mod types;

use reflects_core::{Named, QueryCollection};

/// Keep the elements whose whole name matches `pattern`, if one was given.
fn narrow<E: Named + Clone>(
    items: QueryCollection<E>,
    pattern: Option<&str>,
) -> anyhow::Result<QueryCollection<E>> {
    match pattern {
        Some(pattern) => Ok(items.filter_name(pattern)?),
        None => Ok(items),
    }
}
