//! Reflects CLI
//!
//! Loads a type manifest and answers hierarchy, member and annotation
//! queries about the types it declares.

mod commands;
mod logging;
mod output;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use commands::{annotations, members, types};
use reflects_core::{load_registry, MemberFlags};
use tracing::debug;

#[derive(Parser)]
#[command(name = "reflects")]
#[command(about = "Query type hierarchies, members and annotations", long_about = None)]
#[command(version)]
struct Cli {
    /// Type manifest (.toml or .json)
    #[arg(short, long, global = true, default_value = "types.toml")]
    manifest: PathBuf,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Colorize output: auto, always or never
    #[arg(long, global = true)]
    color: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Superclass chain of a type
    Ancestors {
        /// Qualified type name
        type_name: String,
        /// Include the type itself
        #[arg(short = 's', long)]
        include_self: bool,
        /// Keep only names fully matching this regular expression
        #[arg(short, long)]
        pattern: Option<String>,
    },

    /// Interfaces of a type
    Interfaces {
        /// Qualified type name
        type_name: String,
        /// Only directly declared interfaces
        #[arg(short, long)]
        direct: bool,
        /// Include the type itself when it is an interface
        #[arg(short = 's', long)]
        include_self: bool,
        /// Keep only names fully matching this regular expression
        #[arg(short, long)]
        pattern: Option<String>,
    },

    /// Superclasses followed by all interfaces
    Hierarchy {
        /// Qualified type name
        type_name: String,
        /// Leave out interfaces
        #[arg(long)]
        classes_only: bool,
        /// Include the type itself
        #[arg(short = 's', long)]
        include_self: bool,
        /// Keep only names fully matching this regular expression
        #[arg(short, long)]
        pattern: Option<String>,
    },

    /// Methods (or fields) of a type
    Members {
        /// Qualified type name
        type_name: String,
        /// List fields instead of methods
        #[arg(short, long)]
        fields: bool,
        /// Only members the type declares itself, unfiltered
        #[arg(long, conflicts_with_all = ["local", "non_public", "static_members", "interfaces"])]
        declared: bool,
        /// Skip superclasses
        #[arg(long)]
        local: bool,
        /// Keep non-public members
        #[arg(short = 'a', long)]
        non_public: bool,
        /// Static members instead of instance members
        #[arg(long = "static")]
        static_members: bool,
        /// Also collect members declared on interfaces
        #[arg(short, long)]
        interfaces: bool,
        /// Keep only names fully matching this regular expression
        #[arg(short, long)]
        pattern: Option<String>,
    },

    /// Annotations of a type or one of its members
    Annotations {
        /// Qualified type name
        type_name: String,
        /// Name of a declared method or field
        #[arg(long)]
        member: Option<String>,
        /// Skip inherited annotations
        #[arg(long)]
        declared: bool,
        /// Keep only annotation types fully matching this regular expression
        #[arg(short, long)]
        pattern: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_tracing();

    let registry = load_registry(&cli.manifest)
        .with_context(|| format!("Failed to load {}", cli.manifest.display()))?;
    debug!(manifest = %cli.manifest.display(), types = registry.len(), "loaded manifest");

    let mut out = output::Printer::new(output::resolve_color_choice(cli.color.as_deref()), cli.json);

    match cli.command {
        Commands::Ancestors {
            type_name,
            include_self,
            pattern,
        } => types::ancestors(&registry, &type_name, include_self, pattern.as_deref(), &mut out),

        Commands::Interfaces {
            type_name,
            direct,
            include_self,
            pattern,
        } => types::interfaces(
            &registry,
            &type_name,
            direct,
            include_self,
            pattern.as_deref(),
            &mut out,
        ),

        Commands::Hierarchy {
            type_name,
            classes_only,
            include_self,
            pattern,
        } => types::hierarchy(
            &registry,
            &type_name,
            classes_only,
            include_self,
            pattern.as_deref(),
            &mut out,
        ),

        Commands::Members {
            type_name,
            fields,
            declared,
            local,
            non_public,
            static_members,
            interfaces,
            pattern,
        } => {
            let flags = if declared {
                MemberFlags::declared()
            } else {
                MemberFlags::new(!local, non_public, static_members, interfaces)
            };
            let args = members::MembersArgs {
                type_name: &type_name,
                fields,
                flags,
                pattern: pattern.as_deref(),
            };
            members::execute(&registry, args, &mut out)
        }

        Commands::Annotations {
            type_name,
            member,
            declared,
            pattern,
        } => annotations::execute(
            &registry,
            &type_name,
            member.as_deref(),
            declared,
            pattern.as_deref(),
            &mut out,
        ),
    }
}
