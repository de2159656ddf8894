//! `reflects ancestors`, `reflects interfaces`, `reflects hierarchy`

use reflects_core::TypeRegistry;

use super::narrow;
use crate::output::Printer;

/// Superclass chain of a type, nearest first.
pub fn ancestors(
    registry: &TypeRegistry,
    type_name: &str,
    include_self: bool,
    pattern: Option<&str>,
    out: &mut Printer,
) -> anyhow::Result<()> {
    let ty = registry.reflects().on_type_named(type_name)?;
    let chain = ty.classes(false, include_self);
    out.types(&format!("Ancestors of {}", ty), &narrow(chain, pattern)?)
}

/// Interfaces of a type, transitively unless `direct`.
pub fn interfaces(
    registry: &TypeRegistry,
    type_name: &str,
    direct: bool,
    include_self: bool,
    pattern: Option<&str>,
    out: &mut Printer,
) -> anyhow::Result<()> {
    let ty = registry.reflects().on_type_named(type_name)?;
    let found = ty.interfaces(!direct, include_self);
    out.types(&format!("Interfaces of {}", ty), &narrow(found, pattern)?)
}

/// Superclasses followed by the interface closure.
pub fn hierarchy(
    registry: &TypeRegistry,
    type_name: &str,
    classes_only: bool,
    include_self: bool,
    pattern: Option<&str>,
    out: &mut Printer,
) -> anyhow::Result<()> {
    let ty = registry.reflects().on_type_named(type_name)?;
    let found = ty.classes(!classes_only, include_self);
    out.types(&format!("Hierarchy of {}", ty), &narrow(found, pattern)?)
}
