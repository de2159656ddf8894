//! `reflects annotations`

use anyhow::bail;
use reflects_core::{HasAnnotations, MemberSequence, TypeRegistry};

use super::narrow;
use crate::output::Printer;

/// Annotations of a type, or of its declared members named `member`.
pub fn execute(
    registry: &TypeRegistry,
    type_name: &str,
    member: Option<&str>,
    declared: bool,
    pattern: Option<&str>,
    out: &mut Printer,
) -> anyhow::Result<()> {
    let ty = registry.reflects().on_type_named(type_name)?;

    let Some(member) = member else {
        let found = ty.annotations_with(!declared);
        return out.annotations(&format!("Annotations of {}", ty), &narrow(found, pattern)?);
    };

    let mut members: MemberSequence<'_> = ty.declared_methods().filter(|m| m.name() == member);
    if members.is_empty() {
        members = ty.declared_fields().filter(|m| m.name() == member);
    }
    if members.is_empty() {
        bail!("{} declares no member named '{}'", ty, member);
    }

    let found = members.annotations_with(!declared);
    out.annotations(&format!("Annotations of {}.{}", ty, member), &narrow(found, pattern)?)
}
