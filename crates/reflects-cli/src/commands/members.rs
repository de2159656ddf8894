//! `reflects members`

use reflects_core::{HasFields, HasMethods, MemberFlags, TypeRegistry};
use tracing::debug;

use super::narrow;
use crate::output::Printer;

pub struct MembersArgs<'a> {
    pub type_name: &'a str,
    pub fields: bool,
    pub flags: MemberFlags,
    pub pattern: Option<&'a str>,
}

pub fn execute(registry: &TypeRegistry, args: MembersArgs<'_>, out: &mut Printer) -> anyhow::Result<()> {
    let ty = registry.reflects().on_type_named(args.type_name)?;
    debug!(ty = ty.name(), fields = args.fields, flags = ?args.flags, "listing members");

    let (noun, members) = if args.fields {
        ("Fields", ty.fields_with(args.flags))
    } else {
        ("Methods", ty.methods_with(args.flags))
    };
    out.members(&format!("{} of {}", noun, ty), &narrow(members, args.pattern)?)
}
