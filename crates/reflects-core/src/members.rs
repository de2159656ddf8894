//! Member collection
//!
//! Gathers declared methods or fields across a resolved set of types,
//! filtered by the visibility / static predicate the inclusion flags
//! describe.

use tracing::debug;

use crate::descriptor::{MemberRef, TypeRef};
use crate::error::{ReflectError, Result};
use crate::ordered_set::OrderedSet;
use crate::predicates::{and, instance_member, public_member, static_member};
use crate::runtime::MemberKind;
use crate::walker::{ancestors_of, interfaces_of};

/// Inclusion flags for member queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemberFlags {
    /// Walk superclasses (and the interface closure, if interfaces apply)
    pub include_inherited: bool,
    /// Keep non-public members
    pub include_non_public: bool,
    /// Select static members instead of instance members
    pub include_static: bool,
    /// Also collect members declared on interfaces
    pub include_interfaces: bool,
}

impl MemberFlags {
    /// Build flags from the four switches, in field order
    pub const fn new(
        include_inherited: bool,
        include_non_public: bool,
        include_static: bool,
        include_interfaces: bool,
    ) -> Self {
        Self {
            include_inherited,
            include_non_public,
            include_static,
            include_interfaces,
        }
    }

    /// Every member declared on the type itself, unfiltered
    pub const fn declared() -> Self {
        Self::new(false, true, true, false)
    }
}

impl Default for MemberFlags {
    /// Public instance members of the class and its superclasses
    fn default() -> Self {
        Self::new(true, false, false, false)
    }
}

type MemberPredicate<'r> = Box<dyn Fn(&MemberRef<'r>) -> bool + 'r>;

/// Predicate selected by the flags; `None` when both switches are permissive.
fn governing_predicate<'r>(flags: MemberFlags) -> Option<MemberPredicate<'r>> {
    if flags.include_non_public && flags.include_static {
        return None;
    }

    let scope: MemberPredicate<'r> = if flags.include_static {
        Box::new(static_member())
    } else {
        Box::new(instance_member())
    };

    if flags.include_non_public {
        Some(scope)
    } else {
        Some(Box::new(and(public_member(), scope)))
    }
}

/// Declared members of `kind` across the types `flags` selects for `ty`
///
/// The result is deduplicated by member identity: a member redeclared
/// lower in the hierarchy is a distinct entry.
pub fn members_of<'r>(ty: TypeRef<'r>, kind: MemberKind, flags: MemberFlags) -> Vec<MemberRef<'r>> {
    let filter = governing_predicate(flags);
    let filter = filter.as_deref();
    let mut found = OrderedSet::new();

    if !ty.is_interface() {
        if flags.include_inherited {
            for class in ancestors_of(ty, true) {
                export_members(&mut found, class, kind, filter);
            }
        } else {
            export_members(&mut found, ty, kind, filter);
        }
    }

    if ty.is_interface() || flags.include_interfaces {
        if flags.include_inherited {
            for interface in interfaces_of(ty, true, true) {
                export_members(&mut found, interface, kind, filter);
            }
        } else {
            export_members(&mut found, ty, kind, filter);
        }
    }

    debug!(ty = ty.name(), %kind, count = found.len(), ?flags, "collected members");
    found.into_vec()
}

fn export_members<'r>(
    found: &mut OrderedSet<MemberRef<'r>>,
    ty: TypeRef<'r>,
    kind: MemberKind,
    filter: Option<&dyn Fn(&MemberRef<'r>) -> bool>,
) {
    let declared = ty.declared_members(kind);
    match filter {
        Some(p) => found.extend(declared.into_iter().filter(|m| p(m))),
        None => found.extend(declared),
    }
}

/// Nested type enumeration is not implemented
pub fn inner_types_of<'r>(ty: TypeRef<'r>) -> Result<Vec<TypeRef<'r>>> {
    debug!(ty = ty.name(), "inner type enumeration requested");
    Err(ReflectError::unsupported("inner type enumeration"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{MemberSpec, TypeRegistry};
    use crate::runtime::Modifiers;

    fn names(members: &[MemberRef<'_>]) -> Vec<String> {
        members
            .iter()
            .map(|m| format!("{}.{}", m.declaring_type().name(), m.name()))
            .collect()
    }

    /// Object <- Base <- Child, Child implements Api
    fn fixture() -> TypeRegistry {
        let mut r = TypeRegistry::with_root("Object").unwrap();
        let object = r.get("Object").unwrap();
        r.add_method(object, MemberSpec::new("toString", Modifiers::public()));
        r.add_method(object, MemberSpec::new("clone", Modifiers::default().with_final()));

        let api = r.add_interface("Api").unwrap();
        r.add_method(api, MemberSpec::new("call", Modifiers::public().with_abstract()));
        r.add_field(api, MemberSpec::new("VERSION", Modifiers::public_static()));

        let base = r.add_class("Base", None).unwrap();
        r.add_method(base, MemberSpec::new("call", Modifiers::public()));
        r.add_method(base, MemberSpec::new("helper", Modifiers::private()));
        r.add_field(base, MemberSpec::new("count", Modifiers::private().with_static()));

        let child = r.add_class("Child", Some(base)).unwrap();
        r.implement(child, api).unwrap();
        r.add_method(child, MemberSpec::new("call", Modifiers::public()));
        r.add_method(child, MemberSpec::new("create", Modifiers::public_static()));
        r.add_method(child, MemberSpec::new("secret", Modifiers::private().with_static()));
        r
    }

    fn child(registry: &TypeRegistry) -> TypeRef<'_> {
        TypeRef::new(registry, registry.get("Child").unwrap())
    }

    #[test]
    fn test_default_flags_public_instance_inherited() {
        let registry = fixture();
        let methods = members_of(child(&registry), MemberKind::Method, MemberFlags::default());
        assert_eq!(names(&methods), ["Child.call", "Base.call", "Object.toString"]);
    }

    #[test]
    fn test_declared_only_is_unfiltered() {
        let registry = fixture();
        let methods = members_of(child(&registry), MemberKind::Method, MemberFlags::declared());
        assert_eq!(names(&methods), ["Child.call", "Child.create", "Child.secret"]);
    }

    #[test]
    fn test_static_selects_static_only() {
        let registry = fixture();
        let flags = MemberFlags::new(true, false, true, false);
        let methods = members_of(child(&registry), MemberKind::Method, flags);
        assert_eq!(names(&methods), ["Child.create"]);
    }

    #[test]
    fn test_non_public_instance() {
        let registry = fixture();
        let flags = MemberFlags::new(true, true, false, false);
        let methods = members_of(child(&registry), MemberKind::Method, flags);
        assert_eq!(
            names(&methods),
            ["Child.call", "Base.call", "Base.helper", "Object.toString", "Object.clone"]
        );
    }

    #[test]
    fn test_interfaces_appended() {
        let registry = fixture();
        let flags = MemberFlags::new(true, false, false, true);
        let methods = members_of(child(&registry), MemberKind::Method, flags);
        assert_eq!(
            names(&methods),
            ["Child.call", "Base.call", "Object.toString", "Api.call"]
        );

        let fields = members_of(child(&registry), MemberKind::Field, MemberFlags::new(true, true, true, true));
        assert_eq!(names(&fields), ["Base.count", "Api.VERSION"]);
    }

    #[test]
    fn test_not_inherited_interface_branch_reuses_type() {
        let registry = fixture();
        let flags = MemberFlags::new(false, true, true, true);
        let methods = members_of(child(&registry), MemberKind::Method, flags);
        assert_eq!(names(&methods), ["Child.call", "Child.create", "Child.secret"]);
    }

    #[test]
    fn test_interface_type_collects_own_members() {
        let registry = fixture();
        let api = TypeRef::new(&registry, registry.get("Api").unwrap());
        let methods = members_of(api, MemberKind::Method, MemberFlags::default());
        assert_eq!(names(&methods), ["Api.call"]);
    }

    #[test]
    fn test_inner_types_unsupported() {
        let registry = fixture();
        assert!(matches!(
            inner_types_of(child(&registry)),
            Err(ReflectError::Unsupported { .. })
        ));
    }
}
