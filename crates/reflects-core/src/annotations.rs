//! Annotation aggregation
//!
//! Collects declared annotations of types and members, optionally across
//! the hierarchy the walker and member collector resolve.

use tracing::debug;

use crate::descriptor::{AnnotationRef, MemberRef, TypeRef};
use crate::members::{members_of, MemberFlags};
use crate::ordered_set::OrderedSet;
use crate::walker::classes_of;

/// Annotations of `ty`, then of every superclass and interface
///
/// Hierarchy order, no deduplication: an annotation repeated at two levels
/// appears twice.
pub fn type_annotations<'r>(ty: TypeRef<'r>, include_inherited: bool) -> Vec<AnnotationRef<'r>> {
    let mut annotations: Vec<AnnotationRef<'r>> = ty.declared_annotations().into_iter().collect();

    if include_inherited {
        for ancestor in classes_of(ty, true, false) {
            annotations.extend(ancestor.declared_annotations());
        }
    }

    debug!(ty = ty.name(), count = annotations.len(), include_inherited, "collected type annotations");
    annotations
}

/// Annotations of `member`, or of every same-shaped member in its hierarchy
///
/// The inherited form re-collects members of the declaring type with the
/// member's own visibility and static-ness (interfaces included) and
/// concatenates their annotations. Unrelated members of the same shape
/// contribute too.
pub fn member_annotations<'r>(member: MemberRef<'r>, include_inherited: bool) -> Vec<AnnotationRef<'r>> {
    if !include_inherited {
        return member.declared_annotations().into_vec();
    }

    let flags = MemberFlags::new(true, !member.is_public(), member.is_static(), true);
    let siblings = members_of(member.declaring_type(), member.kind(), flags);

    let annotations: Vec<AnnotationRef<'r>> = siblings
        .iter()
        .flat_map(|m| m.declared_annotations())
        .collect();

    debug!(
        member = member.name(),
        siblings = siblings.len(),
        count = annotations.len(),
        "collected member annotations"
    );
    annotations
}

/// Union of [`member_annotations`] over `members`, deduplicated by value
pub fn collect_member_annotations<'r>(
    members: &[MemberRef<'r>],
    include_inherited: bool,
) -> Vec<AnnotationRef<'r>> {
    let mut found = OrderedSet::new();
    for &member in members {
        found.extend(member_annotations(member, include_inherited));
    }
    found.into_vec()
}

/// Union of [`type_annotations`] over `types`, deduplicated by value
pub fn collect_type_annotations<'r>(
    types: &[TypeRef<'r>],
    include_inherited: bool,
) -> Vec<AnnotationRef<'r>> {
    let mut found = OrderedSet::new();
    for &ty in types {
        found.extend(type_annotations(ty, include_inherited));
    }
    found.into_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{AnnotationSpec, MemberSpec, TypeRegistry};
    use crate::runtime::Modifiers;

    fn rendered(annotations: &[AnnotationRef<'_>]) -> Vec<String> {
        annotations.iter().map(|a| a.to_string()).collect()
    }

    #[test]
    fn test_type_annotations_hierarchy_order_with_repeats() {
        let mut r = TypeRegistry::with_root("Object").unwrap();
        let tag = r.add_annotation_type("Tag").unwrap();
        let api = r.add_interface("Api").unwrap();
        let base = r.add_class("Base", None).unwrap();
        let child = r.add_class("Child", Some(base)).unwrap();
        r.implement(child, api).unwrap();
        r.annotate_type(child, AnnotationSpec::new(tag).with("value", "child")).unwrap();
        r.annotate_type(base, AnnotationSpec::new(tag).with("value", "shared")).unwrap();
        r.annotate_type(api, AnnotationSpec::new(tag).with("value", "shared")).unwrap();

        let child = TypeRef::new(&r, child);
        assert_eq!(rendered(&type_annotations(child, false)), ["@Tag(value=\"child\")"]);
        assert_eq!(
            rendered(&type_annotations(child, true)),
            [
                "@Tag(value=\"child\")",
                "@Tag(value=\"shared\")",
                "@Tag(value=\"shared\")"
            ]
        );

        let union = collect_type_annotations(&[child], true);
        assert_eq!(union.len(), 2);
    }

    #[test]
    fn test_member_annotations_walk_same_shaped_members() {
        let mut r = TypeRegistry::with_root("Object").unwrap();
        let x = r.add_annotation_type("X").unwrap();
        let y = r.add_annotation_type("Y").unwrap();
        let api = r.add_interface("Api").unwrap();
        let run_api = r.add_method(api, MemberSpec::new("run", Modifiers::public()));
        r.annotate_member(run_api, AnnotationSpec::new(x)).unwrap();

        let service = r.add_class("Service", None).unwrap();
        r.implement(service, api).unwrap();
        let run = r.add_method(service, MemberSpec::new("run", Modifiers::public()));
        r.annotate_member(run, AnnotationSpec::new(y)).unwrap();
        let hidden = r.add_method(service, MemberSpec::new("hidden", Modifiers::private()));
        r.annotate_member(hidden, AnnotationSpec::new(x).with("value", "private")).unwrap();

        let run = MemberRef::new(&r, run);
        assert_eq!(rendered(&member_annotations(run, false)), ["@Y"]);
        assert_eq!(rendered(&member_annotations(run, true)), ["@Y", "@X"]);

        // private instance members are collected alongside the public ones
        let hidden = MemberRef::new(&r, hidden);
        assert_eq!(
            rendered(&member_annotations(hidden, true)),
            ["@Y", "@X(value=\"private\")", "@X"]
        );
    }

    #[test]
    fn test_collect_member_annotations_dedups_equal_values() {
        let mut r = TypeRegistry::new();
        let tag = r.add_annotation_type("Tag").unwrap();
        let service = r.add_class("Service", None).unwrap();
        let a = r.add_method(service, MemberSpec::new("a", Modifiers::public()));
        let b = r.add_method(service, MemberSpec::new("b", Modifiers::public()));
        r.annotate_member(a, AnnotationSpec::new(tag).with("value", "same")).unwrap();
        r.annotate_member(b, AnnotationSpec::new(tag).with("value", "same")).unwrap();

        let members = [MemberRef::new(&r, a), MemberRef::new(&r, b)];
        let separate: usize = members.iter().map(|&m| member_annotations(m, false).len()).sum();
        assert_eq!(separate, 2);
        assert_eq!(collect_member_annotations(&members, false).len(), 1);
    }
}
