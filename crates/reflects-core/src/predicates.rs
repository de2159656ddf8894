//! Built-in predicates and combinators
//!
//! Predicates are plain closures over element references, so they compose
//! with [`and`], [`or`] and [`not`] and with caller-written closures alike.

use regex::Regex;

use crate::descriptor::{Annotatable, MemberRef, Named, TypeRef};
use crate::error::{ReflectError, Result};
use crate::runtime::TypeId;

/// Both predicates hold
pub fn and<E: ?Sized>(
    a: impl Fn(&E) -> bool,
    b: impl Fn(&E) -> bool,
) -> impl Fn(&E) -> bool {
    move |e: &E| a(e) && b(e)
}

/// Either predicate holds
pub fn or<E: ?Sized>(
    a: impl Fn(&E) -> bool,
    b: impl Fn(&E) -> bool,
) -> impl Fn(&E) -> bool {
    move |e: &E| a(e) || b(e)
}

/// The predicate does not hold
pub fn not<E: ?Sized>(p: impl Fn(&E) -> bool) -> impl Fn(&E) -> bool {
    move |e: &E| !p(e)
}

/// Compile `pattern` so that it must match a whole name
pub(crate) fn full_match(pattern: &str) -> Result<Regex> {
    Regex::new(&format!("^(?:{})$", pattern)).map_err(|e| ReflectError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })
}

/// Elements whose whole name matches `pattern`
pub fn named<E: Named + ?Sized>(pattern: &str) -> Result<impl Fn(&E) -> bool> {
    let regex = full_match(pattern)?;
    Ok(move |e: &E| regex.is_match(e.match_name()))
}

/// Elements carrying an annotation of `annotation_type` directly
pub fn annotated_with<E: Annotatable + ?Sized>(
    annotation_type: impl Into<TypeId>,
) -> impl Fn(&E) -> bool {
    let annotation_type = annotation_type.into();
    move |e: &E| e.is_annotated_with(annotation_type)
}

/// Public members
pub fn public_member() -> impl Fn(&MemberRef<'_>) -> bool {
    |m: &MemberRef<'_>| m.is_public()
}

/// Static members
pub fn static_member() -> impl Fn(&MemberRef<'_>) -> bool {
    |m: &MemberRef<'_>| m.is_static()
}

/// Instance (non-static) members
pub fn instance_member() -> impl Fn(&MemberRef<'_>) -> bool {
    |m: &MemberRef<'_>| !m.is_static()
}

/// Members declared on the runtime's root type
pub fn root_member() -> impl Fn(&MemberRef<'_>) -> bool {
    |m: &MemberRef<'_>| m.declaring_type().is_root()
}

/// Members whose name fully matches `pattern`
pub fn member_named<'r>(pattern: &str) -> Result<impl Fn(&MemberRef<'r>) -> bool> {
    named::<MemberRef<'r>>(pattern)
}

/// Members carrying `annotation_type`
pub fn member_annotated_with<'r>(
    annotation_type: impl Into<TypeId>,
) -> impl Fn(&MemberRef<'r>) -> bool {
    annotated_with::<MemberRef<'r>>(annotation_type)
}

/// Types whose qualified name fully matches `pattern`
pub fn type_named<'r>(pattern: &str) -> Result<impl Fn(&TypeRef<'r>) -> bool> {
    named::<TypeRef<'r>>(pattern)
}

/// Types carrying `annotation_type`
pub fn type_annotated_with<'r>(
    annotation_type: impl Into<TypeId>,
) -> impl Fn(&TypeRef<'r>) -> bool {
    annotated_with::<TypeRef<'r>>(annotation_type)
}

/// Methods with exactly this name, return type (`None` is void) and
/// parameter types
pub fn method_signature(
    name: impl Into<String>,
    return_type: Option<TypeId>,
    parameter_types: &[TypeId],
) -> impl Fn(&MemberRef<'_>) -> bool {
    let name = name.into();
    let parameter_types = parameter_types.to_vec();
    move |m: &MemberRef<'_>| {
        let def = m.def();
        def.name == name && def.value_type == return_type && def.parameter_types == parameter_types
    }
}

/// Methods with the same signature as `method`
pub fn signature_of(method: &MemberRef<'_>) -> impl Fn(&MemberRef<'_>) -> bool {
    let def = method.def();
    method_signature(def.name.clone(), def.value_type, &def.parameter_types)
}
