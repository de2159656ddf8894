//! Common transforms for [`QueryCollection::transform`](crate::QueryCollection::transform)

use crate::descriptor::{AnnotationRef, MemberRef, TypeRef};

/// Qualified name of a type
pub fn type_name(ty: &TypeRef<'_>) -> String {
    ty.name().to_string()
}

/// Name of a member
pub fn member_name(member: &MemberRef<'_>) -> String {
    member.name().to_string()
}

/// Type of an annotation
pub fn annotation_type<'r>(annotation: &AnnotationRef<'r>) -> TypeRef<'r> {
    annotation.annotation_type()
}

/// Qualified name of an annotation's type
pub fn annotation_type_name(annotation: &AnnotationRef<'_>) -> String {
    annotation.annotation_type().name().to_string()
}
