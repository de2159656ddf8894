//! Descriptor views
//!
//! [`TypeRef`], [`MemberRef`] and [`AnnotationRef`] pair a runtime handle
//! with the runtime that owns it, so elements of a query can be inspected
//! by predicates and transforms without threading the runtime around.

use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::query::{AnnotationSequence, MemberSequence, TypeSequence};
use crate::runtime::{
    AnnotationDef, AnnotationId, MemberDef, MemberId, MemberKind, Modifiers, TypeDef, TypeId,
    TypeKind, TypeRuntime,
};

/// Elements that can be matched by name
pub trait Named {
    /// Name used by pattern filters
    fn match_name(&self) -> &str;
}

/// Elements that can carry annotations directly
pub trait Annotatable {
    /// Whether an annotation of `annotation_type` is declared on this element
    fn is_annotated_with(&self, annotation_type: TypeId) -> bool;
}

/// View of a type
#[derive(Clone, Copy)]
pub struct TypeRef<'r> {
    runtime: &'r dyn TypeRuntime,
    id: TypeId,
}

impl<'r> TypeRef<'r> {
    /// Wrap a type id owned by `runtime`
    pub fn new(runtime: &'r dyn TypeRuntime, id: TypeId) -> Self {
        Self { runtime, id }
    }

    /// Runtime handle
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Owning runtime
    pub fn runtime(&self) -> &'r dyn TypeRuntime {
        self.runtime
    }

    /// Underlying definition
    pub fn def(&self) -> &'r TypeDef {
        self.runtime.type_def(self.id)
    }

    /// Qualified name
    pub fn name(&self) -> &'r str {
        &self.def().name
    }

    /// Name without its package / module prefix
    pub fn simple_name(&self) -> &'r str {
        let name = self.name();
        name.rsplit(|c: char| matches!(c, '.' | '$' | ':'))
            .next()
            .unwrap_or(name)
    }

    /// Kind of type
    pub fn kind(&self) -> TypeKind {
        self.def().kind
    }

    /// Whether this is an interface or annotation type
    pub fn is_interface(&self) -> bool {
        self.kind().is_interface()
    }

    /// Whether this is the runtime's universal base type
    pub fn is_root(&self) -> bool {
        self.runtime.root_type() == Some(self.id)
    }

    /// Direct superclass
    pub fn superclass(&self) -> Option<TypeRef<'r>> {
        self.def().superclass.map(|id| TypeRef::new(self.runtime, id))
    }

    /// Directly declared interfaces, in declaration order
    pub fn declared_interfaces(&self) -> TypeSequence<'r> {
        self.def()
            .interfaces
            .iter()
            .map(|&id| TypeRef::new(self.runtime, id))
            .collect()
    }

    /// Members of the given kind declared directly on this type
    pub fn declared_members(&self, kind: MemberKind) -> MemberSequence<'r> {
        self.def()
            .members(kind)
            .iter()
            .map(|&id| MemberRef::new(self.runtime, id))
            .collect()
    }

    /// Methods declared directly on this type
    pub fn declared_methods(&self) -> MemberSequence<'r> {
        self.declared_members(MemberKind::Method)
    }

    /// Fields declared directly on this type
    pub fn declared_fields(&self) -> MemberSequence<'r> {
        self.declared_members(MemberKind::Field)
    }

    /// Annotations declared directly on this type
    pub fn declared_annotations(&self) -> AnnotationSequence<'r> {
        self.def()
            .annotations
            .iter()
            .map(|&id| AnnotationRef::new(self.runtime, id))
            .collect()
    }
}

impl PartialEq for TypeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeRef<'_> {}

impl Hash for TypeRef<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind(), self.name())
    }
}

impl fmt::Display for TypeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<TypeRef<'_>> for TypeId {
    fn from(ty: TypeRef<'_>) -> Self {
        ty.id
    }
}

impl Named for TypeRef<'_> {
    fn match_name(&self) -> &str {
        self.name()
    }
}

impl Annotatable for TypeRef<'_> {
    fn is_annotated_with(&self, annotation_type: TypeId) -> bool {
        self.def()
            .annotations
            .iter()
            .any(|&a| self.runtime.annotation_def(a).annotation_type == annotation_type)
    }
}

/// View of a method or field
#[derive(Clone, Copy)]
pub struct MemberRef<'r> {
    runtime: &'r dyn TypeRuntime,
    id: MemberId,
}

impl<'r> MemberRef<'r> {
    /// Wrap a member id owned by `runtime`
    pub fn new(runtime: &'r dyn TypeRuntime, id: MemberId) -> Self {
        Self { runtime, id }
    }

    /// Runtime handle
    pub fn id(&self) -> MemberId {
        self.id
    }

    /// Owning runtime
    pub fn runtime(&self) -> &'r dyn TypeRuntime {
        self.runtime
    }

    /// Underlying definition
    pub fn def(&self) -> &'r MemberDef {
        self.runtime.member_def(self.id)
    }

    /// Member name
    pub fn name(&self) -> &'r str {
        &self.def().name
    }

    /// Method or field
    pub fn kind(&self) -> MemberKind {
        self.def().kind
    }

    /// Type that declares this member
    pub fn declaring_type(&self) -> TypeRef<'r> {
        TypeRef::new(self.runtime, self.def().declaring_type)
    }

    /// Modifier flags
    pub fn modifiers(&self) -> Modifiers {
        self.def().modifiers
    }

    /// Whether the member is public
    pub fn is_public(&self) -> bool {
        self.modifiers().is_public()
    }

    /// Whether the member is static
    pub fn is_static(&self) -> bool {
        self.modifiers().is_static
    }

    /// Return type of a method (`None` is void) or declared type of a field
    pub fn value_type(&self) -> Option<TypeRef<'r>> {
        self.def().value_type.map(|id| TypeRef::new(self.runtime, id))
    }

    /// Parameter types, in order
    pub fn parameter_types(&self) -> Vec<TypeRef<'r>> {
        self.def()
            .parameter_types
            .iter()
            .map(|&id| TypeRef::new(self.runtime, id))
            .collect()
    }

    /// Annotations declared directly on this member
    pub fn declared_annotations(&self) -> AnnotationSequence<'r> {
        self.def()
            .annotations
            .iter()
            .map(|&id| AnnotationRef::new(self.runtime, id))
            .collect()
    }
}

impl PartialEq for MemberRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for MemberRef<'_> {}

impl Hash for MemberRef<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for MemberRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}::{}", self.kind(), self.declaring_type().name(), self.name())
    }
}

impl fmt::Display for MemberRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let def = self.def();
        write!(f, "{} ", def.modifiers.visibility)?;
        if def.modifiers.is_static {
            f.write_str("static ")?;
        }
        match def.kind {
            MemberKind::Method => {
                let params: Vec<&str> = def
                    .parameter_types
                    .iter()
                    .map(|&id| self.runtime.type_def(id).name.as_str())
                    .collect();
                let ret = def
                    .value_type
                    .map(|id| self.runtime.type_def(id).name.as_str())
                    .unwrap_or("void");
                write!(
                    f,
                    "{} {}.{}({})",
                    ret,
                    self.declaring_type().name(),
                    def.name,
                    params.join(", ")
                )
            }
            MemberKind::Field => {
                let ty = def
                    .value_type
                    .map(|id| self.runtime.type_def(id).name.as_str())
                    .unwrap_or("?");
                write!(f, "{} {}.{}", ty, self.declaring_type().name(), def.name)
            }
        }
    }
}

impl From<MemberRef<'_>> for MemberId {
    fn from(member: MemberRef<'_>) -> Self {
        member.id
    }
}

impl Named for MemberRef<'_> {
    fn match_name(&self) -> &str {
        self.name()
    }
}

impl Annotatable for MemberRef<'_> {
    fn is_annotated_with(&self, annotation_type: TypeId) -> bool {
        self.def()
            .annotations
            .iter()
            .any(|&a| self.runtime.annotation_def(a).annotation_type == annotation_type)
    }
}

/// View of an attached annotation
///
/// Two annotations are equal when they have the same type and values,
/// regardless of where they are attached.
#[derive(Clone, Copy)]
pub struct AnnotationRef<'r> {
    runtime: &'r dyn TypeRuntime,
    id: AnnotationId,
}

impl<'r> AnnotationRef<'r> {
    /// Wrap an annotation id owned by `runtime`
    pub fn new(runtime: &'r dyn TypeRuntime, id: AnnotationId) -> Self {
        Self { runtime, id }
    }

    /// Runtime handle
    pub fn id(&self) -> AnnotationId {
        self.id
    }

    /// Underlying definition
    pub fn def(&self) -> &'r AnnotationDef {
        self.runtime.annotation_def(self.id)
    }

    /// The annotation's own type
    pub fn annotation_type(&self) -> TypeRef<'r> {
        TypeRef::new(self.runtime, self.def().annotation_type)
    }

    /// All named values
    pub fn values(&self) -> &'r BTreeMap<String, String> {
        &self.def().values
    }

    /// One named value
    pub fn value(&self, key: &str) -> Option<&'r str> {
        self.values().get(key).map(String::as_str)
    }
}

impl PartialEq for AnnotationRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id || self.def() == other.def()
    }
}

impl Eq for AnnotationRef<'_> {}

impl Hash for AnnotationRef<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.def().hash(state);
    }
}

impl fmt::Debug for AnnotationRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}{:?}", self.annotation_type().name(), self.values())
    }
}

impl fmt::Display for AnnotationRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.annotation_type().name())?;
        let values = self.values();
        if !values.is_empty() {
            let pairs: Vec<String> = values.iter().map(|(k, v)| format!("{}={:?}", k, v)).collect();
            write!(f, "({})", pairs.join(", "))?;
        }
        Ok(())
    }
}

impl Named for AnnotationRef<'_> {
    fn match_name(&self) -> &str {
        self.annotation_type().name()
    }
}
