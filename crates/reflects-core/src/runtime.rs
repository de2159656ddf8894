//! Runtime introspection boundary
//!
//! Everything the query engine knows about types comes through
//! [`TypeRuntime`]. A runtime hands out opaque ids and resolves them to
//! read-only definitions; the engine never mutates them.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Handle to a type owned by a [`TypeRuntime`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub(crate) u32);

/// Handle to a method or field owned by a [`TypeRuntime`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MemberId(pub(crate) u32);

/// Handle to an attached annotation owned by a [`TypeRuntime`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnnotationId(pub(crate) u32);

impl TypeId {
    /// Wrap a raw index handed out by a runtime
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// The raw index
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl MemberId {
    /// Wrap a raw index handed out by a runtime
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// The raw index
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl AnnotationId {
    /// Wrap a raw index handed out by a runtime
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// The raw index
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeId({})", self.0)
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MemberId({})", self.0)
    }
}

impl fmt::Display for AnnotationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AnnotationId({})", self.0)
    }
}

/// Type kind enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    /// Class types (have a superclass chain)
    #[default]
    Class,
    /// Interface / trait types
    Interface,
    /// Annotation types (interfaces that can be attached as metadata)
    Annotation,
    /// Primitive types (no supertypes, no members)
    Primitive,
}

impl TypeKind {
    /// Interfaces and annotation types both take the interface path
    pub fn is_interface(self) -> bool {
        matches!(self, TypeKind::Interface | TypeKind::Annotation)
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeKind::Class => write!(f, "class"),
            TypeKind::Interface => write!(f, "interface"),
            TypeKind::Annotation => write!(f, "annotation"),
            TypeKind::Primitive => write!(f, "primitive"),
        }
    }
}

/// Member kind enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    /// Method
    Method,
    /// Field
    Field,
}

impl fmt::Display for MemberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemberKind::Method => write!(f, "method"),
            MemberKind::Field => write!(f, "field"),
        }
    }
}

/// Member visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Visible everywhere
    Public,
    /// Visible to subtypes
    Protected,
    /// Visible within the declaring package
    #[default]
    Package,
    /// Visible within the declaring type
    Private,
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Visibility::Public => write!(f, "public"),
            Visibility::Protected => write!(f, "protected"),
            Visibility::Package => write!(f, "package"),
            Visibility::Private => write!(f, "private"),
        }
    }
}

/// Modifier flags for members
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    /// Visibility level
    pub visibility: Visibility,
    /// Static member
    pub is_static: bool,
    /// Final member
    pub is_final: bool,
    /// Abstract member
    pub is_abstract: bool,
}

impl Modifiers {
    /// Public instance modifiers
    pub fn public() -> Self {
        Self {
            visibility: Visibility::Public,
            ..Self::default()
        }
    }

    /// Public static modifiers
    pub fn public_static() -> Self {
        Self {
            visibility: Visibility::Public,
            is_static: true,
            ..Self::default()
        }
    }

    /// Private instance modifiers
    pub fn private() -> Self {
        Self {
            visibility: Visibility::Private,
            ..Self::default()
        }
    }

    /// Mark as static
    pub fn with_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    /// Mark as final
    pub fn with_final(mut self) -> Self {
        self.is_final = true;
        self
    }

    /// Mark as abstract
    pub fn with_abstract(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    /// Whether the visibility is public
    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }
}

/// Definition of a type as seen by the runtime
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDef {
    /// Qualified name
    pub name: String,
    /// Kind of type
    pub kind: TypeKind,
    /// Direct superclass
    pub superclass: Option<TypeId>,
    /// Directly declared interfaces, in declaration order
    pub interfaces: Vec<TypeId>,
    /// Declared methods, in declaration order
    pub methods: Vec<MemberId>,
    /// Declared fields, in declaration order
    pub fields: Vec<MemberId>,
    /// Declared annotations, in declaration order
    pub annotations: Vec<AnnotationId>,
}

impl TypeDef {
    /// Create an empty definition of the given kind
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            superclass: None,
            interfaces: Vec::new(),
            methods: Vec::new(),
            fields: Vec::new(),
            annotations: Vec::new(),
        }
    }

    /// Declared members of the given kind
    pub fn members(&self, kind: MemberKind) -> &[MemberId] {
        match kind {
            MemberKind::Method => &self.methods,
            MemberKind::Field => &self.fields,
        }
    }
}

/// Definition of a method or field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDef {
    /// Member name
    pub name: String,
    /// Method or field
    pub kind: MemberKind,
    /// Declaring type
    pub declaring_type: TypeId,
    /// Modifier flags
    pub modifiers: Modifiers,
    /// Return type for methods (`None` is void), declared type for fields
    pub value_type: Option<TypeId>,
    /// Parameter types, in order (always empty for fields)
    pub parameter_types: Vec<TypeId>,
    /// Declared annotations, in declaration order
    pub annotations: Vec<AnnotationId>,
}

/// An annotation attached to a type or member
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AnnotationDef {
    /// The annotation's own type
    pub annotation_type: TypeId,
    /// Named values carried by the annotation
    pub values: BTreeMap<String, String>,
}

/// Native introspection primitives of a type system
///
/// Ids passed to the accessors must have been produced by the same runtime.
pub trait TypeRuntime {
    /// Resolve a qualified type name
    fn lookup(&self, name: &str) -> Option<TypeId>;

    /// Definition of a type
    fn type_def(&self, id: TypeId) -> &TypeDef;

    /// Definition of a member
    fn member_def(&self, id: MemberId) -> &MemberDef;

    /// Definition of an attached annotation
    fn annotation_def(&self, id: AnnotationId) -> &AnnotationDef;

    /// Universal base type every class chain ends in, if the runtime has one
    fn root_type(&self) -> Option<TypeId>;
}
