//! Query collections
//!
//! [`QueryCollection`] is the ordered envelope every query returns. The
//! capability traits ([`HasMethods`], [`HasFields`], [`HasAnnotations`])
//! continue a query from a type, a member or a collection of them.

use std::ops::Index;

use crate::annotations::{
    collect_member_annotations, collect_type_annotations, member_annotations, type_annotations,
};
use crate::descriptor::{Annotatable, AnnotationRef, MemberRef, Named, TypeRef};
use crate::error::Result;
use crate::members::{inner_types_of, members_of, MemberFlags};
use crate::predicates::{annotated_with, named};
use crate::runtime::{MemberKind, TypeId};
use crate::walker::{ancestors_of, classes_of, interfaces_of};

/// Ordered sequence of query results
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryCollection<E> {
    elements: Vec<E>,
}

/// Collection of types
pub type TypeSequence<'r> = QueryCollection<TypeRef<'r>>;
/// Collection of methods or fields
pub type MemberSequence<'r> = QueryCollection<MemberRef<'r>>;
/// Collection of annotations
pub type AnnotationSequence<'r> = QueryCollection<AnnotationRef<'r>>;

impl<E> QueryCollection<E> {
    /// Wrap an ordered list
    pub fn new(elements: Vec<E>) -> Self {
        Self { elements }
    }

    /// The elements, in order
    pub fn get(&self) -> &[E] {
        &self.elements
    }

    /// Consume into the underlying list
    pub fn into_vec(self) -> Vec<E> {
        self.elements
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the collection is empty
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Iterate in order
    pub fn iter(&self) -> std::slice::Iter<'_, E> {
        self.elements.iter()
    }

    /// Whether `element` is in the collection
    pub fn contains(&self, element: &E) -> bool
    where
        E: PartialEq,
    {
        self.elements.contains(element)
    }

    /// First element satisfying `predicate`, if any
    pub fn seek(&self, predicate: impl Fn(&E) -> bool) -> Option<&E> {
        self.elements.iter().find(|e| predicate(e))
    }

    /// Elements satisfying `predicate`, in order
    pub fn filter(&self, predicate: impl Fn(&E) -> bool) -> Self
    where
        E: Clone,
    {
        self.elements.iter().filter(|e| predicate(e)).cloned().collect()
    }

    /// `f` applied to each element, in order
    pub fn transform<O>(&self, f: impl Fn(&E) -> O) -> QueryCollection<O> {
        self.elements.iter().map(f).collect()
    }

    /// Elements whose whole name matches the regular expression `pattern`
    pub fn filter_name(&self, pattern: &str) -> Result<Self>
    where
        E: Named + Clone,
    {
        Ok(self.filter(named::<E>(pattern)?))
    }

    /// Elements carrying an annotation of `annotation_type`
    pub fn filter_annotated(&self, annotation_type: impl Into<TypeId>) -> Self
    where
        E: Annotatable + Clone,
    {
        self.filter(annotated_with::<E>(annotation_type))
    }
}

impl<E> Default for QueryCollection<E> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<E> From<Vec<E>> for QueryCollection<E> {
    fn from(elements: Vec<E>) -> Self {
        Self::new(elements)
    }
}

impl<E> FromIterator<E> for QueryCollection<E> {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<E> IntoIterator for QueryCollection<E> {
    type Item = E;
    type IntoIter = std::vec::IntoIter<E>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_iter()
    }
}

impl<'a, E> IntoIterator for &'a QueryCollection<E> {
    type Item = &'a E;
    type IntoIter = std::slice::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

impl<E> Index<usize> for QueryCollection<E> {
    type Output = E;

    fn index(&self, index: usize) -> &E {
        &self.elements[index]
    }
}

// ============================================================================
// Capabilities
// ============================================================================

/// Sources of method queries
pub trait HasMethods<'r> {
    /// Public instance methods, inherited
    fn methods(&self) -> MemberSequence<'r> {
        self.methods_with(MemberFlags::default())
    }

    /// Methods selected by `flags`
    fn methods_with(&self, flags: MemberFlags) -> MemberSequence<'r>;
}

/// Sources of field queries
pub trait HasFields<'r> {
    /// Public instance fields, inherited
    fn fields(&self) -> MemberSequence<'r> {
        self.fields_with(MemberFlags::default())
    }

    /// Fields selected by `flags`
    fn fields_with(&self, flags: MemberFlags) -> MemberSequence<'r>;
}

/// Sources of annotation queries
pub trait HasAnnotations<'r> {
    /// Annotations including inherited ones
    fn annotations(&self) -> AnnotationSequence<'r> {
        self.annotations_with(true)
    }

    /// Annotations, walking the hierarchy if `include_inherited`
    fn annotations_with(&self, include_inherited: bool) -> AnnotationSequence<'r>;
}

// Single type

impl<'r> TypeRef<'r> {
    /// Superclasses, and interfaces if `include_interfaces`
    pub fn classes(&self, include_interfaces: bool, include_self: bool) -> TypeSequence<'r> {
        classes_of(*self, include_interfaces, include_self).into()
    }

    /// Superclass chain without the type itself
    pub fn superclasses(&self) -> TypeSequence<'r> {
        ancestors_of(*self, false).into()
    }

    /// Interfaces, optionally transitively and including the type itself
    pub fn interfaces(&self, include_inherited: bool, include_self: bool) -> TypeSequence<'r> {
        interfaces_of(*self, include_inherited, include_self).into()
    }

    /// Nested types; always `Unsupported`
    pub fn inner_types(&self) -> Result<TypeSequence<'r>> {
        inner_types_of(*self).map(QueryCollection::from)
    }
}

impl<'r> HasMethods<'r> for TypeRef<'r> {
    fn methods_with(&self, flags: MemberFlags) -> MemberSequence<'r> {
        members_of(*self, MemberKind::Method, flags).into()
    }
}

impl<'r> HasFields<'r> for TypeRef<'r> {
    fn fields_with(&self, flags: MemberFlags) -> MemberSequence<'r> {
        members_of(*self, MemberKind::Field, flags).into()
    }
}

impl<'r> HasAnnotations<'r> for TypeRef<'r> {
    fn annotations_with(&self, include_inherited: bool) -> AnnotationSequence<'r> {
        type_annotations(*self, include_inherited).into()
    }
}

// Type collections

impl<'r> HasMethods<'r> for TypeSequence<'r> {
    fn methods_with(&self, flags: MemberFlags) -> MemberSequence<'r> {
        self.iter()
            .flat_map(|ty| members_of(*ty, MemberKind::Method, flags))
            .collect()
    }
}

impl<'r> HasFields<'r> for TypeSequence<'r> {
    fn fields_with(&self, flags: MemberFlags) -> MemberSequence<'r> {
        self.iter()
            .flat_map(|ty| members_of(*ty, MemberKind::Field, flags))
            .collect()
    }
}

impl<'r> HasAnnotations<'r> for TypeSequence<'r> {
    fn annotations_with(&self, include_inherited: bool) -> AnnotationSequence<'r> {
        collect_type_annotations(self.get(), include_inherited).into()
    }
}

// Members

impl<'r> HasAnnotations<'r> for MemberRef<'r> {
    fn annotations_with(&self, include_inherited: bool) -> AnnotationSequence<'r> {
        member_annotations(*self, include_inherited).into()
    }
}

impl<'r> HasAnnotations<'r> for MemberSequence<'r> {
    fn annotations_with(&self, include_inherited: bool) -> AnnotationSequence<'r> {
        collect_member_annotations(self.get(), include_inherited).into()
    }
}
