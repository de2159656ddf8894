//! In-memory type registry
//!
//! [`TypeRegistry`] is a [`TypeRuntime`] whose type graph is built up
//! programmatically or loaded from a manifest. Declaration order of
//! interfaces, members and annotations is preserved exactly.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;
use tracing::trace;

use crate::error::{ReflectError, Result};
use crate::reflects::Reflects;
use crate::runtime::{
    AnnotationDef, AnnotationId, MemberDef, MemberId, MemberKind, Modifiers, TypeDef, TypeId,
    TypeKind, TypeRuntime,
};

/// Description of a member to add to a type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberSpec {
    /// Member name
    pub name: String,
    /// Modifier flags
    pub modifiers: Modifiers,
    /// Return type (methods, `None` is void) or declared type (fields)
    pub value_type: Option<TypeId>,
    /// Parameter types (ignored for fields)
    pub parameter_types: Vec<TypeId>,
}

impl MemberSpec {
    /// Create a spec with the given name and modifiers
    pub fn new(name: impl Into<String>, modifiers: Modifiers) -> Self {
        Self {
            name: name.into(),
            modifiers,
            value_type: None,
            parameter_types: Vec::new(),
        }
    }

    /// Set the return / declared type
    pub fn returns(mut self, ty: TypeId) -> Self {
        self.value_type = Some(ty);
        self
    }

    /// Set the parameter types
    pub fn params(mut self, params: impl IntoIterator<Item = TypeId>) -> Self {
        self.parameter_types = params.into_iter().collect();
        self
    }
}

/// Description of an annotation to attach
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationSpec {
    /// Annotation type
    pub annotation_type: TypeId,
    /// Named values
    pub values: BTreeMap<String, String>,
}

impl AnnotationSpec {
    /// Annotation of the given type with no values
    pub fn new(annotation_type: TypeId) -> Self {
        Self {
            annotation_type,
            values: BTreeMap::new(),
        }
    }

    /// Add a named value
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }
}

/// In-memory type graph
#[derive(Debug, Default)]
pub struct TypeRegistry {
    /// Types indexed by ID
    types: Vec<TypeDef>,
    /// Members indexed by ID
    members: Vec<MemberDef>,
    /// Annotations indexed by ID
    annotations: Vec<AnnotationDef>,
    /// Type name to ID mapping
    name_to_id: FxHashMap<String, TypeId>,
    /// Universal base class
    root: Option<TypeId>,
}

impl TypeRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry whose root class is `root_name`
    pub fn with_root(root_name: &str) -> Result<Self> {
        let mut registry = Self::new();
        let root = registry.add_type(root_name, TypeKind::Class)?;
        registry.root = Some(root);
        Ok(registry)
    }

    /// Query entry point over this registry
    pub fn reflects(&self) -> Reflects<'_> {
        Reflects::new(self)
    }

    /// Register a type without any links
    pub fn add_type(&mut self, name: &str, kind: TypeKind) -> Result<TypeId> {
        if self.name_to_id.contains_key(name) {
            return Err(ReflectError::DuplicateType {
                name: name.to_string(),
            });
        }
        let id = TypeId(self.types.len() as u32);
        self.types.push(TypeDef::new(name, kind));
        self.name_to_id.insert(name.to_string(), id);
        trace!(name, %kind, "registered type");
        Ok(id)
    }

    /// Register a class
    ///
    /// A `None` superclass extends the root class when one is set.
    pub fn add_class(&mut self, name: &str, superclass: Option<TypeId>) -> Result<TypeId> {
        // A fresh class cannot close a cycle, so the kind is the only check.
        let parent = superclass.or(self.root);
        if let Some(parent) = parent {
            let def = &self.types[parent.index()];
            if def.kind != TypeKind::Class {
                return Err(ReflectError::InvalidSuperclass {
                    name: name.to_string(),
                    superclass: def.name.clone(),
                });
            }
        }

        let id = self.add_type(name, TypeKind::Class)?;
        self.types[id.index()].superclass = parent;
        Ok(id)
    }

    /// Register an interface
    pub fn add_interface(&mut self, name: &str) -> Result<TypeId> {
        self.add_type(name, TypeKind::Interface)
    }

    /// Register an annotation type
    pub fn add_annotation_type(&mut self, name: &str) -> Result<TypeId> {
        self.add_type(name, TypeKind::Annotation)
    }

    /// Register a primitive type
    pub fn add_primitive(&mut self, name: &str) -> Result<TypeId> {
        self.add_type(name, TypeKind::Primitive)
    }

    /// Mark a class as the universal base class
    ///
    /// Classes already registered without a superclass are re-parented
    /// under the new root.
    pub fn set_root(&mut self, root: TypeId) -> Result<()> {
        let def = &self.types[root.index()];
        if def.kind != TypeKind::Class || def.superclass.is_some() {
            return Err(ReflectError::InvalidSuperclass {
                name: "<root>".to_string(),
                superclass: def.name.clone(),
            });
        }

        let mut rerooted = 0usize;
        for (index, def) in self.types.iter_mut().enumerate() {
            if index != root.index() && def.kind == TypeKind::Class && def.superclass.is_none() {
                def.superclass = Some(root);
                rerooted += 1;
            }
        }
        self.root = Some(root);
        trace!(root = %root, rerooted, "set root class");
        Ok(())
    }

    /// Link a class to its direct superclass
    pub fn set_superclass(&mut self, ty: TypeId, superclass: TypeId) -> Result<()> {
        let sub = &self.types[ty.index()];
        let sup = &self.types[superclass.index()];
        if sub.kind != TypeKind::Class || sup.kind != TypeKind::Class {
            return Err(ReflectError::InvalidSuperclass {
                name: sub.name.clone(),
                superclass: sup.name.clone(),
            });
        }

        let mut current = Some(superclass);
        while let Some(id) = current {
            if id == ty {
                return Err(ReflectError::InheritanceCycle {
                    name: sub.name.clone(),
                });
            }
            current = self.types[id.index()].superclass;
        }

        self.types[ty.index()].superclass = Some(superclass);
        Ok(())
    }

    /// Declare that `ty` implements (or, for interfaces, extends) `interface`
    pub fn implement(&mut self, ty: TypeId, interface: TypeId) -> Result<()> {
        let target = &self.types[interface.index()];
        if !target.kind.is_interface() {
            return Err(ReflectError::NotAnInterface {
                name: target.name.clone(),
            });
        }
        let interfaces = &mut self.types[ty.index()].interfaces;
        if !interfaces.contains(&interface) {
            interfaces.push(interface);
        }
        Ok(())
    }

    /// Declare a method on `ty`
    pub fn add_method(&mut self, ty: TypeId, spec: MemberSpec) -> MemberId {
        self.add_member(ty, MemberKind::Method, spec)
    }

    /// Declare a field on `ty`
    pub fn add_field(&mut self, ty: TypeId, mut spec: MemberSpec) -> MemberId {
        spec.parameter_types.clear();
        self.add_member(ty, MemberKind::Field, spec)
    }

    fn add_member(&mut self, ty: TypeId, kind: MemberKind, spec: MemberSpec) -> MemberId {
        let id = MemberId(self.members.len() as u32);
        self.members.push(MemberDef {
            name: spec.name,
            kind,
            declaring_type: ty,
            modifiers: spec.modifiers,
            value_type: spec.value_type,
            parameter_types: spec.parameter_types,
            annotations: Vec::new(),
        });
        let def = &mut self.types[ty.index()];
        match kind {
            MemberKind::Method => def.methods.push(id),
            MemberKind::Field => def.fields.push(id),
        }
        id
    }

    /// Attach an annotation to a type
    pub fn annotate_type(&mut self, ty: TypeId, spec: AnnotationSpec) -> Result<AnnotationId> {
        let id = self.push_annotation(spec)?;
        self.types[ty.index()].annotations.push(id);
        Ok(id)
    }

    /// Attach an annotation to a member
    pub fn annotate_member(&mut self, member: MemberId, spec: AnnotationSpec) -> Result<AnnotationId> {
        let id = self.push_annotation(spec)?;
        self.members[member.index()].annotations.push(id);
        Ok(id)
    }

    fn push_annotation(&mut self, spec: AnnotationSpec) -> Result<AnnotationId> {
        let annotation_type = &self.types[spec.annotation_type.index()];
        if annotation_type.kind != TypeKind::Annotation {
            return Err(ReflectError::NotAnAnnotation {
                name: annotation_type.name.clone(),
            });
        }

        let id = AnnotationId(self.annotations.len() as u32);
        self.annotations.push(AnnotationDef {
            annotation_type: spec.annotation_type,
            values: spec.values,
        });
        Ok(id)
    }

    /// Get type ID by name
    pub fn get(&self, name: &str) -> Option<TypeId> {
        self.name_to_id.get(name).copied()
    }

    /// Number of registered types
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether no types are registered
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Iterate over all types in registration order
    pub fn iter(&self) -> impl Iterator<Item = (TypeId, &TypeDef)> {
        self.types
            .iter()
            .enumerate()
            .map(|(i, def)| (TypeId(i as u32), def))
    }
}

impl TypeRuntime for TypeRegistry {
    fn lookup(&self, name: &str) -> Option<TypeId> {
        self.get(name)
    }

    fn type_def(&self, id: TypeId) -> &TypeDef {
        &self.types[id.index()]
    }

    fn member_def(&self, id: MemberId) -> &MemberDef {
        &self.members[id.index()]
    }

    fn annotation_def(&self, id: AnnotationId) -> &AnnotationDef {
        &self.annotations[id.index()]
    }

    fn root_type(&self) -> Option<TypeId> {
        self.root
    }
}
