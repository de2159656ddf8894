//! Type graph traversal
//!
//! Superclass chains and interface closures. Classes walk superclasses,
//! interfaces walk interface declarations; the two paths only meet in
//! [`classes_of`].

use tracing::trace;

use crate::descriptor::TypeRef;
use crate::ordered_set::OrderedSet;

/// Superclass chain of `ty`, nearest first
///
/// Interfaces have no superclass chain, so they always yield an empty list.
pub fn ancestors_of<'r>(ty: TypeRef<'r>, include_self: bool) -> Vec<TypeRef<'r>> {
    let mut chain = Vec::new();
    if ty.is_interface() {
        return chain;
    }
    if include_self {
        chain.push(ty);
    }

    let mut parent = ty.superclass();
    while let Some(class) = parent {
        chain.push(class);
        parent = class.superclass();
    }

    chain
}

/// Interfaces of `ty`, deduplicated in first-seen order
///
/// With `include_inherited` the declared interfaces are expanded
/// depth-first, left to right; an interface already collected is not
/// expanded again. Interfaces of superclasses are not part of the walk.
pub fn interfaces_of<'r>(
    ty: TypeRef<'r>,
    include_inherited: bool,
    include_self: bool,
) -> Vec<TypeRef<'r>> {
    let mut found = OrderedSet::new();

    if include_self && ty.is_interface() {
        found.insert(ty);
    }
    if include_inherited {
        export_interfaces(&mut found, ty);
    } else {
        found.extend(ty.declared_interfaces());
    }

    trace!(ty = ty.name(), count = found.len(), include_inherited, "resolved interfaces");
    found.into_vec()
}

/// Pre-order walk of the interface declarations below `ty`.
fn export_interfaces<'r>(found: &mut OrderedSet<TypeRef<'r>>, ty: TypeRef<'r>) {
    // (type, index of the next declared interface to visit)
    let mut stack = vec![(ty, 0usize)];

    while let Some((current, next)) = stack.pop() {
        let declared = &current.def().interfaces;
        let Some(&id) = declared.get(next) else {
            continue;
        };
        stack.push((current, next + 1));

        let interface = TypeRef::new(current.runtime(), id);
        if found.insert(interface) {
            stack.push((interface, 0));
        }
    }
}

/// Combined hierarchy: superclasses first, then interfaces if requested
///
/// For an interface `ty` only the interface branch applies.
pub fn classes_of<'r>(
    ty: TypeRef<'r>,
    include_interfaces: bool,
    include_self: bool,
) -> Vec<TypeRef<'r>> {
    let mut classes = Vec::new();

    if !ty.is_interface() {
        classes.extend(ancestors_of(ty, include_self));
    }
    if include_interfaces {
        classes.extend(interfaces_of(ty, true, include_self));
    }

    classes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::TypeRegistry;
    use crate::runtime::TypeId;

    fn names(types: &[TypeRef<'_>]) -> Vec<String> {
        types.iter().map(|t| t.name().to_string()).collect()
    }

    fn at(registry: &TypeRegistry, id: TypeId) -> TypeRef<'_> {
        TypeRef::new(registry, id)
    }

    #[test]
    fn test_ancestors_of_class() {
        let mut registry = TypeRegistry::with_root("Object").unwrap();
        let animal = registry.add_class("Animal", None).unwrap();
        let dog = registry.add_class("Dog", Some(animal)).unwrap();
        let lab = registry.add_class("Labrador", Some(dog)).unwrap();

        let with_self = ancestors_of(at(&registry, lab), true);
        assert_eq!(names(&with_self), ["Labrador", "Dog", "Animal", "Object"]);

        let without_self = ancestors_of(at(&registry, lab), false);
        assert_eq!(names(&without_self), ["Dog", "Animal", "Object"]);
    }

    #[test]
    fn test_ancestors_of_interface_is_empty() {
        let mut registry = TypeRegistry::with_root("Object").unwrap();
        let base = registry.add_interface("Base").unwrap();
        let shape = registry.add_interface("Shape").unwrap();
        registry.implement(shape, base).unwrap();

        assert!(ancestors_of(at(&registry, shape), true).is_empty());
        assert!(ancestors_of(at(&registry, shape), false).is_empty());
    }

    #[test]
    fn test_interfaces_pre_order() {
        // C implements A, B; A extends A1, A2; A1 extends A11
        let mut registry = TypeRegistry::new();
        let a11 = registry.add_interface("A11").unwrap();
        let a1 = registry.add_interface("A1").unwrap();
        let a2 = registry.add_interface("A2").unwrap();
        let a = registry.add_interface("A").unwrap();
        let b = registry.add_interface("B").unwrap();
        let c = registry.add_class("C", None).unwrap();
        registry.implement(a1, a11).unwrap();
        registry.implement(a, a1).unwrap();
        registry.implement(a, a2).unwrap();
        registry.implement(c, a).unwrap();
        registry.implement(c, b).unwrap();

        let closure = interfaces_of(at(&registry, c), true, true);
        assert_eq!(names(&closure), ["A", "A1", "A11", "A2", "B"]);

        let direct = interfaces_of(at(&registry, c), false, true);
        assert_eq!(names(&direct), ["A", "B"]);
    }

    #[test]
    fn test_interfaces_diamond_and_cycle() {
        let mut registry = TypeRegistry::new();
        let i = registry.add_interface("I").unwrap();
        let a = registry.add_interface("A").unwrap();
        let b = registry.add_interface("B").unwrap();
        registry.implement(a, i).unwrap();
        registry.implement(b, i).unwrap();
        registry.implement(i, a).unwrap();

        let closure = interfaces_of(at(&registry, b), true, true);
        assert_eq!(names(&closure), ["B", "I", "A"]);
    }

    #[test]
    fn test_interfaces_self_only_for_interfaces() {
        let mut registry = TypeRegistry::new();
        let shape = registry.add_interface("Shape").unwrap();
        let square = registry.add_class("Square", None).unwrap();
        registry.implement(square, shape).unwrap();

        assert_eq!(names(&interfaces_of(at(&registry, square), true, true)), ["Shape"]);
        assert_eq!(names(&interfaces_of(at(&registry, shape), false, true)), ["Shape"]);
        assert!(interfaces_of(at(&registry, shape), false, false).is_empty());
    }

    #[test]
    fn test_classes_of_orders_superclasses_before_interfaces() {
        let mut registry = TypeRegistry::with_root("Object").unwrap();
        let shape = registry.add_interface("Shape").unwrap();
        let base = registry.add_class("Base", None).unwrap();
        let square = registry.add_class("Square", Some(base)).unwrap();
        registry.implement(square, shape).unwrap();

        let all = classes_of(at(&registry, square), true, true);
        assert_eq!(names(&all), ["Square", "Base", "Object", "Shape"]);

        let classes_only = classes_of(at(&registry, square), false, false);
        assert_eq!(names(&classes_only), ["Base", "Object"]);
    }

    #[test]
    fn test_classes_of_interface() {
        let mut registry = TypeRegistry::with_root("Object").unwrap();
        let base = registry.add_interface("Base").unwrap();
        let shape = registry.add_interface("Shape").unwrap();
        registry.implement(shape, base).unwrap();

        assert!(classes_of(at(&registry, shape), false, true).is_empty());
        assert_eq!(names(&classes_of(at(&registry, shape), true, true)), ["Shape", "Base"]);
        assert_eq!(names(&classes_of(at(&registry, shape), true, false)), ["Base"]);
    }
}
