//! Shared type graph for integration tests
//!
//! A small slice of a JVM-like class library plus a fixture package:
//!
//! ```text
//! java.lang.Object
//!   java.util.AbstractMap : Map
//!     java.util.HashMap : Map, Cloneable, Serializable
//!       java.util.LinkedHashMap : Map
//! fixture.Interface extends Serializable       run() @Annotation("foo")
//! fixture.Class : Interface                    run() @Annotation("bar") @Deprecated
//! fixture.AnnotatedClass                       @Nullable @Deprecated
//! ```

#![allow(dead_code)]

use reflects_core::{AnnotationSpec, MemberSpec, Modifiers, TypeId, TypeRegistry};

pub const OBJECT: &str = "java.lang.Object";
pub const ANNOTATION: &str = "fixture.Fixture$Annotation";

pub struct Fixture {
    pub registry: TypeRegistry,
    pub object: TypeId,
    pub string: TypeId,
    pub int: TypeId,
    pub map: TypeId,
    pub serializable: TypeId,
    pub cloneable: TypeId,
    pub abstract_map: TypeId,
    pub hash_map: TypeId,
    pub linked_hash_map: TypeId,
    pub annotation: TypeId,
    pub deprecated: TypeId,
    pub nullable: TypeId,
    pub interface: TypeId,
    pub class: TypeId,
    pub annotated_class: TypeId,
}

pub fn fixture() -> Fixture {
    let mut r = TypeRegistry::with_root(OBJECT).unwrap();
    let object = r.get(OBJECT).unwrap();
    let string = r.add_class("java.lang.String", None).unwrap();
    let int = r.add_primitive("int").unwrap();
    let boolean = r.add_primitive("boolean").unwrap();

    r.add_method(object, MemberSpec::new("hashCode", Modifiers::public()).returns(int));
    r.add_method(
        object,
        MemberSpec::new("equals", Modifiers::public()).returns(boolean).params([object]),
    );
    r.add_method(object, MemberSpec::new("toString", Modifiers::public()).returns(string));
    r.add_method(
        object,
        MemberSpec::new("clone", Modifiers {
            visibility: reflects_core::Visibility::Protected,
            ..Modifiers::default()
        })
        .returns(object),
    );
    r.add_method(object, MemberSpec::new("registerNatives", Modifiers::private().with_static()));

    let serializable = r.add_interface("java.io.Serializable").unwrap();
    let cloneable = r.add_interface("java.lang.Cloneable").unwrap();
    let map = r.add_interface("java.util.Map").unwrap();
    r.add_method(map, MemberSpec::new("size", Modifiers::public().with_abstract()).returns(int));

    let abstract_map = r.add_class("java.util.AbstractMap", None).unwrap();
    r.implement(abstract_map, map).unwrap();
    let hash_map = r.add_class("java.util.HashMap", Some(abstract_map)).unwrap();
    r.implement(hash_map, map).unwrap();
    r.implement(hash_map, cloneable).unwrap();
    r.implement(hash_map, serializable).unwrap();
    r.add_field(
        hash_map,
        MemberSpec::new("DEFAULT_LOAD_FACTOR", Modifiers::default().with_static().with_final()),
    );
    r.add_field(hash_map, MemberSpec::new("size", Modifiers::default()).returns(int));
    let linked_hash_map = r.add_class("java.util.LinkedHashMap", Some(hash_map)).unwrap();
    r.implement(linked_hash_map, map).unwrap();
    r.add_field(linked_hash_map, MemberSpec::new("accessOrder", Modifiers::default()).returns(boolean));

    let annotation = r.add_annotation_type(ANNOTATION).unwrap();
    let deprecated = r.add_annotation_type("java.lang.Deprecated").unwrap();
    let nullable = r.add_annotation_type("javax.annotation.Nullable").unwrap();

    let interface = r.add_interface("fixture.Interface").unwrap();
    r.implement(interface, serializable).unwrap();
    let run = r.add_method(interface, MemberSpec::new("run", Modifiers::public().with_abstract()));
    r.annotate_member(run, AnnotationSpec::new(annotation).with("value", "foo")).unwrap();

    let class = r.add_class("fixture.Class", None).unwrap();
    r.implement(class, interface).unwrap();
    r.add_method(class, MemberSpec::new("staticMethod", Modifiers::public_static()));
    r.add_method(class, MemberSpec::new("privateStaticMethod", Modifiers::private().with_static()));
    let run = r.add_method(class, MemberSpec::new("run", Modifiers::public()));
    r.annotate_member(run, AnnotationSpec::new(annotation).with("value", "bar")).unwrap();
    r.annotate_member(run, AnnotationSpec::new(deprecated)).unwrap();

    let annotated_class = r.add_class("fixture.AnnotatedClass", None).unwrap();
    r.annotate_type(annotated_class, AnnotationSpec::new(nullable)).unwrap();
    r.annotate_type(annotated_class, AnnotationSpec::new(deprecated)).unwrap();

    Fixture {
        registry: r,
        object,
        string,
        int,
        map,
        serializable,
        cloneable,
        abstract_map,
        hash_map,
        linked_hash_map,
        annotation,
        deprecated,
        nullable,
        interface,
        class,
        annotated_class,
    }
}

pub fn names<T: std::fmt::Display>(items: impl IntoIterator<Item = T>) -> Vec<String> {
    items.into_iter().map(|t| t.to_string()).collect()
}
