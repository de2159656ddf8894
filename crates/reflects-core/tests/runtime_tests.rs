//! Integration tests for queries over a runtime other than `TypeRegistry`

use std::collections::BTreeMap;

use reflects_core::functions::member_name;
use reflects_core::{
    AnnotationDef, AnnotationId, HasAnnotations, HasMethods, MemberDef, MemberFlags, MemberId,
    MemberKind, Modifiers, Reflects, TypeDef, TypeId, TypeKind, TypeRuntime,
};

/// Fixed type table laid out by hand
///
/// ```text
/// demo.Base                          describe()
///   demo.Circle : demo.Shape         area() @demo.Tagged(kind = "round"), radius
/// demo.Shape                         name()
/// ```
struct StaticRuntime {
    types: Vec<TypeDef>,
    members: Vec<MemberDef>,
    annotations: Vec<AnnotationDef>,
}

const BASE: TypeId = TypeId::new(0);
const SHAPE: TypeId = TypeId::new(1);
const CIRCLE: TypeId = TypeId::new(2);
const TAGGED: TypeId = TypeId::new(3);

impl StaticRuntime {
    fn new() -> Self {
        let mut base = TypeDef::new("demo.Base", TypeKind::Class);
        let mut shape = TypeDef::new("demo.Shape", TypeKind::Interface);
        let mut circle = TypeDef::new("demo.Circle", TypeKind::Class);
        let tagged = TypeDef::new("demo.Tagged", TypeKind::Annotation);
        circle.superclass = Some(BASE);
        circle.interfaces.push(SHAPE);

        let mut rt = Self {
            types: Vec::new(),
            members: Vec::new(),
            annotations: Vec::new(),
        };
        base.methods.push(rt.member("describe", MemberKind::Method, BASE, Modifiers::public()));
        shape.methods.push(rt.member("name", MemberKind::Method, SHAPE, Modifiers::public()));
        let area = rt.member("area", MemberKind::Method, CIRCLE, Modifiers::public());
        circle.methods.push(area);
        circle
            .fields
            .push(rt.member("radius", MemberKind::Field, CIRCLE, Modifiers::private()));

        let mut values = BTreeMap::new();
        values.insert("kind".to_string(), "round".to_string());
        rt.annotations.push(AnnotationDef {
            annotation_type: TAGGED,
            values,
        });
        let tag = AnnotationId::new(0);
        rt.members[area.as_u32() as usize].annotations.push(tag);
        circle.annotations.push(tag);

        rt.types = vec![base, shape, circle, tagged];
        rt
    }

    fn member(&mut self, name: &str, kind: MemberKind, owner: TypeId, modifiers: Modifiers) -> MemberId {
        let id = MemberId::new(self.members.len() as u32);
        self.members.push(MemberDef {
            name: name.to_string(),
            kind,
            declaring_type: owner,
            modifiers,
            value_type: None,
            parameter_types: Vec::new(),
            annotations: Vec::new(),
        });
        id
    }
}

impl TypeRuntime for StaticRuntime {
    fn lookup(&self, name: &str) -> Option<TypeId> {
        self.types
            .iter()
            .position(|def| def.name == name)
            .map(|index| TypeId::new(index as u32))
    }

    fn type_def(&self, id: TypeId) -> &TypeDef {
        &self.types[id.as_u32() as usize]
    }

    fn member_def(&self, id: MemberId) -> &MemberDef {
        &self.members[id.as_u32() as usize]
    }

    fn annotation_def(&self, id: AnnotationId) -> &AnnotationDef {
        &self.annotations[id.as_u32() as usize]
    }

    fn root_type(&self) -> Option<TypeId> {
        Some(BASE)
    }
}

fn names<T: std::fmt::Display>(items: impl IntoIterator<Item = T>) -> Vec<String> {
    items.into_iter().map(|t| t.to_string()).collect()
}

#[test]
fn test_ids_round_trip_raw_index() {
    assert_eq!(TypeId::new(3).as_u32(), 3);
    assert_eq!(MemberId::new(0), MemberId::new(0));
    assert_ne!(AnnotationId::new(1), AnnotationId::new(2));
}

#[test]
fn test_ancestors_through_custom_runtime() {
    let rt = StaticRuntime::new();
    let circle = Reflects::new(&rt).on_type_named("demo.Circle").unwrap();

    assert_eq!(circle.id(), CIRCLE);
    assert_eq!(names(circle.superclasses()), ["demo.Base"]);
    assert!(circle.superclasses()[0].is_root());
    assert_eq!(
        names(circle.classes(true, true)),
        ["demo.Circle", "demo.Base", "demo.Shape"]
    );
}

#[test]
fn test_members_through_custom_runtime() {
    let rt = StaticRuntime::new();
    let circle = Reflects::new(&rt).on_type(CIRCLE);

    assert_eq!(names(circle.methods().transform(member_name)), ["area", "describe"]);

    let with_interfaces = circle.methods_with(MemberFlags::new(true, false, false, true));
    assert_eq!(
        names(with_interfaces.transform(member_name)),
        ["area", "describe", "name"]
    );

    let declared = circle.methods_with(MemberFlags::declared());
    assert_eq!(names(declared.transform(member_name)), ["area"]);
}

#[test]
fn test_annotations_through_custom_runtime() {
    let rt = StaticRuntime::new();
    let reflects = Reflects::new(&rt);
    let area = reflects.on_member(MemberId::new(2));

    assert_eq!(area.name(), "area");
    let annotations = area.annotations();
    assert_eq!(annotations.len(), 1);
    assert_eq!(annotations[0].annotation_type().id(), TAGGED);
    assert_eq!(annotations[0].value("kind"), Some("round"));
    assert_eq!(reflects.on_type(CIRCLE).methods().filter_annotated(TAGGED).len(), 1);
}
