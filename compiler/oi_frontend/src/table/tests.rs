use pretty_assertions::assert_eq;

use super::*;
use crate::TemplateName;

/// `struct Node { int value; Node* next; };`
fn linked_list() -> (TypeTable, TypeRef) {
    let mut table = TypeTable::new();
    let node = table.declare_record(RecordInfo::new(RecordKind::Struct, "Node"));
    let next = table.pointer(node);
    let int = table.builtin(BuiltinKind::Int);
    let defined = table.define_record(
        node,
        RecordDef::new(128, 64)
            .field("value", int, 0)
            .field("next", next, 64),
    );
    assert_eq!(defined, Ok(()));
    (table, node)
}

#[test]
fn builtins_are_interned() {
    let mut table = TypeTable::new();
    let a = table.builtin(BuiltinKind::Int);
    let b = table.builtin(BuiltinKind::Long);
    let c = table.builtin(BuiltinKind::Int);
    assert_eq!(a, c);
    assert_ne!(a, b);
    assert_eq!(table.len(), 2);
}

#[test]
fn classify_reports_one_step_desugaring() {
    let mut table = TypeTable::new();
    let int = table.builtin(BuiltinKind::Int);
    let alias = table.typedef("MyInt", int);
    let named = table.elaborated(alias);

    assert_eq!(table.classify(int), TypeClass::Builtin(BuiltinKind::Int));
    assert_eq!(
        table.classify(alias),
        TypeClass::Typedef {
            name: "MyInt".to_string(),
            underlying: int
        }
    );
    assert_eq!(table.classify(named), TypeClass::Elaborated { named: alias });
}

#[test]
fn records_are_incomplete_until_defined() {
    let mut table = TypeTable::new();
    let opaque = table.declare_record(RecordInfo::new(RecordKind::Class, "Opaque"));
    let alias = table.using("Handle", opaque);
    let array = table.constant_array(opaque, 2);
    let ptr = table.pointer(opaque);
    let void = table.builtin(BuiltinKind::Void);

    assert!(!table.is_complete(opaque));
    assert!(!table.is_complete(alias));
    assert!(!table.is_complete(array));
    assert!(table.is_complete(ptr));
    assert!(table.is_complete(void));

    assert_eq!(table.define_record(opaque, RecordDef::new(8, 8)), Ok(()));
    assert!(table.is_complete(opaque));
    assert!(table.is_complete(alias));
}

#[test]
fn unsized_arrays_are_incomplete() {
    let mut table = TypeTable::new();
    let bytes = table.unsupported(TypeClass::IncompleteArray, "char[]");
    let alias = table.typedef("Bytes", bytes);
    let member_ptr = table.unsupported(TypeClass::MemberPointer, "int Packet::*");

    assert!(!table.is_complete(bytes));
    assert!(!table.is_complete(alias));
    assert!(table.is_complete(member_ptr));
}

#[test]
fn layout_queries() {
    let (mut table, node) = linked_list();
    let array = table.constant_array(node, 3);
    let named = table.elaborated(array);

    assert_eq!(table.size_in_bits(node), 128);
    assert_eq!(table.align_in_bits(node), 64);
    assert_eq!(table.size_in_bits(named), 384);
    assert_eq!(table.align_in_bits(named), 64);

    let TypeClass::Record(decl) = table.classify(node) else {
        panic!("Node is not a record");
    };
    let fields = table.record_fields(decl);
    assert_eq!(fields.len(), 2);
    assert_eq!(fields[1].name, "next");
    assert_eq!(fields[1].bit_offset, 64);
    assert_eq!(table.template_arguments(decl), None);
}

#[test]
fn display_names() {
    let (mut table, node) = linked_list();
    let color = table.declare_enum("Color");
    let char_ = table.builtin(BuiltinKind::CharS);
    let buf = table.constant_array(char_, 16);
    let reference = table.lvalue_reference(node);
    let dependent = table.specialization(None);
    let rvalue = table.unsupported(TypeClass::RValueReference, "Node&&");

    assert_eq!(table.display_name(node), "Node");
    assert_eq!(table.display_name(color), "Color");
    assert_eq!(table.display_name(buf), "char[16]");
    assert_eq!(table.display_name(reference), "Node&");
    assert_eq!(table.display_name(dependent), "TemplateSpecialization");
    assert_eq!(table.display_name(rvalue), "Node&&");
}

#[test]
fn enums() {
    let mut table = TypeTable::new();
    let color = table.declare_enum("Color");
    assert!(!table.is_complete(color));

    let def = EnumDef::new(32).enumerator("Red", 0).enumerator("Green", 1);
    assert_eq!(table.define_enum(color, def), Ok(()));
    assert!(table.is_complete(color));
    assert_eq!(table.size_in_bits(color), 32);

    let TypeClass::Enum(decl) = table.classify(color) else {
        panic!("Color is not an enum");
    };
    assert_eq!(table.enum_name(decl), "Color");
    assert_eq!(
        table.enumerators(decl),
        vec![
            Enumerator {
                name: "Red".to_string(),
                value: 0
            },
            Enumerator {
                name: "Green".to_string(),
                value: 1
            },
        ]
    );
}

#[test]
fn define_checks_the_category() {
    let mut table = TypeTable::new();
    let int = table.builtin(BuiltinKind::Int);
    let color = table.declare_enum("Color");

    assert_eq!(
        table.define_record(int, RecordDef::new(32, 32)),
        Err(TableError::NotARecord(int))
    );
    assert_eq!(
        table.define_enum(int, EnumDef::new(32)),
        Err(TableError::NotAnEnum(int))
    );
    assert_eq!(
        table.define_record(color, RecordDef::new(32, 32)),
        Err(TableError::NotARecord(color))
    );
    let missing = TypeRef::from_raw(9);
    assert_eq!(
        table.define_record(missing, RecordDef::new(8, 8)),
        Err(TableError::UnknownType(missing))
    );
}

#[test]
fn json_round_trip_keeps_answers() {
    let (mut table, node) = linked_list();
    let int = table.builtin(BuiltinKind::Int);
    let vector = table.declare_record(
        RecordInfo::new(RecordKind::Class, "vector").qualified("std::vector<int>"),
    );
    let args = vec![
        TemplateArgument::Type {
            ty: int,
            is_const: false,
        },
        TemplateArgument::Template(TemplateName::Template {
            qualified_name: "std::allocator".to_string(),
        }),
    ];
    assert_eq!(
        table.define_record(vector, RecordDef::new(192, 64).template_args(args.clone())),
        Ok(())
    );
    table.add_root("Node", node);
    table.add_root("std::vector<int>", vector);

    let Ok(json) = serde_json::to_string(&table) else {
        panic!("table did not serialize");
    };
    let Ok(loaded) = serde_json::from_str::<TypeTable>(&json) else {
        panic!("table did not parse back");
    };

    assert_eq!(loaded.validate(), Ok(()));
    assert_eq!(loaded.lookup("Node"), Some(node));
    assert_eq!(loaded.lookup("std::vector<int>"), Some(vector));
    assert_eq!(loaded.lookup("missing"), None);
    assert_eq!(loaded.display_name(vector), "std::vector<int>");
    let TypeClass::Record(decl) = loaded.classify(vector) else {
        panic!("vector is not a record");
    };
    assert_eq!(loaded.template_arguments(decl), Some(args));
}

#[test]
fn validate_rejects_forward_wrappers() {
    let json = r#"{
        "types": [
            { "class": { "Pointer": { "pointee": 1 } } },
            { "class": { "Builtin": "Int" } }
        ],
        "decls": []
    }"#;
    let Ok(table) = serde_json::from_str::<TypeTable>(json) else {
        panic!("table did not parse");
    };
    assert_eq!(
        table.validate(),
        Err(TableError::ForwardReference {
            ty: TypeRef::from_raw(0),
            target: TypeRef::from_raw(1),
        })
    );
}

#[test]
fn validate_rejects_dangling_handles() {
    let json = r#"{
        "types": [ { "class": { "Record": 3 } } ],
        "decls": []
    }"#;
    let Ok(table) = serde_json::from_str::<TypeTable>(json) else {
        panic!("table did not parse");
    };
    assert!(matches!(table.validate(), Err(TableError::UnknownDecl(_))));

    let (mut table, _) = linked_list();
    table.add_root("ghost", TypeRef::from_raw(40));
    assert_eq!(
        table.validate(),
        Err(TableError::UnknownType(TypeRef::from_raw(40)))
    );
}
