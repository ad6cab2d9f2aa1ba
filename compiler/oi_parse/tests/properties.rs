//! Property tests over generated translation units.

#![allow(
    clippy::doc_markdown,
    clippy::uninlined_format_args,
    clippy::redundant_closure_for_method_calls,
    reason = "Proptest macros generate code with these patterns"
)]

use oi_frontend::{BuiltinKind, RecordDef, RecordInfo, RecordKind, TypeRef, TypeTable};
use oi_graph::{Node, PrimitiveKind, TypeGraph};
use oi_parse::{map_builtin, DataModel, ParserOptions, TypeParser};
use proptest::prelude::*;

const SCALARS: [BuiltinKind; 8] = [
    BuiltinKind::Bool,
    BuiltinKind::CharS,
    BuiltinKind::Short,
    BuiltinKind::Int,
    BuiltinKind::UInt,
    BuiltinKind::Long,
    BuiltinKind::Float,
    BuiltinKind::Double,
];

fn scalar_strategy() -> impl Strategy<Value = BuiltinKind> {
    prop::sample::select(SCALARS.to_vec())
}

fn kind_strategy() -> impl Strategy<Value = RecordKind> {
    prop_oneof![
        Just(RecordKind::Struct),
        Just(RecordKind::Class),
        Just(RecordKind::Union),
    ]
}

/// Fields as (type, bit offset, bitfield width).
fn fields_strategy() -> impl Strategy<Value = Vec<(BuiltinKind, u64, Option<u64>)>> {
    prop::collection::vec(
        (
            scalar_strategy(),
            0u64..1024,
            prop::option::of(1u64..8),
        ),
        0..16,
    )
}

#[derive(Clone, Debug)]
enum Wrap {
    Pointer,
    Reference,
    Array(u64),
    Typedef,
    Sugar,
}

fn wrap_strategy() -> impl Strategy<Value = Wrap> {
    prop_oneof![
        Just(Wrap::Pointer),
        Just(Wrap::Reference),
        (1u64..64).prop_map(Wrap::Array),
        Just(Wrap::Typedef),
        Just(Wrap::Sugar),
    ]
}

fn apply(table: &mut TypeTable, ty: TypeRef, wrap: &Wrap, n: usize) -> TypeRef {
    match wrap {
        Wrap::Pointer => table.pointer(ty),
        Wrap::Reference => table.lvalue_reference(ty),
        Wrap::Array(len) => table.constant_array(ty, *len),
        Wrap::Typedef => table.typedef(format!("Alias{n}"), ty),
        Wrap::Sugar => table.elaborated(ty),
    }
}

/// A self-referential record plus a pool of wrapper chains over it.
fn build_pool(chains: &[Vec<Wrap>]) -> (TypeTable, Vec<TypeRef>) {
    let mut table = TypeTable::new();
    let node = table.declare_record(RecordInfo::new(RecordKind::Struct, "Node"));
    let next = table.pointer(node);
    let int = table.builtin(BuiltinKind::Int);
    let def = RecordDef::new(128, 64).field("value", int, 0).field("next", next, 64);
    assert_eq!(table.define_record(node, def), Ok(()));

    let mut pool = vec![node, next, int];
    let mut n = 0;
    for chain in chains {
        let mut ty = node;
        for wrap in chain {
            n += 1;
            ty = apply(&mut table, ty, wrap, n);
            pool.push(ty);
        }
    }
    (table, pool)
}

proptest! {
    #[test]
    fn members_come_out_in_offset_order(
        kind in kind_strategy(),
        fields in fields_strategy(),
    ) {
        let mut table = TypeTable::new();
        let record = table.declare_record(RecordInfo::new(kind, "R"));
        let mut def = RecordDef::new(2048, 64);
        for (i, &(scalar, offset, width)) in fields.iter().enumerate() {
            let ty = table.builtin(scalar);
            def = match width {
                Some(width) => def.bitfield(format!("f{i}"), ty, offset, width),
                None => def.field(format!("f{i}"), ty, offset),
            };
        }
        prop_assert_eq!(table.define_record(record, def), Ok(()));

        let mut graph = TypeGraph::new();
        let id = TypeParser::new(&table, &mut graph, ParserOptions::default()).parse(record);
        prop_assert!(id.is_ok());
        let Some(class) = id.ok().and_then(|id| graph.as_class(id)) else {
            return Err(TestCaseError::fail("root is not a class"));
        };

        prop_assert_eq!(class.members.len(), fields.len());
        for pair in class.members.windows(2) {
            prop_assert!(pair[0].bit_offset <= pair[1].bit_offset);
        }
        for member in &class.members {
            let Some(i) = member.name.strip_prefix('f').and_then(|i| i.parse::<usize>().ok()) else {
                return Err(TestCaseError::fail("unexpected member name"));
            };
            let (scalar, offset, width) = fields[i];
            prop_assert_eq!(member.bit_offset, offset);
            prop_assert_eq!(member.bit_size, width.unwrap_or(0));
            prop_assert_eq!(
                graph.as_primitive(member.ty),
                map_builtin(scalar, DataModel::Lp64).ok()
            );
        }
    }

    #[test]
    fn each_handle_gets_one_node(
        chains in prop::collection::vec(prop::collection::vec(wrap_strategy(), 1..5), 1..6),
        order in prop::collection::vec(any::<prop::sample::Index>(), 1..24),
        chase in any::<bool>(),
    ) {
        let (table, pool) = build_pool(&chains);
        let options = ParserOptions::default().with_chase_raw_pointers(chase);

        let mut graph = TypeGraph::new();
        let mut parser = TypeParser::new(&table, &mut graph, options);
        let mut first = Vec::new();
        for index in &order {
            let ty = pool[index.index(pool.len())];
            let id = parser.parse(ty);
            prop_assert!(id.is_ok());
            first.push((ty, id.ok()));
        }
        let len = parser.graph().len();

        // Asking again changes nothing.
        for &(ty, id) in &first {
            prop_assert_eq!(parser.parse(ty).ok(), id);
        }
        prop_assert_eq!(parser.graph().len(), len);

        let classes = parser
            .graph()
            .iter()
            .filter(|(_, node)| matches!(node, Node::Class(_)))
            .count();
        prop_assert!(classes <= 1);
    }

    #[test]
    fn only_the_outermost_pointer_is_followed(levels in 1usize..8) {
        let mut table = TypeTable::new();
        let mut ty = table.builtin(BuiltinKind::Double);
        for _ in 0..levels {
            ty = table.pointer(ty);
        }

        let mut graph = TypeGraph::new();
        let root = TypeParser::new(&table, &mut graph, ParserOptions::default()).parse(ty);
        let Ok(root) = root else {
            return Err(TestCaseError::fail("parse failed"));
        };
        let Node::Pointer(pointer) = graph.get(root) else {
            return Err(TestCaseError::fail("root is not a pointer"));
        };
        let expected = if levels == 1 {
            PrimitiveKind::Float64
        } else {
            PrimitiveKind::StubbedPointer
        };
        prop_assert_eq!(graph.as_primitive(pointer.pointee), Some(expected));
        prop_assert_eq!(graph.len(), 2);
    }

    #[test]
    fn chasing_follows_every_level(levels in 1usize..8) {
        let mut table = TypeTable::new();
        let mut ty = table.builtin(BuiltinKind::Double);
        for _ in 0..levels {
            ty = table.pointer(ty);
        }

        let mut graph = TypeGraph::new();
        let options = ParserOptions::default().with_chase_raw_pointers(true);
        prop_assert!(TypeParser::new(&table, &mut graph, options).parse(ty).is_ok());
        let pointers = graph.iter().filter(|(_, node)| matches!(node, Node::Pointer(_))).count();
        prop_assert_eq!(pointers, levels);
        prop_assert_eq!(graph.len(), levels + 1);
    }
}
