//! Legal call sequences and the trees they produce.

use alloc::{string::ToString, vec, vec::Vec};

use rstest::rstest;

use crate::{
    Binary, BinarySubtype, BsonWriter, CodeWithScope, DbPointer, DocumentWriter, ObjectId,
    RegularExpression, Timestamp, Value, WriterState, doc,
};

fn object_id() -> ObjectId {
    ObjectId::from_bytes([1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12])
}

/// A writer with the top-level document already open.
fn open_writer() -> DocumentWriter {
    let mut writer = DocumentWriter::new();
    writer.write_start_document().unwrap();
    writer
}

#[rstest]
fn nested_document_and_array() {
    let mut writer = open_writer();
    writer.write_name("a").unwrap();
    writer.write_int32(1).unwrap();
    writer.write_name("b").unwrap();
    writer.write_start_array().unwrap();
    writer.write_int32(2).unwrap();
    writer.write_int32(3).unwrap();
    writer.write_end_array().unwrap();
    writer.write_end_document().unwrap();

    assert_eq!(writer.state(), WriterState::Done);
    assert_eq!(writer.into_document(), doc! { "a" => 1, "b" => vec![2, 3] });
}

#[rstest]
fn empty_document() {
    let mut writer = open_writer();
    writer.write_end_document().unwrap();
    assert_eq!(writer.state(), WriterState::Done);
    assert_eq!(writer.into_document(), doc! {});
}

#[rstest]
fn empty_array() {
    let mut writer = open_writer();
    writer.write_name("items").unwrap();
    writer.write_start_array().unwrap();
    writer.write_end_array().unwrap();
    writer.write_end_document().unwrap();
    assert_eq!(writer.into_document(), doc! { "items" => Vec::<Value>::new() });
}

#[rstest]
fn array_order_is_call_order() {
    let mut writer = open_writer();
    writer.write_name("xs").unwrap();
    writer.write_start_array().unwrap();
    writer.write_int32(1).unwrap();
    writer.write_int32(2).unwrap();
    writer.write_int32(3).unwrap();
    writer.write_end_array().unwrap();
    writer.write_end_document().unwrap();

    assert_eq!(
        writer.document().get("xs"),
        Some(&Value::Array(vec![
            Value::Int32(1),
            Value::Int32(2),
            Value::Int32(3)
        ]))
    );
}

#[rstest]
fn last_write_wins_for_a_repeated_name() {
    let mut writer = open_writer();
    writer.write_name("a").unwrap();
    writer.write_int32(1).unwrap();
    writer.write_name("a").unwrap();
    writer.write_int32(2).unwrap();
    writer.write_end_document().unwrap();

    let document = writer.into_document();
    assert_eq!(document.len(), 1);
    assert_eq!(document.get("a"), Some(&Value::Int32(2)));
}

#[rstest]
fn documents_nest_to_arbitrary_depth() {
    let mut writer = open_writer();
    for _ in 0..32 {
        writer.write_name("child").unwrap();
        writer.write_start_document().unwrap();
    }
    // Top-level context, root document context, and 32 children.
    assert_eq!(writer.depth(), 34);
    writer.write_name("leaf").unwrap();
    writer.write_boolean(true).unwrap();
    for _ in 0..33 {
        writer.write_end_document().unwrap();
    }

    assert_eq!(writer.state(), WriterState::Done);
    assert_eq!(writer.depth(), 1);

    let mut cursor = writer.document();
    for _ in 0..32 {
        cursor = cursor.get("child").and_then(Value::as_document).unwrap();
    }
    assert_eq!(cursor.get("leaf"), Some(&Value::Boolean(true)));
}

#[rstest]
fn code_with_scope_composes_into_one_value() {
    let mut writer = open_writer();
    writer.write_name("f").unwrap();
    writer.write_javascript_with_scope("function(){}").unwrap();
    writer.write_start_document().unwrap();
    writer.write_name("x").unwrap();
    writer.write_int32(1).unwrap();
    writer.write_end_document().unwrap();
    writer.write_end_document().unwrap();

    let document = writer.into_document();
    assert_eq!(document.len(), 1);
    assert_eq!(
        document.get("f"),
        Some(&Value::JavaScriptCodeWithScope(CodeWithScope {
            code: "function(){}".to_string(),
            scope: doc! { "x" => 1 },
        }))
    );
}

#[rstest]
fn scope_documents_may_hold_ordinary_nested_documents() {
    // Closing a document nested inside the scope must not trigger the
    // code-with-scope collapse; only closing the scope itself does.
    let mut writer = open_writer();
    writer.write_name("f").unwrap();
    writer.write_javascript_with_scope("run()").unwrap();
    writer.write_start_document().unwrap();
    writer.write_name("inner").unwrap();
    writer.write_start_document().unwrap();
    writer.write_name("x").unwrap();
    writer.write_int32(1).unwrap();
    writer.write_end_document().unwrap();
    writer.write_name("y").unwrap();
    writer.write_int32(2).unwrap();
    writer.write_end_document().unwrap();
    writer.write_name("after").unwrap();
    writer.write_boolean(true).unwrap();
    writer.write_end_document().unwrap();

    assert_eq!(
        writer.into_document(),
        doc! {
            "f" => CodeWithScope {
                code: "run()".to_string(),
                scope: doc! { "inner" => doc! { "x" => 1 }, "y" => 2 },
            },
            "after" => true,
        }
    );
}

#[rstest]
fn code_with_scope_inside_an_array() {
    let mut writer = open_writer();
    writer.write_name("fs").unwrap();
    writer.write_start_array().unwrap();
    writer.write_javascript_with_scope("g()").unwrap();
    writer.write_start_document().unwrap();
    writer.write_end_document().unwrap();
    writer.write_int32(7).unwrap();
    writer.write_end_array().unwrap();
    writer.write_end_document().unwrap();

    assert_eq!(
        writer.into_document(),
        doc! {
            "fs" => vec![
                Value::JavaScriptCodeWithScope(CodeWithScope {
                    code: "g()".to_string(),
                    scope: doc! {},
                }),
                Value::Int32(7),
            ],
        }
    );
}

#[rstest]
fn every_kind_lands_under_its_name() {
    let mut writer = open_writer();
    writer.write_name("boolean").unwrap();
    writer.write_boolean(true).unwrap();
    writer.write_name("int32").unwrap();
    writer.write_int32(-1).unwrap();
    writer.write_name("int64").unwrap();
    writer.write_int64(1 << 40).unwrap();
    writer.write_name("double").unwrap();
    writer.write_double(2.5).unwrap();
    writer.write_name("datetime").unwrap();
    writer.write_date_time(1_700_000_000_000).unwrap();
    writer.write_name("string").unwrap();
    writer.write_string("text").unwrap();
    writer.write_name("binary").unwrap();
    writer
        .write_binary(Binary {
            subtype: BinarySubtype::Uuid,
            bytes: vec![0xde, 0xad],
        })
        .unwrap();
    writer.write_name("oid").unwrap();
    writer.write_object_id(object_id()).unwrap();
    writer.write_name("regex").unwrap();
    writer
        .write_regular_expression(RegularExpression::new("^a+$", "i"))
        .unwrap();
    writer.write_name("code").unwrap();
    writer.write_javascript("f()").unwrap();
    writer.write_name("timestamp").unwrap();
    writer
        .write_timestamp(Timestamp {
            time: 10,
            increment: 2,
        })
        .unwrap();
    writer.write_name("min").unwrap();
    writer.write_min_key().unwrap();
    writer.write_name("max").unwrap();
    writer.write_max_key().unwrap();
    writer.write_name("null").unwrap();
    writer.write_null().unwrap();
    writer.write_name("undefined").unwrap();
    writer.write_undefined().unwrap();
    writer.write_name("pointer").unwrap();
    writer
        .write_db_pointer(DbPointer {
            namespace: "db.coll".to_string(),
            id: object_id(),
        })
        .unwrap();
    writer.write_name("symbol").unwrap();
    writer.write_symbol("sym").unwrap();
    writer.write_end_document().unwrap();

    let expected = doc! {
        "boolean" => true,
        "int32" => -1,
        "int64" => 1i64 << 40,
        "double" => 2.5,
        "datetime" => Value::DateTime(1_700_000_000_000),
        "string" => "text",
        "binary" => Binary { subtype: BinarySubtype::Uuid, bytes: vec![0xde, 0xad] },
        "oid" => object_id(),
        "regex" => RegularExpression::new("^a+$", "i"),
        "code" => Value::JavaScriptCode("f()".to_string()),
        "timestamp" => Timestamp { time: 10, increment: 2 },
        "min" => Value::MinKey,
        "max" => Value::MaxKey,
        "null" => Value::Null,
        "undefined" => Value::Undefined,
        "pointer" => DbPointer { namespace: "db.coll".to_string(), id: object_id() },
        "symbol" => Value::Symbol("sym".to_string()),
    };
    assert_eq!(writer.into_document(), expected);
}

#[rstest]
fn extends_a_caller_supplied_document() {
    let mut writer = DocumentWriter::with_document(doc! { "seeded" => true });
    writer.write_start_document().unwrap();
    writer.write_name("added").unwrap();
    writer.write_int32(1).unwrap();
    writer.write_end_document().unwrap();

    let document = writer.into_document();
    let order: Vec<&str> = document.iter().map(|(n, _)| n).collect();
    assert_eq!(order, vec!["seeded", "added"]);
}

#[rstest]
fn root_is_observable_mid_sequence() {
    let mut writer = open_writer();
    writer.write_name("a").unwrap();
    writer.write_int32(1).unwrap();
    assert_eq!(writer.document().get("a"), Some(&Value::Int32(1)));

    // An open sub-document attaches only when it closes.
    writer.write_name("b").unwrap();
    writer.write_start_document().unwrap();
    writer.write_name("x").unwrap();
    writer.write_int32(2).unwrap();
    assert!(!writer.document().contains_key("b"));
    writer.write_end_document().unwrap();
    assert_eq!(writer.document().get("b"), Some(&Value::Document(doc! { "x" => 2 })));
}

#[rstest]
fn flush_neither_fails_nor_finalizes() {
    let mut writer = open_writer();
    writer.write_name("a").unwrap();
    writer.write_start_document().unwrap();
    writer.flush();
    assert_eq!(writer.state(), WriterState::Name);
    assert_eq!(writer.depth(), 3);
}

#[rstest]
fn done_is_terminal() {
    let mut writer = open_writer();
    writer.write_end_document().unwrap();
    assert_eq!(writer.state(), WriterState::Done);
    assert!(writer.write_start_document().is_err());
    assert_eq!(writer.state(), WriterState::Done);
}
