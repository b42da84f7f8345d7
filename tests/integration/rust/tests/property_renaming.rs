//! Property renaming over a constructor plus object-literal scenario.
//!
//! The sample exercises every kind of property key at once: dot access,
//! single- and double-quoted literal subscripts, a numeric name, a name
//! with a space in it and a reserved word. Underscore-marked names must
//! rename consistently across every access form; everything else must
//! survive byte-for-byte.

use emitter::{emit, EmitOptions};
use minifier::PropertyRenaming;
use parser::Parser;

static SAMPLE: &str = r#"function Foo() {
  this.a = 0;  // 'a' should not be reused.
  this._prop1 = 1;
  this["_prop2"] =2;
  this["3"] = 3;
  this["_should not rename"] = 4;
}

var x = new Foo();
print(x.a);
print(x._prop1);
print(x['_prop1']);
print(x._prop2);
print(x['_prop2']);
print(x['3']);
print(x['_should not rename']);


var y = {
 _field1 : 1,
 "_field2" : 2,
 "3" : 3,
 "_should not rename" : 4,
 "void" : 5
}

print(y._field1);
print(y['_field1']);
print(y._field2);
print(y['_field2']);
print(y['3']);
print(y['_should not rename']);
print(y['void']);
"#;

fn renamed_sample() -> String {
    let mut program = Parser::new(SAMPLE).parse().unwrap();
    PropertyRenaming::new().process(&mut program);
    emit(&program, EmitOptions::default())
}

#[test]
fn test_renamed_output() {
    let expected = concat!(
        "function Foo(){",
        "this.a=0;",
        "this._0=1;",
        "this[\"_1\"]=2;",
        "this[\"3\"]=3;",
        "this[\"_should not rename\"]=4;",
        "}",
        "var x=new Foo();",
        "print(x.a);",
        "print(x._0);",
        "print(x['_0']);",
        "print(x._1);",
        "print(x['_1']);",
        "print(x['3']);",
        "print(x['_should not rename']);",
        "var y={_2:1,\"_3\":2,\"3\":3,\"_should not rename\":4,\"void\":5};",
        "print(y._2);",
        "print(y['_2']);",
        "print(y._3);",
        "print(y['_3']);",
        "print(y['3']);",
        "print(y['_should not rename']);",
        "print(y['void']);",
    );
    assert_eq!(renamed_sample(), expected);
}

#[test]
fn test_marked_names_rename_consistently() {
    let output = renamed_sample();
    // Every access form of a renamed property points at the same new name
    assert!(!output.contains("_prop1"));
    assert!(!output.contains("_prop2"));
    assert!(!output.contains("_field1"));
    assert!(!output.contains("_field2"));
}

#[test]
fn test_unmarked_names_survive() {
    let output = renamed_sample();
    assert!(output.contains("this.a=0"));
    assert!(output.contains("print(x.a)"));
    assert!(output.contains("['3']"));
    assert!(output.contains("['_should not rename']"));
    assert!(output.contains("['void']"));
}

#[test]
fn test_rename_map_shape() {
    let mut program = Parser::new(SAMPLE).parse().unwrap();
    let mut pass = PropertyRenaming::new();
    pass.process(&mut program);

    let renames = pass.renames();
    assert_eq!(renames.len(), 4);
    for (from, to) in renames {
        assert!(from.starts_with('_'));
        assert!(to.starts_with('_'));
        assert_ne!(from, to);
    }
    assert!(renames.contains_key("_prop1"));
    assert!(renames.contains_key("_prop2"));
    assert!(renames.contains_key("_field1"));
    assert!(renames.contains_key("_field2"));
    assert!(!renames.contains_key("a"));
    assert!(!renames.contains_key("void"));
}
