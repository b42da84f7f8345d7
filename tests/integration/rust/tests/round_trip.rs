//! Emitter stability tests
//!
//! Crushed output must be a fixed point: parsing it and crushing again
//! yields the same text. The same must hold for pretty output fed back
//! through the crusher.

use emitter::{emit, EmitOptions};
use minifier::substitution::strip_positions;
use parser::Parser;

static CORPUS: &[&str] = &[
    "var x = 1;",
    "function f(a, b) { return a + b; }",
    "if (a) { b(); } else if (c) { d(); } else { e(); }",
    "for (var i = 0; i < 10; i++) { total += i; }",
    "for (var key in obj) { if (obj[key]) keep(key); }",
    "do { step(); } while (more());",
    "switch (kind) { case 1: one(); break; default: other(); }",
    "try { risky(); } catch (e) { report(e); } finally { cleanup(); }",
    "outer: while (x) { break outer; }",
    "var y = { a: 1, 'b c': 2, \"d\": [1, , 3], 5: null };",
    "var f = function named(n) { return n ? n * named(n - 1) : 1; };",
    "var re = /a[/](b)?/gi; var q = total / count;",
    "with (scope) { value = x; }",
    "a = b = c ? d : e, f++;",
    "print(- -x, +y, ~z, !w, typeof v, void 0, delete o.k);",
    "var n = new ns.Type(arg)(other)[key];",
];

#[test]
fn test_crushed_output_is_a_fixed_point() {
    for source in CORPUS {
        let program = Parser::new(source).parse().unwrap();
        let once = emit(&program, EmitOptions::default());
        let reparsed = Parser::new(&once)
            .parse()
            .unwrap_or_else(|e| panic!("crushed output failed to reparse: {} -> {}", source, e));
        let twice = emit(&reparsed, EmitOptions::default());
        assert_eq!(once, twice, "not a fixed point for: {}", source);
    }
}

#[test]
fn test_pretty_output_preserves_structure() {
    for source in CORPUS {
        let program = Parser::new(source).parse().unwrap();
        let crushed = emit(&program, EmitOptions::default());
        let pretty = emit(
            &program,
            EmitOptions {
                pretty: true,
                preserve_lines: false,
            },
        );
        let reparsed = Parser::new(&pretty)
            .parse()
            .unwrap_or_else(|e| panic!("pretty output failed to reparse: {} -> {}", source, e));
        assert_eq!(
            emit(&reparsed, EmitOptions::default()),
            crushed,
            "pretty form changed meaning for: {}",
            source
        );
    }
}

#[test]
fn test_reparsed_trees_are_structurally_equal() {
    // Crushing may drop redundant braces, so compare trees starting from
    // the already-crushed form, where the text is a fixed point.
    for source in CORPUS {
        let program = Parser::new(source).parse().unwrap();
        let crushed = emit(&program, EmitOptions::default());

        let mut first = Parser::new(&crushed).parse().unwrap();
        let reemitted = emit(&first, EmitOptions::default());
        let mut second = Parser::new(&reemitted).parse().unwrap();

        strip_positions(&mut first);
        strip_positions(&mut second);
        assert_eq!(first, second, "tree changed for: {}", source);
    }
}
