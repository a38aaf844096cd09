//! Unit tests for the code generator.
//!
//! Each test runs the full front end on a small program and compares the
//! generated Python text.

use pretty_assertions::assert_eq;

use crate::{
    errors::errors::{Error, ErrorImpl, Stage},
    transpile, transpile_with_options,
};

use super::codegen::GeneratorOptions;

fn python(source: &str) -> String {
    transpile(source, Some("test.is".to_string())).unwrap()
}

fn failure(source: &str) -> Error {
    let error = transpile(source, Some("test.is".to_string())).unwrap_err();
    assert_eq!(error.get_stage(), Stage::CodeGen);
    error
}

#[test]
fn test_empty_program() {
    assert_eq!(python(""), "");
}

#[test]
fn test_default_values() {
    let source = "a: INTEGER\nb: FLOAT\nc: STRING\nd: BOOLEAN\ne: LIST<INTEGER>\nf: MAP<STRING, INTEGER>\nVAR g AS NOTHING";

    assert_eq!(
        python(source),
        "a = 0\nb = 0.0\nc = \"\"\nd = False\ne = []\nf = {}\ng = None\n"
    );
}

#[test]
fn test_literals_and_operators() {
    assert_eq!(python("PRINT 2.5 * -1"), "print((2.5 * -1))\n");
    assert_eq!(python("PRINT NOT a AND b OR -c"), "print((((not a) and b) or (-c)))\n");
    assert_eq!(python("PRINT 10 % 3 != 1"), "print(((10 % 3) != 1))\n");
    assert_eq!(python("PRINT NULL"), "print(None)\n");
    assert_eq!(python("PRINT TRUE"), "print(True)\n");
    assert_eq!(python("PRINT \"a\\b\""), "print(\"a\\\\b\")\n");
}

#[test]
fn test_functions_are_emitted_first() {
    let source = "PRINT add(1, 2)\nFUNCTION add(a: INTEGER, b: INTEGER): INTEGER\n    RETURN a + b\nEND";

    assert_eq!(
        python(source),
        "def add(a, b):\n    return (a + b)\n\nprint(add(1, 2))\n"
    );
}

#[test]
fn test_verbose_function() {
    let source = "FUNCTION greet(PARAM name AS STRING) RETURNS NOTHING\n    PRINT name\nENDFUNCTION\ngreet(\"Ada\")";

    assert_eq!(
        python(source),
        "def greet(name):\n    print(name)\n\ngreet(\"Ada\")\n"
    );
}

#[test]
fn test_module_variable_written_from_function() {
    let source = "count: INTEGER = 0\nFUNCTION bump()\n    count = count + 1\nEND\nbump()\nPRINT count";

    assert_eq!(
        python(source),
        "def bump():\n    global count\n    count = (count + 1)\n\ncount = 0\nbump()\nprint(count)\n"
    );
}

#[test]
fn test_module_variable_read_from_function() {
    let source = "limit: INTEGER = 3\nFUNCTION over(n: INTEGER): BOOLEAN\n    RETURN n > limit\nEND";

    assert_eq!(
        python(source),
        "def over(n):\n    return (n > limit)\n\nlimit = 3\n"
    );
}

#[test]
fn test_shadowing_in_block() {
    let source = "x: INTEGER = 1\nIF TRUE THEN\n    x: INTEGER = 2\n    PRINT x\nEND\nPRINT x";

    assert_eq!(
        python(source),
        "x = 1\nif True:\n    x_1 = 2\n    print(x_1)\nprint(x)\n"
    );
}

#[test]
fn test_function_local_shadows_module_variable() {
    let source = "total: INTEGER = 5\nFUNCTION f(): INTEGER\n    total: INTEGER = 1\n    RETURN total\nEND";

    assert_eq!(
        python(source),
        "def f():\n    total_1 = 1\n    return total_1\n\ntotal = 5\n"
    );
}

#[test]
fn test_redeclaration_in_same_frame_overwrites() {
    assert_eq!(python("x: INTEGER = 1\nx: STRING = \"a\""), "x = 1\nx = \"a\"\n");
}

#[test]
fn test_else_if_chain() {
    let source = "IF x > 1 THEN\n    PRINT 1\nELSE\n    IF x > 0 THEN\n        PRINT 2\n    ELSE\n        PRINT 3\n    END\nEND";

    assert_eq!(
        python(source),
        "if (x > 1):\n    print(1)\nelif (x > 0):\n    print(2)\nelse:\n    print(3)\n"
    );
}

#[test]
fn test_empty_block_emits_pass() {
    assert_eq!(python("WHILE FALSE DO\nENDWHILE"), "while False:\n    pass\n");
}

#[test]
fn test_foreach_and_break() {
    let source = "items: LIST<INTEGER> = [1, 2]\nFOREACH item IN items DO\n    IF item > 1 THEN\n        BREAK\n    END\n    PRINT item\nEND";

    assert_eq!(
        python(source),
        "items = [1, 2]\nfor item in items:\n    if (item > 1):\n        break\n    print(item)\n"
    );
}

#[test]
fn test_reserved_names_are_renamed() {
    assert_eq!(python("print: INTEGER = 1\nPRINT print"), "print_ = 1\nprint(print_)\n");
    assert_eq!(
        python("FUNCTION len(): INTEGER\n    RETURN 1\nEND\nPRINT len()"),
        "def len_():\n    return 1\n\nprint(len_())\n"
    );
}

#[test]
fn test_collection_access_follows_declared_type() {
    let source = "nums: LIST<INTEGER> = [3]\nages: MAP<STRING, INTEGER> = {\"a\": 1}\nPRINT GET_ELEMENT(nums, 0)\nPRINT GET_ELEMENT(ages, \"a\")\nSET_ELEMENT(nums, 0, 5)";

    assert_eq!(
        python(source),
        "nums = [3]\nages = {\"a\": 1}\nprint(nums[0])\nprint(ages.get(\"a\"))\nnums[0] = 5\n"
    );
}

#[test]
fn test_foreach_variable_takes_element_type() {
    let source = "words: LIST<STRING> = [\"ab\"]\nFOREACH w IN words DO\n    PRINT GET_ELEMENT(w, 0)\nEND";

    assert_eq!(
        python(source),
        "words = [\"ab\"]\nfor w in words:\n    print(w[0])\n"
    );
}

#[test]
fn test_ambiguous_receiver() {
    let error = failure("n: INTEGER = 1\nPRINT GET_ELEMENT(n, 0)");
    assert!(matches!(
        error.get_internal(),
        ErrorImpl::AmbiguousReceiverType { function, .. } if function == "GET_ELEMENT"
    ));
    assert_eq!(error.get_position().line, 2);

    let error = failure("PRINT GET_ELEMENT(unknown, 0)");
    assert_eq!(error.get_error_name(), "AmbiguousReceiverType");
}

#[test]
fn test_statement_only_call_in_expression() {
    let error = failure("m: MAP<STRING, INTEGER>\nx = SET_MAP_VALUE(m, \"a\", 1)");

    assert_eq!(
        error.get_internal(),
        &ErrorImpl::StatementOnlyCall {
            function: "SET_MAP_VALUE".to_string()
        }
    );
}

#[test]
fn test_unknown_function() {
    let error = failure("PRINT nope(1)");
    assert_eq!(
        error.get_internal(),
        &ErrorImpl::UnknownFunction {
            function: "nope".to_string()
        }
    );

    let options = GeneratorOptions {
        strict_calls: false,
        ..GeneratorOptions::default()
    };
    let output = transpile_with_options("PRINT nope(1)", None, &options).unwrap();
    assert_eq!(output, "print(nope(1))\n");
}

#[test]
fn test_argument_count() {
    let error = failure("FUNCTION f(a: INTEGER)\nEND\nf(1, 2)");
    assert_eq!(
        error.get_internal(),
        &ErrorImpl::ArgumentCount {
            function: "f".to_string(),
            expected: "1".to_string(),
            received: 2,
        }
    );

    let error = failure("PRINT CONCATENATE_STRINGS(\"a\")");
    assert_eq!(
        error.get_internal(),
        &ErrorImpl::ArgumentCount {
            function: "CONCATENATE_STRINGS".to_string(),
            expected: "at least 2".to_string(),
            received: 1,
        }
    );
}

#[test]
fn test_return_and_break_placement() {
    assert_eq!(failure("RETURN 1").get_internal(), &ErrorImpl::ReturnOutsideFunction);
    assert_eq!(failure("BREAK").get_internal(), &ErrorImpl::BreakOutsideLoop);
    assert_eq!(
        failure("IF TRUE THEN\n    BREAK\nEND").get_internal(),
        &ErrorImpl::BreakOutsideLoop
    );
}

#[test]
fn test_nested_function_definition() {
    let error = failure("FUNCTION outer()\n    FUNCTION inner()\n    END\nEND");

    assert!(matches!(error.get_internal(), ErrorImpl::UnsupportedNode { .. }));
    assert_eq!(error.get_position().line, 2);
}

#[test]
fn test_helpers_are_emitted_once_before_code() {
    let source = "a: BOOLEAN = STRING_TO_BOOLEAN(\"true\")\nb: BOOLEAN = STRING_TO_BOOLEAN(\"no\")";

    assert_eq!(
        python(source),
        "def _fluent_to_boolean(value):\n    return str(value).strip().upper() == \"TRUE\"\n\na = _fluent_to_boolean(\"true\")\nb = _fluent_to_boolean(\"no\")\n"
    );
}

#[test]
fn test_null_to_string_evaluates_argument_once() {
    let source = "FUNCTION noisy(): INTEGER\n    PRINT \"called\"\n    RETURN 1\nEND\nPRINT NULL_TO_STRING(noisy())";
    let output = python(source);

    assert_eq!(output.matches("noisy()").count(), 2);
    assert!(output.starts_with(
        "def _fluent_null_to_string(value):\n    if value is None:\n        return \"NULL\"\n    return str(value)\n\n"
    ));
    assert!(output.ends_with("print(_fluent_null_to_string(noisy()))\n"));
}

#[test]
fn test_map_has_key_keeps_argument_order() {
    let source = "FUNCTION m(): MAP<STRING, INTEGER>\n    RETURN {\"a\": 1}\nEND\nFUNCTION k(): STRING\n    RETURN \"a\"\nEND\nPRINT MAP_HAS_KEY(m(), k())";

    assert!(python(source).ends_with("print(m().__contains__(k()))\n"));
}

#[test]
fn test_set_element_on_string() {
    let error = failure("s: STRING = \"abc\"\nSET_ELEMENT(s, 0, \"x\")");

    assert_eq!(
        error.get_internal(),
        &ErrorImpl::ImmutableReceiver {
            function: "SET_ELEMENT".to_string(),
            receiver: "`s`".to_string(),
        }
    );
    assert_eq!(error.get_position().line, 2);

    // Reading a character is still allowed
    assert_eq!(
        python("s: STRING = \"abc\"\nPRINT GET_ELEMENT(s, 0)"),
        "s = \"abc\"\nprint(s[0])\n"
    );
}

#[test]
fn test_zero_indent_width() {
    let options = GeneratorOptions {
        indent_width: 0,
        ..GeneratorOptions::default()
    };

    let error = transpile_with_options("FUNCTION f(): INTEGER\n    RETURN 1\nEND", None, &options)
        .unwrap_err();
    assert_eq!(error.get_internal(), &ErrorImpl::InvalidIndentWidth { width: 0 });
    assert_eq!(error.get_stage(), Stage::CodeGen);
}

#[test]
fn test_indent_width_option() {
    let options = GeneratorOptions {
        indent_width: 2,
        ..GeneratorOptions::default()
    };

    let output = transpile_with_options("WHILE TRUE DO\n    BREAK\nEND", None, &options).unwrap();
    assert_eq!(output, "while True:\n  break\n");
}

#[test]
fn test_output_is_deterministic() {
    let source = "FUNCTION f(a: INTEGER, b: INTEGER)\n    x = a\n    y = b\nEND\nx: INTEGER = 1\ny: INTEGER = 2";

    assert_eq!(python(source), python(source));
    assert!(python(source).starts_with("def f(a, b):\n    global x, y\n"));
}
