//! Integration tests for end-to-end translation.
//!
//! These tests run the demo programs through the whole pipeline, check the
//! generated Python and, when an interpreter is available, execute it.

use fluentc::{
    errors::errors::Stage,
    runner::{interpreter_available, run_captured, DEFAULT_INTERPRETER},
    transpile,
};
use pretty_assertions::assert_eq;

const GREET: &str = include_str!("../demos/greet.is");
const FIND_MAX: &str = include_str!("../demos/find_max.is");
const BUBBLE_SORT: &str = include_str!("../demos/bubble_sort.is");
const WORD_COUNT: &str = include_str!("../demos/word_count.is");
const MISSING_END: &str = include_str!("../demos/missing_end.is");

/// Translates and runs `source`, returning stdout, or `None` when no
/// interpreter is installed.
fn execute(source: &str, file: &str) -> Option<String> {
    if !interpreter_available(DEFAULT_INTERPRETER) {
        eprintln!("skipping execution: {} not found", DEFAULT_INTERPRETER);
        return None;
    }

    let python = transpile(source, Some(file.to_string())).unwrap();
    let output = run_captured(&python, DEFAULT_INTERPRETER).unwrap();
    assert!(
        output.status.success(),
        "python failed:\n{}\n{}",
        python,
        String::from_utf8_lossy(&output.stderr)
    );

    Some(String::from_utf8_lossy(&output.stdout).to_string())
}

#[test]
fn test_greet_generated_code() {
    let python = transpile(GREET, Some("greet.is".to_string())).unwrap();

    assert_eq!(
        python,
        "def greet(name):\n    return (\"Hello, \" + name + \"!\")\n\nmessage = greet(\"Fluent Builder\")\nprint(message)\n"
    );
}

#[test]
fn test_greet_output() {
    if let Some(stdout) = execute(GREET, "greet.is") {
        assert_eq!(stdout, "Hello, Fluent Builder!\n");
    }
}

#[test]
fn test_find_max_generated_code() {
    let python = transpile(FIND_MAX, Some("find_max.is".to_string())).unwrap();

    assert_eq!(
        python,
        concat!(
            "def find_max(numbers):\n",
            "    if (len(numbers) == 0):\n",
            "        return -1\n",
            "    best = numbers[0]\n",
            "    for n in numbers:\n",
            "        if (n > best):\n",
            "            best = n\n",
            "    return best\n",
            "\n",
            "values = [23, 45, 12, 78, 34, 56, 9, 90, 3]\n",
            "print(find_max(values))\n",
            "empty = []\n",
            "print(find_max(empty))\n",
        )
    );
}

#[test]
fn test_find_max_output() {
    if let Some(stdout) = execute(FIND_MAX, "find_max.is") {
        assert_eq!(stdout, "90\n-1\n");
    }
}

#[test]
fn test_bubble_sort_uses_index_access() {
    let python = transpile(BUBBLE_SORT, Some("bubble_sort.is".to_string())).unwrap();

    assert!(python.contains("items[j] = items[(j + 1)]\n"));
    assert!(python.contains("temp = items[j]\n"));
    assert!(python.ends_with("bubble_sort(numbers)\nprint(numbers)\n"));
}

#[test]
fn test_bubble_sort_output() {
    if let Some(stdout) = execute(BUBBLE_SORT, "bubble_sort.is") {
        assert_eq!(stdout, "[11, 12, 22, 25, 34, 64, 90]\n");
    }
}

#[test]
fn test_word_count_uses_key_access() {
    let python = transpile(WORD_COUNT, Some("word_count.is".to_string())).unwrap();

    assert!(python.contains("words = text.split(\" \")\n"));
    assert!(python.contains("if counts.__contains__(word):\n"));
    assert!(python.contains("counts[word] = (counts[word] + 1)\n"));
    assert!(python.contains("for word in list(totals.keys()):\n"));
}

#[test]
fn test_word_count_output() {
    if let Some(stdout) = execute(WORD_COUNT, "word_count.is") {
        let counts: Vec<&str> = stdout.lines().collect();

        assert!(counts.contains(&"the: 3"));
        assert!(counts.contains(&"quick: 2"));
        assert!(counts.contains(&"fox: 2"));
        for word in ["brown", "jumps", "over", "lazy", "dog"] {
            assert!(counts.contains(&format!("{}: 1", word).as_str()));
        }
        assert_eq!(counts.len(), 8);
    }
}

#[test]
fn test_missing_terminator_produces_no_output() {
    let error = transpile(MISSING_END, Some("missing_end.is".to_string())).unwrap_err();

    assert_eq!(error.get_stage(), Stage::Syntax);
    assert_eq!(error.get_error_name(), "UnexpectedToken");
}

#[test]
fn test_transpile_is_deterministic() {
    for source in [GREET, FIND_MAX, BUBBLE_SORT, WORD_COUNT] {
        assert_eq!(transpile(source, None).unwrap(), transpile(source, None).unwrap());
    }
}

#[test]
fn test_default_values_at_runtime() {
    let source = "a: INTEGER\nb: FLOAT\nc: STRING\nd: BOOLEAN\ne: LIST<INTEGER>\nf: MAP<STRING, INTEGER>\nPRINT a\nPRINT b\nPRINT GET_LENGTH(c)\nPRINT BOOLEAN_TO_STRING(d)\nPRINT GET_LENGTH(e)\nPRINT GET_LENGTH(GET_MAP_KEYS(f))";

    if let Some(stdout) = execute(source, "defaults.is") {
        assert_eq!(stdout, "0\n0.0\n0\nFalse\n0\n0\n");
    }
}

#[test]
fn test_library_calls_evaluate_arguments_once_in_order() {
    let source = "FUNCTION noisy(): INTEGER\n    PRINT \"called\"\n    RETURN 1\nEND\nFUNCTION m(): MAP<STRING, INTEGER>\n    PRINT \"map\"\n    RETURN {\"a\": 1}\nEND\nFUNCTION k(): STRING\n    PRINT \"key\"\n    RETURN \"a\"\nEND\nPRINT NULL_TO_STRING(noisy())\nPRINT NULL_TO_STRING(NULL)\nPRINT MAP_HAS_KEY(m(), k())";

    if let Some(stdout) = execute(source, "order.is") {
        assert_eq!(stdout, "called\n1\nNULL\nmap\nkey\nTrue\n");
    }
}

#[test]
fn test_shadowing_at_runtime() {
    let source = "x: INTEGER = 1\nFUNCTION f(): INTEGER\n    x: INTEGER = 10\n    RETURN x\nEND\nIF TRUE THEN\n    x: INTEGER = 2\n    PRINT x\nEND\nPRINT f()\nPRINT x";

    if let Some(stdout) = execute(source, "shadow.is") {
        assert_eq!(stdout, "2\n10\n1\n");
    }
}
