//! Standard library resolution.
//!
//! Built-in Fluent calls are looked up in a static table and translated to
//! Python text. Each entry picks one emission strategy:
//!
//! - `Rename` - a direct call to a Python builtin (`GET_LENGTH(x)` -> `len(x)`)
//! - `Infix` - the arguments joined by an operator
//! - `Template` / `Statement` - a placeholder template filled with the arguments
//! - `Collection` - a template chosen by the receiver's collection kind
//! - `Helper` - a call to a small runtime function emitted once ahead of the
//!   generated program

use std::{collections::HashMap, fmt::Display};

use lazy_static::lazy_static;
use regex::{Captures, Regex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    AtLeast(usize),
}

impl Arity {
    pub fn accepts(&self, count: usize) -> bool {
        match self {
            Arity::Exact(expected) => count == *expected,
            Arity::AtLeast(minimum) => count >= *minimum,
        }
    }
}

impl Display for Arity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Arity::Exact(expected) => write!(f, "{}", expected),
            Arity::AtLeast(minimum) => write!(f, "at least {}", minimum),
        }
    }
}

/// How a collection value is accessed in Python.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiverKind {
    /// Lists and strings, indexed by position.
    Sequence,
    /// Dicts, accessed by key.
    Mapping,
}

/// A runtime function the generated program defines before first use.
#[derive(Debug, PartialEq, Eq)]
pub struct Helper {
    pub name: &'static str,
    /// Definition lines paired with their indentation depth.
    pub lines: &'static [(usize, &'static str)],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Rename(&'static str),
    Infix(&'static str),
    Template(&'static str),
    Statement(&'static str),
    Collection {
        sequence: &'static str,
        mapping: &'static str,
        statement: bool,
    },
    Helper(&'static Helper),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StdlibEntry {
    pub name: &'static str,
    pub arity: Arity,
    pub strategy: Strategy,
    /// The collection kind the call evaluates to, when it yields one.
    pub yields: Option<ReceiverKind>,
}

impl StdlibEntry {
    pub fn needs_receiver(&self) -> bool {
        matches!(self.strategy, Strategy::Collection { .. })
    }

    /// Whether the call assigns into its first argument in place.
    pub fn mutates_receiver(&self) -> bool {
        matches!(
            self.strategy,
            Strategy::Collection {
                statement: true,
                ..
            }
        )
    }
}

/// Generated text for one resolved call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Emission {
    pub text: String,
    /// Only valid as a whole statement, never inside an expression.
    pub statement_only: bool,
    pub helper: Option<&'static Helper>,
}

pub static TO_BOOLEAN_HELPER: Helper = Helper {
    name: "_fluent_to_boolean",
    lines: &[
        (0, "def _fluent_to_boolean(value):"),
        (1, "return str(value).strip().upper() == \"TRUE\""),
    ],
};

pub static READ_LINE_HELPER: Helper = Helper {
    name: "_fluent_read_line",
    lines: &[
        (0, "def _fluent_read_line(handle):"),
        (1, "line = handle.readline()"),
        (1, "if line == \"\":"),
        (2, "return None"),
        (1, "return line.rstrip(\"\\n\")"),
    ],
};

pub static NULL_TO_STRING_HELPER: Helper = Helper {
    name: "_fluent_null_to_string",
    lines: &[
        (0, "def _fluent_null_to_string(value):"),
        (1, "if value is None:"),
        (2, "return \"NULL\""),
        (1, "return str(value)"),
    ],
};

pub fn helper_names() -> [&'static str; 3] {
    [
        TO_BOOLEAN_HELPER.name,
        READ_LINE_HELPER.name,
        NULL_TO_STRING_HELPER.name,
    ]
}

macro_rules! entry {
    ($map:ident, $name:expr, $arity:expr, $strategy:expr) => {
        entry!($map, $name, $arity, $strategy, None)
    };
    ($map:ident, $name:expr, $arity:expr, $strategy:expr, $yields:expr) => {
        $map.insert(
            $name,
            StdlibEntry {
                name: $name,
                arity: $arity,
                strategy: $strategy,
                yields: $yields,
            },
        )
    };
}

lazy_static! {
    static ref PLACEHOLDER: Regex = Regex::new(r"\{(\d+)\}").unwrap();

    static ref STDLIB: HashMap<&'static str, StdlibEntry> = {
        use Arity::*;
        use Strategy::*;

        let mut map = HashMap::new();

        // Strings and lengths
        entry!(map, "GET_LENGTH", Exact(1), Rename("len"));
        entry!(map, "GET_STRING_LENGTH", Exact(1), Rename("len"));
        entry!(map, "CONCATENATE_STRINGS", AtLeast(2), Infix("+"));
        entry!(map, "SPLIT_STRING", Exact(2), Template("{0}.split({1})"), Some(ReceiverKind::Sequence));

        // Lists
        entry!(map, "ADD_ELEMENT", Exact(2), Template("{0}.append({1})"));
        entry!(map, "GET_ELEMENT", Exact(2), Collection {
            sequence: "{0}[{1}]",
            mapping: "{0}.get({1})",
            statement: false,
        });
        entry!(map, "SET_ELEMENT", Exact(3), Collection {
            sequence: "{0}[{1}] = {2}",
            mapping: "{0}[{1}] = {2}",
            statement: true,
        });

        // Maps
        entry!(map, "MAP_HAS_KEY", Exact(2), Template("{0}.__contains__({1})"));
        entry!(map, "GET_MAP_VALUE", Exact(2), Template("{0}[{1}]"));
        entry!(map, "SET_MAP_VALUE", Exact(3), Statement("{0}[{1}] = {2}"));
        entry!(map, "GET_MAP_KEYS", Exact(1), Template("list({0}.keys())"), Some(ReceiverKind::Sequence));

        // Conversions
        entry!(map, "INTEGER_TO_STRING", Exact(1), Rename("str"));
        entry!(map, "FLOAT_TO_STRING", Exact(1), Rename("str"));
        entry!(map, "BOOLEAN_TO_STRING", Exact(1), Rename("str"));
        entry!(map, "NULL_TO_STRING", Exact(1), Helper(&NULL_TO_STRING_HELPER));
        entry!(map, "STRING_TO_INTEGER", Exact(1), Rename("int"));
        entry!(map, "STRING_TO_FLOAT", Exact(1), Rename("float"));
        entry!(map, "STRING_TO_BOOLEAN", Exact(1), Helper(&TO_BOOLEAN_HELPER));

        // Files
        entry!(map, "OPEN_FILE", Exact(2), Rename("open"));
        entry!(map, "READ_LINE", Exact(1), Helper(&READ_LINE_HELPER));
        entry!(map, "WRITE_LINE", Exact(2), Template("{0}.write(str({1}) + \"\\n\")"));
        entry!(map, "CLOSE_FILE", Exact(1), Template("{0}.close()"));

        map
    };
}

pub fn lookup(name: &str) -> Option<&'static StdlibEntry> {
    STDLIB.get(name)
}

/// Translates a call to `entry` given its already generated arguments.
///
/// Returns `None` only for collection entries when no receiver kind is
/// supplied.
pub fn resolve(
    entry: &StdlibEntry,
    arguments: &[String],
    receiver: Option<ReceiverKind>,
) -> Option<Emission> {
    let (text, statement_only, helper) = match entry.strategy {
        Strategy::Rename(target) => (format!("{}({})", target, arguments.join(", ")), false, None),
        Strategy::Infix(operator) => (
            format!("({})", arguments.join(&format!(" {} ", operator))),
            false,
            None,
        ),
        Strategy::Template(template) => (fill_template(template, arguments), false, None),
        Strategy::Statement(template) => (fill_template(template, arguments), true, None),
        Strategy::Collection {
            sequence,
            mapping,
            statement,
        } => {
            let template = match receiver? {
                ReceiverKind::Sequence => sequence,
                ReceiverKind::Mapping => mapping,
            };
            (fill_template(template, arguments), statement, None)
        }
        Strategy::Helper(helper) => (
            format!("{}({})", helper.name, arguments.join(", ")),
            false,
            Some(helper),
        ),
    };

    Some(Emission {
        text,
        statement_only,
        helper,
    })
}

/// Replaces every `{N}` in `template` with the N-th argument.
pub fn fill_template(template: &str, arguments: &[String]) -> String {
    PLACEHOLDER
        .replace_all(template, |captures: &Captures| {
            captures[1]
                .parse::<usize>()
                .ok()
                .and_then(|index| arguments.get(index))
                .cloned()
                .unwrap_or_default()
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{fill_template, lookup, resolve, Arity, ReceiverKind};

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    fn translate(name: &str, values: &[&str], receiver: Option<ReceiverKind>) -> String {
        resolve(lookup(name).unwrap(), &args(values), receiver)
            .unwrap()
            .text
    }

    #[test]
    fn test_unmapped_name() {
        assert!(lookup("find_max").is_none());
        assert!(lookup("get_length").is_none());
    }

    #[test]
    fn test_rename_strategy() {
        assert_eq!(translate("GET_LENGTH", &["items"], None), "len(items)");
        assert_eq!(translate("STRING_TO_INTEGER", &["\"4\""], None), "int(\"4\")");
        assert_eq!(translate("OPEN_FILE", &["path", "\"r\""], None), "open(path, \"r\")");
        assert_eq!(translate("BOOLEAN_TO_STRING", &["done"], None), "str(done)");
    }

    #[test]
    fn test_infix_strategy() {
        assert_eq!(
            translate("CONCATENATE_STRINGS", &["\"Hello, \"", "name", "\"!\""], None),
            "(\"Hello, \" + name + \"!\")"
        );
    }

    #[test]
    fn test_template_strategy() {
        assert_eq!(
            translate("MAP_HAS_KEY", &["counts", "word"], None),
            "counts.__contains__(word)"
        );
        assert_eq!(
            translate("WRITE_LINE", &["handle", "total"], None),
            "handle.write(str(total) + \"\\n\")"
        );
    }

    #[test]
    fn test_collection_strategy_depends_on_receiver() {
        assert_eq!(
            translate("GET_ELEMENT", &["items", "0"], Some(ReceiverKind::Sequence)),
            "items[0]"
        );
        assert_eq!(
            translate("GET_ELEMENT", &["counts", "\"a\""], Some(ReceiverKind::Mapping)),
            "counts.get(\"a\")"
        );
        assert!(resolve(lookup("GET_ELEMENT").unwrap(), &args(&["x", "0"]), None).is_none());
    }

    #[test]
    fn test_statement_only_entries() {
        let set_map = resolve(lookup("SET_MAP_VALUE").unwrap(), &args(&["m", "k", "v"]), None).unwrap();
        assert!(set_map.statement_only);
        assert_eq!(set_map.text, "m[k] = v");

        let set_element = resolve(
            lookup("SET_ELEMENT").unwrap(),
            &args(&["items", "i", "v"]),
            Some(ReceiverKind::Sequence),
        )
        .unwrap();
        assert!(set_element.statement_only);
    }

    #[test]
    fn test_helper_strategy() {
        let emission = resolve(lookup("READ_LINE").unwrap(), &args(&["handle"]), None).unwrap();

        assert_eq!(emission.text, "_fluent_read_line(handle)");
        assert_eq!(emission.helper.map(|helper| helper.name), Some("_fluent_read_line"));

        let emission = resolve(lookup("NULL_TO_STRING").unwrap(), &args(&["next()"]), None).unwrap();
        assert_eq!(emission.text, "_fluent_null_to_string(next())");
        assert_eq!(emission.text.matches("next()").count(), 1);
    }

    #[test]
    fn test_receiver_mutation() {
        assert!(lookup("SET_ELEMENT").unwrap().mutates_receiver());
        assert!(!lookup("GET_ELEMENT").unwrap().mutates_receiver());
        assert!(!lookup("SET_MAP_VALUE").unwrap().mutates_receiver());
    }

    #[test]
    fn test_arity() {
        assert!(Arity::Exact(2).accepts(2));
        assert!(!Arity::Exact(2).accepts(3));
        assert!(Arity::AtLeast(2).accepts(5));
        assert_eq!(Arity::AtLeast(2).to_string(), "at least 2");
        assert_eq!(lookup("CONCATENATE_STRINGS").unwrap().arity, Arity::AtLeast(2));
    }

    #[test]
    fn test_fill_template_repeats_placeholders() {
        assert_eq!(fill_template("{0} + {0} - {1}", &args(&["a", "b"])), "a + a - b");
    }
}
