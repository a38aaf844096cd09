//! Lexical scope tracking for code generation.
//!
//! A `ScopeStack` holds one `Frame` per open block. Lookups walk the frames
//! innermost-to-outermost. Each binding remembers the name it was emitted
//! under, so shadowing declarations can be given fresh Python names without
//! disturbing the outer binding.

use std::collections::{HashMap, HashSet};

use lazy_static::lazy_static;

use crate::ast::types::Type;

use super::stdlib::helper_names;

lazy_static! {
    /// Names a Fluent identifier must never be emitted as: Python keywords
    /// and the builtins the generated code calls.
    static ref PYTHON_RESERVED: HashSet<&'static str> = {
        let mut set = HashSet::new();

        for keyword in [
            "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
            "continue", "def", "del", "elif", "else", "except", "finally", "for", "from",
            "global", "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass",
            "raise", "return", "try", "while", "with", "yield",
        ] {
            set.insert(keyword);
        }

        for builtin in ["print", "len", "str", "int", "float", "open", "list"] {
            set.insert(builtin);
        }

        for helper in helper_names() {
            set.insert(helper);
        }

        set
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    Module,
    Function,
    Block,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    /// The Python name the variable is emitted under.
    pub emitted: String,
    pub ty: Option<Type>,
}

#[derive(Debug, Clone)]
pub struct Frame {
    pub kind: FrameKind,
    pub variables: HashMap<String, Binding>,
}

impl Frame {
    pub fn new(kind: FrameKind) -> Self {
        Frame {
            kind,
            variables: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScopeStack {
    frames: Vec<Frame>,
}

impl Default for ScopeStack {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeStack {
    /// Creates a stack holding only the module frame.
    pub fn new() -> Self {
        ScopeStack {
            frames: vec![Frame::new(FrameKind::Module)],
        }
    }

    pub fn push(&mut self, kind: FrameKind) {
        self.frames.push(Frame::new(kind));
    }

    /// Pops the innermost frame. The module frame is never popped.
    pub fn pop(&mut self) -> Option<Frame> {
        if self.frames.len() > 1 {
            self.frames.pop()
        } else {
            None
        }
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn declare(&mut self, name: &str, binding: Binding) {
        if let Some(frame) = self.frames.last_mut() {
            frame.variables.insert(name.to_string(), binding);
        }
    }

    pub fn lookup(&self, name: &str) -> Option<&Binding> {
        self.lookup_with_kind(name).map(|(binding, _)| binding)
    }

    /// Looks a name up and reports the kind of frame that owns it.
    pub fn lookup_with_kind(&self, name: &str) -> Option<(&Binding, FrameKind)> {
        self.frames
            .iter()
            .rev()
            .find_map(|frame| frame.variables.get(name).map(|binding| (binding, frame.kind)))
    }

    /// The binding for `name` in the innermost frame only.
    pub fn lookup_current(&self, name: &str) -> Option<&Binding> {
        self.frames.last().and_then(|frame| frame.variables.get(name))
    }

    /// Whether `name` is bound in any frame other than the innermost one.
    pub fn visible_from_outer(&self, name: &str) -> bool {
        let outer = self.frames.len().saturating_sub(1);
        self.frames[..outer]
            .iter()
            .any(|frame| frame.variables.contains_key(name))
    }
}

/// Hands out Python names that collide with neither reserved words nor any
/// identifier in the program.
#[derive(Debug, Clone, Default)]
pub struct NameAllocator {
    used: HashSet<String>,
    renames: HashMap<String, String>,
}

impl NameAllocator {
    pub fn new<I: IntoIterator<Item = String>>(identifiers: I) -> Self {
        NameAllocator {
            used: identifiers.into_iter().collect(),
            renames: HashMap::new(),
        }
    }

    pub fn is_reserved(name: &str) -> bool {
        PYTHON_RESERVED.contains(name)
    }

    /// The program-wide Python spelling of a source identifier.
    pub fn safe(&mut self, name: &str) -> String {
        if !Self::is_reserved(name) {
            return name.to_string();
        }

        if let Some(renamed) = self.renames.get(name) {
            return renamed.clone();
        }

        let mut candidate = format!("{}_", name);
        while self.used.contains(&candidate) || Self::is_reserved(&candidate) {
            candidate.push('_');
        }

        self.used.insert(candidate.clone());
        self.renames.insert(name.to_string(), candidate.clone());
        candidate
    }

    /// A brand-new name derived from `name`, for shadowing declarations.
    pub fn fresh(&mut self, name: &str) -> String {
        let base = self.safe(name);

        let mut counter = 1;
        loop {
            let candidate = format!("{}_{}", base, counter);
            if !self.used.contains(&candidate) && !Self::is_reserved(&candidate) {
                self.used.insert(candidate.clone());
                return candidate;
            }
            counter += 1;
        }
    }
}
