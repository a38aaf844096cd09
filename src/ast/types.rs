//! Declared types.
//!
//! Types are either one of the base types or a single-level collection of
//! base types. They carry no runtime meaning in the generated code beyond
//! default values and collection-access decisions.

use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseType {
    Integer,
    Float,
    String,
    Boolean,
    Nothing,
}

impl Display for BaseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BaseType::Integer => write!(f, "INTEGER"),
            BaseType::Float => write!(f, "FLOAT"),
            BaseType::String => write!(f, "STRING"),
            BaseType::Boolean => write!(f, "BOOLEAN"),
            BaseType::Nothing => write!(f, "NOTHING"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    Base(BaseType),
    List(BaseType),
    Map(BaseType, BaseType),
}

impl Type {
    /// The type of one element when iterating a value of this type.
    pub fn element(&self) -> Option<Type> {
        match self {
            Type::List(element) => Some(Type::Base(*element)),
            Type::Map(key, _) => Some(Type::Base(*key)),
            Type::Base(BaseType::String) => Some(Type::Base(BaseType::String)),
            Type::Base(_) => None,
        }
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::Base(base) => write!(f, "{}", base),
            Type::List(element) => write!(f, "LIST<{}>", element),
            Type::Map(key, value) => write!(f, "MAP<{}, {}>", key, value),
        }
    }
}
