//! Variable kinds and typed values
//!
//! Every declared variable has one of five kinds. Declarations spell a kind as
//! a single-character tag (`b`, `i`, `f`, `s`, `l`); the full names are
//! accepted as well.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of variable kinds
///
/// # Examples
///
/// ```
/// use app_config::domain::VarKind;
///
/// let kind: VarKind = "l".parse().unwrap();
/// assert_eq!(kind, VarKind::List);
/// assert_eq!(kind.tag(), 'l');
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum VarKind {
    /// `b` - true/false
    Bool,
    /// `i` - signed 64-bit integer
    Int,
    /// `f` - 64-bit float
    Float,
    /// `s` - text, stored verbatim
    Str,
    /// `l` - comma-delimited list of strings
    List,
}

impl VarKind {
    /// All kinds, in tag order
    pub const ALL: [VarKind; 5] = [
        VarKind::Bool,
        VarKind::Float,
        VarKind::Int,
        VarKind::List,
        VarKind::Str,
    ];

    /// Single-character declaration tag
    pub fn tag(&self) -> char {
        match self {
            VarKind::Bool => 'b',
            VarKind::Int => 'i',
            VarKind::Float => 'f',
            VarKind::Str => 's',
            VarKind::List => 'l',
        }
    }

    /// Human-readable name
    pub fn as_str(&self) -> &'static str {
        match self {
            VarKind::Bool => "bool",
            VarKind::Int => "int",
            VarKind::Float => "float",
            VarKind::Str => "string",
            VarKind::List => "list",
        }
    }
}

impl fmt::Display for VarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VarKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "b" | "bool" | "boolean" => Ok(VarKind::Bool),
            "i" | "int" | "integer" => Ok(VarKind::Int),
            "f" | "float" => Ok(VarKind::Float),
            "s" | "str" | "string" => Ok(VarKind::Str),
            "l" | "list" => Ok(VarKind::List),
            other => Err(format!(
                "Unknown variable kind '{other}'. Must be one of: b, i, f, s, l"
            )),
        }
    }
}

impl TryFrom<String> for VarKind {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<VarKind> for String {
    fn from(kind: VarKind) -> Self {
        kind.tag().to_string()
    }
}

/// A typed variable value held in [`ProcessState`](crate::core::ProcessState)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<String>),
}

impl Value {
    /// Kind of this value
    pub fn kind(&self) -> VarKind {
        match self {
            Value::Bool(_) => VarKind::Bool,
            Value::Int(_) => VarKind::Int,
            Value::Float(_) => VarKind::Float,
            Value::Str(_) => VarKind::Str,
            Value::List(_) => VarKind::List,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(x) => Some(*x),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Vec<String>> for Value {
    fn from(items: Vec<String>) -> Self {
        Value::List(items)
    }
}

impl From<Vec<&str>> for Value {
    fn from(items: Vec<&str>) -> Self {
        Value::List(items.into_iter().map(String::from).collect())
    }
}
