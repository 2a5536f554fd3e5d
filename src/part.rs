//! Displayable message parts.

use std::borrow::Cow;
use std::fmt;

/// One value in a message. Parts are rendered with their default string form
/// and joined with a single space.
#[derive(Debug, Clone, PartialEq)]
pub enum Part {
    Str(Cow<'static, str>),
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
    Char(char),
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Part::Str(s) => f.write_str(s),
            Part::Int(v) => write!(f, "{}", v),
            Part::UInt(v) => write!(f, "{}", v),
            Part::Float(v) => write!(f, "{}", v),
            Part::Bool(v) => write!(f, "{}", v),
            Part::Char(v) => write!(f, "{}", v),
        }
    }
}

impl From<&'static str> for Part {
    fn from(s: &'static str) -> Self {
        Part::Str(Cow::Borrowed(s))
    }
}

impl From<String> for Part {
    fn from(s: String) -> Self {
        Part::Str(Cow::Owned(s))
    }
}

impl From<&String> for Part {
    fn from(s: &String) -> Self {
        Part::Str(Cow::Owned(s.clone()))
    }
}

impl From<Cow<'static, str>> for Part {
    fn from(s: Cow<'static, str>) -> Self {
        Part::Str(s)
    }
}

macro_rules! impl_from_int {
    ($variant:ident, $target:ty: $($t:ty),*) => {
        $(
            impl From<$t> for Part {
                fn from(v: $t) -> Self {
                    Part::$variant(v as $target)
                }
            }
        )*
    };
}

impl_from_int!(Int, i64: i8, i16, i32, i64, isize);
impl_from_int!(UInt, u64: u8, u16, u32, u64, usize);

impl From<f32> for Part {
    fn from(v: f32) -> Self {
        Part::Float(v as f64)
    }
}

impl From<f64> for Part {
    fn from(v: f64) -> Self {
        Part::Float(v)
    }
}

impl From<bool> for Part {
    fn from(v: bool) -> Self {
        Part::Bool(v)
    }
}

impl From<char> for Part {
    fn from(v: char) -> Self {
        Part::Char(v)
    }
}

/// Builds an array of [`Part`]s from heterogeneous values.
///
/// ```
/// use fanlog::{parts, Part};
/// let p = parts!["retries", 3, true];
/// assert_eq!(p[1], Part::Int(3));
/// ```
#[macro_export]
macro_rules! parts {
    ($($part:expr),* $(,)?) => {
        [$($crate::Part::from($part)),*]
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_string_forms() {
        let rendered: Vec<String> = parts!["x", -4, 7u8, 1.5, false, 'z']
            .iter()
            .map(|p| p.to_string())
            .collect();
        assert_eq!(rendered, vec!["x", "-4", "7", "1.5", "false", "z"]);
    }

    #[test]
    fn test_owned_strings_keep_contents() {
        let name = String::from("db-primary");
        assert_eq!(Part::from(&name).to_string(), "db-primary");
        assert_eq!(Part::from(name), Part::Str(Cow::Borrowed("db-primary")));
    }

    #[test]
    fn test_empty_parts() {
        let p: [Part; 0] = parts![];
        assert!(p.is_empty());
    }
}
