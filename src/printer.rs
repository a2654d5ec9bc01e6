//! Pattern re-serialization.
//!
//! Turns an AST back into pattern text for diagnostics and the
//! `source()` accessor. Literal characters are echoed with their
//! original spelling (kept by the parser in each node's `raw` field), so
//! a parsed pattern round-trips apart from two normalizations: an empty
//! alternative renders as `(?:)`, and a class backspace stays `[\b]`.

use std::fmt;

use crate::ast::{ClassItem, EscapeClassKind, Node, Pattern};

/// The re-serialized pattern body (the text between the slashes).
pub fn pattern_source(pattern: &Pattern) -> String {
    pattern.child.to_string()
}

impl fmt::Display for Pattern {
    /// `/source/flags`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}", self.child, self.flags)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Disjunction { children, .. } => {
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        write!(f, "|")?;
                    }
                    write!(f, "{}", child)?;
                }
                Ok(())
            }
            Node::Sequence { children, .. } => {
                if children.is_empty() {
                    return write!(f, "(?:)");
                }
                for child in children {
                    write!(f, "{}", child)?;
                }
                Ok(())
            }
            Node::Group { child, .. } => {
                write!(f, "(?:")?;
                write_body(f, child)?;
                write!(f, ")")
            }
            Node::Capture { child, .. } => {
                write!(f, "(")?;
                write_body(f, child)?;
                write!(f, ")")
            }
            Node::NamedCapture { name, child, .. } => {
                write!(f, "(?<{}>", name)?;
                write_body(f, child)?;
                write!(f, ")")
            }
            Node::Many { child, non_greedy, .. } => {
                write!(f, "{}*{}", child, if *non_greedy { "?" } else { "" })
            }
            Node::Some { child, non_greedy, .. } => {
                write!(f, "{}+{}", child, if *non_greedy { "?" } else { "" })
            }
            Node::Optional { child, non_greedy, .. } => {
                write!(f, "{}?{}", child, if *non_greedy { "?" } else { "" })
            }
            Node::Repeat { child, min, max, non_greedy, .. } => {
                write!(f, "{}{{{}", child, min)?;
                match max {
                    Some(max) if max == min => {}
                    Some(max) => write!(f, ",{}", max)?,
                    None => write!(f, ",")?,
                }
                write!(f, "}}{}", if *non_greedy { "?" } else { "" })
            }
            Node::LineBegin { .. } => write!(f, "^"),
            Node::LineEnd { .. } => write!(f, "$"),
            Node::WordBoundary { invert, .. } => {
                write!(f, "{}", if *invert { "\\B" } else { "\\b" })
            }
            Node::LookAhead { child, negative, .. } => {
                write!(f, "(?{}", if *negative { "!" } else { "=" })?;
                write_body(f, child)?;
                write!(f, ")")
            }
            Node::LookBehind { child, negative, .. } => {
                write!(f, "(?<{}", if *negative { "!" } else { "=" })?;
                write_body(f, child)?;
                write!(f, ")")
            }
            Node::Char { raw, .. } => write!(f, "{}", raw),
            Node::Dot { .. } => write!(f, "."),
            Node::Class { items, invert, .. } => {
                write!(f, "[{}", if *invert { "^" } else { "" })?;
                for item in items {
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Node::EscapeClass { kind, invert, .. } => write_escape_class(f, kind, *invert),
            Node::BackRef { index, .. } => write!(f, "\\{}", index),
            Node::NamedBackRef { name, .. } => write!(f, "\\k<{}>", name),
        }
    }
}

/// A group body: an empty sequence renders as nothing (the enclosing
/// parentheses already delimit it), anything else as itself.
fn write_body(f: &mut fmt::Formatter<'_>, child: &Node) -> fmt::Result {
    match child {
        Node::Sequence { children, .. } if children.is_empty() => Ok(()),
        _ => write!(f, "{}", child),
    }
}

impl fmt::Display for ClassItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassItem::Char(c) => write!(f, "{}", c.raw),
            ClassItem::Range { begin, end, .. } => write!(f, "{}-{}", begin.raw, end.raw),
            ClassItem::EscapeClass { kind, invert, .. } => write_escape_class(f, kind, *invert),
        }
    }
}

fn write_escape_class(
    f: &mut fmt::Formatter<'_>,
    kind: &EscapeClassKind,
    invert: bool,
) -> fmt::Result {
    match kind {
        EscapeClassKind::Digit => write!(f, "{}", if invert { "\\D" } else { "\\d" }),
        EscapeClassKind::Word => write!(f, "{}", if invert { "\\W" } else { "\\w" }),
        EscapeClassKind::Space => write!(f, "{}", if invert { "\\S" } else { "\\s" }),
        EscapeClassKind::Property { name } => {
            write!(f, "\\{}{{{}}}", if invert { "P" } else { "p" }, name)
        }
        EscapeClassKind::PropertyValue { property, value } => {
            write!(f, "\\{}{{{}={}}}", if invert { "P" } else { "p" }, property, value)
        }
    }
}
