//! Pattern rendering in `case` syntax.

use std::fmt;

use super::{Pattern, PatternKind, Star};
use crate::ensure_sufficient_stack;

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        ensure_sufficient_stack(|| self.render(f))
    }
}

impl Pattern {
    fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            PatternKind::Literal(value) => write!(f, "{value}"),
            PatternKind::Wildcard => f.write_str("_"),
            PatternKind::Capture(name) => write!(f, "{name}"),
            PatternKind::TypedCapture { kind, name } => write!(f, "{kind}({name})"),
            PatternKind::Kind(kind) => write!(f, "{kind}()"),
            PatternKind::Sequence { head, rest, tail } => {
                f.write_str("[")?;
                let mut sep = Separator::default();
                for pattern in head {
                    sep.emit(f)?;
                    write!(f, "{pattern}")?;
                }
                if let Some(star) = rest {
                    sep.emit(f)?;
                    match star {
                        Star::Discard => f.write_str("*_")?,
                        Star::Bind(name) => write!(f, "*{name}")?,
                    }
                }
                for pattern in tail {
                    sep.emit(f)?;
                    write!(f, "{pattern}")?;
                }
                f.write_str("]")
            }
            PatternKind::Mapping { required, rest } => {
                f.write_str("{")?;
                let mut sep = Separator::default();
                for (key, pattern) in required {
                    sep.emit(f)?;
                    write!(f, "{key}: {pattern}")?;
                }
                if let Some(name) = rest {
                    sep.emit(f)?;
                    write!(f, "**{name}")?;
                }
                f.write_str("}")
            }
            PatternKind::Record { type_tag, fields } => {
                write!(f, "{type_tag}(")?;
                let mut sep = Separator::default();
                for (field, pattern) in fields {
                    sep.emit(f)?;
                    write!(f, "{field}={pattern}")?;
                }
                f.write_str(")")
            }
            PatternKind::Or(alternatives) => {
                for (i, alternative) in alternatives.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" | ")?;
                    }
                    // `as` binds looser than `|`
                    if matches!(alternative.kind(), PatternKind::As { .. }) {
                        write!(f, "({alternative})")?;
                    } else {
                        write!(f, "{alternative}")?;
                    }
                }
                Ok(())
            }
            PatternKind::As { inner, name } => write!(f, "{inner} as {name}"),
        }
    }
}

/// Writes `", "` before every item but the first.
#[derive(Default)]
struct Separator {
    started: bool,
}

impl Separator {
    fn emit(&mut self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.started {
            f.write_str(", ")?;
        }
        self.started = true;
        Ok(())
    }
}
