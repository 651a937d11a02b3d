use std::fmt;
use std::path::PathBuf;

/// Mesh loading failure. Line numbers are 1-based.
#[derive(Debug)]
pub enum GeometryError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Only 2D and 3D points are supported.
    InvalidDimensions(u32),
    /// A data row appeared before any `[points]` / `[indices]` header.
    MissingSection { line: usize },
    UnknownSection { line: usize, name: String },
    PointArity {
        line: usize,
        expected: usize,
        found: usize,
    },
    IndexArity { line: usize, found: usize },
    InvalidNumber { line: usize, token: String },
    /// Index does not fit in `u16`.
    IndexOutOfRange { line: usize, token: String },
    /// Index refers past the last point of the file.
    MissingPoint {
        line: usize,
        index: u16,
        point_count: usize,
    },
    Obj {
        path: PathBuf,
        source: tobj::LoadError,
    },
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryError::Io { path, source } => {
                write!(f, "failed to read {}: {source}", path.display())
            }
            GeometryError::InvalidDimensions(d) => {
                write!(f, "unsupported point dimensions {d} (expected 2 or 3)")
            }
            GeometryError::MissingSection { line } => {
                write!(f, "line {line}: data before any section header")
            }
            GeometryError::UnknownSection { line, name } => {
                write!(f, "line {line}: unknown section [{name}]")
            }
            GeometryError::PointArity { line, expected, found } => {
                write!(f, "line {line}: point has {found} values, expected {expected}")
            }
            GeometryError::IndexArity { line, found } => {
                write!(f, "line {line}: triangle has {found} indices, expected 3")
            }
            GeometryError::InvalidNumber { line, token } => {
                write!(f, "line {line}: invalid number `{token}`")
            }
            GeometryError::IndexOutOfRange { line, token } => {
                write!(f, "line {line}: index `{token}` out of range")
            }
            GeometryError::MissingPoint { line, index, point_count } => write!(
                f,
                "line {line}: index {index} refers to a missing point ({point_count} points)"
            ),
            GeometryError::Obj { path, source } => {
                write!(f, "failed to load OBJ {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for GeometryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GeometryError::Io { source, .. } => Some(source),
            GeometryError::Obj { source, .. } => Some(source),
            _ => None,
        }
    }
}
