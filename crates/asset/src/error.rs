//! Errors produced while opening and decoding OBJ files.

use std::{fmt, io, path::PathBuf};

use thiserror::Error;

/// Which vertex attribute pool an index refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Attribute {
    Position,
    TexCoord,
    Normal,
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Attribute::Position => "position",
            Attribute::TexCoord => "texture coordinate",
            Attribute::Normal => "normal",
        })
    }
}

/// Line numbers are 1-based and absolute within the file.
#[derive(Debug, Error)]
pub enum ObjError {
    #[error("OBJ file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("I/O error while reading OBJ: {0}")]
    Io(#[from] io::Error),

    #[error("Object '{name}' not present in OBJ file")]
    ObjectNotFound { name: String },

    #[error("Malformed face element '{token}' on line {line}: expected a position index")]
    MalformedFace { line: usize, token: String },

    #[error("Unsupported face on line {line}: {vertices} vertices, only triangles are supported")]
    UnsupportedFace { line: usize, vertices: usize },

    #[error("Malformed '{tag}' line {line}: missing or non-numeric component")]
    MalformedAttribute { line: usize, tag: &'static str },

    #[error("OBJ {kind} index {index} resolved out of bounds (len={len}) on line {line}")]
    IndexOutOfRange {
        line: usize,
        kind: Attribute,
        index: i64,
        len: usize,
    },
}

pub type ObjResult<T> = Result<T, ObjError>;
