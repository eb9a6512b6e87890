//! Asset loading: seekable OBJ reader producing flat vertex attribute streams.

pub mod error;
pub mod mesh;
pub mod obj;

pub use error::{Attribute, ObjError, ObjResult};
pub use mesh::ObjectData;
pub use obj::{ObjFile, ScanExtent};
