//! Seekable OBJ reader: indexes `o` objects once, decodes one object on demand.
//!
//! Supported subset: `o`, `v`, `vt`, `vn` and triangular `f` lines. Every other
//! directive (`g`, `s`, `usemtl`, `mtllib`, comments) is ignored.

use std::{
    collections::HashMap,
    fs::File,
    io::{self, BufRead, BufReader, Cursor, Seek, SeekFrom},
    path::Path,
    str::SplitWhitespace,
};

use crate::error::{Attribute, ObjError, ObjResult};
use crate::mesh::ObjectData;

/// How far [`ObjFile::get_object_with`] reads past the object's `o` line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScanExtent {
    /// Read to end of file, so faces of every later object are included too.
    #[default]
    ToEndOfFile,
    /// Stop at the next `o` line.
    ToNextObject,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct ObjectEntry {
    /// Byte offset just past the `o` line.
    offset: u64,
    /// 1-based line number of the `o` line.
    line: usize,
}

/// An open OBJ source with its object offset table.
pub struct ObjFile<R = BufReader<File>> {
    reader: R,
    offsets: HashMap<String, ObjectEntry>,
    good: bool,
}

impl ObjFile<BufReader<File>> {
    /// Open and index an OBJ file from a path.
    pub fn open(path: impl AsRef<Path>) -> ObjResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ObjError::FileNotFound {
                path: path.to_path_buf(),
            },
            _ => ObjError::Io(e),
        })?;

        let obj = Self::from_reader(BufReader::new(file));
        log::info!(
            "Opened OBJ {:?} with {} object(s)",
            path,
            obj.offsets.len()
        );
        Ok(obj)
    }
}

impl ObjFile<Cursor<Vec<u8>>> {
    /// Index OBJ text held in memory.
    pub fn from_text(contents: impl Into<String>) -> Self {
        Self::from_reader(Cursor::new(contents.into().into_bytes()))
    }
}

impl<R: BufRead + Seek> ObjFile<R> {
    /// Index objects from any seekable reader, starting at its current position.
    ///
    /// A read error during the scan keeps whatever was indexed so far and
    /// clears [`ObjFile::good`].
    pub fn from_reader(mut reader: R) -> Self {
        let mut offsets = HashMap::new();
        let good = match index_objects(&mut reader, &mut offsets) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("OBJ index scan stopped early: {e}");
                false
            }
        };
        Self {
            reader,
            offsets,
            good,
        }
    }

    /// Whether the source opened and was fully indexed.
    pub fn good(&self) -> bool {
        self.good
    }

    /// Names of all indexed objects, in no particular order.
    pub fn list_objects(&self) -> Vec<String> {
        self.offsets.keys().cloned().collect()
    }

    pub fn has_object(&self, name: &str) -> bool {
        self.offsets.contains_key(name)
    }

    /// The object that starts last in the file. Decoding it to end of file
    /// yields only its own faces.
    pub fn last_object(&self) -> Option<&str> {
        self.offsets
            .iter()
            .max_by_key(|(_, entry)| entry.offset)
            .map(|(name, _)| name.as_str())
    }

    /// Decode `name`, reading from its `o` line to the end of the file.
    ///
    /// There is no end-of-object marker: faces of every object after `name`
    /// are emitted as well. Use [`ObjFile::last_object`], single-object files,
    /// or [`ScanExtent::ToNextObject`] to get just one object.
    pub fn get_object(&mut self, name: &str) -> ObjResult<ObjectData> {
        self.get_object_with(name, ScanExtent::ToEndOfFile)
    }

    /// Decode `name` with an explicit scan extent. Positions come back
    /// recentered on their centroid.
    pub fn get_object_with(&mut self, name: &str, extent: ScanExtent) -> ObjResult<ObjectData> {
        let entry = *self
            .offsets
            .get(name)
            .ok_or_else(|| ObjError::ObjectNotFound {
                name: name.to_owned(),
            })?;

        self.reader.seek(SeekFrom::Start(entry.offset))?;
        let mut data = read_object(&mut self.reader, entry.line, extent)?;
        data.recenter();

        log::debug!(
            "Decoded OBJ object '{}': {} positions, {} normals, {} tex coords",
            name,
            data.positions.len(),
            data.normals.len(),
            data.tex_coords.len()
        );
        Ok(data)
    }
}

/// Single forward pass recording `(name, offset after line)` for each `o` line.
fn index_objects<R: BufRead + Seek>(
    reader: &mut R,
    offsets: &mut HashMap<String, ObjectEntry>,
) -> io::Result<()> {
    let mut offset = reader.stream_position()?;
    let mut buf = Vec::new();
    let mut line_no = 0;

    loop {
        buf.clear();
        let read = reader.read_until(b'\n', &mut buf)?;
        if read == 0 {
            break;
        }
        offset += read as u64;
        line_no += 1;

        if buf.first() == Some(&b'o') {
            let name = String::from_utf8_lossy(&buf[1..]).trim().to_owned();
            let entry = ObjectEntry {
                offset,
                line: line_no,
            };
            if let Some(prev) = offsets.insert(name.clone(), entry) {
                log::warn!(
                    "Duplicate OBJ object '{}' on lines {} and {}; keeping the later one",
                    name,
                    prev.line,
                    line_no
                );
            }
        }
    }
    Ok(())
}

/// Raw attribute pools in file order, as referenced by face indices.
#[derive(Default)]
struct Pools {
    positions: Vec<[f32; 3]>,
    tex_coords: Vec<[f32; 2]>,
    normals: Vec<[f32; 3]>,
}

fn read_object<R: BufRead>(
    reader: &mut R,
    start_line: usize,
    extent: ScanExtent,
) -> ObjResult<ObjectData> {
    let mut pools = Pools::default();
    let mut data = ObjectData::default();
    let mut buf = Vec::new();
    let mut line_no = start_line;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_no += 1;

        let text = String::from_utf8_lossy(&buf);
        let line = text.strip_suffix('\n').unwrap_or(&text);
        let line = line.strip_suffix('\r').unwrap_or(line);

        if extent == ScanExtent::ToNextObject && line.starts_with('o') {
            break;
        }
        if line.len() < 4 {
            continue;
        }

        let mut tokens = line.split_whitespace();
        match tokens.next() {
            Some("v") => {
                let [x, y, z] = parse_floats(&mut tokens, line_no, "v")?;
                pools.positions.push([x, y, z]);
            }
            Some("vt") => {
                let [u, v] = parse_floats(&mut tokens, line_no, "vt")?;
                pools.tex_coords.push([u, v]);
            }
            Some("vn") => {
                let [x, y, z] = parse_floats(&mut tokens, line_no, "vn")?;
                pools.normals.push([x, y, z]);
            }
            Some("f") => decode_face(tokens, line_no, &pools, &mut data)?,
            _ => {}
        }
    }

    Ok(data)
}

fn parse_floats<const N: usize>(
    tokens: &mut SplitWhitespace<'_>,
    line_no: usize,
    tag: &'static str,
) -> ObjResult<[f32; N]> {
    let mut out = [0.0; N];
    for slot in &mut out {
        *slot = tokens
            .next()
            .and_then(|t| t.parse::<f32>().ok())
            .ok_or(ObjError::MalformedAttribute { line: line_no, tag })?;
    }
    Ok(out)
}

/// Raw indices of one face corner; 0 means absent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct FaceVertex {
    position: i64,
    tex_coord: i64,
    normal: i64,
}

/// `p`, `p/t/n`, `p//n`; a lone second index (`p/x`) is a normal.
/// A non-numeric second or third piece ends the corner there.
fn parse_face_vertex(token: &str) -> Option<FaceVertex> {
    let mut nums = token
        .split('/')
        .filter(|s| !s.is_empty())
        .map(str::parse::<i64>);

    let position = nums.next()?.ok()?;
    let (tex_coord, normal) = match nums.next() {
        Some(Ok(second)) => match nums.next() {
            Some(Ok(third)) => (second, third),
            _ => (0, second),
        },
        _ => (0, 0),
    };

    Some(FaceVertex {
        position,
        tex_coord,
        normal,
    })
}

/// 1-based positive, end-relative negative, 0 for "absent".
fn resolve_index(
    raw: i64,
    len: usize,
    kind: Attribute,
    line_no: usize,
) -> ObjResult<Option<usize>> {
    if raw == 0 {
        return Ok(None);
    }
    let idx = if raw > 0 { raw - 1 } else { len as i64 + raw };
    if idx < 0 || idx as usize >= len {
        return Err(ObjError::IndexOutOfRange {
            line: line_no,
            kind,
            index: raw,
            len,
        });
    }
    Ok(Some(idx as usize))
}

fn decode_face(
    tokens: SplitWhitespace<'_>,
    line_no: usize,
    pools: &Pools,
    data: &mut ObjectData,
) -> ObjResult<()> {
    let corners: Vec<&str> = tokens.collect();
    if corners.len() > 3 {
        return Err(ObjError::UnsupportedFace {
            line: line_no,
            vertices: corners.len(),
        });
    }

    for i in 0..3 {
        let token = corners.get(i).copied().unwrap_or("");
        let fv = parse_face_vertex(token).ok_or_else(|| ObjError::MalformedFace {
            line: line_no,
            token: token.to_owned(),
        })?;

        if let Some(idx) =
            resolve_index(fv.position, pools.positions.len(), Attribute::Position, line_no)?
        {
            data.positions.push(pools.positions[idx]);
        }
        if let Some(idx) = resolve_index(fv.normal, pools.normals.len(), Attribute::Normal, line_no)?
        {
            data.normals.push(pools.normals[idx]);
        }
        if let Some(idx) = resolve_index(
            fv.tex_coord,
            pools.tex_coords.len(),
            Attribute::TexCoord,
            line_no,
        )? {
            data.tex_coords.push(pools.tex_coords[idx]);
        }
    }
    Ok(())
}
