//! CPU-side attribute streams produced by the OBJ decoder.

/// One decoded object: one entry per face-vertex, in face order, not shared.
///
/// The three streams are only guaranteed parallel when every face-vertex
/// supplied every attribute. Faces that omit normals or texture coordinates
/// contribute nothing to those streams, so check [`ObjectData::is_renderable`]
/// (or the per-stream helpers) before uploading them as parallel arrays.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ObjectData {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub tex_coords: Vec<[f32; 2]>,
}

impl ObjectData {
    pub fn new(
        positions: Vec<[f32; 3]>,
        normals: Vec<[f32; 3]>,
        tex_coords: Vec<[f32; 2]>,
    ) -> Self {
        Self {
            positions,
            normals,
            tex_coords,
        }
    }

    /// Number of emitted face-vertices (positions).
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn normals_aligned(&self) -> bool {
        self.normals.len() == self.positions.len()
    }

    pub fn tex_coords_aligned(&self) -> bool {
        self.tex_coords.len() == self.positions.len()
    }

    /// Positions present and normals parallel to them; texture coordinates
    /// either absent or parallel too.
    pub fn is_renderable(&self) -> bool {
        !self.is_empty()
            && self.normals_aligned()
            && (self.tex_coords.is_empty() || self.tex_coords_aligned())
    }

    /// Arithmetic mean of all positions, `None` when empty.
    pub fn centroid(&self) -> Option<[f32; 3]> {
        if self.positions.is_empty() {
            return None;
        }
        let mut sum = [0.0f32; 3];
        for p in &self.positions {
            sum[0] += p[0];
            sum[1] += p[1];
            sum[2] += p[2];
        }
        let n = self.positions.len() as f32;
        Some([sum[0] / n, sum[1] / n, sum[2] / n])
    }

    /// Translate positions so their centroid sits at the origin.
    pub fn recenter(&mut self) {
        let Some(c) = self.centroid() else {
            return;
        };
        for p in &mut self.positions {
            p[0] -= c[0];
            p[1] -= c[1];
            p[2] -= c[2];
        }
    }
}
