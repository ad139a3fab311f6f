//! Core coordinate and bounds types shared across the search.

/// Lowest and highest legal block Y, matching the host world's build limit.
pub const MIN_Y: i32 = 0;
pub const MAX_Y: i32 = 255;

/// Horizontal span a `PackedKey` can address without colliding; see
/// [`pack_key`] and the design note in spec.md §9 ("packed key collisions").
pub const MAX_WINDOW_SPAN: i32 = 4096;

/// A single block-grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    pub fn up(self) -> Self {
        Self::new(self.x, self.y + 1, self.z)
    }

    pub fn down(self) -> Self {
        Self::new(self.x, self.y - 1, self.z)
    }

    pub fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }

    pub fn sub(self, other: BlockPos) -> (i32, i32, i32) {
        (self.x - other.x, self.y - other.y, self.z - other.z)
    }

    pub fn manhattan_distance(self, other: BlockPos) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs() + (self.z - other.z).abs()
    }

    pub fn euclidean_distance(self, other: BlockPos) -> f64 {
        let (dx, dy, dz) = self.sub(other);
        ((dx * dx + dy * dy + dz * dz) as f64).sqrt()
    }

    pub fn is_adjacent(self, other: BlockPos) -> bool {
        self.manhattan_distance(other) == 1
    }

    pub fn chunk_x(self) -> i32 {
        self.x.div_euclid(16)
    }

    pub fn chunk_z(self) -> i32 {
        self.z.div_euclid(16)
    }

    pub fn center(self) -> Vec3 {
        Vec3::new(self.x as f64 + 0.5, self.y as f64, self.z as f64 + 0.5)
    }
}

/// A point in continuous world space, used for collision probing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn add(self, other: Vec3) -> Self {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }

    pub fn with_y(self, y: f64) -> Self {
        Self::new(self.x, y, self.z)
    }
}

/// `PackedKey` per spec.md §3: `(x & 0xFFF) << 20 | (y & 0xFF) << 12 | (z & 0xFFF)`.
/// Collisions are impossible within a 4096x256x4096 window, which
/// [`crate::snapshot::WorldSnapshot`] asserts against at construction time.
pub type PackedKey = u32;

pub fn pack_key(pos: BlockPos) -> PackedKey {
    (((pos.x & 0xFFF) as u32) << 20) | (((pos.y & 0xFF) as u32) << 12) | ((pos.z & 0xFFF) as u32)
}

/// Axis-aligned bounding box in continuous space, used by the collision oracle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    pub fn shifted_y(self, dy: f64) -> Self {
        Self::new(self.min.with_y(self.min.y + dy), self.max.with_y(self.max.y + dy))
    }

    /// The single block column (x,z) the box's footprint sits in, and the
    /// inclusive Y range of blocks it overlaps.
    pub fn overlapped_column(self, pos: BlockPos) -> bool {
        let bx = pos.x as f64;
        let bz = pos.z as f64;
        self.min.x < bx + 1.0 && self.max.x > bx && self.min.z < bz + 1.0 && self.max.z > bz
    }
}

/// Axis-aligned rectangle in the XZ plane: a soft (destination-only) or hard
/// (expansion-gating) restriction window per spec.md §4.7.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XzRect {
    pub min_x: i32,
    pub max_x: i32,
    pub min_z: i32,
    pub max_z: i32,
}

impl XzRect {
    pub fn new(min_x: i32, max_x: i32, min_z: i32, max_z: i32) -> Self {
        Self { min_x, max_x, min_z, max_z }
    }

    pub fn grown(self, by: i32) -> Self {
        Self::new(self.min_x - by, self.max_x + by, self.min_z - by, self.max_z + by)
    }

    pub fn contains(self, pos: BlockPos) -> bool {
        pos.x >= self.min_x && pos.x <= self.max_x && pos.z >= self.min_z && pos.z <= self.max_z
    }
}

/// A 3D bounding box of block coordinates, used to size the world snapshot window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockBox {
    pub min: BlockPos,
    pub max: BlockPos,
}

impl BlockBox {
    pub fn new(min: BlockPos, max: BlockPos) -> Self {
        Self { min, max }
    }

    /// The bounding box spanning `start` and every position the goal cares
    /// about, expanded by `padding` blocks in every direction (spec.md §4.1).
    pub fn from_points(points: &[BlockPos], padding: i32) -> Self {
        let mut min = points[0];
        let mut max = points[0];
        for &p in &points[1..] {
            min = BlockPos::new(min.x.min(p.x), min.y.min(p.y), min.z.min(p.z));
            max = BlockPos::new(max.x.max(p.x), max.y.max(p.y), max.z.max(p.z));
        }
        Self::new(
            BlockPos::new(min.x - padding, (min.y - padding).max(MIN_Y), min.z - padding),
            BlockPos::new(max.x + padding, (max.y + padding).min(MAX_Y), max.z + padding),
        )
    }

    pub fn xz_span(self) -> i32 {
        (self.max.x - self.min.x).max(self.max.z - self.min.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_key_is_injective_within_window() {
        let mut seen = std::collections::HashSet::new();
        for x in -10..10 {
            for y in 0..20 {
                for z in -10..10 {
                    let key = pack_key(BlockPos::new(x, y, z));
                    assert!(seen.insert(key), "collision at ({x},{y},{z})");
                }
            }
        }
    }

    #[test]
    fn block_box_from_points_includes_padding() {
        let start = BlockPos::new(0, 64, 0);
        let goal = BlockPos::new(10, 70, -5);
        let bbox = BlockBox::from_points(&[start, goal], 2);
        assert_eq!(bbox.min, BlockPos::new(-2, 62, -7));
        assert_eq!(bbox.max, BlockPos::new(12, 72, 2));
    }
}
