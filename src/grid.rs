use rand::Rng;

use crate::error::ConfigError;

/// Integer coordinate type for grid cells (not world units)
pub type Coord = i32;

/// Smallest side length that leaves room for a snake and a piece of food.
pub const MIN_SIDE: Coord = 2;
pub const MAX_SIDE: Coord = 1024;

/// Quotients this close to a whole number count as that number, so a
/// 12-wide field of 0.1 cells is 120 cells and not 119.
const SNAP_EPSILON: f64 = 1e-4;

/// One square of the playing field. Game logic only ever compares these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: Coord,
    pub z: Coord,
}

impl Cell {
    #[inline]
    pub const fn new(x: Coord, z: Coord) -> Self {
        Self { x, z }
    }

    /// The neighbouring cell one step along `heading`.
    #[inline]
    pub fn step(self, heading: Heading) -> Self {
        let (dx, dz) = heading.dx_dz();
        Self::new(self.x + dx, self.z + dz)
    }

    /// True when `other` is one orthogonal step away.
    #[inline]
    pub fn is_adjacent(self, other: Self) -> bool {
        (self.x - other.x).abs() + (self.z - other.z).abs() == 1
    }
}

/// Axis-aligned direction of travel on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Heading {
    PosX,
    NegX,
    PosZ,
    NegZ,
}

impl Heading {
    #[inline]
    pub fn dx_dz(self) -> (Coord, Coord) {
        match self {
            Self::PosX => (1, 0),
            Self::NegX => (-1, 0),
            Self::PosZ => (0, 1),
            Self::NegZ => (0, -1),
        }
    }

    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Self::PosX => Self::NegX,
            Self::NegX => Self::PosX,
            Self::PosZ => Self::NegZ,
            Self::NegZ => Self::PosZ,
        }
    }

    #[inline]
    pub fn is_opposite(self, other: Self) -> bool {
        self.opposite() == other
    }
}

/// Square playing field of `side` cells, centred on the origin.
///
/// Valid coordinates on both axes run over `-side/2 ..= side - side/2 - 1`,
/// so an even side of 12 spans `-6..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    side: Coord,
}

impl Grid {
    pub fn new(side: Coord) -> Result<Self, ConfigError> {
        if side < MIN_SIDE {
            return Err(ConfigError::FieldTooSmall {
                side: side.into(),
                min: MIN_SIDE,
            });
        }
        if side > MAX_SIDE {
            return Err(ConfigError::FieldTooLarge {
                side: side.into(),
                max: MAX_SIDE,
            });
        }
        Ok(Self { side })
    }

    /// Derive the grid from a field measured in world units.
    pub fn from_field(field_width: f32, cell_size: f32) -> Result<Self, ConfigError> {
        if !field_width.is_finite() || field_width <= 0.0 {
            return Err(ConfigError::InvalidFieldWidth(field_width));
        }
        if !cell_size.is_finite() || cell_size <= 0.0 {
            return Err(ConfigError::InvalidCellSize(cell_size));
        }
        let quotient = field_width as f64 / cell_size as f64;
        let nearest = quotient.round();
        let side = if (quotient - nearest).abs() < SNAP_EPSILON {
            nearest
        } else {
            quotient.floor()
        };
        // Saturating cast; anything past the limit is rejected below.
        let side = side as i64;
        if side > MAX_SIDE as i64 {
            return Err(ConfigError::FieldTooLarge {
                side,
                max: MAX_SIDE,
            });
        }
        Self::new(side as Coord)
    }

    pub fn side(&self) -> Coord {
        self.side
    }

    /// Lowest valid coordinate on either axis.
    pub fn min(&self) -> Coord {
        -(self.side / 2)
    }

    /// Highest valid coordinate on either axis (inclusive).
    pub fn max(&self) -> Coord {
        self.min() + self.side - 1
    }

    pub fn is_valid(&self, cell: Cell) -> bool {
        let range = self.min()..=self.max();
        range.contains(&cell.x) && range.contains(&cell.z)
    }

    pub fn cell_count(&self) -> usize {
        (self.side as usize) * (self.side as usize)
    }

    /// All valid cells, row by row (z outer, x inner).
    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        let (min, max) = (self.min(), self.max());
        (min..=max).flat_map(move |z| (min..=max).map(move |x| Cell::new(x, z)))
    }

    /// World-space centre of `cell` on a field centred on the origin,
    /// for presentation layers only.
    pub fn to_world(&self, cell: Cell, cell_size: f32) -> (f32, f32) {
        let half = self.side as f32 / 2.0;
        let axis = |c: Coord| ((c - self.min()) as f32 + 0.5 - half) * cell_size;
        (axis(cell.x), axis(cell.z))
    }

    /// Uniformly random valid cell.
    pub fn random_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Cell {
        let range = self.min()..=self.max();
        Cell::new(rng.random_range(range.clone()), rng.random_range(range))
    }
}
