//! Directions and portal axes, completing the `glam` integer vectors.

use glam::IVec3;


/// Represent a cube facing, also used as a direction to walk blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Face {
    NegY = 0,
    PosY = 1,
    NegZ = 2,
    PosZ = 3,
    NegX = 4,
    PosX = 5,
}

impl Face {

    /// Array containing all 6 faces.
    pub const ALL: [Self; 6] = [Self::NegY, Self::PosY, Self::NegZ, Self::PosZ, Self::NegX, Self::PosX];

    /// West is toward negative X.
    pub const WEST: Self = Self::NegX;
    /// South is toward positive Z.
    pub const SOUTH: Self = Self::PosZ;

    /// Get the opposite face.
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Face::NegY => Face::PosY,
            Face::PosY => Face::NegY,
            Face::NegZ => Face::PosZ,
            Face::PosZ => Face::NegZ,
            Face::NegX => Face::PosX,
            Face::PosX => Face::NegX,
        }
    }

    /// Rotate this face horizontally to left (counter-clockwise seen from above), Y
    /// faces don't change.
    #[inline]
    pub fn rotate_left(self) -> Self {
        match self {
            Face::NegZ => Face::NegX,
            Face::NegX => Face::PosZ,
            Face::PosZ => Face::PosX,
            Face::PosX => Face::NegZ,
            _ => self
        }
    }

    /// Rotate this face horizontally to right (clockwise seen from above), Y faces don't
    /// change.
    #[inline]
    pub fn rotate_right(self) -> Self {
        match self {
            Face::NegZ => Face::PosX,
            Face::PosX => Face::PosZ,
            Face::PosZ => Face::NegX,
            Face::NegX => Face::NegZ,
            _ => self
        }
    }

    /// Get the delta vector for this face.
    #[inline]
    pub fn delta(self) -> IVec3 {
        match self {
            Face::NegY => IVec3::NEG_Y,
            Face::PosY => IVec3::Y,
            Face::NegZ => IVec3::NEG_Z,
            Face::PosZ => IVec3::Z,
            Face::NegX => IVec3::NEG_X,
            Face::PosX => IVec3::X,
        }
    }

    /// Offset the given position by the given distance toward this face, the distance
    /// may be negative to walk toward the opposite face.
    #[inline]
    pub fn offset(self, pos: IVec3, distance: i32) -> IVec3 {
        pos + self.delta() * distance
    }

}


/// The horizontal axis a portal plane extends along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Z,
}

impl Axis {

    /// Get the direction the portal frame is walked toward when measuring its width,
    /// west for the X axis and south for the Z axis.
    #[inline]
    pub fn facing(self) -> Face {
        match self {
            Axis::X => Face::WEST,
            Axis::Z => Face::SOUTH,
        }
    }

    /// Get the face pointing toward the positive end of this axis.
    #[inline]
    pub fn positive(self) -> Face {
        match self {
            Axis::X => Face::PosX,
            Axis::Z => Face::PosZ,
        }
    }

    /// Get the other horizontal axis.
    #[inline]
    pub fn other(self) -> Self {
        match self {
            Axis::X => Axis::Z,
            Axis::Z => Axis::X,
        }
    }

    /// Get the horizontal axis a face is pointing along, none for Y faces.
    #[inline]
    pub fn from_face(face: Face) -> Option<Self> {
        match face {
            Face::NegX | Face::PosX => Some(Axis::X),
            Face::NegZ | Face::PosZ => Some(Axis::Z),
            Face::NegY | Face::PosY => None,
        }
    }

    /// Get the axis stored in a portal block's metadata.
    #[inline]
    pub fn from_metadata(metadata: u8) -> Self {
        if metadata & 1 == 0 { Axis::X } else { Axis::Z }
    }

    /// Get the metadata value of a portal block oriented along this axis.
    #[inline]
    pub fn to_metadata(self) -> u8 {
        match self {
            Axis::X => 0,
            Axis::Z => 1,
        }
    }

}
