//! Coordinate systems for the mirrored sandbox region.
//!
//! Two integer coordinate spaces exist: host world space, and "web" space
//! used on the wire, whose origin sits at the low corner of the sandbox
//! cube. Entities use float variants of the same transform.

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Block position in host world coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorldPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl WorldPos {
    /// Create a new world position
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

/// Block position in sandbox-local (web) coordinates.
///
/// Inside the sandbox every component lies in `[0, 2*radius)`; values
/// outside that range denote a cell beyond the mirrored boundary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WebPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl WebPos {
    /// Create a new web position
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

/// The cubical region of the host world mirrored to web clients.
///
/// Holds the parameters of the world<->web coordinate transform and the
/// boundary predicate. Immutable after construction.
#[derive(Clone, Copy, Debug)]
pub struct Sandbox {
    center: WorldPos,
    radius: i32,
    y_offset: i32,
}

impl Sandbox {
    /// Create a sandbox centered on `center` spanning `2*radius` cells per
    /// axis, with the web Y axis shifted by `y_offset`.
    pub const fn new(center: WorldPos, radius: i32, y_offset: i32) -> Self {
        debug_assert!(radius > 0);
        Self {
            center,
            radius,
            y_offset,
        }
    }

    /// Center of the sandbox in world coordinates.
    #[inline]
    pub const fn center(&self) -> WorldPos {
        self.center
    }

    /// Half-extent of the sandbox cube.
    #[inline]
    pub const fn radius(&self) -> i32 {
        self.radius
    }

    /// Vertical shift applied to the web Y axis.
    #[inline]
    pub const fn y_offset(&self) -> i32 {
        self.y_offset
    }

    /// World coordinate of the low corner of the sandbox on each axis.
    ///
    /// Web space has its origin here; on Y the configured offset shifts
    /// the origin further down.
    #[inline]
    const fn origin(&self) -> WorldPos {
        WorldPos::new(
            self.center.x - self.radius,
            self.center.y - self.radius - self.y_offset,
            self.center.z - self.radius,
        )
    }

    /// Convert a world block position into web space.
    #[inline]
    pub const fn to_web(&self, pos: WorldPos) -> WebPos {
        let origin = self.origin();
        WebPos::new(pos.x - origin.x, pos.y - origin.y, pos.z - origin.z)
    }

    /// Convert a web block position back into world space.
    ///
    /// Exact algebraic inverse of [`Self::to_web`] for all integer inputs.
    #[inline]
    pub const fn to_world(&self, pos: WebPos) -> WorldPos {
        let origin = self.origin();
        WorldPos::new(pos.x + origin.x, pos.y + origin.y, pos.z + origin.z)
    }

    /// Convert a continuous entity position into web space.
    ///
    /// All three components shift together; nothing is rounded.
    #[inline]
    pub fn to_web_entity(&self, pos: DVec3) -> DVec3 {
        let origin = self.origin();
        pos - DVec3::new(f64::from(origin.x), f64::from(origin.y), f64::from(origin.z))
    }

    /// Convert a continuous web-space entity position into world space.
    #[inline]
    pub fn to_world_entity(&self, pos: DVec3) -> DVec3 {
        let origin = self.origin();
        pos + DVec3::new(f64::from(origin.x), f64::from(origin.y), f64::from(origin.z))
    }

    /// Boundary predicate: does `pos` lie inside the mirrored cube?
    ///
    /// Half-open per axis: `center - radius <= c < center + radius`. The
    /// lower bound is inclusive and the upper exclusive, so the region is
    /// exactly `2*radius` cells wide per axis.
    #[inline]
    pub const fn contains(&self, pos: WorldPos) -> bool {
        pos.x >= self.center.x - self.radius
            && pos.x < self.center.x + self.radius
            && pos.y >= self.center.y - self.radius
            && pos.y < self.center.y + self.radius
            && pos.z >= self.center.z - self.radius
            && pos.z < self.center.z + self.radius
    }

    /// Boundary predicate for continuous entity positions.
    ///
    /// The containing block cell is tested, matching the integer predicate.
    #[inline]
    pub fn contains_entity(&self, pos: DVec3) -> bool {
        self.contains(WorldPos::new(
            pos.x.floor() as i32,
            pos.y.floor() as i32,
            pos.z.floor() as i32,
        ))
    }

    /// Iterate every world cell of the sandbox cube, exhaustively.
    pub fn cells(&self) -> impl Iterator<Item = WorldPos> + '_ {
        let r = self.radius;
        let c = self.center;
        (-r..r).flat_map(move |i| {
            (-r..r).flat_map(move |j| {
                (-r..r).map(move |k| WorldPos::new(i + c.x, j + c.y, k + c.z))
            })
        })
    }
}
