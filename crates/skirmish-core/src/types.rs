//! Fundamental geometric and simulation types.

use std::ops::{Add, AddAssign, Neg, Sub};

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// 2D kinematic vector (units per tick when used as a velocity).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

/// Continuous position in arena space. y grows downwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Bounding box extent, fixed when the entity is created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

/// Axis-aligned bounding box on the rendered (integer) grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// Extent of the overlap between two bounding boxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intersection {
    pub width: i32,
    pub height: i32,
}

/// Stable identity of an entity, never reused within a world.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u64);

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl Vector2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Vector of the given length pointing along `direction` (radians, atan2 convention).
    pub fn from_polar(magnitude: f64, direction: f64) -> Self {
        (DVec2::from_angle(direction) * magnitude).into()
    }

    pub fn magnitude(&self) -> f64 {
        DVec2::from(*self).length()
    }

    /// Angle in radians, `atan2(y, x)`. The zero vector points along +x.
    pub fn direction(&self) -> f64 {
        self.y.atan2(self.x)
    }

    /// Rescale to `magnitude`, keeping the current direction.
    pub fn set_magnitude(&mut self, magnitude: f64) {
        *self = Self::from_polar(magnitude, self.direction());
    }

    /// Rotate to `direction`, keeping the current magnitude.
    pub fn set_direction(&mut self, direction: f64) {
        *self = Self::from_polar(self.magnitude(), direction);
    }

    pub fn with_magnitude(mut self, magnitude: f64) -> Self {
        self.set_magnitude(magnitude);
        self
    }

    pub fn opposite(self) -> Self {
        -self
    }

    /// Shrink the magnitude by `amount`, stopping at zero rather than reversing.
    pub fn apply_friction(&mut self, amount: f64) {
        let magnitude = self.magnitude();
        if magnitude > amount {
            self.set_magnitude(magnitude - amount);
        } else {
            self.set_magnitude(0.0);
        }
    }

    /// Cap the magnitude at `max`.
    pub fn clamp_magnitude(&mut self, max: f64) {
        if self.magnitude() > max {
            self.set_magnitude(max);
        }
    }
}

impl From<DVec2> for Vector2 {
    fn from(v: DVec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl From<Vector2> for DVec2 {
    fn from(v: Vector2) -> Self {
        DVec2::new(v.x, v.y)
    }
}

impl Add for Vector2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        (DVec2::from(self) + DVec2::from(rhs)).into()
    }
}

impl AddAssign for Vector2 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Vector2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        (DVec2::from(self) - DVec2::from(rhs)).into()
    }
}

impl Neg for Vector2 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Rendered position: each axis truncated toward zero.
    pub fn rendered(&self) -> (i32, i32) {
        (self.x as i32, self.y as i32)
    }

    /// Euclidean distance to another position.
    pub fn distance_to(&self, other: &Position) -> f64 {
        DVec2::new(self.x, self.y).distance(DVec2::new(other.x, other.y))
    }

    pub fn translate(&mut self, delta: Vector2) {
        self.x += delta.x;
        self.y += delta.y;
    }
}

impl Size {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

impl Bounds {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Box occupied by an entity at `position` with `size`.
    pub fn at(position: &Position, size: Size) -> Self {
        let (x, y) = position.rendered();
        Self::new(x, y, size.width, size.height)
    }

    /// Center on the integer grid (half extents use integer division).
    pub fn center(&self) -> Vector2 {
        Vector2::new(
            (self.x + self.width / 2) as f64,
            (self.y + self.height / 2) as f64,
        )
    }

    /// Vector from this box's center to `other`'s center.
    pub fn center_offset(&self, other: &Bounds) -> Vector2 {
        other.center() - self.center()
    }

    /// Overlap with `other`, present only when both extents are positive.
    pub fn intersection(&self, other: &Bounds) -> Option<Intersection> {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = (self.x + self.width).min(other.x + other.width);
        let bottom = (self.y + self.height).min(other.y + other.height);
        let width = right - left;
        let height = bottom - top;
        (width > 0 && height > 0).then_some(Intersection { width, height })
    }
}

impl SimTime {
    /// Seconds per tick at the default tick rate.
    pub fn dt(&self) -> f64 {
        1.0 / crate::constants::TICK_RATE as f64
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs += self.dt();
    }
}
