use crate::core::vector::Vec2;
use crate::error::{Error, Result};

/// Axis-aligned simulation rectangle `[0, width] x [0, height]`.
///
/// The size comes from the viewport; the engine uses it both for culling and
/// for the neutron containment heuristic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    /// Create bounds after validating that both extents are finite and > 0.
    pub fn new(width: f64, height: f64) -> Result<Self> {
        if !width.is_finite() || width <= 0.0 {
            return Err(Error::InvalidParam("width must be finite and > 0".into()));
        }
        if !height.is_finite() || height <= 0.0 {
            return Err(Error::InvalidParam("height must be finite and > 0".into()));
        }
        Ok(Self { width, height })
    }

    /// Whether the point lies inside the rectangle (edges included).
    #[inline]
    pub fn contains(&self, p: &Vec2) -> bool {
        p.x >= 0.0 && p.x <= self.width && p.y >= 0.0 && p.y <= self.height
    }

    /// Whether a circle of `radius` at `p` pokes past the left or right edge.
    #[inline]
    pub fn crosses_x(&self, p: &Vec2, radius: f64) -> bool {
        p.x < radius || p.x + radius > self.width
    }

    /// Whether a circle of `radius` at `p` pokes past the top or bottom edge.
    #[inline]
    pub fn crosses_y(&self, p: &Vec2, radius: f64) -> bool {
        p.y < radius || p.y + radius > self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degenerate_bounds_rejected() {
        assert!(Bounds::new(0.0, 10.0).is_err());
        assert!(Bounds::new(10.0, -1.0).is_err());
        assert!(Bounds::new(f64::NAN, 10.0).is_err());
    }

    #[test]
    fn contains_includes_edges() -> Result<()> {
        let b = Bounds::new(800.0, 600.0)?;
        assert!(b.contains(&Vec2::new(0.0, 0.0)));
        assert!(b.contains(&Vec2::new(800.0, 600.0)));
        assert!(!b.contains(&Vec2::new(-1.0, 300.0)));
        assert!(!b.contains(&Vec2::new(801.0, 300.0)));
        assert!(!b.contains(&Vec2::new(400.0, 600.5)));
        Ok(())
    }

    #[test]
    fn crossing_accounts_for_radius() -> Result<()> {
        let b = Bounds::new(100.0, 50.0)?;
        assert!(b.crosses_x(&Vec2::new(4.0, 25.0), 5.0));
        assert!(b.crosses_x(&Vec2::new(96.0, 25.0), 5.0));
        assert!(!b.crosses_x(&Vec2::new(50.0, 25.0), 5.0));
        assert!(b.crosses_y(&Vec2::new(50.0, 46.0), 5.0));
        assert!(!b.crosses_y(&Vec2::new(50.0, 25.0), 5.0));
        Ok(())
    }
}
