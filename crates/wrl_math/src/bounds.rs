use glam::Vec3;
use serde::Serialize;

/// Axis-aligned bounding box over a set of points.
///
/// An empty box has `min = +inf` and `max = -inf`, so surrounding it with
/// anything yields the other box unchanged.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct Bounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl Default for Bounds {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Bounds {
    pub const EMPTY: Bounds = Bounds {
        min: Vec3::splat(f32::INFINITY),
        max: Vec3::splat(f32::NEG_INFINITY),
    };

    /// Compute the bounds of a point cloud. Returns [`Bounds::EMPTY`] for no points.
    pub fn from_points<I: IntoIterator<Item = Vec3>>(points: I) -> Self {
        let mut bounds = Self::EMPTY;
        for p in points {
            bounds.extend(p);
        }
        bounds
    }

    /// Grow the box to contain `p`.
    pub fn extend(&mut self, p: Vec3) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    /// Create bounds that surround two other boxes.
    pub fn surrounding(a: &Bounds, b: &Bounds) -> Self {
        Self {
            min: a.min.min(b.min),
            max: a.max.max(b.max),
        }
    }

    /// True if the box contains no points.
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Returns the center point of the bounding box.
    pub fn centroid(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Extent along each axis. Zero for an empty box.
    pub fn size(&self) -> Vec3 {
        if self.is_empty() {
            Vec3::ZERO
        } else {
            self.max - self.min
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_from_points() {
        let bounds = Bounds::from_points([
            Vec3::new(-1.0, -2.0, -3.0),
            Vec3::new(4.0, 5.0, 6.0),
            Vec3::ZERO,
        ]);

        assert_eq!(bounds.min, Vec3::new(-1.0, -2.0, -3.0));
        assert_eq!(bounds.max, Vec3::new(4.0, 5.0, 6.0));
        assert_eq!(bounds.centroid(), Vec3::new(1.5, 1.5, 1.5));
    }

    #[test]
    fn test_empty_bounds() {
        let bounds = Bounds::from_points(std::iter::empty());
        assert!(bounds.is_empty());
        assert_eq!(bounds.size(), Vec3::ZERO);
    }

    #[test]
    fn test_bounds_surrounding() {
        let a = Bounds::from_points([Vec3::ZERO, Vec3::splat(5.0)]);
        let b = Bounds::from_points([Vec3::splat(10.0), Vec3::splat(3.0)]);
        let s = Bounds::surrounding(&a, &b);

        assert_eq!(s.min, Vec3::ZERO);
        assert_eq!(s.max, Vec3::splat(10.0));
        assert_eq!(s.size(), Vec3::splat(10.0));

        // Surrounding with an empty box is a no-op
        assert_eq!(Bounds::surrounding(&a, &Bounds::EMPTY), a);
    }
}
