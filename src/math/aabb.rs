use glam::Vec3;

/// Axis-aligned bounds of a loaded mesh
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AABB {
    pub min: Vec3,
    pub max: Vec3,
}

impl AABB {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Inverted bounds that any included point replaces
    pub const fn empty() -> Self {
        Self {
            min: Vec3::splat(f32::INFINITY),
            max: Vec3::splat(f32::NEG_INFINITY),
        }
    }

    pub fn from_points<I: IntoIterator<Item = Vec3>>(points: I) -> Self {
        points.into_iter().fold(Self::empty(), |mut bounds, p| {
            bounds.include(p);
            bounds
        })
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    pub fn include(&mut self, point: Vec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    pub fn union(&self, other: &AABB) -> AABB {
        AABB {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn extent(&self) -> Vec3 {
        if self.is_empty() {
            Vec3::ZERO
        } else {
            self.max - self.min
        }
    }
}

impl Default for AABB {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_bounds() {
        let aabb = AABB::empty();
        assert!(aabb.is_empty());
        assert_eq!(aabb.extent(), Vec3::ZERO);
    }

    #[test]
    fn test_from_points() {
        let aabb = AABB::from_points([
            Vec3::new(-1.0, -2.0, -3.0),
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(0.0, 0.0, 0.0),
        ]);
        assert_eq!(aabb.min, Vec3::new(-1.0, -2.0, -3.0));
        assert_eq!(aabb.max, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(aabb.extent(), Vec3::new(2.0, 4.0, 6.0));
    }

    #[test]
    fn test_single_point_is_not_empty() {
        let aabb = AABB::from_points([Vec3::ONE]);
        assert!(!aabb.is_empty());
        assert_eq!(aabb.center(), Vec3::ONE);
    }

    #[test]
    fn test_aabb_center_negative() {
        let aabb = AABB::new(Vec3::new(-2.0, -4.0, -6.0), Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(aabb.center(), Vec3::ZERO);
    }

    #[test]
    fn test_union_with_empty_keeps_other() {
        let aabb = AABB::new(Vec3::ZERO, Vec3::ONE);
        let union = AABB::empty().union(&aabb);
        assert_eq!(union, aabb);
    }

    #[test]
    fn test_aabb_union_non_overlapping() {
        let aabb1 = AABB::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 1.0, 1.0));
        let aabb2 = AABB::new(Vec3::new(2.0, 2.0, 2.0), Vec3::new(3.0, 3.0, 3.0));
        let union = aabb1.union(&aabb2);
        assert_eq!(union.min, Vec3::new(0.0, 0.0, 0.0));
        assert_eq!(union.max, Vec3::new(3.0, 3.0, 3.0));
    }
}
