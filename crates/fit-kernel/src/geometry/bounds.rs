use super::point::Point3d;

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Point3d,
    pub max: Point3d,
}

impl BoundingBox {
    pub fn empty() -> Self {
        Self {
            min: Point3d::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3d::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x
    }

    pub fn expand_to_include(&mut self, p: &Point3d) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.min.z = self.min.z.min(p.z);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
        self.max.z = self.max.z.max(p.z);
    }

    pub fn size(&self) -> [f64; 3] {
        [
            self.max.x - self.min.x,
            self.max.y - self.min.y,
            self.max.z - self.min.z,
        ]
    }

    pub fn center(&self) -> Point3d {
        self.min.lerp(&self.max, 0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounding_box_expand() {
        let mut bb = BoundingBox::empty();
        assert!(bb.is_empty());
        bb.expand_to_include(&Point3d::new(0.0, 0.0, 0.0));
        bb.expand_to_include(&Point3d::new(1.0, 2.0, 3.0));
        bb.expand_to_include(&Point3d::new(-1.0, 0.5, 1.0));
        assert!(!bb.is_empty());
        assert_eq!(bb.size(), [2.0, 2.0, 3.0]);
        assert_eq!(bb.center(), Point3d::new(0.0, 1.0, 1.5));
    }
}
