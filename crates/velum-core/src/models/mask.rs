//! Single-channel dodge/burn opacity masks and brush rasterization.

/// Default opacity of one brush stamp; strokes build up gradually.
pub const DEFAULT_STROKE_OPACITY: f32 = 0.15;

/// Single-channel 8-bit mask with the same dimensions as the image it drives.
///
/// A value of 255 means full strength for the local adjustment at that pixel.
/// The mask is owned and mutated by the caller; the engine only reads it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Mask {
    /// Wrap a single-channel byte vector, validating its length.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self, String> {
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(format!(
                "Mask length mismatch for {}x{}: expected {} bytes, got {}",
                width,
                height,
                expected,
                data.len()
            ));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// All-zero mask (no adjustment anywhere).
    pub fn empty(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Whether the mask matches an image of the given size.
    pub fn matches(&self, width: u32, height: u32) -> bool {
        self.width == width && self.height == height
    }

    /// Normalized strength (0.0-1.0) at a pixel index, 0.0 when out of range.
    #[inline]
    pub fn strength(&self, index: usize) -> f32 {
        self.data.get(index).map_or(0.0, |&v| v as f32 / 255.0)
    }

    /// Alpha-blend a hard circular stamp toward full strength.
    ///
    /// Every pixel whose center lies within `radius` of `(cx, cy)` moves toward
    /// 255 by `opacity`, so repeated stamps accumulate.
    pub fn stamp(&mut self, cx: f32, cy: f32, radius: f32, opacity: f32) {
        let opacity = opacity.clamp(0.0, 1.0);
        if radius <= 0.0 || opacity == 0.0 || self.data.is_empty() {
            return;
        }

        let max_x = self.width as f32 - 1.0;
        let max_y = self.height as f32 - 1.0;
        let x0 = (cx - radius).floor().clamp(0.0, max_x) as u32;
        let x1 = (cx + radius).ceil().clamp(0.0, max_x) as u32;
        let y0 = (cy - radius).floor().clamp(0.0, max_y) as u32;
        let y1 = (cy + radius).ceil().clamp(0.0, max_y) as u32;
        let r2 = radius * radius;

        for y in y0..=y1 {
            let dy = y as f32 + 0.5 - cy;
            for x in x0..=x1 {
                let dx = x as f32 + 0.5 - cx;
                if dx * dx + dy * dy > r2 {
                    continue;
                }
                let i = y as usize * self.width as usize + x as usize;
                let v = self.data[i] as f32;
                self.data[i] = (v + (255.0 - v) * opacity).round().min(255.0) as u8;
            }
        }
    }

    /// Stamp along a polyline at a spacing of half the radius.
    pub fn stroke(&mut self, points: &[(f32, f32)], radius: f32, opacity: f32) {
        let Some(&(first_x, first_y)) = points.first() else {
            return;
        };
        self.stamp(first_x, first_y, radius, opacity);

        let spacing = (radius / 2.0).max(1.0);
        for pair in points.windows(2) {
            let (ax, ay) = pair[0];
            let (bx, by) = pair[1];
            let length = ((bx - ax).powi(2) + (by - ay).powi(2)).sqrt();
            let steps = (length / spacing).ceil() as usize;
            for step in 1..=steps {
                let t = step as f32 / steps as f32;
                self.stamp(ax + (bx - ax) * t, ay + (by - ay) * t, radius, opacity);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_validates_length() {
        assert!(Mask::new(3, 3, vec![0; 9]).is_ok());
        assert!(Mask::new(3, 3, vec![0; 8]).is_err());
    }

    #[test]
    fn test_strength_out_of_range_is_zero() {
        let mask = Mask::new(1, 1, vec![255]).unwrap();
        assert!((mask.strength(0) - 1.0).abs() < 1e-6);
        assert_eq!(mask.strength(5), 0.0);
    }

    #[test]
    fn test_stamp_covers_circle_only() {
        let mut mask = Mask::empty(9, 9);
        mask.stamp(4.5, 4.5, 2.0, 1.0);

        assert_eq!(mask.data()[4 * 9 + 4], 255);
        assert_eq!(mask.data()[4 * 9 + 6], 255);
        assert_eq!(mask.data()[0], 0);
        assert_eq!(mask.data()[2 * 9 + 2], 0);
    }

    #[test]
    fn test_stamps_accumulate() {
        let mut mask = Mask::empty(4, 4);
        mask.stamp(2.0, 2.0, 1.0, 0.5);
        let once = mask.data()[5];
        mask.stamp(2.0, 2.0, 1.0, 0.5);
        let twice = mask.data()[5];

        assert_eq!(once, 128);
        assert!(twice > once && twice < 255, "got {}", twice);
    }

    #[test]
    fn test_stroke_connects_points() {
        let mut mask = Mask::empty(20, 3);
        mask.stroke(&[(1.5, 1.5), (18.5, 1.5)], 1.0, 1.0);

        for x in 1..19 {
            assert_eq!(mask.data()[20 + x], 255, "gap at x={}", x);
        }
    }

    #[test]
    fn test_stamp_off_canvas_is_clipped() {
        let mut mask = Mask::empty(4, 4);
        mask.stamp(-10.0, -10.0, 3.0, 1.0);
        assert!(mask.data().iter().all(|&v| v == 0));
        mask.stamp(0.0, 0.0, 1.0, 1.0);
        assert_eq!(mask.data()[0], 255);
    }
}
