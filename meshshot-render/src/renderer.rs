/// Software rasterizer that draws projected primitives into an RGB canvas
use image::{Rgb, RgbImage};

/// A point in screen space: `(x, y, depth)`
pub type ScreenPoint = (f64, f64, f64);

/// RGB canvas with alpha-blended triangle, line and point drawing
pub struct Rasterizer {
    width: u32,
    height: u32,
    canvas: RgbImage,
}

impl Rasterizer {
    pub fn new(width: u32, height: u32, background: Rgb<u8>) -> Self {
        Self {
            width,
            height,
            canvas: RgbImage::from_pixel(width, height, background),
        }
    }

    /// Consume the rasterizer and hand back the finished image
    pub fn into_image(self) -> RgbImage {
        self.canvas
    }

    fn blend(&mut self, x: i64, y: i64, color: Rgb<u8>, alpha: f32) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let dst = self.canvas.get_pixel_mut(x as u32, y as u32);
        for c in 0..3 {
            let blended = color[c] as f32 * alpha + dst[c] as f32 * (1.0 - alpha);
            dst[c] = blended.round().clamp(0.0, 255.0) as u8;
        }
    }

    /// Fill a triangle, blending over whatever was drawn before
    pub fn fill_triangle(&mut self, coords: &[ScreenPoint; 3], color: Rgb<u8>, alpha: f32) {
        let (v0, v1, v2) = (coords[0], coords[1], coords[2]);

        // Bounding box
        let min_x = v0.0.min(v1.0).min(v2.0).floor() as i64;
        let max_x = v0.0.max(v1.0).max(v2.0).ceil() as i64;
        let min_y = v0.1.min(v1.1).min(v2.1).floor() as i64;
        let max_y = v0.1.max(v1.1).max(v2.1).ceil() as i64;

        // Clip to canvas bounds
        let min_x = min_x.max(0);
        let max_x = max_x.min(self.width as i64 - 1);
        let min_y = min_y.max(0);
        let max_y = max_y.min(self.height as i64 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f64 + 0.5;
                let py = y as f64 + 0.5;

                if let Some((w0, w1, w2)) =
                    barycentric((v0.0, v0.1), (v1.0, v1.1), (v2.0, v2.1), (px, py))
                {
                    if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                        self.blend(x, y, color, alpha);
                    }
                }
            }
        }
    }

    /// Draw a one-pixel line segment by uniform stepping along the major axis
    pub fn draw_line(&mut self, from: ScreenPoint, to: ScreenPoint, color: Rgb<u8>, alpha: f32) {
        let (dx, dy) = (to.0 - from.0, to.1 - from.1);
        let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as usize;

        let mut last = None;
        for i in 0..=steps {
            let t = i as f64 / steps as f64;
            let x = (from.0 + dx * t).floor() as i64;
            let y = (from.1 + dy * t).floor() as i64;
            // Avoid double-blending the same pixel
            if last == Some((x, y)) {
                continue;
            }
            last = Some((x, y));
            self.blend(x, y, color, alpha);
        }
    }

    /// Draw a filled disc marker. Markers never shrink below the pixel they sit on.
    pub fn draw_point(&mut self, center: ScreenPoint, radius: f64, color: Rgb<u8>, alpha: f32) {
        let r = radius.max(0.75);
        let min_x = (center.0 - r).floor() as i64;
        let max_x = (center.0 + r).ceil() as i64;
        let min_y = (center.1 - r).floor() as i64;
        let max_y = (center.1 + r).ceil() as i64;

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let ddx = x as f64 + 0.5 - center.0;
                let ddy = y as f64 + 0.5 - center.1;
                if ddx * ddx + ddy * ddy <= r * r {
                    self.blend(x, y, color, alpha);
                }
            }
        }
    }
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f64, f64),
    v1: (f64, f64),
    v2: (f64, f64),
    p: (f64, f64),
) -> Option<(f64, f64, f64)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-12 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
    const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

    #[test]
    fn test_barycentric_inside_and_degenerate() {
        let (w0, w1, w2) = barycentric((0.0, 0.0), (10.0, 0.0), (0.0, 10.0), (2.0, 2.0)).unwrap();
        assert!(w0 > 0.0 && w1 > 0.0 && w2 > 0.0);
        assert!((w0 + w1 + w2 - 1.0).abs() < 1e-12);

        assert!(barycentric((0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (1.0, 1.0)).is_none());
    }

    #[test]
    fn test_fill_triangle_opaque() {
        let mut r = Rasterizer::new(20, 20, WHITE);
        r.fill_triangle(&[(0.0, 0.0, 0.0), (20.0, 0.0, 0.0), (0.0, 20.0, 0.0)], BLACK, 1.0);
        let image = r.into_image();
        assert_eq!(*image.get_pixel(2, 2), BLACK);
        assert_eq!(*image.get_pixel(18, 18), WHITE);
    }

    #[test]
    fn test_alpha_blend_layers() {
        let mut r = Rasterizer::new(4, 4, WHITE);
        let quad = [(0.0, 0.0, 0.0), (8.0, 0.0, 0.0), (0.0, 8.0, 0.0)];
        r.fill_triangle(&quad, BLACK, 0.5);
        assert_eq!(r.canvas.get_pixel(0, 0)[0], 128);
        r.fill_triangle(&quad, BLACK, 0.5);
        assert_eq!(r.canvas.get_pixel(0, 0)[0], 64);
    }

    #[test]
    fn test_line_and_point_clip_to_canvas() {
        let mut r = Rasterizer::new(10, 10, WHITE);
        r.draw_line((-5.0, 5.5, 0.0), (15.0, 5.5, 0.0), BLACK, 1.0);
        r.draw_point((-100.0, -100.0, 0.0), 3.0, BLACK, 1.0);
        let image = r.into_image();
        assert!((0..10).all(|x| *image.get_pixel(x, 5) == BLACK));
        assert_eq!(*image.get_pixel(0, 0), WHITE);
    }
}
