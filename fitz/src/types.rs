use nalgebra::matrix;

pub use nalgebra::{Affine2, Point2, Vector2};

/// Axis-aligned rectangle in page space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl Rect {
    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }
}

impl From<fitz_sys::fz_rect> for Rect {
    fn from(other: fitz_sys::fz_rect) -> Self {
        Self {
            x0: other.x0,
            y0: other.y0,
            x1: other.x1,
            y1: other.y1,
        }
    }
}

impl From<Rect> for fitz_sys::fz_rect {
    fn from(other: Rect) -> Self {
        Self {
            x0: other.x0,
            y0: other.y0,
            x1: other.x1,
            y1: other.y1,
        }
    }
}

/// Axis-aligned rectangle in device space, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IRect {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl IRect {
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub fn from_size(width: u32, height: u32) -> Self {
        Self {
            x0: 0,
            y0: 0,
            x1: width as i32,
            y1: height as i32,
        }
    }

    pub fn width(&self) -> i32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> i32 {
        self.y1 - self.y0
    }

    pub fn is_empty(&self) -> bool {
        self.x1 <= self.x0 || self.y1 <= self.y0
    }
}

impl From<fitz_sys::fz_irect> for IRect {
    fn from(other: fitz_sys::fz_irect) -> Self {
        Self {
            x0: other.x0,
            y0: other.y0,
            x1: other.x1,
            y1: other.y1,
        }
    }
}

impl From<IRect> for fitz_sys::fz_irect {
    fn from(other: IRect) -> Self {
        Self {
            x0: other.x0,
            y0: other.y0,
            x1: other.x1,
            y1: other.y1,
        }
    }
}

pub fn affine_from_fzmatrix(m: &fitz_sys::fz_matrix) -> Affine2<f32> {
    Affine2::from_matrix_unchecked(matrix![
        m.a, m.c, m.e;
        m.b, m.d, m.f;
        0.0, 0.0, 1.0;
    ])
}

pub fn affine_to_fzmatrix(m: &Affine2<f32>) -> fitz_sys::fz_matrix {
    fitz_sys::fz_matrix {
        a: m[(0, 0)],
        b: m[(1, 0)],
        c: m[(0, 1)],
        d: m[(1, 1)],
        e: m[(0, 2)],
        f: m[(1, 2)],
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_irect_is_empty() {
        assert!(IRect::new(0, 0, 0, 100).is_empty());
        assert!(IRect::new(10, 10, 10, 10).is_empty());
        assert!(IRect::new(0, 0, -5, 100).is_empty());
        assert!(!IRect::new(0, 0, 1, 1).is_empty());
        assert!(!IRect::new(-10, -10, 10, 10).is_empty());
    }

    #[test]
    fn test_irect_size() {
        let rect = IRect::new(10, 20, 110, 220);
        assert_eq!(rect.width(), 100);
        assert_eq!(rect.height(), 200);

        assert_eq!(IRect::from_size(640, 480), IRect::new(0, 0, 640, 480));
    }

    #[test]
    fn test_rect_conversion() {
        let sys = fitz_sys::fz_rect {
            x0: 0.0,
            y0: 36.5,
            x1: 595.0,
            y1: 842.0,
        };

        let rect = Rect::from(sys);
        assert_eq!(rect.width(), 595.0);
        assert_eq!(rect.height(), 805.5);
        assert_eq!(fitz_sys::fz_rect::from(rect), sys);
    }

    #[test]
    fn test_matrix_conversion_roundtrip() {
        let m = Affine2::from_matrix_unchecked(matrix![
            1.5, 0.0, 10.0;
            0.0, -1.5, 842.0;
            0.0, 0.0, 1.0;
        ]);

        let sys = affine_to_fzmatrix(&m);
        assert_eq!(sys.a, 1.5);
        assert_eq!(sys.d, -1.5);
        assert_eq!(sys.e, 10.0);
        assert_eq!(sys.f, 842.0);

        assert_eq!(affine_from_fzmatrix(&sys), m);
    }
}
