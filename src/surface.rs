use tracing::warn;

use crate::color::Rgb;

/// A point in surface coordinates. Integer coordinates sit on pixel boundaries: pixel `(x, y)`
/// covers the square from `(x, y)` to `(x + 1, y + 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: u32,
    pub y: u32,
}

impl Point {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// A raster surface of fixed pixel dimensions that grid views paint onto.
pub trait Surface {
    /// Intrinsic width in pixels.
    fn width(&self) -> u32;

    /// Intrinsic height in pixels.
    fn height(&self) -> u32;

    /// Stroke a 1px wide line from `from` to `to`.
    ///
    /// Grid views only ever stroke horizontal and vertical lines. Surfaces may ignore anything
    /// else.
    fn stroke_line(&mut self, from: Point, to: Point, color: Rgb);

    /// Fill the `w` by `h` block of pixels whose top left pixel is `(x, y)`.
    fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, color: Rgb);

    fn size(&self) -> (u32, u32) {
        (self.width(), self.height())
    }
}

/// An in-memory RGB pixel buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    /// Row-major pixels, `pixels[y * width + x]`
    pixels: Vec<Rgb>,

    width: u32,
    height: u32,
}

impl Raster {
    /// A `width` by `height` raster, all black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: vec![Rgb::BLACK; width as usize * height as usize],
            width,
            height,
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgb {
        assert!(x < self.width, "x is out of bounds");
        assert!(y < self.height, "y is out of bounds");

        self.pixels[self.xy_from(x, y)]
    }

    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    /// Pixels of row `y`, left to right.
    pub fn row(&self, y: u32) -> &[Rgb] {
        let start = self.xy_from(0, y);
        &self.pixels[start..start + self.width as usize]
    }

    /// Dump the raster as text, one character per pixel and one line per row. Handy for eyeballing
    /// small grids.
    pub fn to_ascii<F>(&self, mut f: F) -> String
    where
        F: FnMut(Rgb) -> char,
    {
        let mut s = String::with_capacity((self.width as usize + 1) * self.height as usize);

        for y in 0..self.height {
            s.extend(self.row(y).iter().map(|&px| f(px)));
            s.push('\n');
        }

        s
    }

    fn xy_from(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

impl Surface for Raster {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    // A stroke centred on boundary `x` straddles pixels `x - 1` and `x`; it is snapped to the
    // left/upper one. Anything past the edge is clipped.
    fn stroke_line(&mut self, from: Point, to: Point, color: Rgb) {
        if from.x == to.x {
            let x = from.x.saturating_sub(1);
            let (y0, y1) = (from.y.min(to.y), from.y.max(to.y).min(self.height));

            if x < self.width {
                for y in y0..y1 {
                    let i = self.xy_from(x, y);
                    self.pixels[i] = color;
                }
            }
        } else if from.y == to.y {
            let y = from.y.saturating_sub(1);
            let (x0, x1) = (from.x.min(to.x), from.x.max(to.x).min(self.width));

            if y < self.height {
                for x in x0..x1 {
                    let i = self.xy_from(x, y);
                    self.pixels[i] = color;
                }
            }
        } else {
            warn!("Ignoring diagonal stroke from {from:?} to {to:?}");
        }
    }

    fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, color: Rgb) {
        let x1 = x.saturating_add(w).min(self.width);
        let y1 = y.saturating_add(h).min(self.height);

        for py in y..y1 {
            for px in x..x1 {
                let i = self.xy_from(px, py);
                self.pixels[i] = color;
            }
        }
    }
}
