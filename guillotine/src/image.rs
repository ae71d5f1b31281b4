//! A minimal RGBA8 pixel buffer, used both for the items being packed and for
//! the atlas surface they're packed into.

use crate::geometry::Rect;

const STRIDE: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Pixel {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// A row-major RGBA8 image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    size: (u32, u32),
    data: Vec<u8>,
}

impl Image {
    pub fn new_rgba8<D: Into<Vec<u8>>>(size: (u32, u32), data: D) -> Self {
        let data = data.into();

        assert!(data.len() == size.0 as usize * size.1 as usize * STRIDE);

        Self { size, data }
    }

    pub fn new_empty_rgba8(size: (u32, u32)) -> Self {
        let data = vec![0; size.0 as usize * size.1 as usize * STRIDE];
        Self::new_rgba8(size, data)
    }

    /// An image of the given size where every pixel is `pixel`.
    pub fn new_filled(size: (u32, u32), pixel: Pixel) -> Self {
        let data = [pixel.r, pixel.g, pixel.b, pixel.a].repeat(size.0 as usize * size.1 as usize);

        Self::new_rgba8(size, data)
    }

    #[inline]
    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Copies all of `other` into this image with its minimum corner at `pos`.
    /// When `flipped` is set, the rows of `other` are written bottom to top.
    pub fn blit(&mut self, other: &Image, pos: (u32, u32), flipped: bool) {
        assert!(Rect::from_size(self.size).contains(&Rect::new(pos, other.size)));

        let other_width_bytes = other.size.0 as usize * STRIDE;
        if other_width_bytes == 0 {
            return;
        }

        let other_rows = other.data.chunks_exact(other_width_bytes);
        let last_row = other.size.1.saturating_sub(1);

        for (other_y, other_row) in other_rows.enumerate() {
            let other_y = other_y as u32;
            let self_y = if flipped {
                pos.1 + (last_row - other_y)
            } else {
                pos.1 + other_y
            };

            let start_in_bytes = self.index_of((pos.0, self_y));
            let end_in_bytes = start_in_bytes + other_row.len();

            self.data[start_in_bytes..end_in_bytes].copy_from_slice(other_row);
        }
    }

    /// Copies the pixels inside `rect` out into a new image.
    pub fn sub_image(&self, rect: Rect) -> Image {
        assert!(Rect::from_size(self.size).contains(&rect));

        let row_bytes = rect.width() as usize * STRIDE;
        let mut data = Vec::with_capacity(row_bytes * rect.height() as usize);

        for y in rect.pos.1..rect.max().1 {
            let start = self.index_of((rect.pos.0, y));
            data.extend_from_slice(&self.data[start..start + row_bytes]);
        }

        Image::new_rgba8(rect.size, data)
    }

    /// A copy of this image mirrored vertically.
    pub fn flipped(&self) -> Image {
        let mut output = Image::new_empty_rgba8(self.size);
        output.blit(self, (0, 0), true);
        output
    }

    pub fn get_pixel(&self, pos: (u32, u32)) -> Pixel {
        assert!(pos.0 < self.size.0);
        assert!(pos.1 < self.size.1);

        let start = self.index_of(pos);

        Pixel {
            r: self.data[start],
            g: self.data[start + 1],
            b: self.data[start + 2],
            a: self.data[start + 3],
        }
    }

    pub fn set_pixel(&mut self, pos: (u32, u32), pixel: Pixel) {
        assert!(pos.0 < self.size.0);
        assert!(pos.1 < self.size.1);

        let start = self.index_of(pos);

        self.data[start] = pixel.r;
        self.data[start + 1] = pixel.g;
        self.data[start + 2] = pixel.b;
        self.data[start + 3] = pixel.a;
    }

    fn index_of(&self, pos: (u32, u32)) -> usize {
        STRIDE * (pos.0 as usize + pos.1 as usize * self.size.0 as usize)
    }
}
