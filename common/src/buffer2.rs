/// Row-major 2-D grid of values, `width * height` long.
#[derive(Debug, Clone, PartialEq)]
pub struct Buffer2<T> {
    pixels: Vec<T>,
    width: usize,
    height: usize,
}

impl<T> Buffer2<T> {
    pub fn new(width: usize, height: usize, pixels: Vec<T>) -> Self {
        assert_eq!(
            pixels.len(),
            width * height,
            "pixels length must equal width * height"
        );
        Self {
            pixels,
            width,
            height,
        }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> &T {
        debug_assert!(x < self.width && y < self.height);
        &self.pixels[y * self.width + x]
    }

    #[inline]
    pub fn get_mut(&mut self, x: usize, y: usize) -> &mut T {
        debug_assert!(x < self.width && y < self.height);
        &mut self.pixels[y * self.width + x]
    }

    /// Value at a possibly out-of-range position, mirrored back into the grid
    /// without repeating the edge sample (`dcb|abcd|cba`).
    #[inline]
    pub fn get_reflected(&self, x: isize, y: isize) -> &T {
        let x = reflect_101(x, self.width);
        let y = reflect_101(y, self.height);
        self.get(x, y)
    }

    /// Value at a possibly out-of-range position, clamped to the nearest edge sample.
    #[inline]
    pub fn get_clamped(&self, x: isize, y: isize) -> &T {
        let x = x.clamp(0, self.width as isize - 1) as usize;
        let y = y.clamp(0, self.height as isize - 1) as usize;
        self.get(x, y)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn pixels(&self) -> &[T] {
        &self.pixels
    }

    #[inline]
    pub fn into_vec(self) -> Vec<T> {
        self.pixels
    }

    pub fn map<U, F>(&self, f: F) -> Buffer2<U>
    where
        F: FnMut(&T) -> U,
    {
        Buffer2 {
            pixels: self.pixels.iter().map(f).collect(),
            width: self.width,
            height: self.height,
        }
    }
}

impl<T: Clone> Buffer2<T> {
    pub fn new_filled(width: usize, height: usize, value: T) -> Self {
        Self {
            pixels: vec![value; width * height],
            width,
            height,
        }
    }
}

fn reflect_101(pos: isize, len: usize) -> usize {
    assert!(len > 0, "cannot reflect into an empty axis");
    if len == 1 {
        return 0;
    }

    let last = len as isize - 1;
    let period = 2 * last;
    let mut pos = pos.rem_euclid(period);
    if pos > last {
        pos = period - pos;
    }
    pos as usize
}
