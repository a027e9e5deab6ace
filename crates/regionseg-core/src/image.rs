//! Single-channel scalar image buffers.

use std::fmt::Debug;

/// Errors raised when wrapping raw pixel buffers.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ImageError {
    #[error("invalid image buffer length (expected {expected} pixels, got {got})")]
    InvalidBuffer { expected: usize, got: usize },
}

/// Integer pixel type usable for region labeling.
///
/// Regions are defined by exact equality of pixel values, so only integral
/// depths are supported.
pub trait Scalar: Copy + PartialEq + Debug + Send + Sync + 'static {
    /// Widen the pixel value to the common value type used for filtering.
    fn to_i32(self) -> i32;
}

macro_rules! impl_scalar {
    ($($t:ty),*) => {
        $(impl Scalar for $t {
            #[inline]
            fn to_i32(self) -> i32 {
                self as i32
            }
        })*
    };
}

impl_scalar!(u8, i8, u16, i16, i32);

/// Borrowed, row-major single-channel image.
#[derive(Clone, Copy, Debug)]
pub struct ScalarImageView<'a, T: Scalar = u8> {
    pub width: usize,
    pub height: usize,
    pub data: &'a [T], // row-major, len = w*h
}

/// 8-bit grayscale view, the most common detector input.
pub type GrayImageView<'a> = ScalarImageView<'a, u8>;

impl<'a, T: Scalar> ScalarImageView<'a, T> {
    /// Wrap a raw buffer, checking that its length matches `width * height`.
    pub fn new(width: usize, height: usize, data: &'a [T]) -> Result<Self, ImageError> {
        let expected = width * height;
        if data.len() != expected {
            return Err(ImageError::InvalidBuffer {
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// `true` if the image has no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.data.is_empty()
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> T {
        self.data[y * self.width + x]
    }

    /// Row `y` as a slice.
    #[inline]
    pub fn row(&self, y: usize) -> &'a [T] {
        let start = y * self.width;
        &self.data[start..start + self.width]
    }
}

/// Owned counterpart of [`ScalarImageView`].
#[derive(Clone, Debug, PartialEq)]
pub struct ScalarImage<T: Scalar = u8> {
    pub width: usize,
    pub height: usize,
    pub data: Vec<T>,
}

pub type GrayImage = ScalarImage<u8>;

impl<T: Scalar> ScalarImage<T> {
    pub fn new(width: usize, height: usize, data: Vec<T>) -> Result<Self, ImageError> {
        let expected = width * height;
        if data.len() != expected {
            return Err(ImageError::InvalidBuffer {
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Build an image by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            data,
        }
    }

    pub fn view(&self) -> ScalarImageView<'_, T> {
        ScalarImageView {
            width: self.width,
            height: self.height,
            data: &self.data,
        }
    }
}
