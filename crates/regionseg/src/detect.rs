use crate::core::GrayImageView;
use crate::regions::{RegionConstraints, RegionDetectError, RegionDetector, Regions};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Convert an `image::GrayImage` into the lightweight `regionseg-core` view type.
pub fn gray_view(img: &::image::GrayImage) -> GrayImageView<'_> {
    GrayImageView {
        width: img.width() as usize,
        height: img.height() as usize,
        data: img.as_raw(),
    }
}

/// Run `detector` on an 8-bit grayscale image.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(detector, img), fields(width = img.width(), height = img.height()))
)]
pub fn detect_regions<'d>(
    detector: &'d mut RegionDetector,
    img: &::image::GrayImage,
) -> Result<Regions<'d>, RegionDetectError> {
    detector.detect(&gray_view(img))
}

/// Threshold `img` at `threshold` and detect regions on the binary result.
///
/// Pixels `>= threshold` become 255, the rest 0; only regions within
/// `constraints` are reported.
pub fn detect_binary_regions<'d>(
    detector: &'d mut RegionDetector,
    img: &::image::GrayImage,
    threshold: u8,
    constraints: RegionConstraints,
) -> Result<Regions<'d>, RegionDetectError> {
    let binary = ::image::GrayImage::from_fn(img.width(), img.height(), |x, y| {
        ::image::Luma([if img.get_pixel(x, y)[0] >= threshold { 255 } else { 0 }])
    });
    detector.detect_with(&gray_view(&binary), constraints)
}
