// SPDX-License-Identifier: MPL-2.0
//! Crop geometry: rectangles, orientation classification and the maximal
//! centered crop for a target aspect ratio.

use super::newtypes::{CropSize, ImageDimensions};

/// Orientation of a width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Portrait,
    Landscape,
    Square,
}

/// Classifies a width/height pair. Portrait iff `height > width`.
#[must_use]
pub fn classify_orientation(width: u32, height: u32) -> Orientation {
    use std::cmp::Ordering;

    match height.cmp(&width) {
        Ordering::Greater => Orientation::Portrait,
        Ordering::Less => Orientation::Landscape,
        Ordering::Equal => Orientation::Square,
    }
}

/// Crop rectangle in the image's native pixel coordinates.
///
/// `(x1, y1)` is the top-left corner, `(x2, y2)` the bottom-right corner
/// (exclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CropRectangle {
    pub x1: u32,
    pub y1: u32,
    pub x2: u32,
    pub y2: u32,
}

impl CropRectangle {
    #[must_use]
    pub fn new(x1: u32, y1: u32, x2: u32, y2: u32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.x2.saturating_sub(self.x1)
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.y2.saturating_sub(self.y1)
    }

    /// Returns true if `0 <= x1 < x2 <= width` and `0 <= y1 < y2 <= height`.
    #[must_use]
    pub fn fits_within(&self, image: ImageDimensions) -> bool {
        self.x1 < self.x2 && self.x2 <= image.width && self.y1 < self.y2 && self.y2 <= image.height
    }

    /// Returns true if either side is smaller than the given minimum.
    #[must_use]
    pub fn is_smaller_than(&self, min: CropSize) -> bool {
        self.width() < min.width() || self.height() < min.height()
    }
}

/// Continuous selection geometry as reported by the selection widget while
/// the user drags or resizes the crop handle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionRect {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl SelectionRect {
    #[must_use]
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Builds a selection from its top-left corner and size.
    #[must_use]
    pub fn from_origin_size(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.y2 - self.y1
    }

    /// Returns true if either side is smaller than the given minimum.
    #[must_use]
    pub fn is_smaller_than(&self, min: CropSize) -> bool {
        self.width() < f64::from(min.width()) || self.height() < f64::from(min.height())
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        [self.x1, self.y1, self.x2, self.y2]
            .iter()
            .all(|value| value.is_finite())
    }

    /// Rounds every coordinate to the nearest pixel.
    ///
    /// Returns `None` if a coordinate is negative or too large for a pixel
    /// position after rounding.
    #[must_use]
    pub fn to_crop_rectangle(&self) -> Option<CropRectangle> {
        let [x1, y1, x2, y2] = [self.x1, self.y1, self.x2, self.y2].map(to_pixel);
        Some(CropRectangle::new(x1?, y1?, x2?, y2?))
    }
}

fn to_pixel(value: f64) -> Option<u32> {
    let rounded = round_half_up(value);
    if !(0.0..=f64::from(u32::MAX)).contains(&rounded) {
        return None;
    }
    // range checked above
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let pixel = rounded as u32;
    Some(pixel)
}

impl From<CropRectangle> for SelectionRect {
    fn from(rect: CropRectangle) -> Self {
        Self::new(
            f64::from(rect.x1),
            f64::from(rect.y1),
            f64::from(rect.x2),
            f64::from(rect.y2),
        )
    }
}

/// Computes the largest rectangle with the aspect ratio of `target` that fits
/// centered inside `image`.
///
/// Exactly one axis is cropped: the other is used in full. The cropped axis
/// keeps equal margins, up to one pixel of rounding difference.
#[must_use]
pub fn compute_max_crop(target: CropSize, image: ImageDimensions) -> CropRectangle {
    let ratio = target.ratio();
    let image_width = f64::from(image.width);
    let image_height = f64::from(image.height);

    if image_width < image_height * ratio {
        // width fits fully, height needs to be cropped
        let offset = half_margin(image_height - image_width / ratio, image.height);
        CropRectangle::new(0, offset, image.width, image.height - offset)
    } else {
        // height fits fully, width needs to be cropped
        let offset = half_margin(image_width - image_height * ratio, image.width);
        CropRectangle::new(offset, 0, image.width - offset, image.height)
    }
}

/// Rounds half of `excess` and keeps at least one pixel of the `extent` axis.
fn half_margin(excess: f64, extent: u32) -> u32 {
    let offset = round_half_up(excess / 2.0).max(0.0);
    let limit = f64::from((extent - 1) / 2);
    // offset is clamped to [0, limit] and limit fits in u32
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let offset = offset.min(limit) as u32;
    offset
}

/// Rounds to the nearest integer, with halves rounded toward positive infinity.
#[must_use]
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn size(width: u32, height: u32) -> CropSize {
        CropSize::new(width, height).expect("non-zero size")
    }

    fn dims(width: u32, height: u32) -> ImageDimensions {
        ImageDimensions::new(width, height).expect("non-zero dimensions")
    }

    #[test]
    fn classify_orientation_compares_sides() {
        assert_eq!(classify_orientation(600, 900), Orientation::Portrait);
        assert_eq!(classify_orientation(900, 600), Orientation::Landscape);
        assert_eq!(classify_orientation(500, 500), Orientation::Square);
    }

    #[test]
    fn max_crop_of_landscape_ratio_on_square_image_crops_height() {
        let rect = compute_max_crop(size(4, 3), dims(800, 800));
        assert_eq!(rect, CropRectangle::new(0, 100, 800, 700));
    }

    #[test]
    fn max_crop_of_square_ratio_on_landscape_image_crops_width() {
        let rect = compute_max_crop(size(100, 100), dims(1000, 600));
        assert_eq!(rect, CropRectangle::new(200, 0, 800, 600));
    }

    #[test]
    fn max_crop_with_matching_ratio_uses_whole_image() {
        let rect = compute_max_crop(size(16, 9), dims(1920, 1080));
        assert_eq!(rect, CropRectangle::new(0, 0, 1920, 1080));
    }

    #[test]
    fn max_crop_rounds_odd_margins() {
        // excess width = 101 - 100 = 1, half = 0.5 rounds up to 1
        let rect = compute_max_crop(size(1, 1), dims(101, 100));
        assert_eq!(rect, CropRectangle::new(1, 0, 100, 100));
    }

    #[test]
    fn max_crop_never_collapses_a_tiny_image() {
        let rect = compute_max_crop(size(1000, 1), dims(1, 1));
        assert!(rect.fits_within(dims(1, 1)));
    }

    #[test]
    fn max_crop_properties_hold_over_a_grid() {
        let targets = [(1, 1), (4, 3), (3, 4), (16, 9), (120, 100), (7, 31)];
        let images = [(800, 800), (640, 480), (480, 640), (1, 300), (333, 2), (1023, 767)];

        for &(tw, th) in &targets {
            for &(iw, ih) in &images {
                let image = dims(iw, ih);
                let rect = compute_max_crop(size(tw, th), image);

                assert!(rect.fits_within(image), "{rect:?} outside {image:?}");

                let full_width = rect.x1 == 0 && rect.x2 == iw;
                let full_height = rect.y1 == 0 && rect.y2 == ih;
                assert!(full_width || full_height, "{rect:?} touches no full axis");

                let left = rect.x1;
                let right = iw - rect.x2;
                let top = rect.y1;
                let bottom = ih - rect.y2;
                assert!(left.abs_diff(right) <= 1);
                assert!(top.abs_diff(bottom) <= 1);

                // Aspect ratio within one pixel of rounding on the cropped axis.
                let ratio = f64::from(tw) / f64::from(th);
                let expected_height = f64::from(rect.width()) / ratio;
                let expected_width = f64::from(rect.height()) * ratio;
                let tolerance_ok = (f64::from(rect.height()) - expected_height).abs() <= 1.0
                    || (f64::from(rect.width()) - expected_width).abs() <= 1.0;
                let degenerate = rect.width() == 1 || rect.height() == 1;
                let holds = tolerance_ok || degenerate;
                assert!(holds, "{rect:?} breaks ratio {tw}:{th}");
            }
        }
    }

    #[test]
    fn round_half_up_matches_browser_rounding() {
        assert_eq!(round_half_up(10.4), 10.0);
        assert_eq!(round_half_up(10.5), 11.0);
        assert_eq!(round_half_up(-0.5), 0.0);
        assert_eq!(round_half_up(150.9), 151.0);
    }

    #[test]
    fn rectangle_size_checks() {
        let rect = CropRectangle::new(10, 10, 260, 220);
        assert_eq!(rect.width(), 250);
        assert_eq!(rect.height(), 210);
        assert!(rect.is_smaller_than(size(300, 200)));
        assert!(!rect.is_smaller_than(size(200, 200)));
    }

    #[test]
    fn selection_rounds_to_pixels() {
        let sel = SelectionRect::new(10.4, 5.6, 200.2, 150.9);
        assert_eq!(
            sel.to_crop_rectangle(),
            Some(CropRectangle::new(10, 6, 200, 151))
        );

        let negative = SelectionRect::new(-3.0, 0.0, 5.0, 5.0);
        let nan = SelectionRect::new(f64::NAN, 0.0, 5.0, 5.0);
        assert_eq!(negative.to_crop_rectangle(), None);
        assert_eq!(nan.to_crop_rectangle(), None);
        assert!(sel.is_finite());
        assert!(!nan.is_finite());
    }

    #[test]
    fn selection_from_origin_size() {
        let sel = SelectionRect::from_origin_size(5.0, 5.0, 250.0, 210.0);
        assert_eq!(sel.x2, 255.0);
        assert!(sel.is_smaller_than(size(300, 200)));
    }
}
