//! Resizing helpers for logos and background photos.
//!
//! Both operations use Lanczos3 filtering.

use image::DynamicImage;
use image::imageops::FilterType;
use tracing::debug;

/// Resize to a `side × side` square, ignoring the source aspect ratio.
///
/// Returns the original image unchanged if it is already that size.
pub fn resize_square(img: &DynamicImage, side: u32) -> DynamicImage {
    let side = side.max(1);
    let (orig_w, orig_h) = (img.width(), img.height());

    if orig_w == side && orig_h == side {
        debug!(side, "Image already at target size, skipping resize");
        return img.clone();
    }

    debug!(orig_w, orig_h, side, "Resizing image to square");
    img.resize_exact(side, side, FilterType::Lanczos3)
}

/// Scale to cover a `side × side` square, cropping the centred overflow.
///
/// The aspect ratio is preserved and the result is never letterboxed.
pub fn resize_cover(img: &DynamicImage, side: u32) -> DynamicImage {
    let side = side.max(1);
    let (orig_w, orig_h) = (img.width(), img.height());

    debug!(orig_w, orig_h, side, "Cover-resizing image");
    img.resize_to_fill(side, side, FilterType::Lanczos3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, Rgb, RgbImage};

    /// Create a test DynamicImage with given dimensions.
    fn create_test_image(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([128, 64, 32])))
    }

    #[test]
    fn test_resize_square_distorts_aspect() {
        let img = create_test_image(800, 200);
        let result = resize_square(&img, 150);
        assert_eq!(result.dimensions(), (150, 150));
    }

    #[test]
    fn test_resize_square_same_size() {
        let img = create_test_image(64, 64);
        let result = resize_square(&img, 64);
        assert_eq!(result.dimensions(), (64, 64));
    }

    #[test]
    fn test_resize_square_zero_side_is_clamped() {
        let img = create_test_image(10, 10);
        let result = resize_square(&img, 0);
        assert_eq!(result.dimensions(), (1, 1));
    }

    #[test]
    fn test_resize_cover_wide_image() {
        let img = create_test_image(1920, 1080);
        let result = resize_cover(&img, 512);
        assert_eq!(result.dimensions(), (512, 512));
    }

    #[test]
    fn test_resize_cover_tall_image() {
        let img = create_test_image(300, 900);
        let result = resize_cover(&img, 256);
        assert_eq!(result.dimensions(), (256, 256));
    }

    #[test]
    fn test_resize_cover_crops_instead_of_letterboxing() {
        // Left half red, right half blue; a cover crop keeps both colors and
        // never introduces transparent or black bars.
        let mut src = RgbImage::from_pixel(400, 100, Rgb([255, 0, 0]));
        for x in 200..400 {
            for y in 0..100 {
                src.put_pixel(x, y, Rgb([0, 0, 255]));
            }
        }
        let result = resize_cover(&DynamicImage::ImageRgb8(src), 100).to_rgb8();
        let is_red = |p: &Rgb<u8>| p.0[0] > 200 && p.0[2] < 50;
        let is_blue = |p: &Rgb<u8>| p.0[2] > 200 && p.0[0] < 50;
        assert!(is_red(result.get_pixel(0, 0)));
        assert!(is_red(result.get_pixel(0, 99)));
        assert!(is_blue(result.get_pixel(99, 0)));
    }
}
