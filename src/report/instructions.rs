//! Instructions placeholder image.
//!
//! The frontend shows `static/instructions.jpg` until the first report
//! arrives. The image is rendered with the same text pipeline as the
//! report and written at server startup, so the placeholder path is
//! servable before any submission.

use std::path::Path;

use image::DynamicImage;

use crate::error::RecapError;

use super::canvas::Canvas;
use super::text::{FontSize, draw_text, draw_text_centered};

const WIDTH: usize = 900;
const HEIGHT: usize = 620;

const STEPS: [&str; 7] = [
    "1. Browse your delivery site with the developer tools open (F12).",
    "2. Switch to the network tab and filter by \"order_details\".",
    "3. Log in and open Profile -> Order History.",
    "4. Load every order page for the year you want summarized.",
    "5. Paste each response JSON into one of the eight boxes.",
    "6. Dumps from several accounts combine into one report.",
    "7. Submit the form and your recap appears here.",
];

/// Render the placeholder to a grayscale image.
pub fn render() -> DynamicImage {
    let mut canvas = Canvas::new(WIDTH, HEIGHT);

    draw_text_centered(&mut canvas, "Your recap goes here", WIDTH / 2, 48, 1.0, FontSize::Heading);
    draw_text_centered(
        &mut canvas,
        "How to get it:",
        WIDTH / 2,
        140,
        1.0,
        FontSize::Large,
    );

    let mut y = 210;
    for step in STEPS {
        draw_text(&mut canvas, step, 60, y, 0.9, FontSize::Medium);
        y += 48;
    }

    canvas.hline(60, WIDTH - 60, HEIGHT - 40, 2, 0.5);

    DynamicImage::ImageLuma8(canvas.to_image())
}

/// Write the placeholder as a JPEG at the given path.
pub fn write_jpg(path: &Path) -> Result<(), RecapError> {
    render()
        .save(path)
        .map_err(|e| RecapError::Report(format!("Failed to write {}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_has_content() {
        let image = render().to_luma8();
        assert_eq!(image.width(), WIDTH as u32);
        assert_eq!(image.height(), HEIGHT as u32);
        assert!(image.pixels().any(|p| p.0[0] != 255));
    }

    #[test]
    fn write_jpg_produces_a_jpeg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("instructions.jpg");
        write_jpg(&path).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
    }
}
