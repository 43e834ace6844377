//! Export rasterizer
//!
//! Sheets and collages are drawn onto a white RGB canvas sized from the
//! paper at the export DPI. All placement comes from percent geometry, so the
//! same layout renders at any resolution.

use crate::ingest::ImageLibrary;
use crate::types::*;
use image::imageops::FilterType;
use image::{DynamicImage, Rgb, RgbImage, Rgba, RgbaImage};
use imageproc::drawing::{draw_hollow_rect_mut, draw_polygon_mut};
use imageproc::point::Point;
use imageproc::rect::Rect;
use photo_layout::units::mm_to_px;
use photo_layout::{CollagePhoto, PaperSize, Sheet};

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

/// Canvas size in pixels for `paper` at `dpi`
pub fn canvas_size_px(paper: PaperSize, dpi: f32) -> (u32, u32) {
    let (width_mm, height_mm) = paper.dimensions_mm();
    (
        mm_to_px(width_mm, dpi).round().max(1.0) as u32,
        mm_to_px(height_mm, dpi).round().max(1.0) as u32,
    )
}

/// Scale a display measurement onto the export canvas
fn display_to_canvas(value: f32, container_px: f32, canvas_px: u32) -> f32 {
    if container_px > 0.0 {
        value * canvas_px as f32 / container_px
    } else {
        value
    }
}

/// Border width on the canvas for a stroke of `display_px` in the preview.
///
/// Never thinner than one pixel.
pub fn export_border_width(display_px: f32, container_px: f32, canvas_px: u32) -> u32 {
    let width = display_to_canvas(display_px, container_px, canvas_px).round();
    if width.is_finite() && width >= 1.0 {
        width as u32
    } else {
        1
    }
}

fn blank_canvas(options: &RenderOptions) -> RgbImage {
    let (width, height) = canvas_size_px(options.paper, options.dpi);
    RgbImage::from_pixel(width, height, WHITE)
}

/// Alpha-blend `tile` onto the canvas with its top-left corner at `origin`.
/// Only pixels inside `frame` are touched, and of those only the ones the
/// frame-sized `mask` leaves on.
fn composite(
    canvas: &mut RgbImage,
    tile: &RgbaImage,
    origin: (i64, i64),
    frame: (i64, i64, u32, u32),
    mask: Option<&image::GrayImage>,
) {
    let (fx, fy, fw, fh) = frame;
    let (cw, ch) = (canvas.width() as i64, canvas.height() as i64);

    for dy in 0..fh as i64 {
        let cy = fy + dy;
        if cy < 0 || cy >= ch {
            continue;
        }
        for dx in 0..fw as i64 {
            let cx = fx + dx;
            if cx < 0 || cx >= cw {
                continue;
            }
            if let Some(mask) = mask {
                if mask.get_pixel(dx as u32, dy as u32).0[0] == 0 {
                    continue;
                }
            }

            let (tx, ty) = (cx - origin.0, cy - origin.1);
            if tx < 0 || ty < 0 || tx >= tile.width() as i64 || ty >= tile.height() as i64 {
                continue;
            }

            let Rgba([r, g, b, a]) = *tile.get_pixel(tx as u32, ty as u32);
            let dst = canvas.get_pixel_mut(cx as u32, cy as u32);
            let alpha = a as f32 / 255.0;
            for (d, s) in dst.0.iter_mut().zip([r, g, b]) {
                *d = (s as f32 * alpha + *d as f32 * (1.0 - alpha)).round() as u8;
            }
        }
    }
}

fn stroke_border(canvas: &mut RgbImage, frame: (i64, i64, u32, u32), width: u32, color: [u8; 3]) {
    let (x, y, w, h) = frame;
    for inset in 0..width {
        let (iw, ih) = (w.saturating_sub(2 * inset), h.saturating_sub(2 * inset));
        if iw == 0 || ih == 0 {
            break;
        }
        let rect = Rect::at((x + inset as i64) as i32, (y + inset as i64) as i32).of_size(iw, ih);
        draw_hollow_rect_mut(canvas, rect, Rgb(color));
    }
}

// ============================================================================
// Sheets
// ============================================================================

/// Rasterize one sheet. Photos are drawn cover-fit into their slots; slots
/// whose image isn't in the library stay white.
pub fn render_sheet(sheet: &Sheet, library: &ImageLibrary, options: &RenderOptions) -> RgbImage {
    let mut canvas = blank_canvas(options);
    let canvas_width = canvas.width();
    let border_width = options
        .border
        .map(|b| (b, export_border_width(b.display_px, options.container_width_px, canvas_width)));

    for placed in &sheet.photos {
        let Some(source) = placed.image_source.as_deref() else {
            continue;
        };
        let frame = placed.slot.rect().to_pixels(canvas.width(), canvas.height());
        let (x, y, w, h) = frame;
        if w == 0 || h == 0 {
            continue;
        }

        let Some(image) = library.get(source) else {
            log::warn!("Image {} not loaded, leaving slot {} blank", source, placed.id());
            continue;
        };

        let tile = image.resize_to_fill(w, h, FilterType::Triangle).to_rgba8();
        composite(&mut canvas, &tile, (x, y), frame, None);

        if let Some((style, width)) = border_width {
            stroke_border(&mut canvas, frame, width, style.color);
        }
    }

    canvas
}

// ============================================================================
// Collages
// ============================================================================

fn oriented(image: &DynamicImage, photo: &CollagePhoto) -> DynamicImage {
    let rotated = match photo.rotation % 360 {
        90 => image.rotate90(),
        180 => image.rotate180(),
        270 => image.rotate270(),
        _ => image.clone(),
    };
    if photo.is_mirrored() {
        rotated.fliph()
    } else {
        rotated
    }
}

/// Frame-sized mask from a normalised clip polygon
fn clip_mask(photo: &CollagePhoto, width: u32, height: u32) -> Option<image::GrayImage> {
    let clip = photo.clip_path.as_ref()?;
    let Some(polygon) = clip.polygon() else {
        log::warn!("Clip path {} is not a polygon, ignoring it", clip.id);
        return None;
    };

    let mut points: Vec<Point<i32>> = Vec::with_capacity(polygon.len());
    for (px, py) in polygon {
        let point = Point::new(
            (px * width as f32).round() as i32,
            (py * height as f32).round() as i32,
        );
        if points.last() != Some(&point) {
            points.push(point);
        }
    }
    if points.len() > 1 && points.first() == points.last() {
        points.pop();
    }
    if points.len() < 3 {
        return None;
    }

    let mut mask = image::GrayImage::new(width, height);
    draw_polygon_mut(&mut mask, &points, image::Luma([255]));
    Some(mask)
}

fn draw_collage_photo(
    canvas: &mut RgbImage,
    photo: &CollagePhoto,
    image: &DynamicImage,
    options: &RenderOptions,
) {
    let frame = photo.rect().to_pixels(canvas.width(), canvas.height());
    let (fx, fy, fw, fh) = frame;
    if fw == 0 || fh == 0 {
        return;
    }

    // Zoom grows the cover-fit tile around the frame centre
    let scale = photo_layout::collage::clamp_scale(photo.scale);
    let tile_w = ((fw as f32 * scale).round() as u32).max(1);
    let tile_h = ((fh as f32 * scale).round() as u32).max(1);
    let tile = oriented(image, photo)
        .resize_to_fill(tile_w, tile_h, FilterType::Triangle)
        .to_rgba8();

    let pan_x = display_to_canvas(photo.position.x, options.container_width_px, canvas.width());
    let pan_y = display_to_canvas(photo.position.y, options.container_width_px, canvas.width());
    let origin = (
        fx + (fw as i64 - tile_w as i64) / 2 + pan_x.round() as i64,
        fy + (fh as i64 - tile_h as i64) / 2 + pan_y.round() as i64,
    );

    let mask = clip_mask(photo, fw, fh);
    composite(canvas, &tile, origin, frame, mask.as_ref());
}

/// Rasterize a collage: regular photos back to front, then overlays
pub fn render_collage(
    photos: &[CollagePhoto],
    library: &ImageLibrary,
    options: &RenderOptions,
) -> RgbImage {
    let mut canvas = blank_canvas(options);

    let mut order: Vec<&CollagePhoto> = photos.iter().collect();
    order.sort_by_key(|p| (p.is_overlay, p.z_index));

    for photo in order {
        match library.get(&photo.src) {
            Some(image) => draw_collage_photo(&mut canvas, photo, image, options),
            None => log::warn!("Image {} not loaded, skipping {}", photo.src, photo.id),
        }
    }

    canvas
}
