//! Synthetic masks shared by unit tests.

use image::{GrayImage, Luma};

use crate::mask::Mask;

/// Binary disk: cells with `(r - cr)² + (c - cc)² <= radius²` are 1.
pub(crate) fn draw_disk_mask(rows: usize, cols: usize, center: [f64; 2], radius: f64) -> Mask {
    Mask::from_fn(rows, cols, |r, c| {
        let dr = r as f64 - center[0];
        let dc = c as f64 - center[1];
        if dr * dr + dc * dc <= radius * radius {
            1.0
        } else {
            0.0
        }
    })
    .expect("disk mask dimensions must be non-zero")
}

/// Binary axis-aligned block of `size = [h, w]` cells starting at `origin`.
pub(crate) fn draw_rect_mask(
    rows: usize,
    cols: usize,
    origin: [usize; 2],
    size: [usize; 2],
) -> Mask {
    Mask::from_fn(rows, cols, |r, c| {
        let inside = (origin[0]..origin[0] + size[0]).contains(&r)
            && (origin[1]..origin[1] + size[1]).contains(&c);
        if inside {
            1.0
        } else {
            0.0
        }
    })
    .expect("rect mask dimensions must be non-zero")
}

/// Disk rendered into an 8-bit image and Gaussian-blurred via `imageproc`,
/// giving a near-binary mask with soft edges.
pub(crate) fn draw_soft_disk_mask(size: u32, center: [f32; 2], radius: f32, sigma: f32) -> Mask {
    let mut img = GrayImage::new(size, size);
    for y in 0..size {
        for x in 0..size {
            let dx = x as f32 - center[1];
            let dy = y as f32 - center[0];
            if dx * dx + dy * dy <= radius * radius {
                img.put_pixel(x, y, Luma([255]));
            }
        }
    }
    let blurred = imageproc::filter::gaussian_blur_f32(&img, sigma);
    Mask::from_gray_image(&blurred).expect("soft disk image must be non-empty")
}

/// Sample `n` points of a circle of `radius` around `center`, `(row, col)` order.
pub(crate) fn circle_points(center: [f64; 2], radius: f64, n: usize) -> Vec<[f64; 2]> {
    (0..n)
        .map(|i| {
            let t = i as f64 / n as f64 * std::f64::consts::TAU;
            [center[0] + radius * t.sin(), center[1] + radius * t.cos()]
        })
        .collect()
}
