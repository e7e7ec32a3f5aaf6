//! Drawing-buffer sizing for HiDPI displays.

use winit::dpi::PhysicalSize;

/// Device pixel ratio actually used for rendering: the window's scale factor,
/// clamped to `max_ratio`.
pub fn effective_pixel_ratio(scale_factor: f64, max_ratio: f64) -> f64 {
    if !scale_factor.is_finite() || scale_factor <= 0.0 {
        return 1.0;
    }
    scale_factor.min(max_ratio.max(1.0))
}

/// Render surface size for a window whose physical size is `window_size`.
///
/// The surface is the window's logical size times the clamped pixel ratio, so
/// on displays denser than `max_ratio` it is smaller than the window.
pub fn surface_size(
    window_size: PhysicalSize<u32>,
    scale_factor: f64,
    max_ratio: f64,
) -> PhysicalSize<u32> {
    let logical = window_size.to_logical::<f64>(scale_factor.max(f64::EPSILON));
    let ratio = effective_pixel_ratio(scale_factor, max_ratio);
    PhysicalSize::new(
        (logical.width * ratio).round() as u32,
        (logical.height * ratio).round() as u32,
    )
}

/// Ratio of surface pixels to window pixels on each axis.
///
/// Cursor positions arrive in window pixels while drawing happens in surface
/// pixels; the two differ once the pixel ratio is clamped.
pub fn framebuffer_scale(window_size: PhysicalSize<u32>, surface_size: PhysicalSize<u32>) -> [f32; 2] {
    let axis = |surface: u32, window: u32| {
        if window == 0 || surface == 0 {
            1.0
        } else {
            surface as f32 / window as f32
        }
    };
    [
        axis(surface_size.width, window_size.width),
        axis(surface_size.height, window_size.height),
    ]
}
