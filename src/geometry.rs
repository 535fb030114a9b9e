//! Crop-to-fill placement of the video inside its container.

use iced::Size;

/// Where and how large to draw the video so it covers the whole container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropGeometry {
    pub scale: f32,
    /// Scaled video width, never smaller than the container width.
    pub width: f32,
    /// Scaled video height, never smaller than the container height.
    pub height: f32,
    /// Left edge relative to the container, zero or negative.
    pub x: f32,
    /// Top edge relative to the container, zero or negative.
    pub y: f32,
}

impl CropGeometry {
    /// Scaled size truncated to whole pixels.
    pub fn pixel_size(&self) -> (i32, i32) {
        (self.width as i32, self.height as i32)
    }

    /// Placement truncated to whole pixels.
    pub fn pixel_offset(&self) -> (i32, i32) {
        (self.x as i32, self.y as i32)
    }
}

/// Scale `video` uniformly until it covers `container` on both axes and
/// center it, letting the overflow hang off the edges.
///
/// Returns `None` while either size is still unknown (zero, negative or not
/// finite).
pub fn crop_to_fill(video: Size, container: Size) -> Option<CropGeometry> {
    if !is_drawable(video) || !is_drawable(container) {
        return None;
    }

    let x_scale = container.width / video.width;
    let y_scale = container.height / video.height;
    let scale = x_scale.max(y_scale);

    // The axis that sets the scale matches the container exactly; the other
    // one is clamped so rounding never leaves a sub-pixel gap.
    let (width, height) = if x_scale >= y_scale {
        (container.width, (scale * video.height).max(container.height))
    } else {
        ((scale * video.width).max(container.width), container.height)
    };

    Some(CropGeometry {
        scale,
        width,
        height,
        x: (container.width - width) / 2.0,
        y: (container.height - height) / 2.0,
    })
}

fn is_drawable(size: Size) -> bool {
    size.width.is_finite()
        && size.height.is_finite()
        && size.width > 0.0
        && size.height > 0.0
}
