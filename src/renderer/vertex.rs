//! Instance types for 2D rendering

use bytemuck::{Pod, Zeroable};

use crate::sim::{Rect, Rgb};

/// One colored rectangle, laid out for a GPU instance buffer
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct RectInstance {
    /// Top-left corner in play-field pixels
    pub position: [f32; 2],
    pub size: [f32; 2],
    pub color: [f32; 4],
}

impl RectInstance {
    pub const fn new(x: f32, y: f32, w: f32, h: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            size: [w, h],
            color,
        }
    }

    pub fn from_rect(rect: &Rect, color: [f32; 4]) -> Self {
        Self::new(rect.x, rect.y, rect.w, rect.h, color)
    }

    /// Bytes ready for upload
    pub fn as_bytes(instances: &[RectInstance]) -> &[u8] {
        bytemuck::cast_slice(instances)
    }
}

/// 8-bit RGB to normalized RGBA
pub fn rgba(color: Rgb, alpha: f32) -> [f32; 4] {
    [
        color[0] as f32 / 255.0,
        color[1] as f32 / 255.0,
        color[2] as f32 / 255.0,
        alpha,
    ]
}

/// Colors for game elements
pub mod colors {
    pub const WALL: [f32; 4] = [0.0, 1.0, 1.0, 1.0];
    pub const PADDLE: [f32; 4] = [0.0, 1.0, 1.0, 1.0];
    pub const BALL: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const FIRE_BALL: [f32; 4] = [1.0, 0.3, 0.0, 1.0];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<RectInstance>(), 32);
        let instances = [RectInstance::new(1.0, 2.0, 3.0, 4.0, colors::BALL); 2];
        assert_eq!(RectInstance::as_bytes(&instances).len(), 64);
    }

    #[test]
    fn test_rgba() {
        assert_eq!(rgba([255, 0, 51], 0.5), [1.0, 0.0, 0.2, 0.5]);
    }
}
