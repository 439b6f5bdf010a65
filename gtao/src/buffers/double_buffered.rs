use glam::UVec2;

use super::Texture;

/// Two same-shaped slots for iterative read/write passes.
///
/// Callers select slots through an explicit alternate index instead of
/// swapping values around, so the slot an iteration wrote stays nameable.
#[derive(Debug)]
pub struct DoubleBuffered<T> {
    a: T,
    b: T,
}

impl DoubleBuffered<Texture> {
    /// Creates a double-buffered texture.
    ///
    /// See: [`Texture::new()`].
    pub fn new(
        device: &wgpu::Device,
        label: impl AsRef<str>,
        size: UVec2,
        format: wgpu::TextureFormat,
    ) -> Self {
        let label = label.as_ref();

        Self {
            a: Texture::new(device, format!("{label}_a"), size, format),
            b: Texture::new(device, format!("{label}_b"), size, format),
        }
    }
}

impl<T> DoubleBuffered<T> {
    pub fn get(&self, alternate: bool) -> &T {
        if alternate {
            &self.b
        } else {
            &self.a
        }
    }
}
