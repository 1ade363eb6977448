//! Texture service backed by the egui texture manager.

use eframe::egui::{self, ColorImage, TextureHandle, TextureOptions};

use crate::preview::TextureService;

/// Uploads preview images through an [`egui::Context`].
///
/// Handles are reference counted by egui; the texture is freed when the
/// last [`TextureHandle`] is dropped.
pub struct EguiTextures {
    ctx: egui::Context,
    options: TextureOptions,
}

impl EguiTextures {
    pub fn new(ctx: egui::Context) -> Self {
        Self {
            ctx,
            options: TextureOptions::LINEAR,
        }
    }
}

impl TextureService for EguiTextures {
    type Handle = TextureHandle;

    fn create(&mut self, name: &str, image: ColorImage) -> Result<TextureHandle, String> {
        if image.size.contains(&0) {
            return Err(format!("empty image {}x{}", image.size[0], image.size[1]));
        }
        Ok(self.ctx.load_texture(name, image, self.options))
    }

    fn update(&mut self, handle: &mut TextureHandle, image: ColorImage) -> Result<(), String> {
        if handle.size() != image.size {
            return Err(format!(
                "image is {}x{} but texture is {}x{}",
                image.size[0],
                image.size[1],
                handle.size()[0],
                handle.size()[1]
            ));
        }
        handle.set(image, self.options);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::Color32;

    #[test]
    fn test_create_and_update() {
        let mut textures = EguiTextures::new(egui::Context::default());
        let mut handle = textures
            .create("preview", ColorImage::new([4, 4], Color32::BLACK))
            .unwrap();
        assert_eq!(handle.size(), [4, 4]);
        assert!(textures
            .update(&mut handle, ColorImage::new([4, 4], Color32::WHITE))
            .is_ok());
    }

    #[test]
    fn test_update_rejects_size_change() {
        let mut textures = EguiTextures::new(egui::Context::default());
        let mut handle = textures
            .create("preview", ColorImage::new([4, 4], Color32::BLACK))
            .unwrap();
        let err = textures
            .update(&mut handle, ColorImage::new([8, 8], Color32::BLACK))
            .unwrap_err();
        assert!(err.contains("8x8"));
    }

    #[test]
    fn test_create_rejects_empty_image() {
        let mut textures = EguiTextures::new(egui::Context::default());
        assert!(textures
            .create("preview", ColorImage::new([0, 4], Color32::BLACK))
            .is_err());
    }
}
