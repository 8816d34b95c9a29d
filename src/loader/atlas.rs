use std::path::Path;

use macroquad::texture::{FilterMode, Image, Texture2D};

use crate::error::MapError;

/// Turns an atlas image file into whatever handle the renderer draws with.
pub trait AtlasDecoder {
    type Handle;

    fn decode(&mut self, path: &Path) -> Result<Self::Handle, MapError>;
}

/// Decodes atlases into CPU-side images. Needs no window.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageDecoder;

impl AtlasDecoder for ImageDecoder {
    type Handle = Image;

    fn decode(&mut self, path: &Path) -> Result<Image, MapError> {
        let bytes = std::fs::read(path).map_err(|e| MapError::read(path, e))?;
        let image = Image::from_file_with_format(&bytes, None).map_err(|e| MapError::Decode {
            path: path.to_path_buf(),
            message: format!("{e:?}"),
        })?;
        tracing::debug!(path = %path.display(), width = image.width, height = image.height, "decoded atlas");
        Ok(image)
    }
}

/// Uploads atlases as GPU textures. Only usable inside a running window.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextureDecoder;

impl AtlasDecoder for TextureDecoder {
    type Handle = Texture2D;

    fn decode(&mut self, path: &Path) -> Result<Texture2D, MapError> {
        let image = ImageDecoder.decode(path)?;
        let tex = Texture2D::from_image(&image);
        tex.set_filter(FilterMode::Nearest);
        Ok(tex)
    }
}
