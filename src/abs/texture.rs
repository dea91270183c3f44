//! Structs and functions for handling textures.
//!
//! Images are decoded on the CPU into a [`DecodedImage`], then consumed by
//! [`Texture::new`], which uploads them with a full mip chain.

use std::path::Path;
use std::sync::Arc;

use glow::HasContext;
use image::DynamicImage;

use crate::error::AssetError;

/// Decoded pixel rows, tightly packed, 8 bits per channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub channels: u8,
    pub pixels: Vec<u8>,
}

impl DecodedImage {
    /// GL pixel format matching the channel count.
    pub fn gl_format(&self) -> u32 {
        match self.channels {
            1 => glow::RED,
            2 => glow::RG,
            3 => glow::RGB,
            _ => glow::RGBA,
        }
    }

    /// Bytes of row `y`, counted from the first row in memory.
    pub fn row(&self, y: u32) -> &[u8] {
        let pitch = self.width as usize * self.channels as usize;
        let start = y as usize * pitch;
        &self.pixels[start..start + pitch]
    }

    fn from_dynamic(image: DynamicImage) -> Self {
        let (width, height) = (image.width(), image.height());
        let (channels, pixels) = match image {
            DynamicImage::ImageLuma8(buf) => (1, buf.into_raw()),
            DynamicImage::ImageLumaA8(buf) => (2, buf.into_raw()),
            DynamicImage::ImageRgb8(buf) => (3, buf.into_raw()),
            DynamicImage::ImageRgba8(buf) => (4, buf.into_raw()),
            other => (4, other.to_rgba8().into_raw()),
        };
        Self {
            width,
            height,
            channels,
            pixels,
        }
    }
}

/// Decodes an in-memory image, guessing the format from its contents.
///
/// With `flip_vertically` the first row of the result is the last row of the
/// source, matching GL's bottom-up texture coordinates.
pub fn decode_image(
    path: &Path,
    bytes: &[u8],
    flip_vertically: bool,
) -> Result<DecodedImage, AssetError> {
    let image = image::load_from_memory(bytes).map_err(|source| AssetError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    let image = if flip_vertically { image.flipv() } else { image };
    Ok(DecodedImage::from_dynamic(image))
}

/// Reads and decodes the image at `path`.
pub fn load_image(path: &Path, flip_vertically: bool) -> Result<DecodedImage, AssetError> {
    let bytes = std::fs::read(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            AssetError::Missing {
                path: path.to_path_buf(),
            }
        } else {
            AssetError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    let image = decode_image(path, &bytes, flip_vertically)?;
    log::info!(
        "loaded {} ({}x{}, {} channels)",
        path.display(),
        image.width,
        image.height,
        image.channels
    );
    Ok(image)
}

/// Represents a texture stored on the GPU side.
pub struct Texture {
    gl: Arc<glow::Context>,
    id: glow::Texture,
    width: u32,
    height: u32,
}

impl Texture {
    /// Uploads `image` as a repeating, trilinear-filtered 2D texture and
    /// generates its mip chain. The host copy is dropped afterwards.
    pub fn new(gl: &Arc<glow::Context>, image: DecodedImage) -> Result<Self, String> {
        let format = image.gl_format();
        unsafe {
            let texture = gl.create_texture()?;
            gl.bind_texture(glow::TEXTURE_2D, Some(texture));
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, glow::REPEAT as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, glow::REPEAT as i32);
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MIN_FILTER,
                glow::LINEAR_MIPMAP_LINEAR as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MAG_FILTER,
                glow::LINEAR as i32,
            );

            // Rows of RGB images with odd widths are not 4-byte aligned.
            gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1);
            gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                format as i32,
                image.width as i32,
                image.height as i32,
                0,
                format,
                glow::UNSIGNED_BYTE,
                glow::PixelUnpackData::Slice(Some(image.pixels.as_slice())),
            );
            gl.generate_mipmap(glow::TEXTURE_2D);
            gl.bind_texture(glow::TEXTURE_2D, None);

            Ok(Self {
                gl: Arc::clone(gl),
                id: texture,
                width: image.width,
                height: image.height,
            })
        }
    }

    /// Returns the width of the texture.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height of the texture.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Binds the texture to the specified texture unit.
    pub fn bind(&self, unit: u32) {
        unsafe {
            self.gl.active_texture(glow::TEXTURE0 + unit);
            self.gl.bind_texture(glow::TEXTURE_2D, Some(self.id));
        }
    }
}

impl Drop for Texture {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_texture(self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use image::{ImageFormat, Rgb, RgbImage};

    use super::*;

    /// 2x3 RGB image whose row `y` is filled with the value `y * 10`.
    fn striped_png() -> Vec<u8> {
        let image = RgbImage::from_fn(2, 3, |_, y| Rgb([y as u8 * 10; 3]));
        let mut bytes = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(image)
            .write_to(&mut bytes, ImageFormat::Png)
            .unwrap();
        bytes.into_inner()
    }

    #[test]
    fn rgb_channels_are_detected() {
        let image = decode_image(Path::new("striped.png"), &striped_png(), false).unwrap();
        assert_eq!((image.width, image.height, image.channels), (2, 3, 3));
        assert_eq!(image.gl_format(), glow::RGB);
        assert_eq!(image.pixels.len(), 2 * 3 * 3);
    }

    #[test]
    fn flip_puts_last_row_first() {
        let path = Path::new("striped.png");
        let upright = decode_image(path, &striped_png(), false).unwrap();
        let flipped = decode_image(path, &striped_png(), true).unwrap();

        assert_eq!(upright.row(0), &[0u8; 6]);
        assert_eq!(flipped.row(0), upright.row(2));
        assert_eq!(flipped.row(1), upright.row(1));
        assert_eq!(flipped.row(2), upright.row(0));
    }

    #[test]
    fn garbage_is_a_decode_error() {
        let err = decode_image(Path::new("notes.txt"), b"not an image", true).unwrap_err();
        assert!(matches!(err, AssetError::Decode { .. }));
        assert!(err.to_string().contains("notes.txt"));
    }

    #[test]
    fn missing_file_is_distinguished_from_bad_data() {
        let err = load_image(Path::new("/definitely/not/here.png"), true).unwrap_err();
        assert!(matches!(err, AssetError::Missing { .. }));
    }

    #[test]
    fn bundled_texture_decodes() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/textures/checker.png");
        let image = load_image(&path, true).unwrap();
        assert!(image.width > 0 && image.height > 0);
        assert_eq!(
            image.pixels.len(),
            (image.width * image.height) as usize * image.channels as usize
        );
    }
}
