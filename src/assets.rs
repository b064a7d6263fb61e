//! Static image assets stamped onto every invoice: the seller's logo and signature.

use std::{fs, path::Path};

use image::{ImageFormat, Rgb, RgbImage, Rgba};

use crate::error::{AddContext, Error};

pub const LOGO_FILE: &str = "logo.png";
pub const SIGNATURE_FILE: &str = "signature.png";

/// A decoded PNG flattened to 8-bit RGB, ready to be embedded in a page.
#[derive(Debug, Clone)]
pub struct ImageAsset {
    name: String,
    width: u32,
    height: u32,
    rgb: Vec<u8>,
}

impl ImageAsset {
    /// Decode PNG bytes, compositing any transparency onto a white background.
    pub fn from_png(name: &str, bytes: &[u8]) -> Result<ImageAsset, Error> {
        let decoded = image::load_from_memory_with_format(bytes, ImageFormat::Png)
            .map_err(Error::from)
            .add_context(&format!("decoding '{name}'"))?;
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        let mut rgb = RgbImage::new(width, height);
        for (x, y, pixel) in rgba.enumerate_pixels() {
            let Rgba([r, g, b, a]) = *pixel;
            let alpha = a as f32 / 255.0;
            let over_white = |c: u8| (c as f32 * alpha + 255.0 * (1.0 - alpha)).round() as u8;
            rgb.put_pixel(x, y, Rgb([over_white(r), over_white(g), over_white(b)]));
        }
        Ok(ImageAsset {
            name: name.to_string(),
            width,
            height,
            rgb: rgb.into_raw(),
        })
    }

    /// Load and decode a PNG file.
    ///
    /// # Errors
    /// An `AssetMissing` [`Error`] if nothing exists at `path`; I/O or decoding errors otherwise.
    pub fn load(path: &Path) -> Result<ImageAsset, Error> {
        if !path.exists() {
            return Err(Error::asset_missing(path));
        }
        let bytes = fs::read(path)
            .map_err(Error::from)
            .add_context(&format!("reading '{}'", path.display()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        ImageAsset::from_png(&name, &bytes)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major RGB8 pixel data.
    pub fn rgb(&self) -> &[u8] {
        &self.rgb
    }
}

/// The two images every invoice needs.
#[derive(Debug, Clone)]
pub struct Assets {
    pub logo: ImageAsset,
    pub signature: ImageAsset,
}

impl Assets {
    /// Load `logo.png` and `signature.png` from `dir`.
    ///
    /// Both files are required; there is no fallback rendering without them.
    pub fn load(dir: &Path) -> Result<Assets, Error> {
        let logo = ImageAsset::load(&dir.join(LOGO_FILE)).add_context("loading logo")?;
        let signature =
            ImageAsset::load(&dir.join(SIGNATURE_FILE)).add_context("loading signature")?;
        log::debug!("loaded invoice assets from '{}'", dir.display());
        Ok(Assets { logo, signature })
    }
}
