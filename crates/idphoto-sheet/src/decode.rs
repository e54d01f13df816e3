//! Upload decoding
//!
//! Uploads are matched against a chain of decoders by file signature or
//! extension. The HEIF decoder runs first so HEIC photos straight off a
//! phone are normalized to a plain bitmap; everything else goes through the
//! `image` crate.

use image::{DynamicImage, ImageDecoder, ImageFormat, ImageReader};
use std::io::Cursor;
use std::path::Path;

use crate::types::{Result, SheetError};

/// Extensions of HEIF containers, accepted whatever their declared type
const HEIF_EXTENSIONS: [&str; 2] = ["heic", "heif"];

/// Major/compatible brands that mark an ISO-BMFF file as HEIF
const HEIF_BRANDS: [&[u8; 4]; 8] = [
    b"heic", b"heix", b"hevc", b"hevx", b"heim", b"heis", b"mif1", b"msf1",
];

/// A file handed to the application for decoding
#[derive(Debug, Clone, PartialEq)]
pub struct Upload {
    /// Original file name, used for extension checks and messages
    pub file_name: String,
    /// Declared MIME type, if the source provided one
    pub mime_type: Option<String>,
    /// Raw file contents
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new(file_name: impl Into<String>, mime_type: Option<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type,
            bytes,
        }
    }

    /// Build an upload from a path, deriving the MIME type from the extension
    pub fn from_path_bytes(path: &Path, bytes: Vec<u8>) -> Self {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mime_type = ImageFormat::from_path(path)
            .ok()
            .map(|format| format.to_mime_type().to_string());
        Self::new(file_name, mime_type, bytes)
    }

    /// Lowercased file extension, if any
    pub fn extension(&self) -> Option<String> {
        Path::new(&self.file_name)
            .extension()
            .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
    }

    pub fn has_heif_extension(&self) -> bool {
        self.extension()
            .is_some_and(|ext| HEIF_EXTENSIONS.contains(&ext.as_str()))
    }

    pub fn declares_image(&self) -> bool {
        self.mime_type
            .as_deref()
            .is_some_and(|mime| mime.to_ascii_lowercase().starts_with("image/"))
    }
}

/// Whether an upload may be decoded at all: an `image/*` type, or a HEIF
/// extension regardless of the declared type.
pub fn is_supported_upload(upload: &Upload) -> bool {
    upload.declares_image() || upload.has_heif_extension()
}

/// True when `bytes` start with an ISO-BMFF `ftyp` box naming a HEIF brand
pub fn has_heif_signature(bytes: &[u8]) -> bool {
    if bytes.len() < 16 || &bytes[4..8] != b"ftyp" {
        return false;
    }
    let box_len = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as usize;
    let end = box_len.clamp(16, bytes.len());

    // Major brand at 8..12, minor version at 12..16, compatible brands after
    let major = &bytes[8..12];
    let compatible = bytes[16..end].chunks_exact(4);
    std::iter::once(major)
        .chain(compatible)
        .any(|brand| HEIF_BRANDS.iter().any(|known| brand == &known[..]))
}

/// One pluggable decoder in the chain
pub trait SourceDecoder: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Whether this decoder should handle the upload
    fn accepts(&self, upload: &Upload) -> bool;

    fn decode(&self, upload: &Upload) -> Result<DynamicImage>;
}

/// Decodes everything the `image` crate understands, honoring EXIF orientation
#[derive(Debug, Default, Clone, Copy)]
pub struct StandardDecoder;

impl SourceDecoder for StandardDecoder {
    fn name(&self) -> &'static str {
        "standard"
    }

    fn accepts(&self, upload: &Upload) -> bool {
        upload.declares_image() || image::guess_format(&upload.bytes).is_ok()
    }

    fn decode(&self, upload: &Upload) -> Result<DynamicImage> {
        let reader = ImageReader::new(Cursor::new(&upload.bytes))
            .with_guessed_format()
            .map_err(|e| SheetError::Decode(e.to_string()))?;
        let mut decoder = reader
            .into_decoder()
            .map_err(|e| SheetError::Decode(e.to_string()))?;
        let orientation = decoder
            .orientation()
            .map_err(|e| SheetError::Decode(e.to_string()))?;
        let mut image =
            DynamicImage::from_decoder(decoder).map_err(|e| SheetError::Decode(e.to_string()))?;
        image.apply_orientation(orientation);
        Ok(image)
    }
}

/// Normalizes HEIC/HEIF containers into an RGB bitmap
#[derive(Debug, Default, Clone, Copy)]
pub struct HeifDecoder;

impl SourceDecoder for HeifDecoder {
    fn name(&self) -> &'static str {
        "heif"
    }

    fn accepts(&self, upload: &Upload) -> bool {
        upload.has_heif_extension() || has_heif_signature(&upload.bytes)
    }

    #[cfg(feature = "heif")]
    fn decode(&self, upload: &Upload) -> Result<DynamicImage> {
        use libheif_rs::{ColorSpace, HeifContext, LibHeif, RgbChroma};

        let lib_heif = LibHeif::new();
        let context = HeifContext::read_from_bytes(&upload.bytes)
            .map_err(|e| SheetError::Decode(e.to_string()))?;
        let handle = context
            .primary_image_handle()
            .map_err(|e| SheetError::Decode(e.to_string()))?;
        let decoded = lib_heif
            .decode(&handle, ColorSpace::Rgb(RgbChroma::Rgb), None)
            .map_err(|e| SheetError::Decode(e.to_string()))?;

        let planes = decoded.planes();
        let plane = planes
            .interleaved
            .ok_or_else(|| SheetError::Decode("HEIF image has no RGB plane".to_string()))?;

        let (width, height) = (plane.width, plane.height);
        let row_bytes = width as usize * 3;
        let mut pixels = Vec::with_capacity(row_bytes * height as usize);
        for row in plane.data.chunks(plane.stride).take(height as usize) {
            pixels.extend_from_slice(&row[..row_bytes]);
        }

        image::RgbImage::from_raw(width, height, pixels)
            .map(DynamicImage::ImageRgb8)
            .ok_or_else(|| SheetError::Decode("HEIF plane size mismatch".to_string()))
    }

    #[cfg(not(feature = "heif"))]
    fn decode(&self, _upload: &Upload) -> Result<DynamicImage> {
        Err(SheetError::Decode(
            "HEIF support is not enabled in this build".to_string(),
        ))
    }
}

/// Ordered list of decoders tried against each upload
pub struct DecoderChain {
    decoders: Vec<Box<dyn SourceDecoder>>,
}

impl Default for DecoderChain {
    fn default() -> Self {
        Self {
            decoders: vec![Box::new(HeifDecoder), Box::new(StandardDecoder)],
        }
    }
}

impl DecoderChain {
    /// An empty chain
    pub fn empty() -> Self {
        Self {
            decoders: Vec::new(),
        }
    }

    /// Append a decoder; earlier decoders take precedence
    pub fn with(mut self, decoder: impl SourceDecoder + 'static) -> Self {
        self.decoders.push(Box::new(decoder));
        self
    }

    /// Names of the registered decoders, in order
    pub fn names(&self) -> Vec<&'static str> {
        self.decoders.iter().map(|d| d.name()).collect()
    }

    /// Decode with the first decoder that accepts the upload
    pub fn decode(&self, upload: &Upload) -> Result<DynamicImage> {
        if !is_supported_upload(upload) {
            return Err(SheetError::UnsupportedUpload {
                file_name: upload.file_name.clone(),
            });
        }

        let decoder = self
            .decoders
            .iter()
            .find(|decoder| decoder.accepts(upload))
            .ok_or_else(|| {
                SheetError::Decode(format!("No decoder recognizes {}", upload.file_name))
            })?;

        log::debug!("Decoding {} with {} decoder", upload.file_name, decoder.name());
        let image = decoder.decode(upload)?;
        log::info!(
            "Decoded {} ({}x{})",
            upload.file_name,
            image.width(),
            image.height()
        );
        Ok(image)
    }
}
