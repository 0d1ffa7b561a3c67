//! Picture handling for the attached picture frame

use crate::error::Result;

use std::borrow::Cow;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// MIME types for pictures.
///
/// Only JPEG is detected, everything else is assumed to be a PNG.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum MimeType {
	/// PNG image
	Png,
	/// JPEG image
	Jpeg,
}

impl MimeType {
	/// Guess the `MimeType` of some image data
	///
	/// # Examples
	///
	/// ```rust
	/// use wavtag::picture::MimeType;
	///
	/// assert_eq!(MimeType::from_data(&[0xFF, 0xD8, 0xFF, 0xE0]), MimeType::Jpeg);
	/// assert_eq!(MimeType::from_data(b"\x89PNG"), MimeType::Png);
	///
	/// // Anything unrecognized is a PNG
	/// assert_eq!(MimeType::from_data(b"GIF89a"), MimeType::Png);
	/// ```
	pub fn from_data(data: &[u8]) -> Self {
		match data {
			[0xFF, 0xD8, 0xFF, ..] => Self::Jpeg,
			_ => Self::Png,
		}
	}

	/// Get a &str from a `MimeType`
	///
	/// # Examples
	///
	/// ```rust
	/// use wavtag::picture::MimeType;
	///
	/// let jpeg_mimetype = MimeType::Jpeg;
	/// assert_eq!(jpeg_mimetype.as_str(), "image/jpeg")
	/// ```
	pub fn as_str(&self) -> &'static str {
		match self {
			MimeType::Jpeg => "image/jpeg",
			MimeType::Png => "image/png",
		}
	}
}

impl Display for MimeType {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Where the picture data comes from
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum PictureSource {
	/// The raw image data
	Bytes(Vec<u8>),
	/// A path to an image file, read when the tag is built
	Path(PathBuf),
}

impl PictureSource {
	/// Whether the source refers to nothing
	///
	/// This is an empty byte buffer or an empty path. A path to an empty file is *not* considered
	/// empty until it is [loaded](PictureSource::load).
	pub fn is_empty(&self) -> bool {
		match self {
			PictureSource::Bytes(bytes) => bytes.is_empty(),
			PictureSource::Path(path) => path.as_os_str().is_empty(),
		}
	}

	/// Get the image data, reading it from disk if necessary
	///
	/// # Errors
	///
	/// * The file at the path can't be read
	pub fn load(&self) -> Result<Cow<'_, [u8]>> {
		match self {
			PictureSource::Bytes(bytes) => Ok(Cow::Borrowed(bytes)),
			PictureSource::Path(path) => {
				log::debug!("Reading picture from {}", path.display());
				Ok(Cow::Owned(std::fs::read(path)?))
			},
		}
	}
}

impl From<Vec<u8>> for PictureSource {
	fn from(input: Vec<u8>) -> Self {
		Self::Bytes(input)
	}
}

impl From<PathBuf> for PictureSource {
	fn from(input: PathBuf) -> Self {
		Self::Path(input)
	}
}
