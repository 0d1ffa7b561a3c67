//! ID3v2.3 frame encoding
//!
//! Every frame is laid out as:
//!
//! | Field   | Size                        |
//! |---------|-----------------------------|
//! | ID      | 4                           |
//! | Size    | 4 (big endian, not synchsafe) |
//! | Flags   | 2 (always zero)             |
//! | Payload | `Size`                      |

use super::frame_id::{COMMENT_FRAME_ID, FrameId, PICTURE_FRAME_ID};
use crate::error::Result;
use crate::macros::err;
use crate::picture::{MimeType, PictureSource};
use crate::util::text::TextEncoding;
use crate::util::writer::ByteWriter;

use std::borrow::Cow;

/// The size of an ID3v2.3 frame header
pub const FRAME_HEADER_SIZE: usize = 10;

// Front cover, the only picture type written
const PICTURE_TYPE_COVER_FRONT: u8 = 3;

/// The default comment language
pub const DEFAULT_LANGUAGE: [u8; 3] = *b"eng";

/// A text information frame
///
/// The text is always written as UTF-16 with a BOM.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TextFrame<'a> {
	/// The frame ID
	pub id: FrameId,
	/// The frame content
	pub value: Cow<'a, str>,
}

impl<'a> TextFrame<'a> {
	/// Create a new [`TextFrame`]
	pub fn new(id: FrameId, value: impl Into<Cow<'a, str>>) -> Self {
		Self {
			id,
			value: value.into(),
		}
	}

	/// Encode the frame, header included
	///
	/// Returns `None` if the value is empty.
	///
	/// # Errors
	///
	/// * The encoded value is too large for the frame size
	///
	/// # Examples
	///
	/// ```rust
	/// use wavtag::id3::FrameId;
	/// use wavtag::id3::frame::TextFrame;
	///
	/// # fn main() -> wavtag::error::Result<()> {
	/// let frame = TextFrame::new(FrameId::new("TIT2").unwrap(), "A");
	/// let bytes = frame.as_bytes()?.unwrap();
	///
	/// // Encoding (1) + BOM (2) + "A" (2)
	/// assert_eq!(&bytes[4..8], &[0, 0, 0, 5]);
	/// assert_eq!(&bytes[10..], &[0x01, 0xFF, 0xFE, b'A', 0x00]);
	///
	/// assert!(TextFrame::new(FrameId::new("TIT2").unwrap(), "").as_bytes()?.is_none());
	/// # Ok(()) }
	/// ```
	pub fn as_bytes(&self) -> Result<Option<Vec<u8>>> {
		if self.value.is_empty() {
			return Ok(None);
		}

		let encoded = TextEncoding::UTF16.encode(&self.value, false);

		let mut payload = ByteWriter::with_capacity(encoded.len() + 1);
		payload
			.push_u8(TextEncoding::UTF16 as u8)
			.push_bytes(&encoded);

		write_frame(self.id.as_bytes(), payload.as_bytes()).map(Some)
	}
}

/// An attached picture frame
///
/// The picture is always written as the front cover, with no description.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AttachedPictureFrame<'a> {
	/// The MIME type, as sniffed from the data
	pub mime_type: MimeType,
	/// The raw image data
	pub data: Cow<'a, [u8]>,
}

impl<'a> AttachedPictureFrame<'a> {
	/// Create an [`AttachedPictureFrame`] from raw image data
	///
	/// The MIME type is `image/jpeg` if the data starts with `FF D8 FF`, `image/png` otherwise.
	///
	/// Returns `None` if `data` is empty.
	pub fn from_data(data: impl Into<Cow<'a, [u8]>>) -> Option<Self> {
		let data = data.into();
		if data.is_empty() {
			return None;
		}

		Some(Self {
			mime_type: MimeType::from_data(&data),
			data,
		})
	}

	/// Create an [`AttachedPictureFrame`] from a [`PictureSource`], reading the file if needed
	///
	/// Returns `None` if the source (or the file it points to) is empty.
	///
	/// # Errors
	///
	/// * The picture file can't be read
	pub fn from_source(source: &'a PictureSource) -> Result<Option<Self>> {
		if source.is_empty() {
			return Ok(None);
		}

		let frame = Self::from_data(source.load()?);
		if frame.is_none() {
			log::warn!("Picture source contains no data, skipping");
		}

		Ok(frame)
	}

	/// Encode the frame, header included
	///
	/// The payload is laid out as:
	///
	/// * Text encoding (`0x00`, Latin-1)
	/// * MIME type, null terminated
	/// * Picture type (`0x03`, front cover)
	/// * Description (empty, so only its null terminator)
	/// * Image data
	///
	/// # Errors
	///
	/// * The image is too large for the frame size
	pub fn as_bytes(&self) -> Result<Vec<u8>> {
		let mime_type = self.mime_type.as_str();

		let mut payload = ByteWriter::with_capacity(mime_type.len() + 4 + self.data.len());
		payload
			.push_u8(TextEncoding::Latin1 as u8)
			.push_bytes(&TextEncoding::Latin1.encode(mime_type, true))
			.push_u8(PICTURE_TYPE_COVER_FRONT)
			.push_u8(0)
			.push_bytes(&self.data);

		write_frame(PICTURE_FRAME_ID, payload.as_bytes())
	}
}

/// A comment frame
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CommentFrame<'a> {
	/// ISO-639-2 language code (3 bytes)
	pub language: [u8; 3],
	/// A short content description
	pub description: Cow<'a, str>,
	/// The comment itself
	pub content: Cow<'a, str>,
}

impl<'a> CommentFrame<'a> {
	/// Create a new [`CommentFrame`] with an empty description and [`DEFAULT_LANGUAGE`]
	pub fn new(content: impl Into<Cow<'a, str>>) -> Self {
		Self {
			language: DEFAULT_LANGUAGE,
			description: Cow::Borrowed(""),
			content: content.into(),
		}
	}

	/// Set the language
	pub fn language(mut self, language: [u8; 3]) -> Self {
		self.language = language;
		self
	}

	/// Set the short content description
	pub fn description(mut self, description: impl Into<Cow<'a, str>>) -> Self {
		self.description = description.into();
		self
	}

	/// Encode the frame, header included
	///
	/// Returns `None` if the content is empty.
	///
	/// # Errors
	///
	/// * The language isn't 3 ASCII letters
	///
	/// # Examples
	///
	/// ```rust
	/// use wavtag::id3::frame::CommentFrame;
	///
	/// # fn main() -> wavtag::error::Result<()> {
	/// let bytes = CommentFrame::new("A").as_bytes()?.unwrap();
	///
	/// // Encoding + language (4) + empty description (4) + comment (4)
	/// assert_eq!(&bytes[4..8], &[0, 0, 0, 12]);
	/// assert_eq!(&bytes[10..14], b"\x01eng");
	/// # Ok(()) }
	/// ```
	pub fn as_bytes(&self) -> Result<Option<Vec<u8>>> {
		if self.content.is_empty() {
			return Ok(None);
		}

		if self.language.iter().any(|c| !c.is_ascii_alphabetic()) {
			err!(InvalidLanguage(self.language));
		}

		let description = TextEncoding::UTF16.encode(&self.description, true);
		let content = TextEncoding::UTF16.encode(&self.content, false);

		let mut payload = ByteWriter::with_capacity(4 + description.len() + content.len());
		payload
			.push_u8(TextEncoding::UTF16 as u8)
			.push_bytes(&self.language)
			.push_bytes(&description)
			.push_bytes(&content);

		write_frame(COMMENT_FRAME_ID, payload.as_bytes()).map(Some)
	}
}

/// Any frame that can be written
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Frame<'a> {
	/// A text information frame
	Text(TextFrame<'a>),
	/// An attached picture frame
	Picture(AttachedPictureFrame<'a>),
	/// A comment frame
	Comment(CommentFrame<'a>),
}

impl<'a> Frame<'a> {
	/// Shorthand for a [`Frame::Text`]
	pub fn text(id: FrameId, value: impl Into<Cow<'a, str>>) -> Self {
		Frame::Text(TextFrame::new(id, value))
	}

	/// The frame ID
	pub fn id_str(&self) -> &str {
		match self {
			Frame::Text(f) => f.id.as_str(),
			Frame::Picture(_) => "APIC",
			Frame::Comment(_) => "COMM",
		}
	}

	/// Encode the frame, header included
	///
	/// Returns `None` if the frame has no content.
	///
	/// # Errors
	///
	/// * The payload is too large for the frame size
	/// * See [`CommentFrame::as_bytes`]
	pub fn as_bytes(&self) -> Result<Option<Vec<u8>>> {
		match self {
			Frame::Text(f) => f.as_bytes(),
			Frame::Picture(f) => f.as_bytes().map(Some),
			Frame::Comment(f) => f.as_bytes(),
		}
	}
}

// The v2.3 frame size is a plain big endian u32
fn frame_size(id: [u8; 4], len: usize) -> Result<u32> {
	let Ok(size) = u32::try_from(len) else {
		log::error!(
			"Frame {} is too large to be written",
			String::from_utf8_lossy(&id)
		);
		err!(TooMuchData);
	};

	Ok(size)
}

fn write_frame(id: [u8; 4], payload: &[u8]) -> Result<Vec<u8>> {
	let size = frame_size(id, payload.len())?;
	log::trace!(
		"Writing frame {}, size: {size} bytes",
		String::from_utf8_lossy(&id)
	);

	let mut frame = ByteWriter::with_capacity(FRAME_HEADER_SIZE + payload.len());
	frame
		.push_bytes(&id)
		.push_u32_be(size)
		.push_u16_be(0)
		.push_bytes(payload);

	Ok(frame.into_inner())
}
