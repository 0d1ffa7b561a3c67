//! ID3v2.3 tag block creation
//!
//! A tag block is laid out as:
//!
//! * `"ID3"`
//! * Version (`03 00`)
//! * Flags (always zero)
//! * Size (synchsafe, everything after the header, padding included)
//! * Frames
//! * Padding (zeroes)

use super::frame::{AttachedPictureFrame, Frame};
use crate::config::WriteOptions;
use crate::error::Result;
use crate::metadata::Metadata;
use crate::util::writer::ByteWriter;

/// The size of the ID3v2 tag header
pub const TAG_HEADER_SIZE: usize = 10;

const ID3V2_SIGNATURE: &[u8; 3] = b"ID3";
// Major version 3, revision 0
const ID3V2_VERSION: [u8; 2] = [3, 0];

/// Collects frames to be written into a single tag block
///
/// # Examples
///
/// ```rust
/// use wavtag::config::WriteOptions;
/// use wavtag::id3::frame::{Frame, TextFrame};
/// use wavtag::id3::{FrameId, Id3v2TagBuilder};
///
/// # fn main() -> wavtag::error::Result<()> {
/// let mut builder = Id3v2TagBuilder::new();
/// builder.push(Frame::Text(TextFrame::new(FrameId::new("TIT2").unwrap(), "Title")));
///
/// let tag = builder.build(WriteOptions::new().preferred_padding(0))?;
/// assert_eq!(&tag[..6], b"ID3\x03\x00\x00");
/// # Ok(()) }
/// ```
#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub struct Id3v2TagBuilder<'a> {
	frames: Vec<Frame<'a>>,
}

impl<'a> Id3v2TagBuilder<'a> {
	/// Create an empty builder
	pub fn new() -> Self {
		Self::default()
	}

	/// Collect the frames of a [`Metadata`]
	///
	/// The frames are ordered as: picture, comment, then the text frames in the order they were
	/// set. Entries with no content are skipped.
	///
	/// # Errors
	///
	/// * The picture is a path that can't be read
	pub fn from_metadata(metadata: &'a Metadata) -> Result<Self> {
		let mut builder = Self::new();

		if let Some(source) = metadata.picture() {
			if let Some(picture) = AttachedPictureFrame::from_source(source)? {
				builder.push(Frame::Picture(picture));
			}
		}

		if let Some(comment) = metadata.comment() {
			builder.push(Frame::Comment(comment.clone()));
		}

		for (id, value) in metadata.text_frames() {
			builder.push(Frame::text(id, value));
		}

		Ok(builder)
	}

	/// Add a frame to the end of the tag
	pub fn push(&mut self, frame: Frame<'a>) {
		self.frames.push(frame);
	}

	/// The frames collected so far
	pub fn frames(&self) -> &[Frame<'a>] {
		&self.frames
	}

	/// Encode the tag block
	///
	/// Frames that encode to nothing (ex. empty text) are left out. The tag is always written,
	/// even if no frames remain.
	///
	/// # Errors
	///
	/// * A comment frame has an invalid language
	/// * The frames and padding don't fit in a synchsafe integer
	pub fn build(&self, write_options: WriteOptions) -> Result<Vec<u8>> {
		let mut encoded_frames = Vec::with_capacity(self.frames.len());
		for frame in &self.frames {
			match frame.as_bytes()? {
				Some(bytes) => encoded_frames.push(bytes),
				None => log::debug!("Skipping empty frame: {}", frame.id_str()),
			}
		}

		let frames_len: usize = encoded_frames.iter().map(Vec::len).sum();
		let padding = write_options.padding();

		let Ok(frames_len) = u32::try_from(frames_len) else {
			crate::macros::err!(TooMuchData);
		};
		let Some(tag_size) = frames_len.checked_add(padding) else {
			crate::macros::err!(TooMuchData);
		};

		log::debug!(
			"Writing ID3v2.3 tag, {} frames, {frames_len} bytes of frames, {padding} bytes of padding",
			encoded_frames.len()
		);

		let mut tag = ByteWriter::with_capacity(TAG_HEADER_SIZE + tag_size as usize);
		tag.push_bytes(ID3V2_SIGNATURE)
			.push_bytes(&ID3V2_VERSION)
			.push_u8(0)
			.push_synchsafe_u32(tag_size)?;

		for frame in &encoded_frames {
			tag.push_bytes(frame);
		}

		if padding == 0 {
			log::trace!("No padding requested, writing tag as-is");
		} else {
			log::trace!("Padding tag with {padding} bytes");
			tag.push_bytes(&vec![0; padding as usize]);
		}

		Ok(tag.into_inner())
	}
}

/// Build a complete ID3v2.3 tag block from [`Metadata`]
///
/// See [`Id3v2TagBuilder::from_metadata`] and [`Id3v2TagBuilder::build`].
///
/// # Errors
///
/// See [`Id3v2TagBuilder::from_metadata`] and [`Id3v2TagBuilder::build`]
///
/// # Examples
///
/// ```rust
/// use wavtag::Metadata;
/// use wavtag::config::WriteOptions;
/// use wavtag::id3::build_tag_block;
///
/// # fn main() -> wavtag::error::Result<()> {
/// let mut metadata = Metadata::new();
/// metadata.set_title("A");
///
/// let tag = build_tag_block(&metadata, WriteOptions::new())?;
///
/// // Header (10) + TIT2 frame (15) + padding (1024)
/// assert_eq!(tag.len(), 10 + 15 + 1024);
/// # Ok(()) }
/// ```
pub fn build_tag_block(metadata: &Metadata, write_options: WriteOptions) -> Result<Vec<u8>> {
	Id3v2TagBuilder::from_metadata(metadata)?.build(write_options)
}
