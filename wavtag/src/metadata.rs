//! The metadata to embed in a file

use crate::config::{ParseOptions, ParsingMode};
use crate::error::Result;
use crate::id3::frame::CommentFrame;
use crate::id3::FrameId;
use crate::macros::err;
use crate::picture::PictureSource;

use std::path::PathBuf;

const PICTURE_KEY: &str = "APIC";
const COMMENT_KEY: &str = "COMM";
const NAME_KEY: &str = "name";
const SYNC_FILENAME_KEY: &str = "syncFilename";
const REMOVE_UNNECESSARY_CHUNKS_KEY: &str = "removeUnnecessaryChunks";

/// A recognized metadata key
///
/// # Examples
///
/// ```rust
/// use wavtag::MetadataKey;
/// use wavtag::id3::FrameId;
///
/// assert_eq!(
/// 	MetadataKey::parse("TIT2"),
/// 	Some(MetadataKey::Text(FrameId::new("TIT2").unwrap()))
/// );
/// assert_eq!(MetadataKey::parse("APIC"), Some(MetadataKey::Picture));
/// assert_eq!(MetadataKey::parse("syncFilename"), Some(MetadataKey::SyncFilename));
/// assert_eq!(MetadataKey::parse("TXXX"), None);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MetadataKey {
	/// One of the [`TEXT_FRAMES`](crate::id3::TEXT_FRAMES)
	Text(FrameId),
	/// `APIC`, the attached picture
	Picture,
	/// `COMM`, a free-text comment
	Comment,
	/// `name`, the base name of the output file
	Name,
	/// `syncFilename`, whether to rename the output file to `name`
	SyncFilename,
	/// `removeUnnecessaryChunks`, whether to only keep the `fmt ` and `data` chunks
	RemoveUnnecessaryChunks,
}

impl MetadataKey {
	/// Parse a key, returning `None` if it isn't recognized
	pub fn parse(key: &str) -> Option<Self> {
		match key {
			PICTURE_KEY => Some(Self::Picture),
			COMMENT_KEY => Some(Self::Comment),
			NAME_KEY => Some(Self::Name),
			SYNC_FILENAME_KEY => Some(Self::SyncFilename),
			REMOVE_UNNECESSARY_CHUNKS_KEY => Some(Self::RemoveUnnecessaryChunks),
			_ => FrameId::new(key).map(Self::Text),
		}
	}

	/// The key as it would be written in string-keyed metadata
	pub fn as_str(&self) -> &str {
		match self {
			Self::Text(id) => id.as_str(),
			Self::Picture => PICTURE_KEY,
			Self::Comment => COMMENT_KEY,
			Self::Name => NAME_KEY,
			Self::SyncFilename => SYNC_FILENAME_KEY,
			Self::RemoveUnnecessaryChunks => REMOVE_UNNECESSARY_CHUNKS_KEY,
		}
	}
}

/// A value for string-keyed metadata
///
/// See [`Metadata::from_entries`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MetadataValue {
	/// Text, for text frames, the comment and the name
	///
	/// For the picture key, this is treated as a path.
	Text(String),
	/// Raw bytes, only valid for the picture key
	Bytes(Vec<u8>),
	/// A path, only valid for the picture key
	Path(PathBuf),
	/// A flag, for `syncFilename` and `removeUnnecessaryChunks`
	Bool(bool),
}

impl From<String> for MetadataValue {
	fn from(input: String) -> Self {
		Self::Text(input)
	}
}

impl From<&str> for MetadataValue {
	fn from(input: &str) -> Self {
		Self::Text(input.to_owned())
	}
}

impl From<Vec<u8>> for MetadataValue {
	fn from(input: Vec<u8>) -> Self {
		Self::Bytes(input)
	}
}

impl From<PathBuf> for MetadataValue {
	fn from(input: PathBuf) -> Self {
		Self::Path(input)
	}
}

impl From<bool> for MetadataValue {
	fn from(input: bool) -> Self {
		Self::Bool(input)
	}
}

// Only used with the IDs of `impl_text_accessors!` below
const fn id_bytes(id: &str) -> [u8; 4] {
	let bytes = id.as_bytes();
	[bytes[0], bytes[1], bytes[2], bytes[3]]
}

macro_rules! impl_text_accessors {
	($($name:ident => $id:literal;)+) => {
		paste::paste! {
			$(
				#[doc = "Returns the `" $id "` frame content"]
				pub fn $name(&self) -> Option<&str> {
					self.text(FrameId::from_known(id_bytes($id)))
				}

				#[doc = "Sets the `" $id "` frame content"]
				pub fn [<set_ $name>](&mut self, value: impl Into<String>) {
					self.set_text(FrameId::from_known(id_bytes($id)), value);
				}

				#[doc = "Removes the `" $id "` frame"]
				pub fn [<remove_ $name>](&mut self) {
					self.remove_text(FrameId::from_known(id_bytes($id)));
				}
			)+

			#[cfg(test)]
			const ACCESSOR_IDS: &[&str] = &[$($id),+];
		}
	}
}

/// The metadata to embed, along with how the output file should be named and trimmed
///
/// Frames are written in the order: picture, comment, then text frames in the order they were
/// first set.
///
/// # Examples
///
/// ```rust
/// use wavtag::Metadata;
///
/// let mut metadata = Metadata::new();
/// metadata.set_title("Song");
/// metadata.set_artist("Artist");
/// metadata.set_name("01 - Song");
///
/// assert_eq!(metadata.title(), Some("Song"));
/// assert_eq!(metadata.text_frames().count(), 2);
/// ```
#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub struct Metadata {
	text: Vec<(FrameId, String)>,
	picture: Option<PictureSource>,
	comment: Option<CommentFrame<'static>>,
	name: Option<String>,
	sync_filename: Option<bool>,
	remove_unnecessary_chunks: Option<bool>,
}

impl Metadata {
	/// Create a new empty `Metadata`
	pub fn new() -> Self {
		Self::default()
	}

	/// Build `Metadata` from string-keyed entries
	///
	/// How unrecognized keys are handled depends on the [`ParsingMode`]:
	///
	/// * [`ParsingMode::Strict`] - The entries are rejected
	/// * [`ParsingMode::BestAttempt`] - A warning is logged and the key is ignored
	/// * [`ParsingMode::Relaxed`] - The key is ignored
	///
	/// # Errors
	///
	/// * An unrecognized key is found with [`ParsingMode::Strict`]
	/// * A value has the wrong type for its key (ex. a [`MetadataValue::Bool`] for `TIT2`)
	///
	/// # Examples
	///
	/// ```rust
	/// use wavtag::Metadata;
	/// use wavtag::config::{ParseOptions, ParsingMode};
	///
	/// # fn main() -> wavtag::error::Result<()> {
	/// let entries = [
	/// 	("TIT2", "Song".into()),
	/// 	("syncFilename", false.into()),
	/// 	("foo", "bar".into()),
	/// ];
	///
	/// let metadata = Metadata::from_entries(entries.clone(), ParseOptions::new())?;
	/// assert_eq!(metadata.title(), Some("Song"));
	/// assert_eq!(metadata.sync_filename(), Some(false));
	///
	/// let strict = ParseOptions::new().parsing_mode(ParsingMode::Strict);
	/// assert!(Metadata::from_entries(entries, strict).is_err());
	/// # Ok(()) }
	/// ```
	pub fn from_entries<I, K>(entries: I, parse_options: ParseOptions) -> Result<Self>
	where
		I: IntoIterator<Item = (K, MetadataValue)>,
		K: AsRef<str>,
	{
		let mut metadata = Self::new();

		for (key, value) in entries {
			let key = key.as_ref();
			let Some(parsed_key) = MetadataKey::parse(key) else {
				match parse_options.parsing_mode {
					ParsingMode::Strict => err!(UnknownMetadataKey(key.to_owned())),
					ParsingMode::BestAttempt => {
						log::warn!("Ignoring unknown metadata key: {key}");
					},
					_ => {},
				}

				continue;
			};

			metadata.insert(parsed_key, value)?;
		}

		Ok(metadata)
	}

	/// Verify that every key is recognized
	///
	/// This is the strict check of [`Metadata::from_entries`], usable on its own before any
	/// values are converted.
	///
	/// # Errors
	///
	/// The first unrecognized key
	///
	/// # Examples
	///
	/// ```rust
	/// use wavtag::Metadata;
	///
	/// assert!(Metadata::validate_keys(["TIT2", "APIC", "name"]).is_ok());
	/// assert!(Metadata::validate_keys(["TIT2", "title"]).is_err());
	/// ```
	pub fn validate_keys<I, K>(keys: I) -> Result<()>
	where
		I: IntoIterator<Item = K>,
		K: AsRef<str>,
	{
		for key in keys {
			let key = key.as_ref();
			if MetadataKey::parse(key).is_none() {
				err!(UnknownMetadataKey(key.to_owned()));
			}
		}

		Ok(())
	}

	/// Insert a value for a recognized key
	///
	/// # Errors
	///
	/// `value` has the wrong type for `key`
	pub fn insert(&mut self, key: MetadataKey, value: MetadataValue) -> Result<()> {
		match (key, value) {
			(MetadataKey::Text(id), MetadataValue::Text(text)) => self.set_text(id, text),
			(MetadataKey::Picture, MetadataValue::Bytes(bytes)) => {
				self.set_picture(PictureSource::Bytes(bytes))
			},
			(MetadataKey::Picture, MetadataValue::Path(path)) => {
				self.set_picture(PictureSource::Path(path))
			},
			(MetadataKey::Picture, MetadataValue::Text(path)) => {
				self.set_picture(PictureSource::Path(PathBuf::from(path)))
			},
			(MetadataKey::Comment, MetadataValue::Text(text)) => self.set_comment(text),
			(MetadataKey::Name, MetadataValue::Text(name)) => self.set_name(name),
			(MetadataKey::SyncFilename, MetadataValue::Bool(sync)) => self.set_sync_filename(sync),
			(MetadataKey::RemoveUnnecessaryChunks, MetadataValue::Bool(remove)) => {
				self.set_remove_unnecessary_chunks(remove)
			},
			(key, _) => err!(BadMetadataValue(key.as_str().to_owned())),
		}

		Ok(())
	}

	/// Get the content of a text frame
	pub fn text(&self, id: FrameId) -> Option<&str> {
		self.text
			.iter()
			.find(|(frame_id, _)| *frame_id == id)
			.map(|(_, value)| value.as_str())
	}

	/// Set the content of a text frame, replacing any existing value
	///
	/// Setting an empty value is allowed, the frame will simply not be written.
	pub fn set_text(&mut self, id: FrameId, value: impl Into<String>) {
		let value = value.into();
		match self.text.iter_mut().find(|(frame_id, _)| *frame_id == id) {
			Some((_, existing)) => *existing = value,
			None => self.text.push((id, value)),
		}
	}

	/// Remove a text frame
	pub fn remove_text(&mut self, id: FrameId) {
		self.text.retain(|(frame_id, _)| *frame_id != id);
	}

	/// All text frames, in the order they were first set
	pub fn text_frames(&self) -> impl Iterator<Item = (FrameId, &str)> + '_ {
		self.text.iter().map(|(id, value)| (*id, value.as_str()))
	}

	impl_text_accessors! {
		album        => "TALB";
		bpm          => "TBPM";
		composer     => "TCOM";
		genre        => "TCON";
		copyright    => "TCOP";
		encoded_by   => "TENC";
		lyricist     => "TEXT";
		title        => "TIT2";
		subtitle     => "TIT3";
		key          => "TKEY";
		language     => "TLAN";
		artist       => "TPE1";
		album_artist => "TPE2";
		conductor    => "TPE3";
		remixer      => "TPE4";
		disk         => "TPOS";
		publisher    => "TPUB";
		track        => "TRCK";
		isrc         => "TSRC";
		encoder      => "TSSE";
		year         => "TYER";
	}

	/// The attached picture source
	pub fn picture(&self) -> Option<&PictureSource> {
		self.picture.as_ref()
	}

	/// Set the attached picture
	pub fn set_picture(&mut self, picture: impl Into<PictureSource>) {
		self.picture = Some(picture.into());
	}

	/// Remove the attached picture
	pub fn remove_picture(&mut self) {
		self.picture = None;
	}

	/// The comment frame
	pub fn comment(&self) -> Option<&CommentFrame<'static>> {
		self.comment.as_ref()
	}

	/// Set a comment with the default language and an empty description
	pub fn set_comment(&mut self, content: impl Into<String>) {
		self.comment = Some(CommentFrame::new(content.into()));
	}

	/// Set a comment with a custom language or description
	pub fn set_comment_frame(&mut self, comment: CommentFrame<'static>) {
		self.comment = Some(comment);
	}

	/// Remove the comment
	pub fn remove_comment(&mut self) {
		self.comment = None;
	}

	/// The base name (no directory or extension) of the output file
	pub fn name(&self) -> Option<&str> {
		self.name.as_deref()
	}

	/// Set the base name of the output file
	///
	/// When unset, the source's file stem is used.
	pub fn set_name(&mut self, name: impl Into<String>) {
		self.name = Some(name.into());
	}

	/// Whether the output file is renamed to [`Metadata::name`]
	pub fn sync_filename(&self) -> Option<bool> {
		self.sync_filename
	}

	/// Set whether the output file is renamed to [`Metadata::name`] (default `true`)
	pub fn set_sync_filename(&mut self, sync_filename: bool) {
		self.sync_filename = Some(sync_filename);
	}

	/// Whether everything but the `fmt ` and `data` chunks is dropped
	pub fn remove_unnecessary_chunks(&self) -> Option<bool> {
		self.remove_unnecessary_chunks
	}

	/// Set whether everything but the `fmt ` and `data` chunks is dropped (default `false`)
	pub fn set_remove_unnecessary_chunks(&mut self, remove_unnecessary_chunks: bool) {
		self.remove_unnecessary_chunks = Some(remove_unnecessary_chunks);
	}
}

#[cfg(test)]
mod tests {
	use super::{Metadata, MetadataKey, MetadataValue};
	use crate::config::{ParseOptions, ParsingMode};
	use crate::error::ErrorKind;
	use crate::id3::{FrameId, TEXT_FRAMES};
	use crate::picture::PictureSource;

	use std::path::PathBuf;

	#[test_log::test]
	fn accessors_use_known_ids() {
		for id in super::Metadata::ACCESSOR_IDS {
			assert!(TEXT_FRAMES.contains(id), "{id} is not a text frame");
		}
	}

	#[test_log::test]
	fn set_replaces_in_place() {
		let mut metadata = Metadata::new();
		metadata.set_title("First");
		metadata.set_artist("Artist");
		metadata.set_title("Second");

		let frames = metadata.text_frames().collect::<Vec<_>>();
		assert_eq!(
			frames,
			[
				(FrameId::new("TIT2").unwrap(), "Second"),
				(FrameId::new("TPE1").unwrap(), "Artist"),
			]
		);

		metadata.remove_title();
		assert_eq!(metadata.title(), None);
		assert_eq!(metadata.text_frames().count(), 1);
	}

	#[test_log::test]
	fn keys_round_trip() {
		for key in TEXT_FRAMES.iter().copied().chain([
			"APIC",
			"COMM",
			"name",
			"syncFilename",
			"removeUnnecessaryChunks",
		]) {
			assert_eq!(MetadataKey::parse(key).unwrap().as_str(), key);
		}
	}

	#[test_log::test]
	fn from_entries_all_keys() {
		let entries: Vec<(&str, MetadataValue)> = vec![
			("TIT2", "Song".into()),
			("TYER", "2024".into()),
			("APIC", vec![0xFF, 0xD8, 0xFF].into()),
			("COMM", "Comment".into()),
			("name", "out".into()),
			("syncFilename", true.into()),
			("removeUnnecessaryChunks", true.into()),
		];

		let metadata = Metadata::from_entries(entries, ParseOptions::new()).unwrap();
		assert_eq!(metadata.title(), Some("Song"));
		assert_eq!(metadata.year(), Some("2024"));
		assert_eq!(
			metadata.picture(),
			Some(&PictureSource::Bytes(vec![0xFF, 0xD8, 0xFF]))
		);
		assert_eq!(&*metadata.comment().unwrap().content, "Comment");
		assert_eq!(metadata.name(), Some("out"));
		assert_eq!(metadata.sync_filename(), Some(true));
		assert_eq!(metadata.remove_unnecessary_chunks(), Some(true));
	}

	#[test_log::test]
	fn picture_text_is_a_path() {
		let entries = [("APIC", MetadataValue::from("cover.jpg"))];
		let metadata = Metadata::from_entries(entries, ParseOptions::new()).unwrap();

		assert_eq!(
			metadata.picture(),
			Some(&PictureSource::Path(PathBuf::from("cover.jpg")))
		);
	}

	#[test_log::test]
	fn unknown_keys_by_mode() {
		let entries = || [("TIT2", MetadataValue::from("Song")), ("bogus", "x".into())];

		for mode in [ParsingMode::BestAttempt, ParsingMode::Relaxed] {
			let metadata =
				Metadata::from_entries(entries(), ParseOptions::new().parsing_mode(mode)).unwrap();
			assert_eq!(metadata.title(), Some("Song"));
		}

		let err = Metadata::from_entries(
			entries(),
			ParseOptions::new().parsing_mode(ParsingMode::Strict),
		)
		.unwrap_err();
		assert!(matches!(err.kind(), ErrorKind::UnknownMetadataKey(key) if key == "bogus"));
	}

	#[test_log::test]
	fn validate_checks_every_key() {
		assert!(Metadata::validate_keys(Vec::<String>::new()).is_ok());

		// The bad key isn't the first one
		let err = Metadata::validate_keys(["TIT2", "COMM", "TXXX"]).unwrap_err();
		assert!(matches!(err.kind(), ErrorKind::UnknownMetadataKey(key) if key == "TXXX"));
	}

	#[test_log::test]
	fn wrong_value_type() {
		let err = Metadata::from_entries([("TIT2", MetadataValue::Bool(true))], ParseOptions::new())
			.unwrap_err();
		assert!(matches!(err.kind(), ErrorKind::BadMetadataValue(key) if key == "TIT2"));

		let err = Metadata::from_entries(
			[("syncFilename", MetadataValue::from("yes"))],
			ParseOptions::new(),
		)
		.unwrap_err();
		assert!(matches!(err.kind(), ErrorKind::BadMetadataValue(key) if key == "syncFilename"));
	}
}
