/// Options to control how wavtag writes a tagged file
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub struct WriteOptions {
	pub(crate) preferred_padding: Option<u32>,
	pub(crate) uppercase_id3v2_chunk: bool,
}

impl WriteOptions {
	/// Default preferred padding size in bytes
	///
	/// This is the amount of zeroed space reserved at the end of the ID3v2 tag, so that other
	/// tools can edit the tag in place without resizing the chunk.
	pub const DEFAULT_PREFERRED_PADDING: u32 = 1024;

	/// Creates a new `WriteOptions`, alias for `Default` implementation
	///
	/// See also: [`WriteOptions::default`]
	///
	/// # Examples
	///
	/// ```rust
	/// use wavtag::config::WriteOptions;
	///
	/// let write_options = WriteOptions::new();
	/// ```
	pub const fn new() -> Self {
		Self {
			preferred_padding: Some(Self::DEFAULT_PREFERRED_PADDING),
			uppercase_id3v2_chunk: true,
		}
	}

	/// Set the preferred padding size in bytes
	///
	/// The padding is written as zeroes after the last frame, and is included in the size
	/// declared in the tag header.
	///
	/// # Examples
	///
	/// ```rust
	/// use wavtag::config::WriteOptions;
	///
	/// // Leave even more room for other editors
	/// let options = WriteOptions::new().preferred_padding(2048);
	///
	/// // ...Or no padding at all
	/// let options = WriteOptions::new().preferred_padding(0);
	/// ```
	pub fn preferred_padding(mut self, preferred_padding: u32) -> Self {
		match preferred_padding {
			0 => self.preferred_padding = None,
			_ => self.preferred_padding = Some(preferred_padding),
		}
		self
	}

	/// Whether to uppercase the ID3v2 chunk name
	///
	/// Some software may expect the chunk to be named `id3 ` rather than `ID3 `.
	///
	/// NOTE: Existing tags are removed regardless of the casing of their chunk name.
	///
	/// # Examples
	///
	/// ```rust
	/// use wavtag::config::WriteOptions;
	///
	/// // I want to keep the ID3v2 chunk name lowercase
	/// let options = WriteOptions::new().uppercase_id3v2_chunk(false);
	/// ```
	pub fn uppercase_id3v2_chunk(mut self, uppercase_id3v2_chunk: bool) -> Self {
		self.uppercase_id3v2_chunk = uppercase_id3v2_chunk;
		self
	}

	pub(crate) fn padding(self) -> u32 {
		self.preferred_padding.unwrap_or(0)
	}

	pub(crate) fn chunk_id(self) -> [u8; 4] {
		if self.uppercase_id3v2_chunk {
			*b"ID3 "
		} else {
			*b"id3 "
		}
	}
}

impl Default for WriteOptions {
	/// The default implementation for `WriteOptions`
	///
	/// The defaults are as follows:
	///
	/// ```rust,ignore
	/// WriteOptions {
	/// 	preferred_padding: 1024,
	/// 	uppercase_id3v2_chunk: true,
	/// }
	/// ```
	fn default() -> Self {
		Self::new()
	}
}
