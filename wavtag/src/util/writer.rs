use crate::error::Result;
use crate::id3::synchsafe::SynchsafeInteger;
use crate::macros::err;
use crate::util::text::utf16_encode;

use data_encoding::HEXLOWER_PERMISSIVE;

// Prepended to every key written by `ByteWriter::push_key_value_pairs`
const KEY_MARKER: &str = "\\@";

/// An append-only binary buffer
///
/// All integers are written with a fixed width, and all "wide" strings are UTF-16LE
/// without a byte order mark.
///
/// # Examples
///
/// ```rust
/// use wavtag::ByteWriter;
///
/// # fn main() -> wavtag::error::Result<()> {
/// let mut writer = ByteWriter::new();
/// writer
/// 	.push_bytes(b"ID3")
/// 	.push_bytes(&[3, 0])
/// 	.push_u8(0)
/// 	.push_synchsafe_u32(1024)?;
///
/// assert_eq!(writer.as_bytes(), b"ID3\x03\x00\x00\x00\x00\x08\x00");
/// # Ok(()) }
/// ```
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct ByteWriter {
	buf: Vec<u8>,
}

impl ByteWriter {
	/// Create a new empty `ByteWriter`
	pub fn new() -> Self {
		Self::default()
	}

	/// Create a new empty `ByteWriter` with room for `capacity` bytes
	pub fn with_capacity(capacity: usize) -> Self {
		Self {
			buf: Vec::with_capacity(capacity),
		}
	}

	/// Append a single byte
	pub fn push_u8(&mut self, value: u8) -> &mut Self {
		self.buf.push(value);
		self
	}

	/// Append a raw byte sequence
	pub fn push_bytes(&mut self, value: &[u8]) -> &mut Self {
		self.buf.extend_from_slice(value);
		self
	}

	/// Append a big endian `u16`
	pub fn push_u16_be(&mut self, value: u16) -> &mut Self {
		self.push_bytes(&value.to_be_bytes())
	}

	/// Append a little endian `u32`
	pub fn push_u32_le(&mut self, value: u32) -> &mut Self {
		self.push_bytes(&value.to_le_bytes())
	}

	/// Append a big endian `u32`
	pub fn push_u32_be(&mut self, value: u32) -> &mut Self {
		self.push_bytes(&value.to_be_bytes())
	}

	/// Append a 4 byte synchsafe integer
	///
	/// Each byte holds 7 bits of `size`, most significant group first. The top bit of every byte
	/// is zero.
	///
	/// # Errors
	///
	/// `size` doesn't fit in 28 bits
	///
	/// # Examples
	///
	/// ```rust
	/// use wavtag::ByteWriter;
	///
	/// # fn main() -> wavtag::error::Result<()> {
	/// let mut writer = ByteWriter::new();
	/// writer.push_synchsafe_u32(0xFFF_FFFF)?;
	/// assert_eq!(writer.as_bytes(), &[0x7F, 0x7F, 0x7F, 0x7F]);
	///
	/// assert!(writer.push_synchsafe_u32(0x1000_0000).is_err());
	/// # Ok(()) }
	/// ```
	pub fn push_synchsafe_u32(&mut self, size: u32) -> Result<&mut Self> {
		let synch = size.synch()?;
		Ok(self.push_u32_be(synch))
	}

	/// Decode a hex string and append the bytes
	///
	/// Both lowercase and uppercase digits are accepted.
	///
	/// # Errors
	///
	/// `value` is not valid hex (odd length or invalid characters)
	pub fn push_hex(&mut self, value: &str) -> Result<&mut Self> {
		let decoded = HEXLOWER_PERMISSIVE.decode(value.as_bytes())?;
		Ok(self.push_bytes(&decoded))
	}

	/// Append a length-prefixed UTF-16LE string
	///
	/// The prefix is a little endian `u32` holding the number of UTF-16 code units, not bytes.
	/// An empty string only writes a zero length.
	///
	/// # Errors
	///
	/// The length doesn't fit in a `u32`
	///
	/// # Examples
	///
	/// ```rust
	/// use wavtag::ByteWriter;
	///
	/// # fn main() -> wavtag::error::Result<()> {
	/// let mut writer = ByteWriter::new();
	/// writer.push_wide_string("hi")?;
	/// assert_eq!(writer.as_bytes(), &[2, 0, 0, 0, b'h', 0, b'i', 0]);
	/// # Ok(()) }
	/// ```
	pub fn push_wide_string(&mut self, value: &str) -> Result<&mut Self> {
		let len = value.encode_utf16().count();
		self.push_u32_le(length_prefix(len)?);

		if len > 0 {
			let encoded = utf16_encode(value, u16::to_le_bytes, false, false);
			self.push_bytes(&encoded);
		}

		Ok(self)
	}

	/// Append a count-prefixed list of wide strings
	///
	/// See [`ByteWriter::push_wide_string`] for the layout of each element.
	///
	/// # Errors
	///
	/// The count, or the length of any string, doesn't fit in a `u32`
	pub fn push_wide_string_array<S>(&mut self, values: &[S]) -> Result<&mut Self>
	where
		S: AsRef<str>,
	{
		self.push_u32_le(length_prefix(values.len())?);
		for value in values {
			self.push_wide_string(value.as_ref())?;
		}

		Ok(self)
	}

	/// Append a count-prefixed list of key/value pairs
	///
	/// Each pair is written as two wide strings, with the key prefixed by `\@`.
	///
	/// # Errors
	///
	/// The count, or the length of any string, doesn't fit in a `u32`
	pub fn push_key_value_pairs<K, V>(&mut self, pairs: &[(K, V)]) -> Result<&mut Self>
	where
		K: AsRef<str>,
		V: AsRef<str>,
	{
		self.push_u32_le(length_prefix(pairs.len())?);
		for (key, value) in pairs {
			self.push_wide_string(&format!("{KEY_MARKER}{}", key.as_ref()))?;
			self.push_wide_string(value.as_ref())?;
		}

		Ok(self)
	}

	/// The bytes written so far
	pub fn as_bytes(&self) -> &[u8] {
		&self.buf
	}

	/// The number of bytes written so far
	pub fn len(&self) -> usize {
		self.buf.len()
	}

	/// Whether nothing has been written yet
	pub fn is_empty(&self) -> bool {
		self.buf.is_empty()
	}

	/// Extract the written bytes, discarding the `ByteWriter`
	pub fn into_inner(self) -> Vec<u8> {
		self.buf
	}
}

fn length_prefix(len: usize) -> Result<u32> {
	let Ok(len) = u32::try_from(len) else {
		log::error!("Length {len} doesn't fit in a u32 prefix");
		err!(TooMuchData);
	};

	Ok(len)
}
