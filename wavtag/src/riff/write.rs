use super::chunk::Chunk;
use crate::error::Result;
use crate::macros::err;
use crate::util::writer::ByteWriter;

const RIFF_FORM_TYPE: &[u8; 4] = b"WAVE";

/// Serialize chunks into a complete RIFF/WAVE file
///
/// The chunks are written in order, each followed by a pad byte if its size is odd. The `RIFF`
/// size is computed from the chunks.
///
/// # Errors
///
/// * A chunk, or the file as a whole, is larger than [`u32::MAX`]
///
/// # Examples
///
/// ```rust
/// use wavtag::riff::{Chunk, write_riff};
///
/// # fn main() -> wavtag::error::Result<()> {
/// let file = write_riff(&[Chunk::new(*b"abcd", vec![1, 2, 3])])?;
///
/// assert_eq!(&file[..4], b"RIFF");
/// // "WAVE" + chunk header + data + pad byte
/// assert_eq!(&file[4..8], &16_u32.to_le_bytes());
/// assert_eq!(&file[8..], b"WAVEabcd\x03\x00\x00\x00\x01\x02\x03\x00");
/// # Ok(()) }
/// ```
pub fn write_riff<'a, I>(chunks: I) -> Result<Vec<u8>>
where
	I: IntoIterator<Item = &'a Chunk>,
{
	let mut body = ByteWriter::new();
	body.push_bytes(RIFF_FORM_TYPE);

	for chunk in chunks {
		let Ok(size) = u32::try_from(chunk.data.len()) else {
			log::error!("Chunk {} is too large to be written", chunk.id_str());
			err!(TooMuchData);
		};

		log::trace!("Writing chunk {}, size: {size} bytes", chunk.id_str());

		body.push_bytes(&chunk.id)
			.push_u32_le(size)
			.push_bytes(&chunk.data);

		// It is required an odd length chunk be padded with a 0
		// The 0 isn't included in the chunk size, however
		if chunk.needs_padding() {
			body.push_u8(0);
		}
	}

	let Ok(stream_size) = u32::try_from(body.len()) else {
		err!(TooMuchData);
	};

	let mut file = ByteWriter::with_capacity(body.len() + 8);
	file.push_bytes(b"RIFF")
		.push_u32_le(stream_size)
		.push_bytes(body.as_bytes());

	Ok(file.into_inner())
}
