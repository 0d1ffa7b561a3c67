use super::chunk::{Chunk, Chunks};
use super::{DATA_CHUNK_ID, FMT_CHUNK_ID, RIFF_CHUNK_HEADER_SIZE};
use crate::config::{ParseOptions, ParsingMode};
use crate::error::Result;
use crate::macros::{decode_err, err};

use std::io::{Read, Seek, SeekFrom};

use byteorder::LittleEndian;

// Verifies that the stream is a WAV file and returns the stream length
pub(crate) fn verify_wav<T>(data: &mut T) -> Result<u32>
where
	T: Read,
{
	let mut id = [0; 12];
	data.read_exact(&mut id)
		.map_err(|_| decode_err!("File is too short to be a WAV file"))?;

	if &id[..4] != b"RIFF" {
		decode_err!(@BAIL "WAV file doesn't contain a RIFF chunk");
	}

	if &id[8..] != b"WAVE" {
		decode_err!(@BAIL "Found RIFF file, format is not WAVE");
	}

	log::debug!("File verified to be WAV");
	Ok(u32::from_le_bytes([id[4], id[5], id[6], id[7]]))
}

/// Read every chunk of a WAV file, in order
///
/// Chunks are read up to the end of the stream, not the declared `RIFF` size. Writers that append
/// chunks without updating the size, or stream out a size of `0`, are common.
///
/// How a `RIFF` size that disagrees with the actual stream length is handled depends on the
/// [`ParsingMode`]:
///
/// * [`ParsingMode::Strict`] - Any mismatch is an error
/// * [`ParsingMode::BestAttempt`] - A warning is logged
/// * [`ParsingMode::Relaxed`] - The size is ignored
///
/// # Errors
///
/// * The stream isn't a RIFF/WAVE file
/// * The `RIFF` size doesn't match the stream length ([`ParsingMode::Strict`] only)
/// * A chunk extends past the end of the stream
/// * The stream has no `fmt ` or `data` chunk
///
/// # Examples
///
/// ```rust
/// use wavtag::config::ParseOptions;
/// use wavtag::riff::read_chunks;
///
/// # fn main() -> wavtag::error::Result<()> {
/// let wav = b"RIFF\x18\x00\x00\x00WAVEfmt \x04\x00\x00\x00\x01\x00\x01\x00data\x00\x00\x00\x00";
/// let chunks = read_chunks(&mut std::io::Cursor::new(&wav[..]), ParseOptions::new())?;
///
/// assert_eq!(chunks.len(), 2);
/// assert_eq!(&chunks[0].id, b"fmt ");
/// assert_eq!(&chunks[1].id, b"data");
/// # Ok(()) }
/// ```
pub fn read_chunks<R>(data: &mut R, parse_options: ParseOptions) -> Result<Vec<Chunk>>
where
	R: Read + Seek,
{
	let start = data.stream_position()?;
	let declared_size = verify_wav(data)?;

	let file_len = data.seek(SeekFrom::End(0))?;
	data.seek(SeekFrom::Start(start + RIFF_CHUNK_HEADER_SIZE + 4))?;

	// The RIFF size includes the form type
	let actual_size = (file_len - start).saturating_sub(RIFF_CHUNK_HEADER_SIZE);
	let declared_size = u64::from(declared_size);

	if declared_size != actual_size {
		match parse_options.parsing_mode {
			ParsingMode::Strict => {
				log::error!(
					"RIFF chunk claims {declared_size} bytes, the stream holds {actual_size}"
				);
				err!(SizeMismatch)
			},
			ParsingMode::BestAttempt => log::warn!(
				"RIFF chunk claims {declared_size} bytes, the stream holds {actual_size}, reading \
				 to the end of the stream"
			),
			_ => log::debug!("Ignoring RIFF size {declared_size}, the stream holds {actual_size}"),
		}
	}

	let mut chunks = Chunks::<LittleEndian>::new(actual_size.saturating_sub(4));
	let mut found = Vec::new();

	while let Some(chunk) = chunks.next_chunk(data)? {
		log::debug!(
			"Found chunk {}, size: {} bytes",
			chunk.id_str(),
			chunk.data.len()
		);
		found.push(chunk);
	}

	if chunks.remaining_size() > 0 {
		log::warn!(
			"Ignoring {} trailing bytes, too short to be a chunk",
			chunks.remaining_size()
		);
	}

	for required in [FMT_CHUNK_ID, DATA_CHUNK_ID] {
		if !found.iter().any(|chunk| chunk.id == required) {
			log::error!(
				"File is missing its {} chunk",
				String::from_utf8_lossy(&required)
			);
			err!(MissingChunk(required));
		}
	}

	Ok(found)
}
