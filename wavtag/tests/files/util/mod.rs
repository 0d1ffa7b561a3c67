use wavtag::config::ParseOptions;
use wavtag::id3::synchsafe::SynchsafeInteger;
use wavtag::riff::{Chunk, read_chunks, write_riff};

use std::io::Cursor;
use std::path::{Path, PathBuf};

use hound::{SampleFormat, WavSpec, WavWriter};

pub const SPEC: WavSpec = WavSpec {
	channels: 2,
	sample_rate: 44100,
	bits_per_sample: 16,
	sample_format: SampleFormat::Int,
};

/// A short stereo sine-ish sweep, so the samples aren't all zero
pub fn samples() -> Vec<i16> {
	(0..256_i32).map(|i| ((i * 97) % 4096 - 2048) as i16).collect()
}

/// Encode [`samples()`] as a minimal PCM WAV file (`fmt ` and `data` only)
pub fn pcm_wav() -> Vec<u8> {
	let mut bytes = Vec::new();

	let mut writer = WavWriter::new(Cursor::new(&mut bytes), SPEC).unwrap();
	for sample in samples() {
		writer.write_sample(sample).unwrap();
	}
	writer.finalize().unwrap();

	bytes
}

/// [`pcm_wav()`] with a RIFF INFO list before the audio and a junk chunk after it
pub fn pcm_wav_with_extra_chunks() -> Vec<u8> {
	let mut chunks = read(&pcm_wav());

	chunks.insert(0, Chunk::new(*b"LIST", b"INFOIART\x07\x00\x00\x00Artist\x00\x00".to_vec()));
	chunks.push(Chunk::new(*b"junk", vec![0xAA; 3]));

	write_riff(&chunks).unwrap()
}

/// Write `contents` into a new file `name` inside `dir`
pub fn write_temp(dir: &Path, name: &str, contents: &[u8]) -> PathBuf {
	let path = dir.join(name);
	std::fs::write(&path, contents).unwrap();
	path
}

pub fn read(contents: &[u8]) -> Vec<Chunk> {
	read_chunks(&mut Cursor::new(contents), ParseOptions::new()).unwrap()
}

pub fn chunk_ids(contents: &[u8]) -> Vec<[u8; 4]> {
	read(contents).into_iter().map(|chunk| chunk.id).collect()
}

/// Returns the size field of the tag header, and every `(ID, payload)` pair
pub fn parse_tag(tag: &[u8]) -> (u32, Vec<(String, Vec<u8>)>) {
	assert_eq!(&tag[..6], b"ID3\x03\x00\x00");

	let size = u32::from_be_bytes(tag[6..10].try_into().unwrap()).unsynch();
	assert_eq!(tag.len(), 10 + size as usize);

	let mut frames = Vec::new();
	let mut content = &tag[10..];
	while content.len() >= 10 && content[0] != 0 {
		let id = String::from_utf8(content[..4].to_vec()).unwrap();
		let frame_size = u32::from_be_bytes(content[4..8].try_into().unwrap()) as usize;

		frames.push((id, content[10..10 + frame_size].to_vec()));
		content = &content[10 + frame_size..];
	}

	assert!(content.iter().all(|b| *b == 0), "padding must be zeroed");
	(size, frames)
}

/// Decode a BOM-prefixed UTF-16LE string
pub fn utf16(bytes: &[u8]) -> String {
	assert_eq!(&bytes[..2], &[0xFF, 0xFE]);

	let units = bytes[2..]
		.chunks_exact(2)
		.map(|unit| u16::from_le_bytes([unit[0], unit[1]]))
		.collect::<Vec<_>>();
	String::from_utf16(&units).unwrap()
}

/// The tag of a tagged file, which must be its last chunk
pub fn last_tag(contents: &[u8]) -> Vec<u8> {
	let chunk = read(contents).pop().unwrap();
	assert!(chunk.id == *b"ID3 " || chunk.id == *b"id3 ");
	chunk.data
}
