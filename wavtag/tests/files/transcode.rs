use crate::util;

use wavtag::config::{ParseOptions, ParsingMode, WriteOptions};
use wavtag::error::ErrorKind;
use wavtag::id3::TEXT_FRAMES;
use wavtag::riff::{Chunk, write_riff};
use wavtag::{Metadata, MetadataValue, WavFile};

use std::path::Path;

#[test_log::test]
fn chunks_preserved() {
	let source = util::pcm_wav_with_extra_chunks();
	let original = util::read(&source);

	let mut metadata = Metadata::new();
	metadata.set_title("Song");

	let output = WavFile::from_bytes(&source, ParseOptions::new())
		.unwrap()
		.apply(&metadata, WriteOptions::new())
		.unwrap();

	let mut tagged = util::read(&output.contents);
	let tag = tagged.pop().unwrap();

	assert_eq!(tag.id, *b"ID3 ");
	assert_eq!(tagged, original);
}

#[test_log::test]
fn only_required_chunks() {
	let source = util::pcm_wav_with_extra_chunks();

	let mut metadata = Metadata::new();
	metadata.set_remove_unnecessary_chunks(true);

	let output = WavFile::from_bytes(&source, ParseOptions::new())
		.unwrap()
		.apply(&metadata, WriteOptions::new())
		.unwrap();

	assert_eq!(util::chunk_ids(&output.contents), [*b"fmt ", *b"data", *b"ID3 "]);

	// The audio is untouched
	let original = util::read(&source);
	let tagged = util::read(&output.contents);
	assert_eq!(tagged[..2], original[1..3]);
}

#[test_log::test]
fn required_chunks_keep_their_order() {
	// `data` before `fmt ` isn't valid, but it must not be reordered either
	let source = write_riff(&[
		Chunk::new(*b"data", vec![1, 2, 3, 4]),
		Chunk::new(*b"cue ", vec![0; 4]),
		Chunk::new(*b"fmt ", vec![0; 16]),
	])
	.unwrap();

	let mut metadata = Metadata::new();
	metadata.set_remove_unnecessary_chunks(true);

	let output = WavFile::from_bytes(&source, ParseOptions::new())
		.unwrap()
		.apply(&metadata, WriteOptions::new())
		.unwrap();

	assert_eq!(util::chunk_ids(&output.contents), [*b"data", *b"fmt ", *b"ID3 "]);
}

#[test_log::test]
fn missing_data_chunk() {
	let source = write_riff(&[Chunk::new(*b"fmt ", vec![0; 16])]).unwrap();

	let err = WavFile::from_bytes(&source, ParseOptions::new()).unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::MissingChunk(id) if id == b"data"));
	assert_eq!(err.to_string(), "[data] chunk is not contained in file");
}

#[test_log::test]
fn every_text_frame_decodes() {
	let values = ["Plain ASCII", "Ünïcödé", "日本語のタイトル", "Emoji 🎵🎶", "a"];

	for (i, id) in TEXT_FRAMES.iter().enumerate() {
		let value = values[i % values.len()];

		let metadata = Metadata::from_entries(
			[(*id, MetadataValue::from(value))],
			ParseOptions::new().parsing_mode(ParsingMode::Strict),
		)
		.unwrap();

		let tag = wavtag::id3::build_tag_block(&metadata, WriteOptions::new()).unwrap();
		let (_, frames) = util::parse_tag(&tag);
		assert_eq!(frames.len(), 1);

		let (frame_id, payload) = &frames[0];
		assert_eq!(frame_id, id);

		// Encoding byte + BOM + UTF-16 code units
		let encoded_len = 2 + value.encode_utf16().count() * 2;
		assert_eq!(payload.len(), encoded_len + 1);
		assert_eq!(payload[0], 0x01);
		assert_eq!(util::utf16(&payload[1..]), value);
	}
}

#[test_log::test]
fn picture_mime_types() {
	for (data, mime) in [
		(vec![0xFF, 0xD8, 0xFF, 0xDB, 1, 2, 3], "image/jpeg"),
		(b"\x89PNG\r\n\x1a\n".to_vec(), "image/png"),
		(b"GIF89a".to_vec(), "image/png"),
		(vec![0xFF, 0xD8], "image/png"),
	] {
		let mut metadata = Metadata::new();
		metadata.set_picture(data.clone());

		let tag = wavtag::id3::build_tag_block(&metadata, WriteOptions::new()).unwrap();
		let (_, frames) = util::parse_tag(&tag);
		let (id, payload) = &frames[0];
		assert_eq!(id, "APIC");

		// Encoding, MIME, NUL, picture type, empty description
		assert_eq!(payload[0], 0x00);
		assert_eq!(&payload[1..=mime.len()], mime.as_bytes());
		assert_eq!(payload[mime.len() + 1], 0x00);
		assert_eq!(payload[mime.len() + 2], 0x03);
		assert_eq!(payload[mime.len() + 3], 0x00);
		assert_eq!(&payload[mime.len() + 4..], &data[..]);
	}
}

#[test_log::test]
fn comment_frame() {
	let mut metadata = Metadata::new();
	metadata.set_comment("Recorded live");

	let tag = wavtag::id3::build_tag_block(&metadata, WriteOptions::new()).unwrap();
	let (_, frames) = util::parse_tag(&tag);
	let (id, payload) = &frames[0];

	assert_eq!(id, "COMM");
	assert_eq!(&payload[..4], b"\x01eng");
	// Empty description, still terminated
	assert_eq!(&payload[4..8], &[0xFF, 0xFE, 0x00, 0x00]);
	assert_eq!(util::utf16(&payload[8..]), "Recorded live");
}

#[test_log::test]
fn example_from_disk() {
	let dir = tempfile::tempdir().unwrap();
	let path = util::write_temp(dir.path(), "source.wav", &util::pcm_wav());

	let entries: Vec<(&str, MetadataValue)> = vec![
		("TIT2", "Song".into()),
		("name", "out".into()),
		("syncFilename", true.into()),
	];
	let metadata = Metadata::from_entries(entries, ParseOptions::new()).unwrap();

	let output = WavFile::read_from_path(&path, ParseOptions::new())
		.unwrap()
		.apply(&metadata, WriteOptions::new())
		.unwrap();

	let output_path = output.path.unwrap();
	assert_eq!(output_path, dir.path().join("out.wav"));
	assert_eq!(output_path.file_stem().unwrap(), "out");

	assert_eq!(util::chunk_ids(&output.contents), [*b"fmt ", *b"data", *b"ID3 "]);

	let (size, frames) = util::parse_tag(&util::last_tag(&output.contents));
	assert_eq!(frames.len(), 1);

	// Header (10) + encoding (1) + BOM (2) + "Song" (8)
	let frame_len = 10 + 1 + 2 + 8;
	assert_eq!(size, frame_len + 1024);
}

#[test_log::test]
fn retag_on_disk() {
	let dir = tempfile::tempdir().unwrap();
	let path = util::write_temp(dir.path(), "song.wav", &util::pcm_wav_with_extra_chunks());

	let mut metadata = Metadata::new();
	metadata.set_title("First");
	metadata.set_sync_filename(false);

	let first = WavFile::read_from_path(&path, ParseOptions::new())
		.unwrap()
		.apply(&metadata, WriteOptions::new())
		.unwrap();
	assert_eq!(first.path.as_deref(), Some(path.as_path()));
	std::fs::write(&path, &first.contents).unwrap();

	metadata.set_title("Second");
	let second = WavFile::read_from_path(&path, ParseOptions::new())
		.unwrap()
		.apply(&metadata, WriteOptions::new())
		.unwrap();

	let ids = util::chunk_ids(&second.contents);
	assert_eq!(ids.iter().filter(|id| **id == *b"ID3 ").count(), 1);
	assert_eq!(ids.len(), util::chunk_ids(&first.contents).len());

	let (_, frames) = util::parse_tag(&util::last_tag(&second.contents));
	assert_eq!(util::utf16(&frames[0].1[1..]), "Second");
}

#[test_log::test]
fn odd_sized_tag_is_padded() {
	let mut metadata = Metadata::new();
	// Picture data of odd length, with an odd padding the tag is odd as a whole
	metadata.set_picture(vec![1, 2, 3]);

	let output = WavFile::from_bytes(&util::pcm_wav(), ParseOptions::new())
		.unwrap()
		.apply(&metadata, WriteOptions::new().preferred_padding(1))
		.unwrap();

	let tag = util::last_tag(&output.contents);
	assert_eq!(tag.len() % 2, 1);
	assert_eq!(output.contents.len() % 2, 0);

	let declared = u32::from_le_bytes(output.contents[4..8].try_into().unwrap());
	assert_eq!(declared as usize, output.contents.len() - 8);
}

#[test_log::test]
fn relative_path_without_directory() {
	let wav = WavFile::from_bytes(&util::pcm_wav(), ParseOptions::new())
		.unwrap()
		.with_path("track.wav");

	let mut metadata = Metadata::new();
	metadata.set_name("renamed");

	let output = wav.apply(&metadata, WriteOptions::new()).unwrap();
	assert_eq!(output.path.as_deref(), Some(Path::new("renamed.wav")));
}
