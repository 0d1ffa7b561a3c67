use crate::util;

use wavtag::Metadata;
use wavtag::config::{ParseOptions, ParsingMode, WriteOptions};
use wavtag::error::{ErrorKind, WavTagError};
use wavtag::pipeline::{Contents, SourceFile, Tagger};

use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;

fn titled(title: &str) -> Metadata {
	let mut metadata = Metadata::new();
	metadata.set_title(title);
	metadata
}

fn tagged_title(file: &SourceFile) -> String {
	let (_, frames) = util::parse_tag(&util::last_tag(file.buffer().unwrap()));
	let (_, payload) = frames.iter().find(|(id, _)| id == "TIT2").unwrap();
	util::utf16(&payload[1..])
}

#[test_log::test]
fn fixed_metadata() {
	let tagger = Tagger::new(titled("Fixed"));

	let file = SourceFile::new("a.wav", Contents::Buffer(util::pcm_wav()));
	let file = tagger.process(file).unwrap();

	assert_eq!(file.path, PathBuf::from("a.wav"));
	assert_eq!(tagged_title(&file), "Fixed");
}

#[test_log::test]
fn derived_metadata_sees_chunks() {
	let tagger = Tagger::derive_with(|wav| {
		let stem = wav.path().unwrap().file_stem().unwrap().to_string_lossy();

		let mut metadata = titled(&format!("{stem} ({} chunks)", wav.chunks().len()));
		metadata.set_name(format!("tagged {stem}"));
		Ok(Some(metadata))
	});

	let file = SourceFile::new("dir/song.wav", Contents::Buffer(util::pcm_wav()));
	let file = tagger.process(file).unwrap();

	assert_eq!(file.path, PathBuf::from("dir/tagged song.wav"));
	assert_eq!(tagged_title(&file), "song (2 chunks)");
}

#[test_log::test]
fn no_metadata_passes_through() {
	let source = util::pcm_wav();

	let tagger = Tagger::derive_with(|_| Ok(None));
	let file = tagger
		.process(SourceFile::new("a.wav", Contents::Buffer(source.clone())))
		.unwrap();
	assert_eq!(file.buffer(), Some(&source[..]));

	let tagger = Tagger::derive_deferred(|_, completion| completion.skip());
	let file = tagger
		.process(SourceFile::new("a.wav", Contents::Buffer(source.clone())))
		.unwrap();
	assert_eq!(file.buffer(), Some(&source[..]));
}

#[test_log::test]
fn deferred_on_another_thread() {
	let tagger = Tagger::derive_deferred(|_, completion| {
		std::thread::spawn(move || {
			std::thread::sleep(std::time::Duration::from_millis(10));
			completion.complete(titled("Deferred"));
		});
	});

	let file = tagger
		.process(SourceFile::new("a.wav", Contents::Buffer(util::pcm_wav())))
		.unwrap();
	assert_eq!(tagged_title(&file), "Deferred");
}

#[test_log::test]
fn deferred_dropped() {
	let tagger = Tagger::derive_deferred(|_, completion| drop(completion));

	let err = tagger
		.process(SourceFile::new("a.wav", Contents::Buffer(util::pcm_wav())))
		.unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::CompletionDropped));
}

#[test_log::test]
fn derivation_failures() {
	let tagger = Tagger::derive_deferred(|_, completion| completion.fail("no tags for you"));
	let err = tagger
		.process(SourceFile::new("a.wav", Contents::Buffer(util::pcm_wav())))
		.unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::Metadata(message) if message == "no tags for you"));

	let tagger = Tagger::derive_with(|_| Err(WavTagError::new(ErrorKind::Metadata("x".into()))));
	let err = tagger
		.process(SourceFile::new("a.wav", Contents::Buffer(util::pcm_wav())))
		.unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::Metadata(_)));
}

#[test_log::test]
fn input_shape() {
	let tagger = Tagger::new(titled("Title"));

	let err = tagger
		.process(SourceFile::new("a.wav", Contents::Buffer(Vec::new())))
		.unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::EmptyInput));

	let stream = Box::new(std::io::Cursor::new(util::pcm_wav()));
	let err = tagger
		.process(SourceFile::new("a.wav", Contents::Stream(stream)))
		.unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::StreamingUnsupported));
}

#[test_log::test]
fn invalid_source_skips_derivation() {
	let called = Rc::new(Cell::new(false));

	let called_in_derive = Rc::clone(&called);
	let tagger = Tagger::derive_with(move |_| {
		called_in_derive.set(true);
		Ok(Some(Metadata::new()))
	});

	let err = tagger
		.process(SourceFile::new("a.wav", Contents::Buffer(b"not a wav file".to_vec())))
		.unwrap_err();

	assert!(matches!(err.kind(), ErrorKind::FileDecoding(_)));
	assert!(!called.get());
}

#[test_log::test]
fn read_from_disk() {
	let dir = tempfile::tempdir().unwrap();
	let path = util::write_temp(dir.path(), "disk.wav", &util::pcm_wav());

	let mut metadata = titled("Disk");
	metadata.set_name("renamed");

	let tagger = Tagger::new(metadata).write_options(WriteOptions::new().uppercase_id3v2_chunk(false));
	let file = tagger.process(SourceFile::from_path(&path)).unwrap();

	assert_eq!(file.path, dir.path().join("renamed.wav"));
	assert_eq!(util::chunk_ids(file.buffer().unwrap()).last(), Some(b"id3 "));
	assert_eq!(tagged_title(&file), "Disk");

	// The source is never written
	assert_eq!(std::fs::read(&path).unwrap(), util::pcm_wav());
}

#[test_log::test]
fn strict_riff_size() {
	let mut source = util::pcm_wav();
	// Claim more data than exists
	let declared = u32::from_le_bytes(source[4..8].try_into().unwrap()) + 100;
	source[4..8].copy_from_slice(&declared.to_le_bytes());

	let tagger = Tagger::new(titled("Title"))
		.parse_options(ParseOptions::new().parsing_mode(ParsingMode::Strict));
	let err = tagger
		.process(SourceFile::new("a.wav", Contents::Buffer(source.clone())))
		.unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::SizeMismatch));

	let tagger = Tagger::new(titled("Title"));
	assert!(
		tagger
			.process(SourceFile::new("a.wav", Contents::Buffer(source)))
			.is_ok()
	);
}

#[test_log::test]
fn process_all_isolates_failures() {
	let tagger = Tagger::new(titled("Batch"));

	let files = vec![
		SourceFile::new("one.wav", Contents::Buffer(util::pcm_wav())),
		SourceFile::new("empty.wav", Contents::Buffer(Vec::new())),
		SourceFile::new("broken.wav", Contents::Buffer(b"RIFF\x04\x00\x00\x00WAVE".to_vec())),
		SourceFile::new("two.wav", Contents::Buffer(util::pcm_wav_with_extra_chunks())),
	];

	let outcomes = tagger.process_all(files);
	assert_eq!(outcomes.len(), 4);

	let paths = outcomes
		.iter()
		.map(|outcome| outcome.path.to_str().unwrap())
		.collect::<Vec<_>>();
	assert_eq!(paths, ["one.wav", "empty.wav", "broken.wav", "two.wav"]);

	assert_eq!(tagged_title(outcomes[0].result.as_ref().unwrap()), "Batch");
	assert!(matches!(
		outcomes[1].result.as_ref().unwrap_err().kind(),
		ErrorKind::EmptyInput
	));
	assert!(matches!(
		outcomes[2].result.as_ref().unwrap_err().kind(),
		ErrorKind::MissingChunk(_)
	));
	assert_eq!(tagged_title(outcomes[3].result.as_ref().unwrap()), "Batch");
}
