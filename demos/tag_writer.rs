#![allow(missing_docs)]

use wavtag::config::{ParseOptions, ParsingMode, WriteOptions};
use wavtag::pipeline::{SourceFile, Tagger};
use wavtag::{Metadata, MetadataValue};

use structopt::StructOpt;

use std::path::PathBuf;

#[derive(Debug, StructOpt)]
#[structopt(name = "tag_writer", about = "Embed an ID3v2 tag into WAV files")]
struct Opt {
	#[structopt(short, long)]
	title: Option<String>,

	#[structopt(short, long)]
	artist: Option<String>,

	#[structopt(short = "A", long)]
	album: Option<String>,

	#[structopt(short, long)]
	genre: Option<String>,

	#[structopt(short, long)]
	comment: Option<String>,

	/// Cover art, a JPEG or PNG file
	#[structopt(short, long, parse(from_os_str))]
	picture: Option<PathBuf>,

	/// Any other frame, as `ID=VALUE` (ex. `TYER=2024`)
	#[structopt(short, long = "frame")]
	frames: Vec<String>,

	/// Rename the output to this (no extension)
	#[structopt(short, long)]
	name: Option<String>,

	/// Keep the original file name, even if `--name` is given
	#[structopt(long)]
	keep_filename: bool,

	/// Only keep the `fmt ` and `data` chunks
	#[structopt(long)]
	strip: bool,

	/// Name the tag chunk `id3 ` instead of `ID3 `
	#[structopt(long)]
	lowercase_chunk: bool,

	/// Bytes of padding to reserve after the frames
	#[structopt(long, default_value = "1024")]
	padding: u32,

	#[structopt(parse(from_os_str), required = true)]
	paths: Vec<PathBuf>,
}

fn main() {
	env_logger::init();

	let opt = Opt::from_args();

	let mut entries: Vec<(String, MetadataValue)> = Vec::new();
	for frame in &opt.frames {
		let Some((id, value)) = frame.split_once('=') else {
			eprintln!("ERROR: Expected `ID=VALUE`, got `{frame}`");
			std::process::exit(1);
		};

		entries.push((id.to_owned(), value.into()));
	}

	// Reject any typo'd frame IDs up front
	let mut metadata = Metadata::from_entries(
		entries,
		ParseOptions::new().parsing_mode(ParsingMode::Strict),
	)
	.expect("ERROR: Invalid frame provided!");

	if let Some(title) = opt.title {
		metadata.set_title(title)
	}

	if let Some(artist) = opt.artist {
		metadata.set_artist(artist)
	}

	if let Some(album) = opt.album {
		metadata.set_album(album)
	}

	if let Some(genre) = opt.genre {
		metadata.set_genre(genre)
	}

	if let Some(comment) = opt.comment {
		metadata.set_comment(comment)
	}

	if let Some(picture) = opt.picture {
		metadata.set_picture(picture)
	}

	if let Some(name) = opt.name {
		if opt.paths.len() > 1 {
			eprintln!("WARN: Renaming multiple files to the same name, only the last will remain");
		}

		metadata.set_name(name)
	}

	metadata.set_sync_filename(!opt.keep_filename);
	metadata.set_remove_unnecessary_chunks(opt.strip);

	let tagger = Tagger::new(metadata).write_options(
		WriteOptions::new()
			.preferred_padding(opt.padding)
			.uppercase_id3v2_chunk(!opt.lowercase_chunk),
	);

	let outcomes = tagger.process_all(opt.paths.into_iter().map(SourceFile::from_path));

	let mut failed = false;
	for outcome in outcomes {
		let file = match outcome.result {
			Ok(file) => file,
			Err(e) => {
				eprintln!("ERROR: {}: {e}", outcome.path.display());
				failed = true;
				continue;
			},
		};

		let contents = file.buffer().expect("tagged files are always buffered");
		std::fs::write(&file.path, contents).expect("ERROR: Failed to write the file!");

		println!("INFO: Wrote {}", file.path.display());
	}

	if failed {
		std::process::exit(1);
	}
}
