use super::RIFF_CHUNK_HEADER_SIZE;
use crate::error::Result;
use crate::macros::err;

use std::fmt::{Debug, Formatter};
use std::io::Read;
use std::marker::PhantomData;

use byteorder::{ByteOrder, ReadBytesExt};

/// A single chunk of a RIFF file
///
/// The data never includes the pad byte of odd sized chunks.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Chunk {
	/// The chunk ID, ex. `b"fmt "`
	pub id: [u8; 4],
	/// The chunk content
	pub data: Vec<u8>,
}

impl Chunk {
	/// Create a new `Chunk`
	pub fn new(id: [u8; 4], data: Vec<u8>) -> Self {
		Self { id, data }
	}

	/// The chunk ID as a string, for display
	pub fn id_str(&self) -> std::borrow::Cow<'_, str> {
		String::from_utf8_lossy(&self.id)
	}

	/// Whether this chunk requires a pad byte when written
	pub fn needs_padding(&self) -> bool {
		self.data.len() % 2 != 0
	}
}

impl Debug for Chunk {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Chunk")
			.field("id", &self.id_str())
			.field("size", &self.data.len())
			.finish()
	}
}

pub(crate) struct Chunks<B>
where
	B: ByteOrder,
{
	pub fourcc: [u8; 4],
	pub size: u32,
	remaining_size: u64,
	_phantom: PhantomData<B>,
}

impl<B: ByteOrder> Chunks<B> {
	#[must_use]
	pub const fn new(stream_size: u64) -> Self {
		Self {
			fourcc: [0; 4],
			size: 0,
			remaining_size: stream_size,
			_phantom: PhantomData,
		}
	}

	pub fn remaining_size(&self) -> u64 {
		self.remaining_size
	}

	pub fn next<R>(&mut self, data: &mut R) -> Result<bool>
	where
		R: Read,
	{
		if self.remaining_size < RIFF_CHUNK_HEADER_SIZE {
			return Ok(false);
		}

		data.read_exact(&mut self.fourcc)?;
		self.size = data.read_u32::<B>()?;

		self.remaining_size = self.remaining_size.saturating_sub(RIFF_CHUNK_HEADER_SIZE);

		Ok(true)
	}

	pub fn content<R>(&mut self, data: &mut R) -> Result<Vec<u8>>
	where
		R: Read,
	{
		let size = u64::from(self.size);
		if size > self.remaining_size {
			log::error!(
				"Chunk {} claims {size} bytes, only {} remain",
				String::from_utf8_lossy(&self.fourcc),
				self.remaining_size
			);
			err!(SizeMismatch);
		}

		let mut content = vec![0; self.size as usize];
		data.read_exact(&mut content)?;

		self.remaining_size -= size;
		self.correct_position(data)?;

		Ok(content)
	}

	fn correct_position<R>(&mut self, data: &mut R) -> Result<()>
	where
		R: Read,
	{
		// Chunks are expected to start on even boundaries, and are padded
		// with a 0 if necessary. This is NOT part of the chunk's data,
		// and it is NOT included in the chunk's size
		if self.size % 2 != 0 {
			if self.remaining_size == 0 {
				log::warn!(
					"Chunk {} is missing its pad byte",
					String::from_utf8_lossy(&self.fourcc)
				);
				return Ok(());
			}

			data.read_u8()?;
			self.remaining_size -= 1;
		}

		Ok(())
	}

	pub fn next_chunk<R>(&mut self, data: &mut R) -> Result<Option<Chunk>>
	where
		R: Read,
	{
		if !self.next(data)? {
			return Ok(None);
		}

		let content = self.content(data)?;
		Ok(Some(Chunk::new(self.fourcc, content)))
	}
}
