//! ID3v2.3 tag creation
//!
//! Only writing is supported. The tag is built from [`Metadata`](crate::Metadata) and is meant to
//! be embedded in a WAV file as an `ID3 ` chunk.

pub mod frame;
mod frame_id;
pub mod synchsafe;
pub mod tag;

pub use frame_id::{FrameId, TEXT_FRAMES};
pub use tag::{Id3v2TagBuilder, build_tag_block};
