pub(crate) mod text;
pub mod writer;
