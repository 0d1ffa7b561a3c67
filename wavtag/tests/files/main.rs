#![allow(missing_docs)]

mod pipeline;
mod transcode;
mod util;
