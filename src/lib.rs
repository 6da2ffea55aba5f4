// lib.rs      gifmeta crate.
//
// Copyright (c) 2019-2020  Douglas Lau
//
#[macro_use]
extern crate log;

pub mod block;
mod decode;
mod error;

pub use crate::block::{Gif, GifImage};
pub use crate::decode::Decoder;
pub use crate::error::{Error, Result};
