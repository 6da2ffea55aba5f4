// error.rs
//
// Copyright (c) 2019-2020  Douglas Lau
//
use std::fmt;
use std::io;

/// Errors encountered while reading a GIF file
#[derive(Debug)]
pub enum Error {
    /// A wrapped I/O error
    Io(io::Error),
    /// The first three bytes of the file are not `GIF`
    InvalidSignature([u8; 3]),
    /// The version in the header is not `87a` or `89a`
    UnsupportedVersion([u8; 3]),
    /// A block did not begin with its expected signature byte
    InvalidBlockSignature(u8),
    /// Two graphic control extensions with no image between them
    DuplicateGraphicControl,
    /// A block code not defined by the GIF format
    UnknownBlockCode([u8; 2]),
    /// The file ended in the middle of a block
    UnexpectedEndOfFile,
}

/// Gifmeta result type
pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Io(err) => err.fmt(fmt),
            _ => fmt::Debug::fmt(self, fmt),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}
