// block.rs
//
// Copyright (c) 2019-2020  Douglas Lau
//
use pix::rgb::SRgb8;
use std::fmt;

/// Channels in a color table entry
pub(crate) const CHANNELS: usize = 3;

/// Image separator byte, starting an image descriptor
pub(crate) const IMAGE_SEPARATOR: u8 = b',';

/// Extension introducer byte, starting any extension block
pub(crate) const EXTENSION_INTRODUCER: u8 = b'!';

/// Label byte of a graphic control extension
pub(crate) const GRAPHIC_CONTROL_LABEL: u8 = 0xF9;

/// Trailer byte, marking the end of a GIF file
pub(crate) const TRAILER: u8 = b';';

/// Number of color table entries for a 3-bit size code
fn color_table_len(size_code: u8) -> usize {
    2 << (size_code & 0b0111) as usize
}

/// GIF version from the file header.
///
/// Only two versions have ever been defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Version {
    /// Original 1987 version
    Gif87a,
    /// 1989 version, which introduced extension blocks
    Gif89a,
}

impl Version {
    /// Get the version from the three bytes following the signature
    pub(crate) fn from_bytes(b: &[u8]) -> Option<Self> {
        match b {
            b"87a" => Some(Version::Gif87a),
            b"89a" => Some(Version::Gif89a),
            _ => None,
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Version::Gif87a => write!(fmt, "GIF87a"),
            Version::Gif89a => write!(fmt, "GIF89a"),
        }
    }
}

/// Block types which can follow the preamble of a GIF file.
///
/// Classified from the first one or two bytes of a block, before any of
/// it is consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BlockType {
    /// Image descriptor followed by image data
    ImageData,
    /// Graphic control extension
    GraphicControlExt,
    /// Any other extension: comment, plain text, application
    UnknownExt,
    /// Trailer marking the end of the file
    Trailer,
}

impl BlockType {
    /// Classify a block from its first two bytes
    pub fn from_bytes(b0: u8, b1: u8) -> Option<Self> {
        match (b0, b1) {
            (TRAILER, _) => Some(BlockType::Trailer),
            (IMAGE_SEPARATOR, _) => Some(BlockType::ImageData),
            (EXTENSION_INTRODUCER, GRAPHIC_CONTROL_LABEL) => {
                Some(BlockType::GraphicControlExt)
            }
            (EXTENSION_INTRODUCER, _) => Some(BlockType::UnknownExt),
            _ => None,
        }
    }
}

/// Logical screen descriptor block.
///
/// Defines the screen size and global color table properties.  Required
/// in every GIF file, directly after the header.
#[derive(Debug, Default)]
pub struct LogicalScreenDesc {
    /// Width of the logical screen
    screen_width: u16,
    /// Height of the logical screen
    screen_height: u16,
    /// Packed flags
    flags: u8,
    /// Background color index
    background_color_idx: u8,
    /// Pixel aspect ratio
    pixel_aspect_ratio: u8,
}

impl LogicalScreenDesc {
    /// Global color table configured flag
    const COLOR_TABLE_PRESENT: u8 = 0b1000_0000;

    /// Color resolution mask (bits of color available minus one)
    const COLOR_RESOLUTION: u8 = 0b0111_0000;

    /// Global color table ordering flag
    const COLOR_TABLE_ORDERING: u8 = 0b0000_1000;

    /// Global color table size mask
    const COLOR_TABLE_SIZE: u8 = 0b0000_0111;

    /// Set the screen width
    pub(crate) fn with_screen_width(mut self, screen_width: u16) -> Self {
        self.screen_width = screen_width;
        self
    }

    /// Get the screen width
    pub fn screen_width(&self) -> u16 {
        self.screen_width
    }

    /// Set the screen height
    pub(crate) fn with_screen_height(mut self, screen_height: u16) -> Self {
        self.screen_height = screen_height;
        self
    }

    /// Get the screen height
    pub fn screen_height(&self) -> u16 {
        self.screen_height
    }

    /// Set the packed flags
    pub(crate) fn with_flags(mut self, flags: u8) -> Self {
        self.flags = flags;
        self
    }

    /// Get the packed flags
    pub fn flags(&self) -> u8 {
        self.flags
    }

    /// Check if the global color table is present
    pub fn color_table_present(&self) -> bool {
        self.flags & Self::COLOR_TABLE_PRESENT != 0
    }

    /// Get the color resolution: bits per channel of the original
    /// palette, minus one
    pub fn color_resolution(&self) -> u8 {
        (self.flags & Self::COLOR_RESOLUTION) >> 4
    }

    /// Check if the global color table is sorted, most important
    /// colors first
    pub fn color_table_sorted(&self) -> bool {
        self.flags & Self::COLOR_TABLE_ORDERING != 0
    }

    /// Get the number of entries in the global color table.
    ///
    /// Derived from the size code whether or not the table is present.
    pub fn color_table_len(&self) -> usize {
        color_table_len(self.flags & Self::COLOR_TABLE_SIZE)
    }

    /// Set the background color index
    pub(crate) fn with_background_color_idx(mut self, idx: u8) -> Self {
        self.background_color_idx = idx;
        self
    }

    /// Get the background color index
    pub fn background_color_idx(&self) -> u8 {
        self.background_color_idx
    }

    /// Set the pixel aspect ratio
    pub(crate) fn with_pixel_aspect_ratio(mut self, ratio: u8) -> Self {
        self.pixel_aspect_ratio = ratio;
        self
    }

    /// Get the pixel aspect ratio
    pub fn pixel_aspect_ratio(&self) -> u8 {
        self.pixel_aspect_ratio
    }
}

/// Color table block: an ordered sequence of RGB entries.
///
/// Used for the global color table as well as local tables; the owning
/// descriptor determines the number of entries.
#[derive(Debug, Default)]
pub struct ColorTable {
    /// Color data, three bytes per entry
    colors: Vec<u8>,
}

impl ColorTable {
    /// Create a color table with the given flat RGB data
    pub(crate) fn with_colors(colors: &[u8]) -> Self {
        assert_eq!(colors.len() / CHANNELS * CHANNELS, colors.len());
        let colors = colors.to_vec();
        ColorTable { colors }
    }

    /// Get the number of entries
    pub fn len(&self) -> usize {
        self.colors.len() / CHANNELS
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Get one entry as an sRGB color
    pub fn color(&self, i: usize) -> Option<SRgb8> {
        self.colors
            .chunks_exact(CHANNELS)
            .nth(i)
            .map(|c| SRgb8::new(c[0], c[1], c[2]))
    }

    /// Get the raw color data, three bytes per entry
    pub fn colors(&self) -> &[u8] {
        &self.colors
    }
}

/// Disposal method from a [graphic control] block.
///
/// Tells the player what to do with the frame area before drawing the
/// next frame of an animation.
///
/// [graphic control]: struct.GraphicControl.html
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisposalMethod {
    /// No disposal specified
    NoAction,
    /// Leave the frame in place
    Keep,
    /// Restore to the background color
    Background,
    /// Restore to the previous frame
    Previous,
    /// Reserved disposal methods
    Reserved(u8),
}

impl From<u8> for DisposalMethod {
    fn from(n: u8) -> Self {
        use self::DisposalMethod::*;
        match n & 0b0111 {
            0 => NoAction,
            1 => Keep,
            2 => Background,
            3 => Previous,
            _ => Reserved(n),
        }
    }
}

/// Graphic control extension block.
///
/// Animation parameters for the image which follows it.  Introduced with
/// GIF89a, and optional even there.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GraphicControl {
    /// Packed flags
    flags: u8,
    /// Frame delay time, in centiseconds
    delay_time_cs: u16,
    /// Transparent color index
    transparent_color_idx: u8,
}

impl GraphicControl {
    /// Reserved flags
    #[allow(dead_code)]
    const RESERVED: u8 = 0b1110_0000;

    /// Disposal method mask
    const DISPOSAL_METHOD: u8 = 0b0001_1100;

    /// User input flag
    const USER_INPUT: u8 = 0b0000_0010;

    /// Transparent color flag
    const TRANSPARENT_COLOR: u8 = 0b0000_0001;

    /// Set the packed flags
    pub(crate) fn set_flags(&mut self, flags: u8) {
        self.flags = flags;
    }

    /// Get the packed flags
    pub fn flags(&self) -> u8 {
        self.flags
    }

    /// Get the frame disposal method
    pub fn disposal_method(&self) -> DisposalMethod {
        ((self.flags & Self::DISPOSAL_METHOD) >> 2).into()
    }

    /// Check the user input flag
    pub fn user_input(&self) -> bool {
        self.flags & Self::USER_INPUT != 0
    }

    /// Check the transparent color flag
    pub fn transparency(&self) -> bool {
        self.flags & Self::TRANSPARENT_COLOR != 0
    }

    /// Get the transparent color index, if transparency is enabled
    pub fn transparent_color(&self) -> Option<u8> {
        if self.transparency() {
            Some(self.transparent_color_idx)
        } else {
            None
        }
    }

    /// Get the transparent color index, whether or not transparency
    /// is enabled
    pub fn transparent_color_idx(&self) -> u8 {
        self.transparent_color_idx
    }

    /// Set the transparent color index
    pub(crate) fn set_transparent_color_idx(&mut self, idx: u8) {
        self.transparent_color_idx = idx;
    }

    /// Get the frame delay time, in centiseconds
    pub fn delay_time_cs(&self) -> u16 {
        self.delay_time_cs
    }

    /// Get the frame delay time, in milliseconds
    pub fn delay_time_ms(&self) -> u32 {
        u32::from(self.delay_time_cs) * 10
    }

    /// Set the frame delay time, in centiseconds
    pub(crate) fn set_delay_time_cs(&mut self, delay: u16) {
        self.delay_time_cs = delay;
    }
}

/// Image descriptor block.
///
/// Position, size and local color table properties for one image.
#[derive(Debug, Default)]
pub struct ImageDesc {
    /// Left position of the image on the screen
    left: u16,
    /// Top position of the image on the screen
    top: u16,
    /// Width of the image
    width: u16,
    /// Height of the image
    height: u16,
    /// Packed flags
    flags: u8,
}

impl ImageDesc {
    /// Local color table configured flag
    const COLOR_TABLE_PRESENT: u8 = 0b1000_0000;

    /// Interlaced image flag
    const INTERLACED: u8 = 0b0100_0000;

    /// Local color table ordering flag
    const COLOR_TABLE_ORDERING: u8 = 0b0010_0000;

    /// Reserved flags
    #[allow(dead_code)]
    const RESERVED: u8 = 0b0001_1000;

    /// Local color table size mask
    const COLOR_TABLE_SIZE: u8 = 0b0000_0111;

    /// Set the left position
    pub(crate) fn with_left(mut self, left: u16) -> Self {
        self.left = left;
        self
    }

    /// Get the left position
    pub fn left(&self) -> u16 {
        self.left
    }

    /// Set the top position
    pub(crate) fn with_top(mut self, top: u16) -> Self {
        self.top = top;
        self
    }

    /// Get the top position
    pub fn top(&self) -> u16 {
        self.top
    }

    /// Set the image width
    pub(crate) fn with_width(mut self, width: u16) -> Self {
        self.width = width;
        self
    }

    /// Get the image width
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Set the image height
    pub(crate) fn with_height(mut self, height: u16) -> Self {
        self.height = height;
        self
    }

    /// Get the image height
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Set the packed flags
    pub(crate) fn with_flags(mut self, flags: u8) -> Self {
        self.flags = flags;
        self
    }

    /// Get the packed flags
    pub fn flags(&self) -> u8 {
        self.flags
    }

    /// Check if the image is interlaced
    pub fn interlaced(&self) -> bool {
        self.flags & Self::INTERLACED != 0
    }

    /// Check if the local color table is present
    pub fn color_table_present(&self) -> bool {
        self.flags & Self::COLOR_TABLE_PRESENT != 0
    }

    /// Check if the local color table is sorted, most important
    /// colors first
    pub fn color_table_sorted(&self) -> bool {
        self.flags & Self::COLOR_TABLE_ORDERING != 0
    }

    /// Get the number of entries in the local color table.
    ///
    /// Derived from the size code whether or not the table is present.
    pub fn color_table_len(&self) -> usize {
        color_table_len(self.flags & Self::COLOR_TABLE_SIZE)
    }
}

/// Metadata for one image of a GIF file.
///
/// The pixel data itself is skipped rather than decoded; only its
/// compressed size is recorded.
#[derive(Debug, Default)]
pub struct GifImage {
    /// Image descriptor block
    pub image_desc: ImageDesc,
    /// Local color table, if present
    pub local_color_table: Option<ColorTable>,
    /// Graphic control extension preceding the image, if any
    pub graphic_control_ext: Option<GraphicControl>,
    /// Number of image data bytes skipped, not counting block framing
    pub image_data_sz: usize,
}

/// Metadata for an entire GIF file.
///
/// Contains every block of the file except image data and non-graphic
/// extensions, in file order.
#[derive(Debug)]
pub struct Gif {
    /// Version from the header
    pub version: Version,
    /// Logical screen descriptor block
    pub logical_screen_desc: LogicalScreenDesc,
    /// Global color table, if present
    pub global_color_table: Option<ColorTable>,
    /// Metadata for every image, in file order
    pub images: Vec<GifImage>,
}

impl Gif {
    /// Check whether the file contains more than one image
    pub fn is_animated(&self) -> bool {
        self.images.len() > 1
    }
}
