// decode.rs
//
// Copyright (c) 2019-2020  Douglas Lau
//
use crate::block::*;
use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::path::Path;

/// Buffer size, large enough for a color table with 256 entries
const BUF_SZ: usize = 1024;

/// Size of the logical screen descriptor block
const SCREEN_DESC_SZ: usize = 7;

/// Size of an image descriptor block, including the separator
const IMAGE_DESC_SZ: usize = 10;

/// Size of a graphic control extension block, including the introducer,
/// label and terminator
const GRAPHIC_CONTROL_SZ: usize = 8;

/// GIF metadata decoder.
///
/// Reads the structure of a GIF file without decompressing any image
/// data.
///
/// ## Example
/// ```
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// # let gif = &[
/// #   0x47, 0x49, 0x46, 0x38, 0x39, 0x61, 0x02, 0x00, 0x02, 0x00,
/// #   0x80, 0x01, 0x00, 0x00, 0x00, 0x00, 0xFF, 0xFF, 0xFF, 0x2C,
/// #   0x00, 0x00, 0x00, 0x00, 0x02, 0x00, 0x02, 0x00, 0x00, 0x02,
/// #   0x03, 0x0C, 0x10, 0x05, 0x00, 0x3B,
/// # ][..];
/// // ... open a `File` as "gif"
/// let meta = gifmeta::Decoder::new(gif).decode()?;
/// println!("screen: {}x{}",
///     meta.logical_screen_desc.screen_width(),
///     meta.logical_screen_desc.screen_height());
/// for image in &meta.images {
///     println!("image data: {} bytes", image.image_data_sz);
/// }
/// # Ok(())
/// # }
/// ```
pub struct Decoder<R: Read> {
    /// Reader for input data
    reader: BufReader<R>,
}

impl<R: Read> Decoder<R> {
    /// Create a new GIF metadata decoder
    pub fn new(r: R) -> Self {
        Decoder {
            reader: BufReader::new(r),
        }
    }

    /// Decode all metadata, consuming the decoder.
    ///
    /// Either the entire structure of the file is valid and a [Gif] is
    /// returned, or the first problem found is returned as an [Error];
    /// there is no partial result.
    ///
    /// [Error]: enum.Error.html
    /// [Gif]: block/struct.Gif.html
    pub fn decode(self) -> Result<Gif> {
        let mut stream = GifStream::new(self.reader);
        let version = stream.consume_header()?;
        debug!("header: {}", version);
        let logical_screen_desc = stream.consume_screen_desc()?;
        debug!("screen desc: {:?}", logical_screen_desc);
        let global_color_table = if logical_screen_desc.color_table_present()
        {
            let len = logical_screen_desc.color_table_len();
            Some(stream.consume_color_table(len)?)
        } else {
            warn!("no global color table");
            None
        };
        let mut images = vec![];
        let mut graphic_control = None;
        loop {
            let block_type = stream.check_block_type()?;
            debug!("block: {:?}", block_type);
            match block_type {
                BlockType::Trailer => break,
                BlockType::GraphicControlExt => {
                    if graphic_control.is_some() {
                        return Err(Error::DuplicateGraphicControl);
                    }
                    graphic_control =
                        Some(stream.consume_graphic_control()?);
                }
                BlockType::ImageData => {
                    let image = GifImage::from_stream(
                        &mut stream,
                        graphic_control.take(),
                    )?;
                    images.push(image);
                }
                BlockType::UnknownExt => {
                    let sz = stream.skip_extension()?;
                    debug!("extension: {} bytes skipped", sz);
                }
            }
        }
        Ok(Gif {
            version,
            logical_screen_desc,
            global_color_table,
            images,
        })
    }
}

impl Gif {
    /// Read metadata from a GIF file on disk.
    ///
    /// The file is closed before this returns, whether or not decoding
    /// succeeds.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Decoder::new(File::open(path)?).decode()
    }
}

impl GifImage {
    /// Decode metadata for one image, skipping past its pixel data
    fn from_stream<R: Read>(
        stream: &mut GifStream<R>,
        graphic_control_ext: Option<GraphicControl>,
    ) -> Result<Self> {
        let image_desc = stream.consume_image_desc()?;
        debug!("image desc: {:?}", image_desc);
        let local_color_table = if image_desc.color_table_present() {
            let len = image_desc.color_table_len();
            Some(stream.consume_color_table(len)?)
        } else {
            None
        };
        let image_data_sz = stream.skip_image_data()?;
        debug!("image data: {} bytes skipped", image_data_sz);
        Ok(GifImage {
            image_desc,
            local_color_table,
            graphic_control_ext,
            image_data_sz,
        })
    }
}

/// Low-level cursor over the blocks of a GIF stream.
///
/// Buffers input internally, providing the sequential consumes the
/// block decoders are built from, plus the two bytes of lookahead
/// needed to classify a block before consuming it.
struct GifStream<R: Read> {
    /// Reader for input data
    reader: BufReader<R>,
    /// Byte buffer, consumed from the front
    buffer: Vec<u8>,
}

impl<R: Read> GifStream<R> {
    /// Create a new GIF stream
    fn new(reader: BufReader<R>) -> Self {
        let buffer = Vec::with_capacity(BUF_SZ);
        GifStream { reader, buffer }
    }

    /// Fill the buffer from the reader
    fn fill_buffer(&mut self) -> Result<()> {
        let mut len = self.buffer.len();
        self.buffer.resize(BUF_SZ, 0);
        while len < BUF_SZ {
            match self.reader.read(&mut self.buffer[len..]) {
                Ok(0) => break, // EOF
                Ok(n) => len += n,
                Err(ref e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(e.into()),
            }
        }
        self.buffer.resize(len, 0);
        Ok(())
    }

    /// Make sure at least `sz` bytes are buffered
    fn need(&mut self, sz: usize) -> Result<()> {
        debug_assert!(sz <= BUF_SZ);
        if self.buffer.len() < sz {
            self.fill_buffer()?;
            if self.buffer.len() < sz {
                return Err(Error::UnexpectedEndOfFile);
            }
        }
        Ok(())
    }

    /// Consume the next byte
    fn next_u8(&mut self) -> Result<u8> {
        self.need(1)?;
        let b = self.buffer[0];
        self.buffer.drain(..1);
        Ok(b)
    }

    /// Consume the next `sz` bytes
    fn next_bytes(&mut self, sz: usize) -> Result<Vec<u8>> {
        self.need(sz)?;
        Ok(self.buffer.drain(..sz).collect())
    }

    /// Advance past the next `sz` bytes without interpreting them
    fn skip(&mut self, sz: usize) -> Result<()> {
        self.need(sz)?;
        self.buffer.drain(..sz);
        Ok(())
    }

    /// Classify the next block in the stream.
    ///
    /// Peeks at up to two bytes without consuming anything; each block
    /// decoder reads its own signature.
    fn check_block_type(&mut self) -> Result<BlockType> {
        if self.buffer.len() < 2 {
            self.fill_buffer()?;
        }
        let buf = &self.buffer[..];
        if buf.is_empty() {
            return Err(Error::UnexpectedEndOfFile);
        }
        if buf[0] == TRAILER {
            return Ok(BlockType::Trailer);
        }
        // other than the trailer, two bytes are needed to classify
        if buf.len() < 2 {
            return Err(Error::UnexpectedEndOfFile);
        }
        BlockType::from_bytes(buf[0], buf[1])
            .ok_or(Error::UnknownBlockCode([buf[0], buf[1]]))
    }

    /// Consume the header block, returning the version.
    ///
    /// The signature is checked before the version, so a short file
    /// with a bad signature reports the signature problem.
    fn consume_header(&mut self) -> Result<Version> {
        let sig = self.next_bytes(3)?;
        if &sig[..] != b"GIF" {
            return Err(Error::InvalidSignature([sig[0], sig[1], sig[2]]));
        }
        let ver = self.next_bytes(3)?;
        Version::from_bytes(&ver)
            .ok_or(Error::UnsupportedVersion([ver[0], ver[1], ver[2]]))
    }

    /// Consume the logical screen descriptor block
    fn consume_screen_desc(&mut self) -> Result<LogicalScreenDesc> {
        let buf = self.next_bytes(SCREEN_DESC_SZ)?;
        Ok(LogicalScreenDesc::from_buf(&buf))
    }

    /// Consume a color table with `len` entries.
    ///
    /// Global and local tables are read the same way; only the
    /// descriptor supplying `len` differs.
    fn consume_color_table(&mut self, len: usize) -> Result<ColorTable> {
        let buf = self.next_bytes(len * CHANNELS)?;
        Ok(ColorTable::with_colors(&buf))
    }

    /// Consume an image descriptor block
    fn consume_image_desc(&mut self) -> Result<ImageDesc> {
        let buf = self.next_bytes(IMAGE_DESC_SZ)?;
        ImageDesc::from_buf(&buf)
    }

    /// Consume a graphic control extension block
    fn consume_graphic_control(&mut self) -> Result<GraphicControl> {
        let buf = self.next_bytes(GRAPHIC_CONTROL_SZ)?;
        GraphicControl::from_buf(&buf)
    }

    /// Skip a chain of sub-blocks, stopping after the zero-length
    /// terminator.
    ///
    /// Returns the number of data bytes skipped, not counting the
    /// length bytes themselves.
    fn skip_sub_blocks(&mut self) -> Result<usize> {
        let mut total = 0;
        loop {
            let sz = usize::from(self.next_u8()?);
            if sz == 0 {
                break;
            }
            self.skip(sz)?;
            total += sz;
        }
        Ok(total)
    }

    /// Skip the pixel data of one image: the LZW minimum code size
    /// byte followed by a sub-block chain.  Nothing is decompressed.
    fn skip_image_data(&mut self) -> Result<usize> {
        self.skip(1)?; // LZW minimum code size
        self.skip_sub_blocks()
    }

    /// Skip an entire extension block.  Used for every extension other
    /// than graphic control: comment, plain text, application, or
    /// anything not yet defined.
    fn skip_extension(&mut self) -> Result<usize> {
        let introducer = self.next_u8()?;
        if introducer != EXTENSION_INTRODUCER {
            return Err(Error::InvalidBlockSignature(introducer));
        }
        self.skip(1)?; // label
        self.skip_sub_blocks()
    }
}

impl LogicalScreenDesc {
    /// Decode a logical screen descriptor block from a buffer
    fn from_buf(buf: &[u8]) -> Self {
        assert_eq!(buf.len(), SCREEN_DESC_SZ);
        let width = (buf[1] as u16) << 8 | buf[0] as u16;
        let height = (buf[3] as u16) << 8 | buf[2] as u16;
        let flags = buf[4];
        let bg_color = buf[5];
        let aspect = buf[6];
        LogicalScreenDesc::default()
            .with_screen_width(width)
            .with_screen_height(height)
            .with_flags(flags)
            .with_background_color_idx(bg_color)
            .with_pixel_aspect_ratio(aspect)
    }
}

impl ImageDesc {
    /// Decode an image descriptor block from a buffer
    fn from_buf(buf: &[u8]) -> Result<Self> {
        assert_eq!(buf.len(), IMAGE_DESC_SZ);
        if buf[0] != IMAGE_SEPARATOR {
            return Err(Error::InvalidBlockSignature(buf[0]));
        }
        let left = (buf[2] as u16) << 8 | buf[1] as u16;
        let top = (buf[4] as u16) << 8 | buf[3] as u16;
        let width = (buf[6] as u16) << 8 | buf[5] as u16;
        let height = (buf[8] as u16) << 8 | buf[7] as u16;
        let flags = buf[9];
        Ok(ImageDesc::default()
            .with_left(left)
            .with_top(top)
            .with_width(width)
            .with_height(height)
            .with_flags(flags))
    }
}

impl GraphicControl {
    /// Decode a graphic control extension block from a buffer.
    ///
    /// The declared block size and the terminator are consumed without
    /// being checked; real files rarely get them wrong in interesting
    /// ways.
    fn from_buf(buf: &[u8]) -> Result<Self> {
        assert_eq!(buf.len(), GRAPHIC_CONTROL_SZ);
        if buf[0] != EXTENSION_INTRODUCER {
            return Err(Error::InvalidBlockSignature(buf[0]));
        }
        if buf[1] != GRAPHIC_CONTROL_LABEL {
            return Err(Error::InvalidBlockSignature(buf[1]));
        }
        // buf[2] is the declared block size
        let mut control = GraphicControl::default();
        control.set_flags(buf[3]);
        control.set_delay_time_cs((buf[5] as u16) << 8 | buf[4] as u16);
        control.set_transparent_color_idx(buf[6]);
        // buf[7] is the block terminator
        Ok(control)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pix::rgb::SRgb8;

    #[test]
    fn minimal_no_global_table() -> Result<()> {
        let gif = [
            0x47, 0x49, 0x46, 0x38, 0x39, 0x61, // header
            0x04, 0x00, 0x03, 0x00, 0x00, 0x00, 0x00, // screen desc
            0x3B, // trailer
        ];
        let meta = Decoder::new(&gif[..]).decode()?;
        assert_eq!(meta.version, Version::Gif89a);
        assert_eq!(meta.logical_screen_desc.screen_width(), 4);
        assert_eq!(meta.logical_screen_desc.screen_height(), 3);
        assert!(!meta.logical_screen_desc.color_table_present());
        assert!(meta.global_color_table.is_none());
        assert!(meta.images.is_empty());
        assert!(!meta.is_animated());
        Ok(())
    }

    #[test]
    fn single_image() -> Result<()> {
        let gif = [
            0x47, 0x49, 0x46, 0x38, 0x39, 0x61, // header
            0x0A, 0x00, 0x0A, 0x00, 0x91, 0x01, 0x00, // screen desc
            0xFF, 0xFF, 0xFF, 0x00, 0x00, 0x00, // global color table
            0xFF, 0x00, 0x00, 0x00, 0xFF, 0x00,
            0x21, 0xF9, 0x04, 0x09, 0x32, 0x00, 0x03, 0x00, // control
            0x2C, 0x02, 0x00, 0x01, 0x00, // image desc
            0x08, 0x00, 0x08, 0x00, 0x81,
            0x01, 0x02, 0x03, 0x04, 0x05, 0x06, // local color table
            0x07, 0x08, 0x09, 0x0A, 0x0B, 0x0C,
            0x02, 0x03, 0xAA, 0xBB, 0xCC, 0x02, 0xDD, 0xEE, 0x00, // data
            0x3B, // trailer
        ];
        let meta = Decoder::new(&gif[..]).decode()?;
        assert_eq!(meta.version, Version::Gif89a);
        let desc = &meta.logical_screen_desc;
        assert_eq!(desc.screen_width(), 10);
        assert_eq!(desc.screen_height(), 10);
        assert_eq!(desc.color_resolution(), 1);
        assert_eq!(desc.background_color_idx(), 1);
        assert!(!desc.color_table_sorted());
        let global = meta.global_color_table.as_ref().unwrap();
        assert_eq!(global.len(), 4);
        assert_eq!(global.color(0), Some(SRgb8::new(0xFF, 0xFF, 0xFF)));
        assert_eq!(global.color(2), Some(SRgb8::new(0xFF, 0x00, 0x00)));
        assert_eq!(meta.images.len(), 1);
        assert!(!meta.is_animated());
        let image = &meta.images[0];
        let control = image.graphic_control_ext.unwrap();
        assert_eq!(control.disposal_method(), DisposalMethod::Background);
        assert_eq!(control.delay_time_cs(), 50);
        assert_eq!(control.delay_time_ms(), 500);
        assert_eq!(control.transparent_color(), Some(3));
        assert!(!control.user_input());
        let desc = &image.image_desc;
        assert_eq!(desc.left(), 2);
        assert_eq!(desc.top(), 1);
        assert_eq!(desc.width(), 8);
        assert_eq!(desc.height(), 8);
        assert!(!desc.interlaced());
        assert_eq!(desc.color_table_len(), 4);
        let local = image.local_color_table.as_ref().unwrap();
        assert_eq!(local.len(), 4);
        assert_eq!(local.color(3), Some(SRgb8::new(0x0A, 0x0B, 0x0C)));
        assert_eq!(image.image_data_sz, 5);
        Ok(())
    }

    #[test]
    fn two_images() -> Result<()> {
        let gif = [
            0x47, 0x49, 0x46, 0x38, 0x39, 0x61, // header
            0x0A, 0x00, 0x0A, 0x00, 0x80, 0x00, 0x00, // screen desc
            0x10, 0x20, 0x30, 0x40, 0x50, 0x60, // global color table
            0x2C, 0x00, 0x00, 0x00, 0x00, // first image desc
            0x0A, 0x00, 0x0A, 0x00, 0x00,
            0x02, 0x01, 0xFF, 0x00, // first image data
            0x21, 0xF9, 0x04, 0x04, 0x0A, 0x00, 0x00, 0x00, // control
            0x2C, 0x00, 0x00, 0x00, 0x00, // second image desc
            0x0A, 0x00, 0x0A, 0x00, 0x00,
            0x02, 0x02, 0xFF, 0xFF, 0x00, // second image data
            0x3B, // trailer
        ];
        let meta = Decoder::new(&gif[..]).decode()?;
        assert_eq!(meta.images.len(), 2);
        assert!(meta.is_animated());
        assert!(meta.images[0].graphic_control_ext.is_none());
        assert!(meta.images[0].local_color_table.is_none());
        assert_eq!(meta.images[0].image_data_sz, 1);
        let control = meta.images[1].graphic_control_ext.unwrap();
        assert_eq!(control.disposal_method(), DisposalMethod::Keep);
        assert_eq!(control.delay_time_cs(), 10);
        assert_eq!(meta.images[1].image_data_sz, 2);
        Ok(())
    }

    #[test]
    fn skipped_extensions() -> Result<()> {
        let gif = [
            0x47, 0x49, 0x46, 0x38, 0x39, 0x61, // header
            0x02, 0x00, 0x02, 0x00, 0x80, 0x00, 0x00, // screen desc
            0x01, 0x02, 0x03, 0x04, 0x05, 0x06, // global color table
            0x21, 0xFE, 0x05, b'h', b'e', b'l', b'l', b'o', 0x00,
            0x21, 0xFF, 0x0B, b'N', b'E', b'T', b'S', b'C', b'A', b'P',
            b'E', b'2', b'.', b'0', 0x03, 0x01, 0x00, 0x00, 0x00,
            0x2C, 0x00, 0x00, 0x00, 0x00, // image desc
            0x02, 0x00, 0x02, 0x00, 0x00,
            0x02, 0x02, 0x4C, 0x01, 0x00, // image data
            0x3B, // trailer
        ];
        let meta = Decoder::new(&gif[..]).decode()?;
        assert_eq!(meta.images.len(), 1);
        assert!(meta.images[0].graphic_control_ext.is_none());
        assert_eq!(meta.images[0].image_data_sz, 2);
        Ok(())
    }

    #[test]
    fn control_survives_extension() -> Result<()> {
        let gif = [
            0x47, 0x49, 0x46, 0x38, 0x39, 0x61, // header
            0x02, 0x00, 0x02, 0x00, 0x00, 0x00, 0x00, // screen desc
            0x21, 0xF9, 0x04, 0x00, 0x0A, 0x00, 0x00, 0x00, // control
            0x21, 0xFE, 0x03, b'a', b'b', b'c', 0x00, // comment
            0x2C, 0x00, 0x00, 0x00, 0x00, // image desc
            0x02, 0x00, 0x02, 0x00, 0x00,
            0x02, 0x01, 0x4C, 0x00, // image data
            0x3B, // trailer
        ];
        let meta = Decoder::new(&gif[..]).decode()?;
        assert_eq!(meta.images.len(), 1);
        let control = meta.images[0].graphic_control_ext.unwrap();
        assert_eq!(control.delay_time_cs(), 10);
        Ok(())
    }

    #[test]
    fn duplicate_graphic_control() {
        let gif = [
            0x47, 0x49, 0x46, 0x38, 0x39, 0x61, // header
            0x02, 0x00, 0x02, 0x00, 0x00, 0x00, 0x00, // screen desc
            0x21, 0xF9, 0x04, 0x00, 0x0A, 0x00, 0x00, 0x00, // control
            0x21, 0xF9, 0x04, 0x00, 0x14, 0x00, 0x00, 0x00, // control
        ];
        match Decoder::new(&gif[..]).decode() {
            Err(Error::DuplicateGraphicControl) => {}
            r => panic!("unexpected result: {:?}", r),
        }
    }

    #[test]
    fn bad_signature() {
        let gif = b"GIX89a\x3B";
        match Decoder::new(&gif[..]).decode() {
            Err(Error::InvalidSignature(sig)) => assert_eq!(&sig, b"GIX"),
            r => panic!("unexpected result: {:?}", r),
        }
        // signature is checked before anything else is read
        let gif = b"GIX";
        match Decoder::new(&gif[..]).decode() {
            Err(Error::InvalidSignature(sig)) => assert_eq!(&sig, b"GIX"),
            r => panic!("unexpected result: {:?}", r),
        }
    }

    #[test]
    fn bad_version() {
        let gif = b"GIF88a\x3B";
        match Decoder::new(&gif[..]).decode() {
            Err(Error::UnsupportedVersion(ver)) => assert_eq!(&ver, b"88a"),
            r => panic!("unexpected result: {:?}", r),
        }
    }

    #[test]
    fn unknown_block() {
        let gif = [
            0x47, 0x49, 0x46, 0x38, 0x39, 0x61, // header
            0x02, 0x00, 0x02, 0x00, 0x00, 0x00, 0x00, // screen desc
            0x99, 0x00, // not a valid block code
        ];
        match Decoder::new(&gif[..]).decode() {
            Err(Error::UnknownBlockCode(code)) => {
                assert_eq!(code, [0x99, 0x00]);
            }
            r => panic!("unexpected result: {:?}", r),
        }
    }

    #[test]
    fn truncated_files() {
        let gif = [0x47, 0x49, 0x46, 0x38, 0x39, 0x61, 0x02, 0x00];
        match Decoder::new(&gif[..]).decode() {
            Err(Error::UnexpectedEndOfFile) => {}
            r => panic!("unexpected result: {:?}", r),
        }
        // missing trailer after a graphic control extension
        let gif = [
            0x47, 0x49, 0x46, 0x38, 0x39, 0x61, // header
            0x02, 0x00, 0x02, 0x00, 0x00, 0x00, 0x00, // screen desc
            0x21, 0xF9, 0x04, 0x00, 0x0A, 0x00, 0x00, 0x00, // control
        ];
        match Decoder::new(&gif[..]).decode() {
            Err(Error::UnexpectedEndOfFile) => {}
            r => panic!("unexpected result: {:?}", r),
        }
        // color table cut short
        let gif = [
            0x47, 0x49, 0x46, 0x38, 0x39, 0x61, // header
            0x02, 0x00, 0x02, 0x00, 0x80, 0x00, 0x00, // screen desc
            0x01, 0x02, 0x03, 0x04, // global table needs 6 bytes
        ];
        match Decoder::new(&gif[..]).decode() {
            Err(Error::UnexpectedEndOfFile) => {}
            r => panic!("unexpected result: {:?}", r),
        }
    }

    #[test]
    fn stops_at_trailer() -> Result<()> {
        let gif = [
            0x47, 0x49, 0x46, 0x38, 0x37, 0x61, // header
            0x02, 0x00, 0x02, 0x00, 0x00, 0x00, 0x00, // screen desc
            0x3B, // trailer
            0xDE, 0xAD, 0xBE, 0xEF, // junk after the trailer
        ];
        let meta = Decoder::new(&gif[..]).decode()?;
        assert_eq!(meta.version, Version::Gif87a);
        assert!(meta.images.is_empty());
        Ok(())
    }

    #[test]
    fn sub_block_chains() -> Result<()> {
        let data = [0x03, 0x01, 0x02, 0x03, 0x02, 0x09, 0x09, 0x00];
        let mut stream = GifStream::new(BufReader::new(&data[..]));
        assert_eq!(stream.skip_sub_blocks()?, 5);
        let data = [0x00];
        let mut stream = GifStream::new(BufReader::new(&data[..]));
        assert_eq!(stream.skip_sub_blocks()?, 0);
        let mut data = vec![0xFF];
        data.extend_from_slice(&[0x55; 255]);
        data.push(0x00);
        let mut stream = GifStream::new(BufReader::new(&data[..]));
        assert_eq!(stream.skip_sub_blocks()?, 255);
        Ok(())
    }

    #[test]
    fn truncated_sub_blocks() {
        let data = [0x05, 0x01, 0x02];
        let mut stream = GifStream::new(BufReader::new(&data[..]));
        match stream.skip_sub_blocks() {
            Err(Error::UnexpectedEndOfFile) => {}
            r => panic!("unexpected result: {:?}", r),
        }
        // chain with a missing terminator
        let data = [0x02, 0x01, 0x02];
        let mut stream = GifStream::new(BufReader::new(&data[..]));
        match stream.skip_sub_blocks() {
            Err(Error::UnexpectedEndOfFile) => {}
            r => panic!("unexpected result: {:?}", r),
        }
    }

    #[test]
    fn screen_desc_fields() {
        let buf = [0x34, 0x12, 0x78, 0x56, 0xA3, 0x05, 0x31];
        let desc = LogicalScreenDesc::from_buf(&buf);
        assert_eq!(desc.screen_width(), 0x1234);
        assert_eq!(desc.screen_height(), 0x5678);
        assert_eq!(desc.flags(), 0xA3);
        assert!(desc.color_table_present());
        assert_eq!(desc.color_resolution(), 2);
        assert_eq!(desc.color_table_len(), 16);
        assert_eq!(desc.background_color_idx(), 5);
        assert_eq!(desc.pixel_aspect_ratio(), 0x31);
    }

    #[test]
    fn image_desc_fields() {
        let buf = [
            0x2C, 0x02, 0x01, 0x04, 0x03, 0x21, 0x43, 0x65, 0x87, 0x47,
        ];
        let desc = ImageDesc::from_buf(&buf).unwrap();
        assert_eq!(desc.left(), 0x0102);
        assert_eq!(desc.top(), 0x0304);
        assert_eq!(desc.width(), 0x4321);
        assert_eq!(desc.height(), 0x8765);
        assert!(!desc.color_table_present());
        assert!(desc.interlaced());
        assert_eq!(desc.color_table_len(), 256);
        let buf = [
            0x2D, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x01, 0x00, 0x00,
        ];
        match ImageDesc::from_buf(&buf) {
            Err(Error::InvalidBlockSignature(0x2D)) => {}
            r => panic!("unexpected result: {:?}", r),
        }
    }

    #[test]
    fn graphic_control_fields() {
        let buf = [0x21, 0xF9, 0x04, 0x1C, 0xE8, 0x03, 0x2A, 0x00];
        let control = GraphicControl::from_buf(&buf).unwrap();
        assert_eq!(control.disposal_method(), DisposalMethod::Reserved(7));
        assert_eq!(control.delay_time_cs(), 1000);
        assert_eq!(control.delay_time_ms(), 10_000);
        assert_eq!(control.transparent_color(), None);
        assert_eq!(control.transparent_color_idx(), 0x2A);
        let buf = [0x21, 0xFE, 0x04, 0x00, 0x00, 0x00, 0x00, 0x00];
        match GraphicControl::from_buf(&buf) {
            Err(Error::InvalidBlockSignature(0xFE)) => {}
            r => panic!("unexpected result: {:?}", r),
        }
    }

    #[test]
    fn wrong_introducer() {
        let data = [0x2C, 0xFE, 0x00];
        let mut stream = GifStream::new(BufReader::new(&data[..]));
        match stream.skip_extension() {
            Err(Error::InvalidBlockSignature(0x2C)) => {}
            r => panic!("unexpected result: {:?}", r),
        }
    }
}
