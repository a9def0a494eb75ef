//! Locating packet boundaries in a raw Transport Stream byte source.
//!
//! Captures are not always neat concatenations of 188-byte packets: DVB
//! capture hardware commonly appends 16 bytes of Reed-Solomon parity
//! (giving 204-byte packets), and some equipment pads by other amounts.
//! [`PacketScanner`] adapts to the actual spacing of sync bytes, so the
//! packet size never needs to be configured.

use bytes::{Bytes, BytesMut};
use std::io;
use std::io::Read;

use crate::packet::{PACKET_SIZE, SYNC_BYTE};

const READ_CHUNK: usize = 8 * 1024;

/// Splits a byte source into transport stream packets.
///
/// The source is assumed to begin at a packet boundary.  Each produced
/// token starts where the previous one ended and runs up to (not
/// including) the first [`SYNC_BYTE`] found at offset 188 or later, so
/// both 188- and 204-byte packets come out with their original lengths —
/// as do the in-between padding lengths some capture hardware produces.
///
/// Tokens are freshly owned [`Bytes`] buffers, so callers may hold on to
/// any number of them independently of the scanner's internal buffer.
///
/// ```no_run
/// use mpegts_sections::packet::Packet;
/// use mpegts_sections::scan::PacketScanner;
///
/// # fn main() -> std::io::Result<()> {
/// let f = std::fs::File::open("capture.ts")?;
/// let mut scanner = PacketScanner::new(f);
/// while let Some(buf) = scanner.read_packet()? {
///     let pk = Packet::new(&buf[..]);
///     println!("{:?}", pk.pid());
/// }
/// # Ok(())
/// # }
/// ```
pub struct PacketScanner<R> {
    src: R,
    buf: BytesMut,
    eof: bool,
}

impl<R: Read> PacketScanner<R> {
    /// Wraps the given byte source.
    pub fn new(src: R) -> PacketScanner<R> {
        PacketScanner {
            src,
            buf: BytesMut::with_capacity(READ_CHUNK),
            eof: false,
        }
    }

    /// Produces the next packet, or `None` once the source is exhausted.
    ///
    /// At end of input, a final token of 188 bytes or more is emitted even
    /// if no further sync byte delimits it; a trailing fragment shorter
    /// than 188 bytes is discarded.  Errors from the source are returned
    /// verbatim.
    pub fn read_packet(&mut self) -> io::Result<Option<Bytes>> {
        loop {
            if self.buf.len() >= PACKET_SIZE {
                if let Some(i) = self.buf[PACKET_SIZE..]
                    .iter()
                    .position(|&b| b == SYNC_BYTE)
                {
                    return Ok(Some(self.buf.split_to(PACKET_SIZE + i).freeze()));
                }
                if self.eof {
                    // no further sync byte will ever arrive; whatever is
                    // left is the final packet
                    return Ok(Some(self.buf.split().freeze()));
                }
            } else if self.eof {
                if !self.buf.is_empty() {
                    log::debug!(
                        "discarding {} trailing bytes, too short for a packet",
                        self.buf.len()
                    );
                    self.buf.clear();
                }
                return Ok(None);
            }
            self.fill()?;
        }
    }

    fn fill(&mut self) -> io::Result<()> {
        let mut chunk = [0u8; READ_CHUNK];
        loop {
            match self.src.read(&mut chunk) {
                Ok(0) => {
                    self.eof = true;
                    return Ok(());
                }
                Ok(n) => {
                    self.buf.extend_from_slice(&chunk[..n]);
                    return Ok(());
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }
}

impl<R: Read> Iterator for PacketScanner<R> {
    type Item = io::Result<Bytes>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_packet().transpose()
    }
}
