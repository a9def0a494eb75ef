//! Reassembling PSI sections from the payloads of transport stream
//! packets.
//!
//! A PSI section may be split across several packets of one PID, and a
//! single packet payload may carry the tail of one section followed by the
//! start of the next (located by the `pointer_field`).  [`SectionScanner`]
//! tracks a small state machine per PID that stitches payloads back into
//! complete sections, enforcing the continuity-counter protocol along the
//! way:
//!
//!  * a packet repeating the previous counter value is discarded — once;
//!    broadcast streams legitimately duplicate a packet for robustness
//!  * a second consecutive duplicate, or any other counter discontinuity,
//!    additionally abandons whatever section was being collected
//!  * an adaptation field announcing a discontinuity exempts the following
//!    packet from the check entirely
//!
//! None of these conditions is an error; the state machine resets and the
//! scan continues.  Only I/O failures from the underlying byte source end
//! a scan early.

use bytes::{Bytes, BytesMut};
use log::debug;
use std::collections::HashMap;
use std::io;
use std::io::Read;

use crate::packet::{ContinuityCounter, Packet, Pid};
use crate::psi::SECTION_HEADER_SIZE;
use crate::scan::PacketScanner;

/// A complete PSI section, reassembled from the packets of a single PID.
///
/// The backing buffer is immutable and cheaply cloneable, so sections may
/// be handed to other threads or retained indefinitely without copying.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Section {
    pid: Pid,
    data: Bytes,
}

impl Section {
    /// The PID whose packets carried this section.
    pub fn pid(&self) -> Pid {
        self.pid
    }

    /// The section bytes, starting at the `table_id` byte; the length is
    /// always `section_length + 3`.
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consumes this value, returning the shared backing buffer.
    pub fn into_bytes(self) -> Bytes {
        self.data
    }
}

/// Per-PID reassembly state.
///
/// `buf` holds a prefix of a section whose `section_length` announced
/// `expected` further bytes; an empty `buf` means no section is in
/// progress.
struct SectionBuffer {
    pid: Pid,
    last_cc: Option<ContinuityCounter>,
    dup: u8,
    buf: BytesMut,
    expected: usize,
    collected: usize,
}

impl SectionBuffer {
    fn new(pid: Pid) -> SectionBuffer {
        SectionBuffer {
            pid,
            last_cc: None,
            dup: 0,
            buf: BytesMut::new(),
            expected: 0,
            collected: 0,
        }
    }

    /// An adaptation field flagged the discontinuity indicator: the next
    /// counter value is accepted whatever it is, and any half-collected
    /// section is abandoned.
    fn note_discontinuity(&mut self) {
        self.last_cc = None;
        self.drop_in_progress("discontinuity indicator");
    }

    /// Applies the continuity-counter protocol for one packet, updating
    /// state.  Returns `false` when the packet is to be discarded.
    fn is_continuous(&mut self, cc: ContinuityCounter) -> bool {
        let pre = match self.last_cc.replace(cc) {
            None => return true,
            Some(pre) => pre,
        };
        if self.pid == Pid::NULL {
            return true;
        }
        if cc == pre {
            // a single repeat is legal; drop only from the second one
            if self.dup >= 1 {
                self.drop_in_progress("repeated duplicate packet");
            }
            self.dup = self.dup.saturating_add(1);
            return false;
        }
        self.dup = 0;
        if !cc.follows(pre) {
            self.drop_in_progress("continuity counter jumped");
            return false;
        }
        true
    }

    fn drop_in_progress(&mut self, why: &str) {
        if !self.buf.is_empty() {
            debug!(
                "{:?}: {}; abandoning section after {} of {} bytes",
                self.pid, why, self.collected, self.expected
            );
        }
        self.buf.clear();
        self.expected = 0;
        self.collected = 0;
    }

    /// Consume the payload of one (accepted) packet.
    fn push(&mut self, payload: &[u8], pusi: bool, sink: &mut dyn FnMut(Section)) {
        if !pusi {
            self.append(payload);
            self.emit_if_complete(sink);
            return;
        }
        // the payload leads with a pointer_field locating the first new
        // section header; anything before that belongs to the section
        // already in progress
        let Some((&pointer, data)) = payload.split_first() else {
            return;
        };
        let mut pos = 0;
        let pointer = pointer as usize;
        if pointer > 0 {
            let end = pointer.min(data.len());
            self.append(&data[..end]);
            self.emit_if_complete(sink);
            pos = end;
        }
        while pos + SECTION_HEADER_SIZE < data.len() {
            self.begin(&data[pos..pos + SECTION_HEADER_SIZE]);
            pos += SECTION_HEADER_SIZE;
            let end = (pos + self.expected).min(data.len());
            self.append(&data[pos..end]);
            self.emit_if_complete(sink);
            pos = end;
        }
    }

    /// Start collecting a new section from its 3-byte header, replacing
    /// any section left unfinished.
    fn begin(&mut self, header: &[u8]) {
        if !self.buf.is_empty() {
            self.drop_in_progress("new section started");
        }
        self.expected = usize::from(header[1] & 0b0000_1111) << 8 | usize::from(header[2]);
        self.collected = 0;
        self.buf.extend_from_slice(header);
    }

    fn append(&mut self, data: &[u8]) {
        if self.buf.is_empty() {
            // no section in progress; continuation data has nothing to
            // attach to
            return;
        }
        self.buf.extend_from_slice(data);
        self.collected += data.len();
    }

    fn emit_if_complete(&mut self, sink: &mut dyn FnMut(Section)) {
        if self.buf.is_empty() || self.collected != self.expected {
            return;
        }
        let data = self.buf.split().freeze();
        self.expected = 0;
        self.collected = 0;
        sink(Section {
            pid: self.pid,
            data,
        });
    }
}

/// Drives a [`PacketScanner`] to exhaustion, reassembling the PSI sections
/// of every PID that passes the filter.
///
/// State is kept per PID, created lazily the first time a PID is seen and
/// retained for the scanner's lifetime.  Sections of one PID are emitted
/// in the order their first byte arrived; no ordering is promised across
/// PIDs.
pub struct SectionScanner<R> {
    scanner: PacketScanner<R>,
    buffers: HashMap<Pid, SectionBuffer>,
    filter: Box<dyn FnMut(Pid) -> bool>,
}

impl<R: Read> SectionScanner<R> {
    /// Wraps the given byte source; all PIDs are accepted until
    /// [`set_filter`](SectionScanner::set_filter) says otherwise.
    pub fn new(src: R) -> SectionScanner<R> {
        SectionScanner {
            scanner: PacketScanner::new(src),
            buffers: HashMap::new(),
            filter: Box::new(|_| true),
        }
    }

    /// Installs a predicate deciding which PIDs to reassemble.  Packets of
    /// rejected PIDs are skipped before any per-PID state is touched.
    pub fn set_filter(&mut self, filter: impl FnMut(Pid) -> bool + 'static) {
        self.filter = Box::new(filter);
    }

    /// Reads the source to exhaustion, passing every completed section to
    /// `sink`.
    ///
    /// Returns once the source reports end of input; sections still in
    /// progress at that point are discarded without comment.  An I/O error
    /// from the source ends the scan immediately and is returned verbatim.
    pub fn scan(&mut self, mut sink: impl FnMut(Section)) -> io::Result<()> {
        while let Some(buf) = self.scanner.read_packet()? {
            let pk = Packet::new(&buf[..]);
            let pid = pk.pid();
            if !(self.filter)(pid) {
                continue;
            }
            let sec = self
                .buffers
                .entry(pid)
                .or_insert_with(|| SectionBuffer::new(pid));

            match pk.adaptation_field() {
                Ok(Some(af)) if af.discontinuity_indicator() => sec.note_discontinuity(),
                Ok(_) => {}
                Err(e) => {
                    debug!("{:?}: skipping packet with bad adaptation field: {}", pid, e);
                    continue;
                }
            }

            if !sec.is_continuous(pk.continuity_counter()) {
                continue;
            }
            if pid == Pid::NULL {
                continue;
            }
            let payload = pk.payload();
            if payload.is_empty() {
                continue;
            }
            if pk.is_pes() {
                debug!("{:?}: skipping PES payload", pid);
                continue;
            }
            sec.push(payload, pk.payload_unit_start_indicator(), &mut sink);
        }
        Ok(())
    }
}
