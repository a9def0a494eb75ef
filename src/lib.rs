//! Structures for demultiplexing MPEG-2 Transport Stream data
//!
//! Input is any byte-oriented source yielding a concatenation of Transport
//! Stream packets (188 or 204 bytes each).  [`scan::PacketScanner`] locates
//! packet boundaries, [`demultiplex::SectionScanner`] reassembles complete
//! PSI sections per PID, and the view types in [`packet`] and [`psi`] expose
//! the bit-level fields of _ISO/IEC 13818-1_ without copying.
//!
//! # Design principles
//!
//!  * *Avoid copying and allocating* where possible.  All field accessors
//!    work by borrowing slices of the underlying byte buffer.  The only
//!    copies made are the scanner's owned packet tokens and the
//!    reassembler's section buffers, both of which outlive the scan.
//!  * *Tolerant of broadcast reality*.  Continuity errors, duplicated
//!    packets and sections truncated by a new `payload_unit_start` are
//!    logged and absorbed; the state machines recover without operator
//!    intervention.  Only upstream I/O errors terminate a scan.
//!  * *Transport neutral*.  The scanner accepts any [`std::io::Read`];
//!    files, sockets and in-memory captures all look the same.
//!
//! # Example
//!
//! Collect every PAT section from a capture:
//!
//! ```
//! use mpegts_sections::demultiplex::SectionScanner;
//! use mpegts_sections::packet::Pid;
//! use mpegts_sections::psi::pat::Pat;
//!
//! # fn main() -> std::io::Result<()> {
//! # let capture: &[u8] = &[];
//! let mut scanner = SectionScanner::new(capture);
//! scanner.set_filter(|pid| pid == Pid::PAT);
//! scanner.scan(|section| {
//!     if let Ok(pat) = Pat::new(section.bytes()) {
//!         println!("programs: {:?}", pat.program_pid_map());
//!     }
//! })?;
//! # Ok(())
//! # }
//! ```
//!
//! # Limitations
//!
//! - PES payloads are recognised and skipped, not reassembled
//! - the CRC-32 trailing each section is exposed but not verified
//! - transport scrambling is not undone; scrambled payloads pass through

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod demultiplex;
pub mod descriptor;
mod error;
pub mod packet;
pub mod psi;
pub mod scan;

pub use error::ParseError;
