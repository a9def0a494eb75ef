//! Types related to the _Program Map Table_

use crate::descriptor::DescriptorIter;
use crate::packet::Pid;
use crate::psi;
use crate::ParseError;
use log::warn;

// up to and including program_info_length
const FIXED_FIELDS_END: usize = 12;
const MIN_SIZE: usize = FIXED_FIELDS_END + psi::CRC_SIZE;

/// Sections of the _Program Map Table_ give details of the elementary
/// streams making up one particular program.
///
/// The wrapped slice is a complete section starting at the `table_id`
/// byte, as emitted by
/// [`SectionScanner`](crate::demultiplex::SectionScanner).
#[derive(Clone, Debug)]
pub struct Pmt<'buf> {
    buf: &'buf [u8],
}

impl<'buf> Pmt<'buf> {
    /// The `table_id` value announcing a `TS_program_map_section`.
    pub const TABLE_ID: u8 = 0x02;

    /// Wraps the given complete section, checking it holds at least the
    /// fixed PMT fields and the CRC-32 (16 bytes in total).
    pub fn new(buf: &'buf [u8]) -> Result<Pmt<'buf>, ParseError> {
        if buf.len() < MIN_SIZE {
            return Err(ParseError::TooShort {
                field: "program_map_section",
                expected: MIN_SIZE,
                actual: buf.len(),
            });
        }
        Ok(Pmt { buf })
    }

    /// The program whose composition this section describes.
    pub fn program_number(&self) -> u16 {
        u16::from(self.buf[3]) << 8 | u16::from(self.buf[4])
    }

    /// Incremented (modulo 32) each time the table's contents change.
    pub fn version_number(&self) -> u8 {
        psi::version_number(self.buf)
    }

    /// `true` when this version of the table is applicable now, `false`
    /// when it only becomes applicable next.
    pub fn current_next_indicator(&self) -> bool {
        psi::current_next_indicator(self.buf)
    }

    /// The number of this section within a potentially multi-section table.
    pub fn section_number(&self) -> u8 {
        psi::section_number(self.buf)
    }

    /// The `section_number()` of the final section of this table.
    pub fn last_section_number(&self) -> u8 {
        psi::last_section_number(self.buf)
    }

    /// PID of the packets carrying this program's Program Clock Reference
    /// (often one of the program's own elementary streams).
    pub fn pcr_pid(&self) -> Pid {
        Pid::new(u16::from(self.buf[8] & 0b0001_1111) << 8 | u16::from(self.buf[9]))
    }

    /// Number of program-level descriptor bytes following the fixed
    /// fields.
    pub fn program_info_length(&self) -> usize {
        usize::from(self.buf[10] & 0b0000_1111) << 8 | usize::from(self.buf[11])
    }

    fn elements_offset(&self) -> usize {
        FIXED_FIELDS_END + self.program_info_length()
    }

    /// Iterate over the descriptors applying to the program as a whole.
    pub fn descriptors(&self) -> DescriptorIter<'buf> {
        let end = self.elements_offset().min(self.buf.len() - psi::CRC_SIZE);
        DescriptorIter::new(&self.buf[FIXED_FIELDS_END..end])
    }

    /// Iterate over the program's elementary-stream entries.
    pub fn elements(&self) -> ProgramElementIter<'buf> {
        let end = self.buf.len() - psi::CRC_SIZE;
        let start = self.elements_offset().min(end);
        ProgramElementIter {
            buf: &self.buf[start..end],
        }
    }
}

/// Details of a particular elementary stream within a program.
///
///  - `stream_type` gives an indication of the kind of content carried
///    within the stream
///  - `elementary_pid` locates the transport stream packets that belong
///    to it
///  - `descriptors` _may_ provide extra metadata (for example the stream's
///    language might be given in a descriptor; or it might not)
pub struct ProgramElement<'buf> {
    buf: &'buf [u8],
}

impl<'buf> ProgramElement<'buf> {
    const HEADER_SIZE: usize = 5;

    fn from_bytes(data: &'buf [u8]) -> Option<(ProgramElement<'buf>, usize)> {
        if data.len() < Self::HEADER_SIZE {
            warn!(
                "only {} bytes remaining for program element, at least {} required",
                data.len(),
                Self::HEADER_SIZE
            );
            return None;
        }
        let result = ProgramElement { buf: data };
        let end = Self::HEADER_SIZE + result.es_info_length();
        if end > data.len() {
            warn!(
                "ES_info_length of {} overruns the {} bytes remaining in the section",
                result.es_info_length(),
                data.len()
            );
            return None;
        }
        Some((result, end))
    }

    /// Code indicating the kind of content in the stream (`0x1b` H.264
    /// video, `0x0f` AAC audio, and so on per _ISO/IEC 13818-1_ table
    /// 2-34).
    pub fn stream_type(&self) -> u8 {
        self.buf[0]
    }

    /// PID of the packets carrying this elementary stream.
    pub fn elementary_pid(&self) -> Pid {
        Pid::new(u16::from(self.buf[1] & 0b0001_1111) << 8 | u16::from(self.buf[2]))
    }

    /// Number of descriptor bytes attached to this entry.
    pub fn es_info_length(&self) -> usize {
        usize::from(self.buf[3] & 0b0000_1111) << 8 | usize::from(self.buf[4])
    }

    /// Iterate over the descriptors attached to this entry.
    pub fn descriptors(&self) -> DescriptorIter<'buf> {
        let end = Self::HEADER_SIZE + self.es_info_length();
        DescriptorIter::new(&self.buf[Self::HEADER_SIZE..end])
    }
}

/// Iterator over the [`ProgramElement`] entries in a [`Pmt`].
pub struct ProgramElementIter<'buf> {
    buf: &'buf [u8],
}

impl<'buf> Iterator for ProgramElementIter<'buf> {
    type Item = ProgramElement<'buf>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.buf.is_empty() {
            return None;
        }
        let (element, consumed) = ProgramElement::from_bytes(self.buf)?;
        self.buf = &self.buf[consumed..];
        Some(element)
    }
}
