//! Types related to the _Conditional Access Table_

use crate::descriptor::DescriptorIter;
use crate::psi;
use crate::ParseError;

const DESCRIPTORS_OFFSET: usize = 8;
const MIN_SIZE: usize = DESCRIPTORS_OFFSET + psi::CRC_SIZE;

/// Sections of the _Conditional Access Table_ list `CA_descriptor`s
/// pointing at the PIDs that carry entitlement data for scrambled
/// streams.
///
/// Only the descriptor framing is interpreted; bodies are left to the CA
/// system in use.
#[derive(Clone, Debug)]
pub struct Cat<'buf> {
    buf: &'buf [u8],
}

impl<'buf> Cat<'buf> {
    /// The `table_id` value announcing a `conditional_access_section`.
    pub const TABLE_ID: u8 = 0x01;

    /// Wraps the given complete section, checking it holds at least the
    /// fixed CAT fields and the CRC-32 (12 bytes in total).
    pub fn new(buf: &'buf [u8]) -> Result<Cat<'buf>, ParseError> {
        if buf.len() < MIN_SIZE {
            return Err(ParseError::TooShort {
                field: "conditional_access_section",
                expected: MIN_SIZE,
                actual: buf.len(),
            });
        }
        Ok(Cat { buf })
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

    /// Iterate over the descriptors filling the section body (everything
    /// between the syntax header and the CRC-32).
    pub fn descriptors(&self) -> DescriptorIter<'buf> {
        DescriptorIter::new(&self.buf[DESCRIPTORS_OFFSET..self.buf.len() - psi::CRC_SIZE])
    }
}
