//! Types related to the _Program Association Table_

use crate::packet::Pid;
use crate::psi;
use crate::ParseError;
use log::warn;
use std::collections::HashMap;

// transport_stream_id .. last_section_number
const SYNTAX_HEADER_SIZE: usize = 5;
const ASSOCIATION_SIZE: usize = 4;
const ASSOCIATIONS_OFFSET: usize = psi::SECTION_HEADER_SIZE + SYNTAX_HEADER_SIZE;
const MIN_SIZE: usize = ASSOCIATIONS_OFFSET + psi::CRC_SIZE;

/// One entry in the Program Association Table, mapping a `program_number`
/// to the PID where that program's metadata is carried.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Association {
    /// The `program_number` was zero, so the PID points at the Network
    /// Information Table.
    Network {
        /// the `network_PID`
        pid: Pid,
    },
    /// The PID carries the Program Map Table for this program.
    Program {
        /// the `program_number` the map applies to
        program_number: u16,
        /// the `program_map_PID`
        pid: Pid,
    },
}

impl Association {
    /// panics if fewer than 4 bytes are provided
    fn from_bytes(data: &[u8]) -> Association {
        let program_number = u16::from(data[0]) << 8 | u16::from(data[1]);
        let pid = Pid::new(u16::from(data[2] & 0b0001_1111) << 8 | u16::from(data[3]));
        if program_number == 0 {
            Association::Network { pid }
        } else {
            Association::Program {
                program_number,
                pid,
            }
        }
    }

    /// The PID this association points at, whichever kind it is.
    pub fn pid(&self) -> Pid {
        match *self {
            Association::Network { pid } => pid,
            Association::Program { pid, .. } => pid,
        }
    }
}

/// Sections of the _Program Association Table_ give details of the
/// programs within a transport stream.  There may be only one program, or
/// in the case of a broadcast multiplex, there may be many.
///
/// The wrapped slice is a complete section starting at the `table_id`
/// byte, as emitted by
/// [`SectionScanner`](crate::demultiplex::SectionScanner).
#[derive(Clone, Debug)]
pub struct Pat<'buf> {
    buf: &'buf [u8],
}

impl<'buf> Pat<'buf> {
    /// The `table_id` value announcing a `program_association_section`.
    pub const TABLE_ID: u8 = 0x00;

    /// Wraps the given complete section, checking it holds at least the
    /// fixed PAT fields and the CRC-32 (12 bytes in total).
    pub fn new(buf: &'buf [u8]) -> Result<Pat<'buf>, ParseError> {
        if buf.len() < MIN_SIZE {
            return Err(ParseError::TooShort {
                field: "program_association_section",
                expected: MIN_SIZE,
                actual: buf.len(),
            });
        }
        Ok(Pat { buf })
    }

    /// The label distinguishing this transport stream from any other
    /// multiplex in the network.
    pub fn transport_stream_id(&self) -> u16 {
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

    /// Iterate over the associations in this section.
    ///
    /// The association count comes from `section_length`, per the PAT
    /// layout: everything between the syntax header and the CRC-32 is
    /// 4-byte associations.
    pub fn associations(&self) -> AssociationIter<'buf> {
        let section_length = psi::Section::new(self.buf).section_length();
        let remaining = section_length
            .saturating_sub(SYNTAX_HEADER_SIZE + psi::CRC_SIZE)
            / ASSOCIATION_SIZE;
        AssociationIter {
            buf: &self.buf[ASSOCIATIONS_OFFSET..],
            remaining,
        }
    }

    /// The `network_PID`: the PID given by the association whose
    /// `program_number` is zero.
    ///
    /// Signals [`ParseError::NoNetworkId`] when the table has no such
    /// association.
    pub fn network_pid(&self) -> Result<Pid, ParseError> {
        for assoc in self.associations() {
            if let Association::Network { pid } = assoc {
                return Ok(pid);
            }
        }
        Err(ParseError::NoNetworkId)
    }

    /// Mapping from each non-zero `program_number` to its
    /// `program_map_PID`.
    ///
    /// A `program_number` is not expected to repeat within one section; if
    /// it does, the later entry wins.
    pub fn program_pid_map(&self) -> HashMap<u16, Pid> {
        let mut map = HashMap::new();
        for assoc in self.associations() {
            if let Association::Program {
                program_number,
                pid,
            } = assoc
            {
                map.insert(program_number, pid);
            }
        }
        map
    }
}

/// Iterate over the list of associations in a [`Pat`] section.
pub struct AssociationIter<'buf> {
    buf: &'buf [u8],
    remaining: usize,
}

impl<'buf> Iterator for AssociationIter<'buf> {
    type Item = Association;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        if self.buf.len() < ASSOCIATION_SIZE {
            warn!(
                "section_length promises {} more PAT associations, but only {} bytes remain",
                self.remaining,
                self.buf.len()
            );
            self.remaining = 0;
            return None;
        }
        let (head, tail) = self.buf.split_at(ASSOCIATION_SIZE);
        self.buf = tail;
        self.remaining -= 1;
        Some(Association::from_bytes(head))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::psi::Section;
    use hex_literal::hex;

    // a real broadcast PAT: one network association and four programs
    const PAT: [u8; 32] = hex!(
        "00 b0 1d 7f e5 ed 00 00
         00 00 e0 10
         04 28 e4 28
         04 29 e4 29
         04 2a e4 2a
         05 a8 ff c8
         8e fd b2 a4"
    );

    #[test]
    fn header_fields() {
        let pat = Pat::new(&PAT[..]).unwrap();
        let section = Section::new(&PAT[..]);
        assert_eq!(section.table_id(), Pat::TABLE_ID);
        assert!(section.section_syntax_indicator());
        assert_eq!(section.section_length(), 29);
        assert_eq!(section.crc32(), &hex!("8e fd b2 a4"));
        assert_eq!(pat.transport_stream_id(), 0x7fe5);
        assert_eq!(pat.version_number(), 22);
        assert!(pat.current_next_indicator());
        assert_eq!(pat.section_number(), 0);
        assert_eq!(pat.last_section_number(), 0);
    }

    #[test]
    fn pids() {
        let pat = Pat::new(&PAT[..]).unwrap();
        assert_eq!(pat.network_pid(), Ok(Pid::new(0x0010)));
        let map = pat.program_pid_map();
        assert_eq!(map.len(), 4);
        assert_eq!(map[&0x0428], Pid::new(0x0428));
        assert_eq!(map[&0x0429], Pid::new(0x0429));
        assert_eq!(map[&0x042a], Pid::new(0x042a));
        assert_eq!(map[&0x05a8], Pid::new(0x1fc8));
    }

    #[test]
    fn association_count_follows_section_length() {
        // |network| + |programs| must equal (section_length - 9) / 4
        let pat = Pat::new(&PAT[..]).unwrap();
        let n = pat.associations().count();
        assert_eq!(n, (29 - 5 - 4) / 4);
        let network = usize::from(pat.network_pid().is_ok());
        assert_eq!(network + pat.program_pid_map().len(), n);
    }

    #[test]
    fn no_network_pid() {
        // the same table with the first association's program_number
        // rewritten to a real program
        let mut buf = PAT;
        buf[8] = 0x04;
        buf[9] = 0x28;
        let pat = Pat::new(&buf[..]).unwrap();
        assert_eq!(pat.network_pid(), Err(ParseError::NoNetworkId));
    }

    #[test]
    fn minimum_size() {
        assert!(matches!(
            Pat::new(&PAT[..11]),
            Err(ParseError::TooShort {
                expected: 12,
                actual: 11,
                ..
            })
        ));

        // an empty PAT is exactly 12 bytes and holds no associations
        let empty = hex!("00 b0 09 00 01 c1 00 00 aa bb cc dd");
        let pat = Pat::new(&empty[..]).unwrap();
        assert_eq!(pat.associations().count(), 0);
        assert_eq!(pat.network_pid(), Err(ParseError::NoNetworkId));
        assert!(pat.program_pid_map().is_empty());
    }

    #[test]
    fn later_duplicate_wins() {
        let buf = hex!(
            "00 b0 11 00 01 c1 00 00
             00 01 e1 00
             00 01 e2 00
             aa bb cc dd"
        );
        let pat = Pat::new(&buf[..]).unwrap();
        assert_eq!(pat.program_pid_map()[&1], Pid::new(0x200));
    }

    #[test]
    fn truncated_association_list_stops_early() {
        // section_length claims five associations but the buffer ends
        // after the syntax header; the iterator must not run off the end
        let pat = Pat::new(&PAT[..12]).unwrap();
        assert_eq!(pat.associations().count(), 1);
    }
}
