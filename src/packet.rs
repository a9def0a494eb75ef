//! A [`Packet`] struct and associated infrastructure to read an MPEG
//! Transport Stream packet

use crate::ParseError;
use std::fmt;

/// The value `0x47`, which must appear in the first byte of every transport
/// stream packet.
pub const SYNC_BYTE: u8 = 0x47;

/// The standard 188 byte size of a transport stream packet.
///
/// Packets of 204 bytes (188 plus 16 bytes of Reed-Solomon parity) also
/// appear in the wild; the accessors here address fields from the front of
/// the buffer, so both sizes are handled uniformly.
pub const PACKET_SIZE: usize = 188;

const FIXED_HEADER_SIZE: usize = 4;
// when an adaptation field is present, a 1-byte 'length' field precedes
// its content,
const ADAPTATION_FIELD_OFFSET: usize = FIXED_HEADER_SIZE;

/// A Packet Identifier labelling the substream to which a packet belongs.
///
/// 13-bit value; the values [`Pid::PAT`], [`Pid::CAT`] and [`Pid::NULL`]
/// have meanings fixed by _ISO/IEC 13818-1_.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pid(u16);

impl Pid {
    /// The largest value a 13-bit PID can hold.
    pub const MAX: u16 = 0x1fff;

    /// PID carrying the Program Association Table.
    pub const PAT: Pid = Pid(0x0000);
    /// PID carrying the Conditional Access Table.
    pub const CAT: Pid = Pid(0x0001);
    /// PID of null packets, inserted for padding; carries no data and is
    /// exempt from continuity-counter rules.
    pub const NULL: Pid = Pid(0x1fff);

    /// Panics if the given value is larger than 13 bits.
    pub fn new(pid: u16) -> Pid {
        assert!(pid <= Self::MAX);
        Pid(pid)
    }
}
impl From<Pid> for u16 {
    fn from(pid: Pid) -> u16 {
        pid.0
    }
}
impl fmt::Debug for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pid({:#06x})", self.0)
    }
}

/// A counter value used within a transport stream to detect discontinuities
/// in a sequence of packets.
///
/// See [`Packet::continuity_counter()`]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ContinuityCounter {
    val: u8,
}

impl From<u8> for ContinuityCounter {
    fn from(count: u8) -> ContinuityCounter {
        ContinuityCounter::new(count)
    }
}

impl ContinuityCounter {
    /// Panics if the given value is greater than 15.
    pub fn new(count: u8) -> ContinuityCounter {
        assert!(count < 0b1_0000);
        ContinuityCounter { val: count }
    }

    /// Returns this counter's value, which will be between 0 and 15
    /// inclusive.
    pub fn count(self) -> u8 {
        self.val
    }

    /// true iff this counter value follows the given one.  Note that the
    /// maximum counter value is 15, and the counter 'wraps around':
    ///
    /// ```rust
    /// # use mpegts_sections::packet::ContinuityCounter;
    /// let a = ContinuityCounter::new(0);
    /// let b = ContinuityCounter::new(15);
    /// assert!(a.follows(b));  // after 15, counter wraps around to 0
    /// ```
    pub fn follows(self, other: ContinuityCounter) -> bool {
        (other.val + 1) & 0b1111 == self.val
    }
}

/// The different values indicating whether a [`Packet`]'s
/// `adaptation_field()` and `payload()` methods will return data.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum AdaptationControl {
    /// This value is used if the transport stream packet
    /// `adaptation_field_control` field holds `0b00`, which is not defined
    /// by the spec; such a packet yields neither adaptation field nor
    /// payload.
    Reserved,
    /// indicates that this packet contains a payload, but not an adaptation
    /// field
    PayloadOnly,
    /// indicates that this packet contains an adaptation field, but not a
    /// payload
    AdaptationFieldOnly,
    /// indicates that this packet contains both an adaptation field and a
    /// payload
    AdaptationFieldAndPayload,
}

impl AdaptationControl {
    fn from(val: u8) -> AdaptationControl {
        match val {
            0 => AdaptationControl::Reserved,
            1 => AdaptationControl::PayloadOnly,
            2 => AdaptationControl::AdaptationFieldOnly,
            3 => AdaptationControl::AdaptationFieldAndPayload,
            _ => panic!("invalid value {}", val),
        }
    }

    /// true for the two variants that carry an adaptation field.
    pub fn has_adaptation_field(self) -> bool {
        matches!(
            self,
            AdaptationControl::AdaptationFieldOnly | AdaptationControl::AdaptationFieldAndPayload
        )
    }

    /// true for the two variants that carry a payload.
    pub fn has_payload(self) -> bool {
        matches!(
            self,
            AdaptationControl::PayloadOnly | AdaptationControl::AdaptationFieldAndPayload
        )
    }
}

/// Value of the two `transport_scrambling_control` bits.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum TransportScramblingControl {
    /// The packet payload is not scrambled.
    NotScrambled,
    /// Reserved scrambling scheme `0b01`.
    Undefined1,
    /// Scrambling scheme `0b10` (conventionally the 'even' key).
    Undefined2,
    /// Scrambling scheme `0b11` (conventionally the 'odd' key).
    Undefined3,
}

impl TransportScramblingControl {
    fn from(val: u8) -> TransportScramblingControl {
        match val {
            0 => TransportScramblingControl::NotScrambled,
            1 => TransportScramblingControl::Undefined1,
            2 => TransportScramblingControl::Undefined2,
            3 => TransportScramblingControl::Undefined3,
            _ => panic!("invalid value {}", val),
        }
    }
}

/// A collection of optional fields that may appear after the fixed header
/// of a transport stream [`Packet`].
///
/// The wrapped slice starts at the `adaptation_field_length` byte, so the
/// flags live at offset 1 and the optional sub-fields follow.  Each
/// sub-field's offset depends on which of the preceding sub-fields are
/// present.
pub struct AdaptationField<'buf> {
    buf: &'buf [u8],
}

/// Starting offsets of the flag-gated sub-fields, relative to the front of
/// the adaptation field.  Computable from the flags byte alone.
struct SubFieldOffsets {
    opcr: usize,
    splice_countdown: usize,
    private_data: usize,
}

const PCR_SIZE: usize = 6;
const OPCR_SIZE: usize = 6;
const SPLICE_COUNTDOWN_SIZE: usize = 1;
// adaptation_field_length + flags
const AF_HEADER_SIZE: usize = 2;

impl<'buf> AdaptationField<'buf> {
    /// Wraps the given slice, whose first byte must be the
    /// `adaptation_field_length` field.
    ///
    /// Panics if fewer than 2 bytes are given.
    pub fn new(buf: &'buf [u8]) -> AdaptationField<'buf> {
        assert!(buf.len() >= AF_HEADER_SIZE);
        AdaptationField { buf }
    }

    /// Number of adaptation-field bytes following the length field itself.
    pub fn length(&self) -> usize {
        self.buf[0] as usize
    }

    /// Set when the stream deliberately breaks; continuity counters restart
    /// from scratch after this packet.
    pub fn discontinuity_indicator(&self) -> bool {
        self.buf[1] & 0b1000_0000 != 0
    }

    /// Set when this packet is a good place to start decoding from.
    pub fn random_access_indicator(&self) -> bool {
        self.buf[1] & 0b0100_0000 != 0
    }

    /// Elementary stream priority indicator.
    pub fn elementary_stream_priority_indicator(&self) -> bool {
        self.buf[1] & 0b0010_0000 != 0
    }

    /// true iff a Program Clock Reference is present.
    pub fn pcr_flag(&self) -> bool {
        self.buf[1] & 0b0001_0000 != 0
    }

    /// true iff an Original Program Clock Reference is present.
    pub fn opcr_flag(&self) -> bool {
        self.buf[1] & 0b0000_1000 != 0
    }

    /// true iff a splice countdown byte is present.
    pub fn splicing_point_flag(&self) -> bool {
        self.buf[1] & 0b0000_0100 != 0
    }

    /// true iff transport private data is present.
    pub fn transport_private_data_flag(&self) -> bool {
        self.buf[1] & 0b0000_0010 != 0
    }

    /// true iff an adaptation field extension is present.
    pub fn adaptation_field_extension_flag(&self) -> bool {
        self.buf[1] & 0b0000_0001 != 0
    }

    fn offsets(&self) -> SubFieldOffsets {
        let opcr = AF_HEADER_SIZE + if self.pcr_flag() { PCR_SIZE } else { 0 };
        let splice_countdown = opcr + if self.opcr_flag() { OPCR_SIZE } else { 0 };
        let private_data = splice_countdown
            + if self.splicing_point_flag() {
                SPLICE_COUNTDOWN_SIZE
            } else {
                0
            };
        SubFieldOffsets {
            opcr,
            splice_countdown,
            private_data,
        }
    }

    /// The 6 raw bytes of the Program Clock Reference, if present.
    pub fn pcr(&self) -> Option<&'buf [u8]> {
        if !self.pcr_flag() {
            return None;
        }
        Some(&self.buf[AF_HEADER_SIZE..AF_HEADER_SIZE + PCR_SIZE])
    }

    /// The 6 raw bytes of the Original Program Clock Reference, if present.
    pub fn opcr(&self) -> Option<&'buf [u8]> {
        if !self.opcr_flag() {
            return None;
        }
        let low = self.offsets().opcr;
        Some(&self.buf[low..low + OPCR_SIZE])
    }

    /// How many packets with this PID remain until a splicing point; may be
    /// negative once the point has passed (the byte is two's complement).
    pub fn splice_countdown(&self) -> Option<i8> {
        if !self.splicing_point_flag() {
            return None;
        }
        Some(self.buf[self.offsets().splice_countdown] as i8)
    }

    /// Private data bytes, without their 1-byte length prefix.
    pub fn transport_private_data(&self) -> Option<&'buf [u8]> {
        if !self.transport_private_data_flag() {
            return None;
        }
        let len_pos = self.offsets().private_data;
        let len = self.buf[len_pos] as usize;
        let low = len_pos + 1;
        Some(&self.buf[low..low + len])
    }

    /// Adaptation field extension bytes, without their 1-byte length prefix.
    ///
    /// Signals [`ParseError::UnexpectedEof`] if the declared extension
    /// length overruns the adaptation field.
    pub fn adaptation_extension(&self) -> Result<Option<&'buf [u8]>, ParseError> {
        if !self.adaptation_field_extension_flag() {
            return Ok(None);
        }
        let mut len_pos = self.offsets().private_data;
        if self.transport_private_data_flag() {
            len_pos += 1 + self.buf[len_pos] as usize;
        }
        let len = self.buf[len_pos] as usize;
        if len == 0 {
            return Ok(None);
        }
        let low = len_pos + 1;
        if low + len > self.buf.len() {
            return Err(ParseError::UnexpectedEof {
                field: "adaptation_field_extension",
                expected: low + len,
                actual: self.buf.len(),
            });
        }
        Ok(Some(&self.buf[low..low + len]))
    }
}

/// A transport stream `Packet` is a wrapper around a byte slice which allows
/// the bytes to be interpreted as a packet structure per _ISO/IEC 13818-1,
/// Section 2.4.3.3_.
///
/// The wrapped slice is normally one of the tokens produced by
/// [`PacketScanner`](crate::scan::PacketScanner): 188 bytes, or 204 when
/// the capture retains error-correction parity.  Accessors address fields
/// from the front of the buffer and ignore any trailing parity bytes.
pub struct Packet<'buf> {
    buf: &'buf [u8],
}

impl<'buf> Packet<'buf> {
    /// returns `true` if the given value is a valid synchronisation byte,
    /// the value `0x47`, which must appear at the start of every transport
    /// stream packet.
    pub fn is_sync_byte(b: u8) -> bool {
        b == SYNC_BYTE
    }

    /// Wraps the given buffer.  Panics if it is smaller than the 4-byte
    /// fixed header; no other validation is performed, so a buffer whose
    /// first byte is not [`SYNC_BYTE`] is accepted (calling code is
    /// expected to have already checked framing).
    pub fn new(buf: &'buf [u8]) -> Packet<'buf> {
        assert!(buf.len() >= FIXED_HEADER_SIZE);
        Packet { buf }
    }

    /// Byte 0 of the packet, `0x47` in a well-formed stream.
    pub fn sync_byte(&self) -> u8 {
        self.buf[0]
    }

    /// Set by transmission hardware when the packet arrived damaged.
    pub fn transport_error_indicator(&self) -> bool {
        self.buf[1] & 0b1000_0000 != 0
    }

    /// A structure larger than a single packet payload needs to be split
    /// across multiple packets; `payload_unit_start_indicator()` indicates
    /// whether this packet's payload contains the start of the structure.
    /// If `false`, this packet's payload is a continuation of a structure
    /// which began in an earlier packet within the transport stream.
    pub fn payload_unit_start_indicator(&self) -> bool {
        self.buf[1] & 0b0100_0000 != 0
    }

    /// Transport priority bit.
    pub fn transport_priority(&self) -> bool {
        self.buf[1] & 0b0010_0000 != 0
    }

    /// The substream to which this particular packet belongs is indicated
    /// by this Packet Identifier value.
    pub fn pid(&self) -> Pid {
        Pid(u16::from(self.buf[1] & 0b0001_1111) << 8 | u16::from(self.buf[2]))
    }

    /// Scrambling scheme applied to this packet's payload, if any.
    pub fn transport_scrambling_control(&self) -> TransportScramblingControl {
        TransportScramblingControl::from(self.buf[3] >> 6 & 0b11)
    }

    /// The returned enum value indicates whether `adaptation_field()`,
    /// `payload()` or both will return something.
    pub fn adaptation_control(&self) -> AdaptationControl {
        AdaptationControl::from(self.buf[3] >> 4 & 0b11)
    }

    /// true iff the `adaptation_field_control` bits announce an adaptation
    /// field.
    pub fn has_adaptation_field(&self) -> bool {
        self.adaptation_control().has_adaptation_field()
    }

    /// true iff the `adaptation_field_control` bits announce a payload.
    pub fn has_payload(&self) -> bool {
        self.adaptation_control().has_payload()
    }

    /// Each packet with a given `pid()` value within a transport stream
    /// should have a continuity counter value which increases by 1 (modulo
    /// 16) from the last counter value seen.  Unexpected continuity counter
    /// values allow the receiver of the transport stream to detect
    /// discontinuities in the stream (e.g. due to data loss during
    /// transmission).
    pub fn continuity_counter(&self) -> ContinuityCounter {
        ContinuityCounter::new(self.buf[3] & 0b0000_1111)
    }

    fn adaptation_field_length(&self) -> usize {
        self.buf[ADAPTATION_FIELD_OFFSET] as usize
    }

    /// An [`AdaptationField`] contains additional packet headers that may
    /// be present in the packet.
    ///
    /// Returns `Ok(None)` when the control bits announce no adaptation
    /// field, or when `adaptation_field_length` is zero (a legal single
    /// byte of stuffing).  Signals [`ParseError::UnexpectedEof`] when the
    /// declared length extends past the end of the packet buffer.
    pub fn adaptation_field(&self) -> Result<Option<AdaptationField<'buf>>, ParseError> {
        if !self.has_adaptation_field() {
            return Ok(None);
        }
        let len = self.adaptation_field_length();
        if len == 0 {
            return Ok(None);
        }
        let high = ADAPTATION_FIELD_OFFSET + 1 + len;
        if high > self.buf.len() {
            return Err(ParseError::UnexpectedEof {
                field: "adaptation_field",
                expected: high,
                actual: self.buf.len(),
            });
        }
        Ok(Some(AdaptationField::new(
            &self.buf[ADAPTATION_FIELD_OFFSET..high],
        )))
    }

    /// The opaque payload data contained within the packet, to be
    /// interpreted based on the stream's Program Specific Information
    /// tables.
    ///
    /// Empty when the control bits announce no payload, or when the
    /// adaptation field (claims to) fill the whole packet.
    pub fn payload(&self) -> &'buf [u8] {
        if !self.has_payload() {
            return &[];
        }
        let mut low = FIXED_HEADER_SIZE;
        if self.has_adaptation_field() {
            low += 1 + self.adaptation_field_length();
        }
        self.buf.get(low..).unwrap_or(&[])
    }

    /// true iff the payload starts with a Packetized Elementary Stream
    /// start-code prefix (`0x00 0x00 0x01`) rather than PSI section data.
    pub fn is_pes(&self) -> bool {
        self.payload().starts_with(&[0x00, 0x00, 0x01])
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    #[should_panic]
    fn zero_len() {
        let buf = [0u8; 0];
        Packet::new(&buf[..]);
    }

    #[test]
    fn xmas_tree() {
        let mut buf = [0xffu8; PACKET_SIZE];
        buf[0] = SYNC_BYTE;
        buf[4] = 3; // adaptation_field_length
        let pk = Packet::new(&buf[..]);
        assert!(pk.transport_error_indicator());
        assert!(pk.payload_unit_start_indicator());
        assert!(pk.transport_priority());
        assert_eq!(pk.pid(), Pid::NULL);
        assert_eq!(
            pk.transport_scrambling_control(),
            TransportScramblingControl::Undefined3
        );
        assert_eq!(
            pk.adaptation_control(),
            AdaptationControl::AdaptationFieldAndPayload
        );
        assert_eq!(pk.continuity_counter().count(), 0b1111);
        let af = pk.adaptation_field().unwrap().unwrap();
        assert!(af.discontinuity_indicator());
        assert!(af.random_access_indicator());
        assert!(af.elementary_stream_priority_indicator());
    }

    #[test]
    fn pid_value() {
        let buf = [0x47, 0x01, 0x11, 0x37];
        let pk = Packet::new(&buf[..]);
        assert_eq!(pk.pid(), Pid::new(0x111));
        assert_eq!(u16::from(pk.pid()), 0x111);
    }

    #[test]
    fn header_flags() {
        let pk_buf = |b1: u8| [0x47, b1, 0x00, 0x10];
        assert!(Packet::new(&pk_buf(0x80)).transport_error_indicator());
        assert!(!Packet::new(&pk_buf(0x00)).transport_error_indicator());
        assert!(Packet::new(&pk_buf(0x40)).payload_unit_start_indicator());
        assert!(!Packet::new(&pk_buf(0x00)).payload_unit_start_indicator());
        assert!(Packet::new(&pk_buf(0x20)).transport_priority());
        assert!(!Packet::new(&pk_buf(0x00)).transport_priority());
    }

    #[test]
    fn adaptation_control_bits() {
        // control value in bits 5-4 of byte 3; the has_x predicates must
        // line up with all four possible values
        for (bits, has_af, has_payload) in [
            (0b00u8, false, false),
            (0b01, false, true),
            (0b10, true, false),
            (0b11, true, true),
        ] {
            let buf = [0x47, 0x00, 0x00, bits << 4];
            let pk = Packet::new(&buf[..]);
            assert_eq!(pk.has_adaptation_field(), has_af, "control {:#04b}", bits);
            assert_eq!(pk.has_payload(), has_payload, "control {:#04b}", bits);
        }
    }

    #[test]
    fn reserved_control_yields_nothing() {
        let mut buf = [0xaau8; PACKET_SIZE];
        buf[0] = SYNC_BYTE;
        buf[1] = 0x00;
        buf[2] = 0x42;
        buf[3] = 0x00; // adaptation_field_control = 0b00
        let pk = Packet::new(&buf[..]);
        assert!(pk.payload().is_empty());
        assert!(pk.adaptation_field().unwrap().is_none());
        assert!(!pk.is_pes());
    }

    #[test]
    fn payload_offsets() {
        // payload only: payload starts at byte 4
        let mut buf = [0u8; PACKET_SIZE];
        buf[0] = SYNC_BYTE;
        buf[3] = 0b0001_0000;
        buf[4] = 0xde;
        let pk = Packet::new(&buf[..]);
        assert_eq!(pk.payload().len(), PACKET_SIZE - 4);
        assert_eq!(pk.payload()[0], 0xde);

        // adaptation field of 10 bytes: payload starts at 4 + 1 + 10
        let mut buf = [0u8; PACKET_SIZE];
        buf[0] = SYNC_BYTE;
        buf[3] = 0b0011_0000;
        buf[4] = 10;
        buf[15] = 0xad;
        let pk = Packet::new(&buf[..]);
        assert_eq!(pk.payload().len(), PACKET_SIZE - 4 - 1 - 10);
        assert_eq!(pk.payload()[0], 0xad);
    }

    #[test]
    fn payload_clamped_when_af_length_hostile() {
        let mut buf = [0u8; PACKET_SIZE];
        buf[0] = SYNC_BYTE;
        buf[3] = 0b0011_0000;
        buf[4] = 0xff; // claims more bytes than the packet holds
        let pk = Packet::new(&buf[..]);
        assert!(pk.payload().is_empty());
    }

    #[test]
    fn adaptation_field_absent_when_zero_length() {
        let mut buf = [0u8; PACKET_SIZE];
        buf[0] = SYNC_BYTE;
        buf[3] = 0b0011_0000;
        buf[4] = 0;
        let pk = Packet::new(&buf[..]);
        assert!(pk.adaptation_field().unwrap().is_none());
    }

    #[test]
    fn adaptation_field_overruns_buffer() {
        // 6-byte buffer, but adaptation_field_length of 2 needs 7 bytes
        let buf = [0x47, 0x00, 0x00, 0b0010_0000, 0x02, 0x00];
        let pk = Packet::new(&buf[..]);
        match pk.adaptation_field() {
            Err(e) => assert_eq!(
                e,
                ParseError::UnexpectedEof {
                    field: "adaptation_field",
                    expected: 7,
                    actual: 6,
                }
            ),
            Ok(_) => panic!("expected UnexpectedEof"),
        }
    }

    #[test]
    fn splice_countdown_is_signed() {
        let af = AdaptationField::new(&[0x02, 0b0000_0100, 0xf9]);
        assert_eq!(af.splice_countdown(), Some(-7));

        let af = AdaptationField::new(&[0x02, 0b0000_0000, 0xf9]);
        assert_eq!(af.splice_countdown(), None);
    }

    #[test]
    fn sub_field_offsets_chain() {
        // PCR + OPCR + splice countdown all present
        let mut buf = [0u8; 15];
        buf[0] = 14;
        buf[1] = 0b0001_1100;
        buf[2..8].copy_from_slice(&[1, 2, 3, 4, 5, 6]);
        buf[8..14].copy_from_slice(&[7, 8, 9, 10, 11, 12]);
        buf[14] = 0x05;
        let af = AdaptationField::new(&buf[..]);
        assert_eq!(af.pcr(), Some(&[1u8, 2, 3, 4, 5, 6][..]));
        assert_eq!(af.opcr(), Some(&[7u8, 8, 9, 10, 11, 12][..]));
        assert_eq!(af.splice_countdown(), Some(5));

        // OPCR moves forward when no PCR is present
        let mut buf = [0u8; 8];
        buf[0] = 7;
        buf[1] = 0b0000_1000;
        buf[2..8].copy_from_slice(&[7, 8, 9, 10, 11, 12]);
        let af = AdaptationField::new(&buf[..]);
        assert_eq!(af.pcr(), None);
        assert_eq!(af.opcr(), Some(&[7u8, 8, 9, 10, 11, 12][..]));
    }

    #[test]
    fn transport_private_data() {
        let af = AdaptationField::new(&[0x05, 0b0000_0010, 0x03, 0xca, 0xfe, 0x42]);
        assert_eq!(
            af.transport_private_data(),
            Some(&[0xca, 0xfe, 0x42][..])
        );
    }

    #[test]
    fn adaptation_extension() {
        // private data (2 bytes) followed by a 1-byte extension
        let af = AdaptationField::new(&[0x06, 0b0000_0011, 0x02, 0xaa, 0xbb, 0x01, 0xcc]);
        assert_eq!(af.adaptation_extension().unwrap(), Some(&[0xcc][..]));

        // declared extension length overruns the adaptation field
        let af = AdaptationField::new(&[0x03, 0b0000_0001, 0x05, 0xcc]);
        assert_eq!(
            af.adaptation_extension().unwrap_err(),
            ParseError::UnexpectedEof {
                field: "adaptation_field_extension",
                expected: 8,
                actual: 4,
            }
        );

        // zero-length extension is treated as absent
        let af = AdaptationField::new(&[0x02, 0b0000_0001, 0x00]);
        assert_eq!(af.adaptation_extension().unwrap(), None);
    }

    #[test]
    fn pes_payload_sniffing() {
        let mut buf = [0u8; PACKET_SIZE];
        buf[0] = SYNC_BYTE;
        buf[3] = 0b0001_0000;
        buf[4..7].copy_from_slice(&[0x00, 0x00, 0x01]);
        assert!(Packet::new(&buf[..]).is_pes());

        buf[6] = 0x02;
        assert!(!Packet::new(&buf[..]).is_pes());
    }

    #[test]
    fn continuity_wraps() {
        assert!(ContinuityCounter::new(0).follows(ContinuityCounter::new(15)));
        assert!(ContinuityCounter::new(7).follows(ContinuityCounter::new(6)));
        assert!(!ContinuityCounter::new(8).follows(ContinuityCounter::new(6)));
    }
}
