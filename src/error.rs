use thiserror::Error;

/// Errors produced while interpreting Transport Stream structures.
///
/// Everything else that can go wrong in a broadcast stream — continuity
/// breaks, duplicated packets, sections cut short by the next
/// `payload_unit_start` — is absorbed by the state machines in
/// [`demultiplex`](crate::demultiplex) rather than reported here.
/// I/O errors from the byte source are surfaced as [`std::io::Error`].
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    /// The provided buffer is smaller than the minimum size of the
    /// structure it is supposed to hold.
    #[error("{field}: {actual} bytes is too short, need at least {expected}")]
    TooShort {
        /// Name of the structure being constructed.
        field: &'static str,
        /// Minimum number of bytes required.
        expected: usize,
        /// Number of bytes actually provided.
        actual: usize,
    },

    /// The PAT contains no association with `program_number == 0`.
    #[error("PAT has no network_PID association")]
    NoNetworkId,

    /// A declared inner length extends past the end of its container.
    #[error("{field}: declared length needs {expected} bytes but only {actual} remain")]
    UnexpectedEof {
        /// Name of the length-delimited structure.
        field: &'static str,
        /// Number of bytes the declared length requires.
        expected: usize,
        /// Number of bytes actually available.
        actual: usize,
    },
}
