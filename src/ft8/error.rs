use snafu::Snafu;

/// Errors raised while packing or unpacking an FT8 message (§7, `message::MessageError`).
#[derive(Debug, Snafu, PartialEq, Eq)]
pub enum MessageError {
    #[snafu(display("callsign '{call}' has no digit to align on"))]
    CallsignNoDigit { call: String },

    #[snafu(display("callsign '{call}' is too long to fit six encoded positions"))]
    CallsignTooLong { call: String },

    #[snafu(display("callsign '{call}' has its digit past the third position"))]
    CallsignDigitTooFar { call: String },

    #[snafu(display("character '{ch}' is not valid at callsign position {position}"))]
    CallsignInvalidChar { ch: char, position: usize },

    #[snafu(display("callsign value {value} is out of range"))]
    CallsignOutOfRange { value: u32 },

    #[snafu(display("grid '{grid}' is not a 4-character Maidenhead locator"))]
    InvalidGrid { grid: String },

    #[snafu(display("grid value {value} is out of range"))]
    GridOutOfRange { value: u16 },

    #[snafu(display("report '{report}' is not RRR, 73, RR73, or a signed two-digit number"))]
    InvalidReport { report: String },

    #[snafu(display("free text '{text}' contains a character outside the supported alphabet"))]
    InvalidFreeTextChar { text: String },

    #[snafu(display("free text is longer than 13 characters after padding"))]
    FreeTextTooLong,

    #[snafu(display("message does not match any known 77-bit variant"))]
    UnrecognizedVariant,
}
