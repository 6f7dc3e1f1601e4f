use snafu::Snafu;

/// Errors raised while packing, unpacking, or parsing a JS8 message.
#[derive(Debug, Snafu, PartialEq, Eq)]
pub enum Js8Error {
    #[snafu(display("free text '{text}' is longer than 13 characters"))]
    TextTooLong,

    #[snafu(display("free text '{text}' contains a character outside the supported alphabet"))]
    InvalidChar { text: String },

    #[snafu(display("directed message '{line}' is not in \"FROM TO: BODY\" form"))]
    MalformedDirected { line: String },
}
