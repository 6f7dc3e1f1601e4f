//! JS8 codec (§4.7): FT8's framing at five selectable speeds, carrying a
//! base-43 free-text payload and an out-of-band directed-message form.

mod codec;
mod directed;
mod error;
mod payload;
mod speed;

pub use codec::{decode, modulate_text, DecodedFrame};
pub use directed::Directed;
pub use error::Js8Error;
pub use speed::Speed;
