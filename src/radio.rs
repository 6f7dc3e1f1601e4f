//! Conventional-radio CAT contract (§6, §9): the core never parses CAT
//! protocol bytes for this path, it only drives an external controller
//! through this trait. No implementation ships here; a concrete CAT library
//! binding is out of scope.

use snafu::Snafu;

/// Errors reported by a CAT controller implementation.
#[derive(Debug, Snafu, PartialEq, Eq)]
pub enum CatError {
    #[snafu(display("failed to open CAT device at '{path}'"))]
    OpenFailed { path: String },

    #[snafu(display("CAT device reported an error: {detail}"))]
    DeviceError { detail: String },

    #[snafu(display("unsupported radio model id {model_id}"))]
    UnsupportedModel { model_id: u32 },
}

/// Radio operating mode, as exposed by the CAT contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Lsb,
    Usb,
    Cw,
    Fm,
    Am,
}

/// A handle to an open CAT connection. Implementations own the underlying
/// device and are the sole mutator of its state (§9 "actor-isolated serial
/// port").
pub trait CatRadio {
    fn set_frequency_hz(&mut self, hz: u64) -> Result<(), CatError>;
    fn get_frequency_hz(&mut self) -> Result<u64, CatError>;

    fn set_mode(&mut self, mode: Mode) -> Result<(), CatError>;
    fn get_mode(&mut self) -> Result<Mode, CatError>;

    fn set_ptt(&mut self, on: bool) -> Result<(), CatError>;

    fn send_morse(&mut self, text: &str) -> Result<(), CatError>;
    fn stop_morse(&mut self) -> Result<(), CatError>;
}

/// Connects to a CAT radio. `model_id` identifies the controller-library
/// profile; `path` and `baud` identify the serial device.
pub fn connect(
    model_id: u32,
    _path: &str,
    _baud: u32,
) -> Result<Box<dyn CatRadio>, CatError> {
    tracing::error!(model_id, "no CAT controller binding for this model id");
    Err(CatError::UnsupportedModel { model_id })
}
