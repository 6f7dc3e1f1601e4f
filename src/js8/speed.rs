//! JS8 speed profiles (§4.7): five symbol rates over the same 79-symbol,
//! Costas-synchronized frame as FT8.

/// One of JS8's five speed profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speed {
    Ultra,
    Slow,
    Normal,
    Fast,
    Turbo,
}

impl Speed {
    /// Samples per symbol at 12 kHz.
    pub fn nsps(self) -> usize {
        match self {
            Speed::Ultra => 7680,
            Speed::Slow => 3840,
            Speed::Normal => 1920,
            Speed::Fast => 1280,
            Speed::Turbo => 640,
        }
    }

    /// Tone spacing in Hz.
    pub fn tone_spacing_hz(self) -> f32 {
        crate::spectral::SAMPLE_RATE / self.nsps() as f32
    }

    /// Nominal TX window, in seconds.
    pub fn tx_window_seconds(self) -> f32 {
        match self {
            Speed::Ultra => 120.0,
            Speed::Slow => 30.0,
            Speed::Normal => 15.0,
            Speed::Fast => 10.0,
            Speed::Turbo => 6.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tone_spacing_matches_table() {
        assert_eq!(Speed::Ultra.tone_spacing_hz(), 1.5625);
        assert_eq!(Speed::Slow.tone_spacing_hz(), 3.125);
        assert_eq!(Speed::Normal.tone_spacing_hz(), 6.25);
        assert_eq!(Speed::Fast.tone_spacing_hz(), 9.375);
        assert_eq!(Speed::Turbo.tone_spacing_hz(), 18.75);
    }

    #[test]
    fn faster_speeds_have_shorter_windows() {
        assert!(Speed::Turbo.tx_window_seconds() < Speed::Fast.tx_window_seconds());
        assert!(Speed::Fast.tx_window_seconds() < Speed::Normal.tx_window_seconds());
        assert!(Speed::Normal.tx_window_seconds() < Speed::Slow.tx_window_seconds());
        assert!(Speed::Slow.tx_window_seconds() < Speed::Ultra.tx_window_seconds());
    }
}
