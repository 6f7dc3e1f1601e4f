
pub mod audio;
pub mod bitpack;
pub mod bridge;
pub mod config;
pub mod controller;
pub mod costas;
pub mod crc14;
pub mod ft8;
pub mod js8;
pub mod ldpc;
pub mod radio;
pub mod scheduler;
pub mod spectral;
pub mod stream;
pub mod synth;
pub mod telemetry;
pub mod tones;
