//! Audio decoding, format conversion and WAV export.

mod decode;
mod encode;
pub mod loader;
mod normalize;
mod resample;
mod segment;

pub use decode::{decode_audio_file, decode_wav_file, pcm_from_le_bytes};
pub use encode::{WavSink, write_wav_file};
pub use loader::RobustLoader;
pub use normalize::{normalize, set_channels, set_sample_rate, set_sample_width};
pub use resample::{resample, resample_channels};
pub use segment::{AudioFormat, AudioSegment};
