pub mod assembler;
pub mod encoder;
pub mod wav_format;
