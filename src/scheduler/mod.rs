pub mod voice_sweep;
