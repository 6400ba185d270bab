pub mod simulated_audio;

pub use simulated_audio::SimulatedAudioProbe;
