// Sound sink - where tick sounds go

/// Destination for click sounds.
///
/// `play_click` is fire-and-forget: the engine never waits for completion
/// and never observes failure. A sink that cannot produce its configured
/// sound is expected to fall back to a synthesized tone (or silence)
/// internally.
pub trait SoundSink: Send {
    fn play_click(&self, accented: bool);
}

/// Sink that discards every click. Useful headless and in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl SoundSink for NullSink {
    fn play_click(&self, _accented: bool) {}
}
