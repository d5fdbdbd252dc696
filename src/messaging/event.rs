// Engine events - notifications for front ends
// Emitted by the scheduler; consumed by whatever renders state

/// One notification from the engine to its observers.
///
/// Events are advisory: the authoritative state is always the snapshot. A
/// front end that falls behind simply misses events (the ring buffer drops
/// on overflow) and catches up from the next snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EngineEvent {
    /// One subdivision elapsed. Fired on every tick, audible or not; the
    /// pulse indicates timing, not audibility.
    Tick {
        beat: usize,
        audible: bool,
        accented: bool,
    },
    /// The 100 ms visual pulse armed by the last tick has gone dark.
    PulseCleared,
    Started,
    Stopped,
    /// Tempo changed, whether from a direct set or a tap estimate.
    TempoChanged { bpm: f64 },
}
