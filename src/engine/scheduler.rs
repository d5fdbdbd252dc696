// Playback scheduler - tempo, beat index, and the clock thread
//
// Single-writer discipline: every mutation and every tick runs under one
// exclusive lock. The clock thread is long-lived; instead of cancelling and
// recreating timers it recomputes the next deadline each iteration, reading
// tempo fresh. A stop or reschedule simply overwrites the deadline slot
// under the lock, and an in-flight wakeup re-reads the slot before acting,
// so no stale tick can fire.

use crate::audio::sink::SoundSink;
use crate::engine::labels::DisplayMode;
use crate::engine::note_value::NoteValue;
use crate::engine::pattern::PatternState;
use crate::engine::snapshot::EngineSnapshot;
use crate::engine::tap_tempo::TapTempo;
use crate::engine::{DEFAULT_BPM, MAX_BPM, MIN_BPM};
use crate::messaging::channels::{EventConsumer, EventProducer, create_event_channel};
use crate::messaging::event::EngineEvent;
use crate::preset::store::{BeatPreset, PresetId, PresetStore};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// How long the visual pulse stays lit after a tick.
pub const PULSE_DURATION: Duration = Duration::from_millis(100);

const EVENT_RINGBUFFER_CAPACITY: usize = 256;

/// Seconds between ticks at the given tempo and subdivision.
///
/// Strictly positive and strictly decreasing in BPM for any fixed note
/// value, since BPM is clamped to a positive range before it gets here.
pub fn tick_interval(bpm: f64, note_value: NoteValue) -> Duration {
    Duration::from_secs_f64((60.0 / bpm) / note_value.multiplier())
}

/// The metronome engine handle.
///
/// Owns the engine state and its clock thread. Cheap to share by reference;
/// every entry point (UI, voice intents, tests) goes through `&self`
/// methods, which serialize on the internal lock. Dropping the handle stops
/// the clock thread.
pub struct Metronome {
    shared: Arc<Shared>,
    clock: Option<JoinHandle<()>>,
}

struct Shared {
    state: Mutex<EngineState>,
    /// Signalled whenever a deadline may have moved.
    tick_due: Condvar,
    shutdown: AtomicBool,
}

struct EngineState {
    is_playing: bool,
    bpm: f64,
    note_value: NoteValue,
    /// -1 while stopped or before the first tick.
    current_beat: i32,
    display_mode: DisplayMode,
    pattern: PatternState,
    presets: PresetStore,
    active_preset: Option<String>,
    taps: TapTempo,
    /// When the next tick fires; `None` while stopped.
    next_tick: Option<Instant>,
    /// When the visual pulse goes dark; single slot, re-armed by every tick.
    pulse_until: Option<Instant>,
    visual_pulse: bool,
    sink: Box<dyn SoundSink>,
    events: EventProducer,
}

impl Metronome {
    /// Create an engine ticking into `sink`, plus the consumer side of its
    /// event channel.
    pub fn new(sink: Box<dyn SoundSink>) -> (Self, EventConsumer) {
        let (events_tx, events_rx) = create_event_channel(EVENT_RINGBUFFER_CAPACITY);

        let shared = Arc::new(Shared {
            state: Mutex::new(EngineState {
                is_playing: false,
                bpm: DEFAULT_BPM,
                note_value: NoteValue::Quarter,
                current_beat: -1,
                display_mode: DisplayMode::default(),
                pattern: PatternState::new(NoteValue::Quarter),
                presets: PresetStore::factory(),
                active_preset: None,
                taps: TapTempo::new(),
                next_tick: None,
                pulse_until: None,
                visual_pulse: false,
                sink,
                events: events_tx,
            }),
            tick_due: Condvar::new(),
            shutdown: AtomicBool::new(false),
        });

        let clock_shared = Arc::clone(&shared);
        let clock = thread::spawn(move || run_clock(clock_shared));

        (
            Self {
                shared,
                clock: Some(clock),
            },
            events_rx,
        )
    }

    /// Begin playback. The first tick (beat 0) fires synchronously, before
    /// this returns; subsequent ticks come from the clock thread. No-op if
    /// already playing.
    pub fn start(&self) {
        self.with_state(|state| state.begin_playback());
    }

    /// Stop playback and reset the beat index. Once this returns, no further
    /// tick fires, even one already due. No-op if already stopped.
    pub fn stop(&self) {
        self.with_state(|state| state.halt_playback());
    }

    pub fn toggle_playback(&self) {
        // Read-then-act would race another caller; decide under the lock.
        self.with_state(|state| {
            if state.is_playing {
                state.halt_playback();
            } else {
                state.begin_playback();
            }
        });
    }

    /// Set the tempo, clamped to [40, 200] BPM. While playing, the next tick
    /// fires exactly one new interval from now; the beat index is untouched.
    pub fn set_tempo(&self, bpm: f64) {
        self.with_state(|state| state.apply_tempo(bpm));
    }

    /// Switch subdivision: adopts the canonical beat count and default
    /// layout for `note_value` and resets the beat index, so audio and
    /// visuals can't drift apart mid-measure. Tempo is unaffected.
    pub fn set_note_value(&self, note_value: NoteValue) {
        self.with_state(|state| state.apply_note_value(note_value));
    }

    /// Change the measure length, reapplying the canonical layout for the
    /// current note value scaled to `beats` (destructive to manual edits
    /// below the new count; cells beyond it are preserved).
    pub fn set_beats_per_measure(&self, beats: usize) {
        self.with_state(|state| {
            let note_value = state.note_value;
            state.pattern.set_beats_per_measure(beats, note_value);
            state.current_beat = -1;
        });
    }

    pub fn set_display_mode(&self, mode: DisplayMode) {
        self.with_state(|state| state.display_mode = mode);
    }

    pub fn toggle_cell(&self, index: usize) {
        self.with_state(|state| state.pattern.toggle_cell(index));
    }

    pub fn toggle_accent(&self, index: usize) {
        self.with_state(|state| state.pattern.toggle_accent(index));
    }

    /// Replace the configuration with a random one: random note value and
    /// display mode, then a random pattern with beat 0 always active and
    /// accented.
    pub fn randomize(&self) {
        let mut rng = rand::thread_rng();
        self.with_state(|state| {
            use rand::Rng;
            let note_value = NoteValue::ALL[rng.gen_range(0..NoteValue::ALL.len())];
            let mode = DisplayMode::ALL[rng.gen_range(0..DisplayMode::ALL.len())];
            state.display_mode = mode;
            state.apply_note_value(note_value);
            state.pattern.randomize(&mut rng);
        });
    }

    /// Record a tap now; with enough taps in the window, the estimated
    /// tempo is applied as if passed to [`set_tempo`](Self::set_tempo).
    pub fn tap(&self) {
        self.tap_at(Instant::now());
    }

    /// [`tap`](Self::tap) with an explicit timestamp.
    pub fn tap_at(&self, now: Instant) {
        self.with_state(|state| {
            if let Some(bpm) = state.taps.register(now) {
                state.apply_tempo(bpm);
            }
        });
    }

    /// Freeze the current configuration under `name`. An existing preset
    /// with that name is replaced.
    pub fn save_preset(&self, name: &str) -> PresetId {
        self.with_state(|state| {
            let preset = BeatPreset::new(
                name,
                state.note_value,
                state.bpm,
                state.pattern.beats_per_measure(),
                state.pattern.grid().to_vec(),
                state.pattern.accents().to_vec(),
                state.display_mode,
            );
            let id = preset.id;
            state.presets.save(preset);
            state.active_preset = Some(name.to_string());
            id
        })
    }

    /// Copy a preset's fields into the live state. Returns false (and does
    /// nothing) for an unknown id.
    pub fn load_preset(&self, id: PresetId) -> bool {
        self.with_state(|state| {
            let preset = match state.presets.get(id) {
                Some(p) => p.clone(),
                None => return false,
            };
            state.note_value = preset.note_value;
            state.display_mode = preset.display_mode;
            state.pattern.load_snapshot(
                preset.beats_per_measure,
                &preset.grid_pattern,
                &preset.accent_pattern,
            );
            state.current_beat = -1;
            state.active_preset = Some(preset.name.clone());
            // apply_tempo also re-arms the timer for the (possibly new)
            // subdivision when playing.
            state.apply_tempo(preset.bpm);
            true
        })
    }

    /// Delete a preset by id. Returns false for an unknown id. If the
    /// deleted preset was the active one, the active name reverts to none.
    pub fn delete_preset(&self, id: PresetId) -> bool {
        self.with_state(|state| match state.presets.delete(id) {
            Some(removed) => {
                if state.active_preset.as_deref() == Some(removed.name.as_str()) {
                    state.active_preset = None;
                }
                true
            }
            None => false,
        })
    }

    /// Swap in presets loaded from elsewhere (e.g. a bank file).
    pub fn replace_presets(&self, presets: Vec<BeatPreset>) {
        self.with_state(|state| {
            state.presets.replace_all(presets);
            let active_still_exists = state
                .active_preset
                .as_deref()
                .is_some_and(|name| state.presets.find_by_name(name).is_some());
            if !active_still_exists {
                state.active_preset = None;
            }
        });
    }

    /// Read-only copy of the observable state.
    pub fn snapshot(&self) -> EngineSnapshot {
        let state = self.lock();
        EngineSnapshot {
            is_playing: state.is_playing,
            bpm: state.bpm,
            note_value: state.note_value,
            display_mode: state.display_mode,
            beats_per_measure: state.pattern.beats_per_measure(),
            current_beat: state.current_beat,
            visual_pulse: state.visual_pulse,
            grid_pattern: state.pattern.grid().to_vec(),
            accent_pattern: state.pattern.accents().to_vec(),
            presets: state.presets.all().to_vec(),
            active_preset_name: state.active_preset.clone(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, EngineState> {
        self.shared.state.lock().unwrap()
    }

    /// Run a mutation under the lock, then wake the clock thread so it
    /// re-reads any deadline the mutation may have moved.
    fn with_state<R>(&self, f: impl FnOnce(&mut EngineState) -> R) -> R {
        let mut guard = self.lock();
        let result = f(&mut guard);
        drop(guard);
        self.shared.tick_due.notify_all();
        result
    }
}

impl Drop for Metronome {
    fn drop(&mut self) {
        self.shared.shutdown.store(true, Ordering::Relaxed);
        // Take the lock once so the clock thread is either waiting (and gets
        // the notify) or will observe the flag on its next iteration.
        drop(self.shared.state.lock().unwrap());
        self.shared.tick_due.notify_all();
        if let Some(clock) = self.clock.take() {
            let _ = clock.join();
        }
    }
}

impl EngineState {
    fn begin_playback(&mut self) {
        if self.is_playing {
            return;
        }
        self.is_playing = true;
        self.current_beat = -1;
        self.push_event(EngineEvent::Started);

        let now = Instant::now();
        self.tick(now);
        self.next_tick = Some(now + tick_interval(self.bpm, self.note_value));
    }

    fn halt_playback(&mut self) {
        if !self.is_playing {
            return;
        }
        self.is_playing = false;
        self.current_beat = -1;
        self.next_tick = None;
        self.pulse_until = None;
        self.visual_pulse = false;
        self.push_event(EngineEvent::Stopped);
    }

    /// Advance one subdivision: bump the beat index, consult the pattern,
    /// fire the sink for active beats, and arm the visual pulse. Runs under
    /// the state lock, from the clock thread or synchronously from start.
    fn tick(&mut self, now: Instant) {
        let beats = self.pattern.beats_per_measure() as i32;
        self.current_beat = (self.current_beat + 1) % beats;

        let beat = self.current_beat as usize;
        // A beat index past the populated grid (transient during a resize)
        // reads as inactive rather than faulting.
        let audible = self.pattern.is_active(beat);
        let accented = audible && self.pattern.is_accented(beat);
        if audible {
            self.sink.play_click(accented);
        }

        // The pulse marks timing, not audibility: it fires on silent beats
        // too, and a rapid retrigger re-arms the same slot.
        self.visual_pulse = true;
        self.pulse_until = Some(now + PULSE_DURATION);

        self.push_event(EngineEvent::Tick {
            beat,
            audible,
            accented,
        });
    }

    fn apply_tempo(&mut self, bpm: f64) {
        if !bpm.is_finite() {
            return;
        }
        self.bpm = bpm.clamp(MIN_BPM, MAX_BPM);
        self.reschedule_if_playing();
        let bpm = self.bpm;
        self.push_event(EngineEvent::TempoChanged { bpm });
    }

    fn apply_note_value(&mut self, note_value: NoteValue) {
        self.note_value = note_value;
        self.pattern.resize_to_note_value(note_value);
        self.current_beat = -1;
        self.reschedule_if_playing();
    }

    /// Arm a fresh deadline one interval from now. The next tick does not
    /// fire early to catch up with the old schedule.
    fn reschedule_if_playing(&mut self) {
        if self.is_playing {
            self.next_tick = Some(Instant::now() + tick_interval(self.bpm, self.note_value));
        }
    }

    fn push_event(&mut self, event: EngineEvent) {
        // A slow observer loses events, never blocks the engine; it can
        // resynchronize from the next snapshot.
        let _ = ringbuf::traits::Producer::try_push(&mut self.events, event);
    }
}

/// Clock loop: fire whichever deadline is due, otherwise sleep until the
/// nearest one (or indefinitely while idle). All work happens under the
/// state lock; waiting releases it.
fn run_clock(shared: Arc<Shared>) {
    let mut guard = shared.state.lock().unwrap();
    loop {
        if shared.shutdown.load(Ordering::Relaxed) {
            break;
        }

        let now = Instant::now();

        if let Some(due) = guard.next_tick {
            if now >= due {
                guard.tick(now);
                if guard.is_playing {
                    // Schedule from the old deadline, not from now, so the
                    // long-run rate stays exact; if the thread fell far
                    // behind (system sleep), skip ahead instead of bursting.
                    let mut next = due + tick_interval(guard.bpm, guard.note_value);
                    if next < now {
                        next = now;
                    }
                    guard.next_tick = Some(next);
                }
                continue;
            }
        }

        if let Some(clear) = guard.pulse_until {
            if now >= clear {
                guard.pulse_until = None;
                guard.visual_pulse = false;
                guard.push_event(EngineEvent::PulseCleared);
                continue;
            }
        }

        let deadline = match (guard.next_tick, guard.pulse_until) {
            (Some(tick), Some(pulse)) => Some(tick.min(pulse)),
            (tick, None) => tick,
            (None, pulse) => pulse,
        };

        guard = match deadline {
            Some(instant) => {
                let wait = instant.saturating_duration_since(now);
                shared.tick_due.wait_timeout(guard, wait).unwrap().0
            }
            None => shared.tick_due.wait(guard).unwrap(),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::labels::label;

    /// Sink that records every click it receives.
    #[derive(Clone, Default)]
    struct RecordingSink(Arc<Mutex<Vec<bool>>>);

    impl SoundSink for RecordingSink {
        fn play_click(&self, accented: bool) {
            self.0.lock().unwrap().push(accented);
        }
    }

    fn engine_with_recording() -> (Metronome, EventConsumer, RecordingSink) {
        let sink = RecordingSink::default();
        let (engine, events) = Metronome::new(Box::new(sink.clone()));
        (engine, events, sink)
    }

    fn drain(events: &mut EventConsumer) -> Vec<EngineEvent> {
        let mut out = Vec::new();
        while let Some(ev) = ringbuf::traits::Consumer::try_pop(events) {
            out.push(ev);
        }
        out
    }

    #[test]
    fn test_interval_positive_and_decreasing_in_bpm() {
        for nv in NoteValue::ALL {
            let mut previous = Duration::MAX;
            for bpm in 40..=200 {
                let interval = tick_interval(bpm as f64, nv);
                assert!(interval > Duration::ZERO);
                assert!(interval < previous, "{nv:?} at {bpm} BPM not decreasing");
                previous = interval;
            }
        }

        // 120 BPM quarter notes: one tick every half second.
        assert_eq!(tick_interval(120.0, NoteValue::Quarter), Duration::from_millis(500));
        // Sixteenths tick four times as fast.
        assert_eq!(tick_interval(120.0, NoteValue::Sixteenth), Duration::from_millis(125));
    }

    #[test]
    fn test_start_fires_beat_zero_synchronously() {
        let (engine, mut events, sink) = engine_with_recording();

        engine.start();
        let snapshot = engine.snapshot();
        assert!(snapshot.is_playing);
        assert_eq!(snapshot.current_beat, 0);
        assert!(snapshot.visual_pulse);

        // Beat 0 of the canonical quarter pattern is active and accented.
        assert_eq!(*sink.0.lock().unwrap(), vec![true]);

        let seen = drain(&mut events);
        assert!(seen.contains(&EngineEvent::Started));
        assert!(seen.contains(&EngineEvent::Tick {
            beat: 0,
            audible: true,
            accented: true
        }));
    }

    #[test]
    fn test_stop_resets_beat_index_and_is_idempotent() {
        let (engine, _events, _sink) = engine_with_recording();

        engine.start();
        engine.stop();
        let snapshot = engine.snapshot();
        assert!(!snapshot.is_playing);
        assert_eq!(snapshot.current_beat, -1);
        assert!(!snapshot.visual_pulse);

        // Stopping again is a no-op, not a fault.
        engine.stop();
        assert_eq!(engine.snapshot().current_beat, -1);
    }

    #[test]
    fn test_start_while_playing_is_noop() {
        let (engine, _events, sink) = engine_with_recording();

        engine.start();
        engine.start();

        // Only the one synchronous tick fired.
        assert_eq!(sink.0.lock().unwrap().len(), 1);
        assert_eq!(engine.snapshot().current_beat, 0);
    }

    #[test]
    fn test_clock_thread_keeps_ticking() {
        let (engine, mut events, _sink) = engine_with_recording();

        // 200 BPM sixteenths: 75 ms per tick.
        engine.set_tempo(200.0);
        engine.set_note_value(NoteValue::Sixteenth);
        engine.start();
        thread::sleep(Duration::from_millis(500));
        engine.stop();

        let ticks = drain(&mut events)
            .into_iter()
            .filter(|ev| matches!(ev, EngineEvent::Tick { .. }))
            .count();
        // Expect ~7 (1 synchronous + ~6 scheduled); allow generous slack.
        assert!(ticks >= 4, "only {ticks} ticks in 500 ms");

        // Beat indices stay inside the measure.
        assert_eq!(engine.snapshot().current_beat, -1);
    }

    #[test]
    fn test_no_tick_fires_after_stop() {
        let (engine, mut events, _sink) = engine_with_recording();

        engine.set_tempo(200.0);
        engine.set_note_value(NoteValue::Sixteenth);
        engine.start();
        engine.stop();
        drain(&mut events);

        thread::sleep(Duration::from_millis(300));
        let after = drain(&mut events);
        assert!(
            !after.iter().any(|ev| matches!(ev, EngineEvent::Tick { .. })),
            "tick fired after stop: {after:?}"
        );
    }

    #[test]
    fn test_set_tempo_clamps_and_keeps_beat_index() {
        let (engine, _events, _sink) = engine_with_recording();

        engine.set_tempo(500.0);
        assert_eq!(engine.snapshot().bpm, 200.0);

        engine.set_tempo(5.0);
        assert_eq!(engine.snapshot().bpm, 40.0);

        // Tempo changes never start playback or move the beat index.
        assert!(!engine.snapshot().is_playing);
        engine.start();
        engine.set_tempo(90.0);
        assert_eq!(engine.snapshot().current_beat, 0);
    }

    #[test]
    fn test_set_note_value_resets_measure_and_accents() {
        let (engine, _events, _sink) = engine_with_recording();

        engine.set_tempo(150.0);
        engine.set_note_value(NoteValue::Sixteenth);

        let snapshot = engine.snapshot();
        assert_eq!(snapshot.beats_per_measure, 16);
        assert_eq!(snapshot.current_beat, -1);
        // Tempo is unaffected by subdivision changes.
        assert_eq!(snapshot.bpm, 150.0);
        for i in 0..16 {
            assert!(snapshot.grid_pattern[i]);
            assert_eq!(snapshot.accent_pattern[i], matches!(i, 0 | 4 | 8 | 12));
        }
    }

    #[test]
    fn test_authored_cell_survives_beat_count_growth() {
        let (engine, _events, _sink) = engine_with_recording();

        // Quarter: 4 beats, 16 allocated. Author a cell beyond the measure.
        engine.toggle_cell(10);
        assert!(engine.snapshot().grid_pattern[10]);

        engine.set_beats_per_measure(12);
        let snapshot = engine.snapshot();
        assert_eq!(snapshot.beats_per_measure, 12);
        assert!(snapshot.grid_pattern[10]);
        assert_eq!(snapshot.current_beat, -1);
    }

    #[test]
    fn test_preset_round_trip_restores_state() {
        let (engine, _events, _sink) = engine_with_recording();

        engine.set_tempo(150.0);
        engine.set_note_value(NoteValue::Eighth);
        engine.set_display_mode(DisplayMode::SubdivisionCounting);
        engine.toggle_cell(3);
        engine.toggle_accent(2);
        let saved = engine.snapshot();

        let id = engine.save_preset("My Groove");
        assert_eq!(engine.snapshot().active_preset_name.as_deref(), Some("My Groove"));

        // Mutate everything, then load the preset back.
        engine.set_note_value(NoteValue::SixteenthTriplet);
        engine.set_tempo(60.0);
        engine.set_display_mode(DisplayMode::AndCounting);
        assert!(engine.load_preset(id));

        let restored = engine.snapshot();
        assert_eq!(restored.bpm, saved.bpm);
        assert_eq!(restored.note_value, saved.note_value);
        assert_eq!(restored.beats_per_measure, saved.beats_per_measure);
        assert_eq!(restored.display_mode, saved.display_mode);
        let beats = saved.beats_per_measure;
        assert_eq!(restored.grid_pattern[..beats], saved.grid_pattern[..beats]);
        assert_eq!(restored.accent_pattern[..beats], saved.accent_pattern[..beats]);
    }

    #[test]
    fn test_load_unknown_preset_is_noop() {
        let (engine, _events, _sink) = engine_with_recording();
        let before = engine.snapshot();

        assert!(!engine.load_preset(uuid::Uuid::new_v4()));

        let after = engine.snapshot();
        assert_eq!(after.bpm, before.bpm);
        assert_eq!(after.note_value, before.note_value);
    }

    #[test]
    fn test_delete_active_preset_resets_name() {
        let (engine, _events, _sink) = engine_with_recording();

        let id = engine.save_preset("Transient");
        assert!(engine.delete_preset(id));
        assert_eq!(engine.snapshot().active_preset_name, None);

        // Deleting again: unknown id, no-op.
        assert!(!engine.delete_preset(id));
    }

    #[test]
    fn test_save_preset_overwrites_by_name() {
        let (engine, _events, _sink) = engine_with_recording();
        let initial = engine.snapshot().presets.len();

        engine.set_tempo(100.0);
        let first = engine.save_preset("Same Name");
        engine.set_tempo(180.0);
        let second = engine.save_preset("Same Name");

        let snapshot = engine.snapshot();
        assert_eq!(snapshot.presets.len(), initial + 1);
        assert!(!engine.load_preset(first));
        assert!(engine.load_preset(second));
        assert_eq!(engine.snapshot().bpm, 180.0);
    }

    #[test]
    fn test_tap_sequence_sets_tempo() {
        let (engine, _events, _sink) = engine_with_recording();
        let t0 = Instant::now();

        // Half-second taps: 120 BPM.
        engine.tap_at(t0);
        engine.tap_at(t0 + Duration::from_millis(500));
        engine.tap_at(t0 + Duration::from_millis(1000));

        assert!((engine.snapshot().bpm - 120.0).abs() < 0.01);
    }

    #[test]
    fn test_single_tap_changes_nothing() {
        let (engine, _events, _sink) = engine_with_recording();

        engine.tap_at(Instant::now());
        assert_eq!(engine.snapshot().bpm, DEFAULT_BPM);
    }

    #[test]
    fn test_taps_across_window_gap_change_nothing() {
        let (engine, _events, _sink) = engine_with_recording();
        let t0 = Instant::now();

        engine.tap_at(t0);
        // 10 s later only the second tap survives the 3 s window.
        engine.tap_at(t0 + Duration::from_secs(10));

        assert_eq!(engine.snapshot().bpm, DEFAULT_BPM);
    }

    #[test]
    fn test_randomize_invariants() {
        let (engine, _events, _sink) = engine_with_recording();

        for _ in 0..20 {
            engine.randomize();
            let snapshot = engine.snapshot();
            let beats = snapshot.beats_per_measure;

            assert_eq!(beats, snapshot.note_value.canonical_beats_per_measure());
            assert!(snapshot.grid_pattern[0]);
            assert!(snapshot.accent_pattern[0]);
            assert_eq!(snapshot.current_beat, -1);

            let active = snapshot.grid_pattern.iter().filter(|&&b| b).count();
            assert!(active >= 2usize.max(beats / 4).min(beats.min(12)));
            assert!(active <= beats.min(12));
        }
    }

    #[test]
    fn test_snapshot_labels_cover_measure() {
        let (engine, _events, _sink) = engine_with_recording();

        engine.set_note_value(NoteValue::Sixteenth);
        let snapshot = engine.snapshot();
        let labels: Vec<String> = (0..snapshot.beats_per_measure)
            .map(|p| label(p, snapshot.note_value, snapshot.display_mode))
            .collect();

        assert_eq!(labels[0], "1");
        assert_eq!(labels[1], "e");
        assert_eq!(labels[4], "2");
    }
}
