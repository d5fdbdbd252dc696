use beatgrid::{
    ClickOutput, DisplayMode, EngineEvent, Metronome, NoteValue, NullSink, SoundSink,
    default_bank_path, label, load_bank, save_bank,
};
use ringbuf::traits::Consumer;
use std::io::{self, BufRead, Write};

fn main() {
    println!("=== BeatGrid ===");
    println!("Version 0.1.0\n");

    // Open audio; a machine without an output device still gets a working
    // (silent) engine.
    println!("Audio engine initialisation...");
    let (_audio, sink): (Option<ClickOutput>, Box<dyn SoundSink>) = match ClickOutput::new() {
        Ok((output, handle)) => (Some(output), Box::new(handle)),
        Err(e) => {
            eprintln!("Audio unavailable ({}). Running without sound.", e);
            (None, Box::new(NullSink))
        }
    };

    let (engine, mut events) = Metronome::new(sink);

    // Pick up the preset bank from a previous run, if any.
    if let Ok(path) = default_bank_path() {
        if path.exists() {
            match load_bank(&path) {
                Ok(bank) => {
                    println!("Loaded {} presets from {}", bank.presets.len(), path.display());
                    engine.replace_presets(bank.presets);
                }
                Err(e) => eprintln!("Could not load preset bank: {}", e),
            }
        }
    }

    println!("\n=== BeatGrid started ! ===");
    print_help();

    let stdin = io::stdin();
    let mut last_beat: Option<usize> = None;

    loop {
        print!("> ");
        let _ = io::stdout().flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break, // EOF
            Ok(_) => {}
            Err(e) => {
                eprintln!("Input error: {}", e);
                break;
            }
        }

        // Keep only the latest tick for the status display.
        while let Some(event) = events.try_pop() {
            if let EngineEvent::Tick { beat, .. } = event {
                last_beat = Some(beat);
            }
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        match tokens.as_slice() {
            [] => {}
            ["start"] => engine.start(),
            ["stop"] => engine.stop(),
            ["bpm", value] => match value.parse::<f64>() {
                Ok(bpm) => engine.set_tempo(bpm),
                Err(_) => eprintln!("Not a number: {}", value),
            },
            ["note", code] => match parse_note_value(code) {
                Some(nv) => engine.set_note_value(nv),
                None => eprintln!("Unknown note value: {} (q e s qt et st)", code),
            },
            ["beats", value] => match value.parse::<usize>() {
                Ok(beats) => engine.set_beats_per_measure(beats),
                Err(_) => eprintln!("Not a number: {}", value),
            },
            ["tap"] => engine.tap(),
            ["cell", index] => match index.parse::<usize>() {
                Ok(i) => engine.toggle_cell(i),
                Err(_) => eprintln!("Not an index: {}", index),
            },
            ["accent", index] => match index.parse::<usize>() {
                Ok(i) => engine.toggle_accent(i),
                Err(_) => eprintln!("Not an index: {}", index),
            },
            ["mode", "and"] => engine.set_display_mode(DisplayMode::AndCounting),
            ["mode", "sub"] => engine.set_display_mode(DisplayMode::SubdivisionCounting),
            ["random"] => engine.randomize(),
            ["save", name @ ..] if !name.is_empty() => {
                let name = name.join(" ");
                engine.save_preset(&name);
                println!("Saved preset '{}'", name);
            }
            ["load", name @ ..] if !name.is_empty() => {
                let name = name.join(" ");
                let id = engine
                    .snapshot()
                    .presets
                    .iter()
                    .find(|p| p.name == name)
                    .map(|p| p.id);
                match id {
                    Some(id) if engine.load_preset(id) => println!("Loaded preset '{}'", name),
                    _ => eprintln!("No preset named '{}'", name),
                }
            }
            ["delete", name @ ..] if !name.is_empty() => {
                let name = name.join(" ");
                let id = engine
                    .snapshot()
                    .presets
                    .iter()
                    .find(|p| p.name == name)
                    .map(|p| p.id);
                match id {
                    Some(id) if engine.delete_preset(id) => println!("Deleted preset '{}'", name),
                    _ => eprintln!("No preset named '{}'", name),
                }
            }
            ["presets"] => {
                for preset in engine.snapshot().presets {
                    println!(
                        "  {:<16} {:>5.0} BPM  {}",
                        preset.name, preset.bpm, preset.note_value
                    );
                }
            }
            ["show"] => print_status(&engine, last_beat),
            ["help"] => print_help(),
            ["quit"] | ["exit"] => break,
            other => eprintln!("Unknown command: {} (try 'help')", other.join(" ")),
        }
    }

    // Persist the bank for the next run.
    match default_bank_path() {
        Ok(path) => {
            let presets = engine.snapshot().presets;
            match save_bank(&path, &presets) {
                Ok(()) => println!("Saved {} presets to {}", presets.len(), path.display()),
                Err(e) => eprintln!("Could not save preset bank: {}", e),
            }
        }
        Err(e) => eprintln!("Could not save preset bank: {}", e),
    }
}

fn parse_note_value(code: &str) -> Option<NoteValue> {
    match code {
        "q" => Some(NoteValue::Quarter),
        "e" => Some(NoteValue::Eighth),
        "s" => Some(NoteValue::Sixteenth),
        "qt" => Some(NoteValue::QuarterTriplet),
        "et" => Some(NoteValue::EighthTriplet),
        "st" => Some(NoteValue::SixteenthTriplet),
        _ => None,
    }
}

fn print_status(engine: &Metronome, last_beat: Option<usize>) {
    let snapshot = engine.snapshot();

    println!(
        "{} | {:.0} BPM | {} {} | {} beats | {}",
        if snapshot.is_playing { "playing" } else { "stopped" },
        snapshot.bpm,
        snapshot.note_value.symbol(),
        snapshot.note_value,
        snapshot.beats_per_measure,
        snapshot
            .active_preset_name
            .as_deref()
            .unwrap_or("(no preset)"),
    );

    let mut cells = String::new();
    let mut labels = String::new();
    for i in 0..snapshot.beats_per_measure {
        let mark = if !snapshot.grid_pattern.get(i).copied().unwrap_or(false) {
            "."
        } else if snapshot.accent_pattern.get(i).copied().unwrap_or(false) {
            "#"
        } else {
            "x"
        };
        let cursor = if last_beat == Some(i) && snapshot.is_playing {
            ">"
        } else {
            " "
        };
        cells.push_str(&format!("{}{:<4}", cursor, mark));
        labels.push_str(&format!(
            " {:<4}",
            label(i, snapshot.note_value, snapshot.display_mode)
        ));
    }
    println!("{}", cells);
    println!("{}", labels);
}

fn print_help() {
    println!("commands:");
    println!("  start | stop | tap | random | show | presets | help | quit");
    println!("  bpm <40-200>       set tempo");
    println!("  note <q|e|s|qt|et|st>  set note value");
    println!("  beats <n>          set beats per measure");
    println!("  cell <i> / accent <i>  toggle a grid cell / accent");
    println!("  mode <and|sub>     counting display mode");
    println!("  save/load/delete <name>  presets");
}
