//! voiceoff main entry point
//!
//! Line-oriented interactive loop driving the round state machine: one
//! command per user interaction, no background work. Audio playback is left
//! to the player's own player; the loop prints the paths of the two clips
//! under neutral names so the file name can't give the answer away.

use log::{debug, error, info};
use std::io::{self, BufRead, Write};
use std::process;
use voiceoff::audio::{AudioCapture, AudioHandle, WavCapture};
use voiceoff::config::Config;
use voiceoff::game::options::Label;
use voiceoff::game::{Game, RoundPhase};
use voiceoff::leaderboard::LeaderboardStore;
use voiceoff::speech::backends::azure::{AzureSynthesizer, AzureTranscriber};
use voiceoff::speech::resolve_voice;
use voiceoff::Result;

fn main() {
    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();
    let debug_mode = args.iter().any(|arg| arg == "--debug" || arg == "-d");

    // Initialize logger
    if debug_mode {
        // Debug mode: write to voiceoff.log file
        use std::fs::OpenOptions;
        match OpenOptions::new()
            .create(true)
            .append(true)
            .open("voiceoff.log")
        {
            Ok(log_file) => {
                env_logger::Builder::new()
                    .filter_level(log::LevelFilter::Debug)
                    .target(env_logger::Target::Pipe(Box::new(log_file)))
                    .init();
            }
            Err(e) => {
                eprintln!("Warning: Failed to open voiceoff.log for debug logging: {}", e);
                env_logger::Builder::new()
                    .filter_level(log::LevelFilter::Warn)
                    .init();
            }
        }

        info!(
            "voiceoff version {} starting (debug mode, logging to voiceoff.log)",
            voiceoff::VERSION
        );
    } else {
        // Normal mode: minimal logging to stderr, only errors
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Error)
            .init();
    }

    if let Err(e) = run() {
        error!("Fatal error: {}", e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let config = Config::load()?;
    info!("Configuration loaded from {:?}", config.path());

    let transcriber = AzureTranscriber::from_config(&config)?;
    let synthesizer = AzureSynthesizer::from_config(&config, config.scratch_dir())?;
    let mut capture = WavCapture::new(config.scratch_dir())?;
    let store = LeaderboardStore::new(config.leaderboard_path());
    let voice = resolve_voice(&config.voice());
    info!("Synthesis voice: {}", voice);

    let mut game = Game::new(Box::new(transcriber), Box::new(synthesizer), store, voice);

    println!("voiceoff {} - can you tell your own voice from the AI clone?", voiceoff::VERSION);
    print_help();

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }

        let mut parts = line.split_whitespace();
        let command = match parts.next() {
            Some(command) => command,
            None => continue,
        };

        match command {
            "mic" => {
                println!(
                    "Recording for {} seconds, speak now...",
                    config.record_seconds()
                );
                match capture.capture_from_mic(config.record_seconds(), config.sample_rate()) {
                    Ok(audio) => {
                        println!("Recording done.");
                        handle_audio(&mut game, &config, audio, None);
                    }
                    Err(e) => println!("Recording failed: {}", e),
                }
            }
            "upload" => match parts.next() {
                Some(path) => handle_upload(&mut game, &mut capture, &config, path),
                None => println!("Usage: upload <path-to-wav>"),
            },
            "guess" => {
                let label = parts.next().map(str::parse::<Label>);
                let player: String = parts.collect::<Vec<_>>().join(" ");
                match label {
                    Some(Ok(label)) => handle_guess(&mut game, label, &player),
                    Some(Err(e)) => println!("{}", e),
                    None => println!("Usage: guess <A|B> [player name]"),
                }
            }
            "score" => {
                let session = game.session();
                println!(
                    "Your score: {} / {}",
                    session.correct_count(),
                    session.total_rounds()
                );
            }
            "board" => print_board(&game),
            "clear" => match game.leaderboard().clear() {
                Ok(()) => println!("Leaderboard cleared."),
                Err(e) => println!("Failed to clear leaderboard: {}", e),
            },
            "help" => print_help(),
            "quit" | "exit" => break,
            other => println!("Unknown command '{}'. Type 'help' for commands.", other),
        }
    }

    Ok(())
}

fn print_help() {
    println!("Commands:");
    println!("  mic                     record a voice sample from the microphone");
    println!("  upload <path>           use a WAV file as the voice sample");
    println!("  guess <A|B> [name]      pick your real voice; name saves your score");
    println!("  score                   show your session score");
    println!("  board                   show the leaderboard (latest first)");
    println!("  clear                   clear the leaderboard");
    println!("  quit                    exit");
}

fn handle_upload(game: &mut Game, capture: &mut WavCapture, config: &Config, path: &str) {
    let name = std::path::Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string());

    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            println!("Could not read '{}': {}", path, e);
            return;
        }
    };

    match capture.capture_from_upload(&bytes, &name) {
        Ok(audio) => handle_audio(game, config, audio, Some(&name)),
        Err(e) => println!("{}", e),
    }
}

/// Feed a new audio input through the round pipeline and render the result
fn handle_audio(game: &mut Game, config: &Config, audio: AudioHandle, input_id: Option<&str>) {
    match game.submit_audio(audio, input_id) {
        Ok(RoundPhase::ReadyToGuess) => render_round(game, config),
        Ok(RoundPhase::Invalid) => {
            println!(
                "No valid speech detected. Please try again with a clearer or longer recording."
            );
        }
        Ok(phase) => {
            // Duplicate input: the round is wherever it already was
            debug!("Input ignored, phase still {:?}", phase);
            println!("That file was already processed; pick a different one.");
        }
        Err(e) => println!("{}", e),
    }
}

/// Show the transcript and the two clips under neutral names
fn render_round(game: &Game, config: &Config) {
    let session = game.session();

    if let Some(text) = session.transcribed_text() {
        println!("Transcribed: '{}'", text);
    }

    println!("Listen and guess which voice is yours:");
    for label in [Label::A, Label::B] {
        let Some(audio) = session.audio_for(label) else {
            continue;
        };
        // Copy under a neutral name so the clip path doesn't reveal which
        // one is the real recording
        let neutral = config
            .scratch_dir()
            .join(format!("voice_{}.wav", label.to_string().to_lowercase()));
        match std::fs::copy(audio.path(), &neutral) {
            Ok(_) => println!("  Voice {}: {}", label, neutral.display()),
            Err(e) => println!("  Voice {}: (unavailable: {})", label, e),
        }
    }
    println!("Submit with: guess <A|B> [your name]");
}

fn handle_guess(game: &mut Game, label: Label, player: &str) {
    let player = if player.trim().is_empty() {
        None
    } else {
        Some(player.trim())
    };

    match game.submit_guess(label, player) {
        Ok(outcome) => {
            if outcome.correct {
                println!("Correct! {} was your real voice.", outcome.guess);
            } else {
                println!(
                    "Wrong! {} was the AI. Your real voice was {}.",
                    outcome.guess, outcome.real_label
                );
            }
            println!(
                "Your score: {} / {}",
                outcome.correct_count, outcome.total_rounds
            );
            if player.is_some() {
                println!("Score saved to leaderboard.");
            }
            println!("Record or upload new audio to play another round.");
        }
        Err(e) => println!("{}", e),
    }
}

fn print_board(game: &Game) {
    let entries = game.leaderboard().read_all();
    if entries.is_empty() {
        println!("No scores yet. Be the first!");
        return;
    }

    // Latest first for display; storage stays oldest first
    for entry in entries.iter().rev() {
        println!("  {} - {}/{} correct", entry.name, entry.correct, entry.total);
    }
}
