//! chip8vm entry point.
//!
//! Loads a program and runs it in a window at 60 ticks per second.
//! Usage: chip8vm [OPTIONS] <ROM>

use std::error::Error;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use chip8vm::{
    audio::speaker::{Silent, Tone},
    display::framebuffer::Resolution,
    keypad::{Keypad, CONVENTIONAL_LAYOUT},
    log,
    machine::{Config, Machine, Status, DEFAULT_INSTRUCTIONS_PER_TICK},
    rom::Rom,
};
use clap::Parser;
use minifb::{Key, Scale, ScaleMode, Window, WindowOptions};

const COLOUR_ON: u32 = 0xFFFFFF;
const COLOUR_OFF: u32 = 0x000000;

/// minifb keys in the order of `CONVENTIONAL_LAYOUT`.
const LAYOUT_KEYS: [Key; 16] = [
    Key::Key1,
    Key::Key2,
    Key::Key3,
    Key::Key4,
    Key::Q,
    Key::W,
    Key::E,
    Key::R,
    Key::A,
    Key::S,
    Key::D,
    Key::F,
    Key::Z,
    Key::X,
    Key::C,
    Key::V,
];

#[derive(Parser, Debug)]
#[command(version, about = "CHIP-8 / SUPER-CHIP interpreter", long_about = None)]
struct Args {
    /// Program image to load at 0x200
    rom: PathBuf,

    /// Instructions executed per 60 Hz tick
    #[arg(short, long, default_value_t = DEFAULT_INSTRUCTIONS_PER_TICK)]
    ips: u32,

    /// Window scale factor (rounded down to a power of two, max 32)
    #[arg(short, long, default_value_t = 8)]
    scale: u32,

    /// Disable the sound timer tone
    #[arg(short, long)]
    mute: bool,

    /// Print every executed instruction
    #[arg(short, long)]
    trace: bool,

    /// Seed for the random number opcode
    #[arg(long)]
    seed: Option<u64>,

    /// Print the screen and registers when the run ends
    #[arg(long)]
    dump_on_exit: bool,
}

fn window_scale(factor: u32) -> Scale {
    match factor {
        0..=1 => Scale::X1,
        2..=3 => Scale::X2,
        4..=7 => Scale::X4,
        8..=15 => Scale::X8,
        16..=31 => Scale::X16,
        _ => Scale::X32,
    }
}

fn read_keys(window: &Window, keypad: &mut Keypad) {
    for (key, &(_, hex)) in LAYOUT_KEYS.iter().zip(CONVENTIONAL_LAYOUT.iter()) {
        keypad.set(hex, window.is_key_down(*key));
    }
}

fn dump(machine: &Machine) {
    print!("{}", machine.frame().to_ascii());
    let regs = machine.registers();
    for (i, v) in regs.v.iter().enumerate() {
        println!("V{:X}: {:02X}", i, v);
    }
    println!("tD: {:02X}", regs.timers.delay);
    println!("tS: {:02X}", regs.timers.sound);
    println!("I:  {:04X}", regs.i);
    println!("PC: {:04X}", regs.pc);
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let config = Config {
        instructions_per_tick: args.ips,
        trace: args.trace,
        seed: args.seed,
        ..Config::default()
    };
    let tick = Duration::from_secs_f64(1.0 / config.tick_rate_hz as f64);

    let rom = Rom::load(&args.rom)?;
    let mut machine = Machine::new(config)?;
    machine.load_program(&rom.data)?;
    log::info(&format!(
        "Running at {} instructions per tick",
        machine.config.instructions_per_tick
    ));

    let mut tone = Tone::open(args.mute).unwrap_or_else(|e| {
        log::warn(&format!("No audio output ({}), continuing muted", e));
        Tone::new(Box::new(Silent))
    });

    // Sized for the extended grid; the standard grid is stretched to fill it.
    let mut window = Window::new(
        "chip8vm",
        Resolution::Extended.width(),
        Resolution::Extended.height(),
        WindowOptions {
            resize: true,
            scale: window_scale(args.scale),
            scale_mode: ScaleMode::AspectRatioStretch,
            ..WindowOptions::default()
        },
    )?;

    let mut rgb = Vec::new();
    let mut outcome = Ok(());

    while window.is_open() && !window.is_key_down(Key::Escape) {
        let frame_start = Instant::now();

        read_keys(&window, &mut machine.keypad);
        let status = match machine.tick() {
            Ok(status) => status,
            Err(e) => {
                log::error(&e.to_string());
                outcome = Err(e.into());
                break;
            }
        };
        tone.update(machine.sound_active());

        let frame = machine.frame();
        frame.to_rgb(COLOUR_ON, COLOUR_OFF, &mut rgb);
        window.update_with_buffer(&rgb, frame.width(), frame.height())?;

        if status == Status::Exited {
            break;
        }

        // The machine is far faster than 60 Hz; sleep out the rest of the tick.
        let elapsed = frame_start.elapsed();
        if elapsed < tick {
            std::thread::sleep(tick - elapsed);
        }
    }

    tone.update(false);
    if args.dump_on_exit {
        dump(&machine);
    }
    outcome
}
