use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{bail, Context};
use structopt::StructOpt;

use chip8_vm::config::{Options, Rgb};
use chip8_vm::emulator::{Emulator, Frame};
use chip8_vm::rom;

mod crossterm_io;
mod key_buffer;
use crossterm_io::{CrosstermInput, CrosstermOutput, TerminalBell};

/// The program options.
#[derive(StructOpt)]
struct Opt {
    #[structopt(flatten)]
    options: Options,

    /// Color of lit pixels, as `r,g,b`
    #[structopt(short, long, default_value = "121,125,98")]
    color: Rgb,

    /// Milliseconds a key stays pressed after the terminal last reported it
    #[structopt(long, default_value = "200")]
    hold: u64,
}

fn main() -> anyhow::Result<()> {

    env_logger::init();

    // Get configuration and pick the program to run
    let opt = Opt::from_args();
    let path = match choose_rom(&opt.options.input)? {
        Some(path) => path,
        None => return Ok(()),
    };
    log::info!("Executing {:?}", &path);
    let program = rom::read_rom(&path)?;

    // Load instructions into emulator memory
    let mut emulator = Emulator::with_audio(TerminalBell).with_quirks(opt.options.quirks());
    if let Some(seed) = opt.options.seed {
        emulator = emulator.with_seed(seed);
    }
    emulator.load(&program)?;

    // Start execution. The terminal is restored when `output` goes out of scope.
    let mut input = CrosstermInput::new(Duration::from_millis(opt.hold));
    {
        let mut output = CrosstermOutput::new(opt.color).context("could not initialize the terminal display")?;
        run(&mut emulator, &opt.options, &mut input, &mut output)?;
    }

    println!("See you later! Thanks for playing.");
    Ok(())
}

/// A file is run as is, a directory offers a menu of the files inside it.
fn choose_rom(input: &Path) -> anyhow::Result<Option<PathBuf>> {
    if !input.is_dir() {
        return Ok(Some(input.to_path_buf()));
    }

    let roms = rom::list_roms(input)
        .with_context(|| format!("could not list programs in {:?}", input))?;
    if roms.is_empty() {
        bail!("no programs found in {:?}", input);
    }

    let stdin = io::stdin();
    let selected = rom::select_rom(&roms, stdin.lock(), io::stdout())?;
    Ok(selected)
}

fn run(
    emulator: &mut Emulator<TerminalBell>,
    options: &Options,
    input: &mut CrosstermInput,
    output: &mut CrosstermOutput,
) -> anyhow::Result<()> {
    loop {
        let started = Instant::now();
        if emulator.run_frame(options.cycles, input, output)? == Frame::Quit {
            log::info!("Quit requested");
            return Ok(());
        }
        if let Some(remaining) = options.delay.checked_sub(started.elapsed()) {
            std::thread::sleep(remaining);
        }
    }
}
