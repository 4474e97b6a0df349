use structopt::StructOpt;

use chip8_vm::config::Options;
use chip8_vm::emulator::{input::DummyInput, output::DummyOutput};
use chip8_vm::emulator::{Emulator, Frame, State};
use chip8_vm::rom;

/// Run a program without a display or keyboard and print the final screen.
#[derive(StructOpt)]
struct Opt {
    #[structopt(flatten)]
    options: Options,

    /// Number of frames to run
    #[structopt(short, long, default_value = "600")]
    frames: u32,

    /// Sleep between frames like an interactive frontend would
    #[structopt(long)]
    paced: bool,
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    // Get configuration and read input file
    let opt = Opt::from_args();
    log::info!("Executing {:?}", &opt.options.input);
    let program = rom::read_rom(&opt.options.input)?;

    // Load instructions into emulator memory
    let mut emulator = Emulator::new().with_quirks(opt.options.quirks());
    if let Some(seed) = opt.options.seed {
        emulator = emulator.with_seed(seed);
    }
    emulator.load(&program)?;

    // Start execution
    let mut output = DummyOutput::new();
    for frame in 0..opt.frames {
        if emulator.run_frame(opt.options.cycles, &mut DummyInput, &mut output)? == Frame::Quit {
            break;
        }
        if let State::AwaitingKey { .. } = emulator.state() {
            log::warn!("Program is waiting for a key press, stopping after {} frames", frame + 1);
            break;
        }
        if opt.paced {
            std::thread::sleep(opt.options.delay);
        }
    }

    print!("{}", emulator.screen());
    Ok(())
}
