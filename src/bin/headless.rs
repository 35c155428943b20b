use std::error::Error;
use std::io::stdout;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use structopt::StructOpt;

use chip_8_core::emulator::config::{AluMode, Config, TimerMode};
use chip_8_core::emulator::Emulator;

/// Run a CHIP-8 program without a front end and print what it drew.
#[derive(StructOpt, Debug)]
struct Opt {
    /// The program to execute
    #[structopt(parse(from_os_str))]
    input: PathBuf,

    /// Number of instructions to execute
    #[structopt(short, long, default_value = "1000")]
    cycles: u64,

    /// Instructions per second, 0 runs as fast as possible
    #[structopt(long, default_value = "0")]
    hz: u64,

    /// Seed for the random number generator
    #[structopt(short, long)]
    seed: Option<u64>,

    /// Use the COSMAC VIP semantics for SHR, SHL and SUBN
    #[structopt(long)]
    canonical: bool,

    /// Tick timers at 60 Hz wall clock instead of once per instruction
    #[structopt(long)]
    external_timers: bool,

    /// Print a hex dump of memory when done
    #[structopt(long)]
    dump_memory: bool,

    /// Do not print the screen when done
    #[structopt(long)]
    no_display: bool,
}

impl Opt {
    fn config(&self) -> Config {
        Config {
            alu: if self.canonical { AluMode::Canonical } else { AluMode::Reference },
            timers: if self.external_timers { TimerMode::External } else { TimerMode::PerInstruction },
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    // Get configuration and read input file
    let opt = Opt::from_args();
    log::info!("Executing {:?}", &opt.input);

    let config = opt.config();
    let mut emulator = match opt.seed {
        Some(seed) => Emulator::with_seed(seed, config),
        None => Emulator::with_config(config),
    };
    emulator.load_file(&opt.input)?;

    let delay = if opt.hz == 0 { None } else { Some(Duration::from_nanos(1_000_000_000 / opt.hz)) };
    let timer_period = Duration::from_millis(1_000 / 60);
    let mut last_tick = Instant::now();

    // Start execution
    for cycle in 0..opt.cycles {
        if let Err(e) = emulator.step() {
            log::error!("Stopped after {} cycles at {:#05X}: {}", cycle, emulator.program_counter(), e);
            break;
        }
        if let Some(delay) = delay {
            std::thread::sleep(delay);
        }
        if config.timers == TimerMode::External && last_tick.elapsed() >= timer_period {
            emulator.tick_timers();
            last_tick += timer_period;
        }
    }

    let mut out = stdout();
    if !opt.no_display {
        emulator.display_dump(&mut out)?;
    }
    if opt.dump_memory {
        emulator.memory_dump(&mut out)?;
    }

    Ok(())
}
