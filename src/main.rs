//! BB84 simulator CLI
//!
//! Runs one session over a clean channel and one with an eavesdropper, then
//! prints a narrated report of each.

use bb84_sim::protocols::bb84::{self, SessionConfig};
use bb84_sim::{QuantumChannel, Report, Sampler, Stage, errors::ProtocolError};
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(name = "bb84-sim", version, about = "Simulate BB84 key distribution with and without an eavesdropper")]
struct Cli {
    /// Photons prepared per session
    #[arg(long, default_value_t = 100)]
    num_bits: usize,

    /// Seed the generator once at start for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Bit-flip probability on the fiber
    #[arg(long, default_value_t = 0.0)]
    noise: f64,

    /// Additional sessions per mode for aggregate QBER statistics
    #[arg(long, default_value_t = 0)]
    trials: usize,
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    info!("BB84 simulator v{}", bb84_sim::VERSION);

    if let Err(e) = run(&cli) {
        eprintln!("Simulation aborted: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), ProtocolError> {
    let channel = QuantumChannel::undisturbed().with_bit_flip(cli.noise)?;
    let config = SessionConfig::new(cli.num_bits)?.with_channel(channel);

    // One generator for the whole process, never reseeded between runs.
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    for intercept in [false, true] {
        let result = bb84::run(&config.with_eavesdropper(intercept), &mut rng)?;
        println!();
        println!("{}", Report::new(&result));
        debug!(stage = %Stage::Reported, intercept);
    }

    if cli.trials > 0 {
        println!();
        for intercept in [false, true] {
            let sampler = Sampler::new(config.with_eavesdropper(intercept));
            let summary = sampler.run(cli.trials, &mut rng)?;
            println!("{summary}");
        }
    }

    Ok(())
}
