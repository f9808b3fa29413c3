use std::error::Error;
use std::io::{self, BufRead, Write};

use clap::Parser;
use lunar_simulation::*;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Apollo lunar landing simulation")]
struct Cli {
    /// Initial fuel in pounds
    #[arg(long, default_value_t = DEFAULT_FUEL_MASS)]
    fuel: f64,

    /// Capsule dry mass in pounds
    #[arg(long, default_value_t = DEFAULT_DRY_MASS)]
    mass: f64,

    /// Initial altitude in miles
    #[arg(long, default_value_t = DEFAULT_ALTITUDE)]
    altitude: f64,

    /// Initial velocity in miles/sec, positive downward
    #[arg(long, default_value_t = DEFAULT_VELOCITY, allow_negative_numbers = true)]
    velocity: f64,

    /// Print the flight log after each landing
    #[arg(long, default_value_t = false)]
    flight_log: bool,
}

type Input<'a> = io::Lines<io::StdinLock<'a>>;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = LanderConfig {
        fuel_mass: cli.fuel,
        dry_mass: cli.mass,
        altitude: cli.altitude,
        velocity: cli.velocity,
    };
    config.validate()?;

    intro(&config);
    let stdin = io::stdin();
    let mut input = stdin.lock().lines();

    loop {
        let mut session = DescentSession::from_config(&config)?;
        let Some(touchdown) = play(&mut session, &mut input)? else {
            println!("\nEXITING GAME");
            return Ok(());
        };

        print_report(&LandingReport::from_touchdown(&touchdown));
        if cli.flight_log {
            session.get_telemetry().display_data();
        }

        match prompt(&mut input, "\nTRY AGAIN?? ")? {
            Some(reply) if reply.trim_start().to_ascii_lowercase().starts_with('y') => {}
            _ => return Ok(()),
        }
    }
}

fn play(
    session: &mut DescentSession,
    input: &mut Input<'_>,
) -> Result<Option<Touchdown>, Box<dyn Error>> {
    println!("{}   RATE", Telemetry::header());
    loop {
        print!("{}  ", Telemetry::status_line(session.get_state()));
        let Some(burn_rate) = read_burn_rate(input)? else {
            return Ok(None);
        };

        match session.run_period(burn_rate)? {
            PeriodOutcome::AwaitingBurnRate => {}
            PeriodOutcome::OutOfFuel => {
                println!(
                    "\nFUEL OUT AT {:.2} SECONDS",
                    session.get_state().get_elapsed_time()
                );
                return Ok(Some(session.resolve_free_fall()?));
            }
            PeriodOutcome::Landed(touchdown) => return Ok(Some(touchdown)),
        }
    }
}

fn read_burn_rate(input: &mut Input<'_>) -> Result<Option<f64>, Box<dyn Error>> {
    let mut message = "RATE? ";
    loop {
        let Some(line) = prompt(input, message)? else {
            return Ok(None);
        };
        match line.trim().parse::<f64>() {
            Ok(rate) if (MIN_BURN_RATE..=MAX_BURN_RATE).contains(&rate) => return Ok(Some(rate)),
            Ok(_) => message = "PLEASE ENTER A BURN RATE\nBETWEEN 0 AND 200: ",
            Err(_) => message = "PLEASE ENTER A BURN RATE: ",
        }
    }
}

fn prompt(input: &mut Input<'_>, message: &str) -> io::Result<Option<String>> {
    print!("{}", message);
    io::stdout().flush()?;
    input.next().transpose()
}

fn intro(config: &LanderConfig) {
    println!(
        "\n              LUNAR\n\
         CREATIVE COMPUTING MORRISTOWN, NJ\n\n\
         THIS IS A COMPUTER SIMULATION OF AN\n\
         APOLLO LUNAR LANDING CAPSULE.\n\n\
         THE ON-BOARD COMPUTER HAS FAILED SO YOU\n\
         HAVE TO LAND THE CAPSULE MANUALLY.\n\n\
         SET THE BURN RATE OF THE RETRO ROCKETS\n\
         TO ANY VALUE BETWEEN 0 (FREE FALL) AND\n\
         200 (MAXIMUM BURN) IN POUNDS PER SECOND.\n\
         SET A NEW BURN RATE EVERY {:.0} SECONDS.\n\n\
         CAPSULE DRY WEIGHT IS {:.0} LBS;\n\
         INITIAL FUEL IS {:.0} LBS.\n\n\
         GOOD LUCK!\n",
        DECISION_PERIOD, config.dry_mass, config.fuel_mass
    );
}

fn print_report(report: &LandingReport) {
    println!(
        "\nON THE MOON AT {:.2} SECONDS\nIMPACT VELOCITY {:.2} MPH\n",
        report.elapsed_time, report.impact_mph
    );
    match report.outcome {
        LandingOutcome::Perfect => println!("PERFECT LANDING!!"),
        LandingOutcome::Good => println!("GOOD LANDING (COULD BE BETTER)"),
        LandingOutcome::CraftDamaged => println!(
            "CRAFT DAMAGE... YOU'RE STRANDED HERE\n\
             UNTIL A RESCUE PARTY ARRIVES.\n\
             I HOPE YOU HAVE ENOUGH OXYGEN!"
        ),
        LandingOutcome::Destroyed { crater_depth } => println!(
            "THAT'S ONE SMALL IMPACT FOR THE MOON,\n\
             ONE GIANT BOOM FOR YOUR LANDER!\n\
             YOU BLASTED A NEW CRATER {:.0} FEET DEEP!",
            crater_depth
        ),
    }
}
