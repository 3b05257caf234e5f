//! Command-line entry point for the flightgraph demonstration client.
//!
//! # Responsibility
//! - Parse connection and logging flags, open a session, run one operation
//!   or the full demonstration sequence.
//! - Apply the single error policy: log, report on stderr, exit non-zero.
//!
//! # Invariants
//! - stdout carries query results only; diagnostics go to the logger.
//! - After the first error nothing further is printed.

use clap::{Parser, Subcommand};
use flightgraph_core::config::{DEFAULT_ENDPOINT, DEFAULT_USERNAME, SYSTEM_DATABASE};
use flightgraph_core::{
    default_log_level, init_logging, print_contents, Airport, ArangoClient, ArangoDocumentStore,
    ConnectionConfig, DocumentStore, FlightService, Printable,
};
use log::{error, info};
use std::error::Error;
use std::io::{self, Write};
use std::process::ExitCode;
use std::time::{Duration, Instant};

const DEMO_AIRPORT_KEY: &str = "M75";
const DEMO_FLIGHT_KEY: &str = "350814";
const DEMO_LISTING_COUNTS: [i64; 3] = [0, 10, 100];
const DEMO_DEPARTURE_CODE: &str = "LAX";
const DEMO_OUTBOUND_COUNT: i64 = 20;

type CliResult<T> = Result<T, Box<dyn Error>>;

#[derive(Debug, Parser)]
#[command(
    name = "flightgraph",
    version = flightgraph_core::core_version(),
    about = "Airport and flight queries against a graph database"
)]
struct Args {
    /// Database server URL.
    #[arg(long, env = "ARANGO_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    #[arg(long, env = "ARANGO_USERNAME", default_value = DEFAULT_USERNAME)]
    username: String,

    #[arg(long, env = "ARANGO_PASSWORD", default_value = "", hide_env_values = true)]
    password: String,

    /// Database to select; empty selects `_system`.
    #[arg(long, env = "ARANGO_DATABASE", default_value = SYSTEM_DATABASE)]
    database: String,

    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    /// Cursor batch size; server default when omitted.
    #[arg(long)]
    batch_size: Option<u32>,

    /// trace|debug|info|warn|error; build-mode default when omitted.
    #[arg(long)]
    log_level: Option<String>,

    /// Absolute directory for rolling log files; stderr when omitted.
    #[arg(long)]
    log_dir: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// Run the full demonstration sequence (default).
    Demo,
    /// Print one airport by key.
    Airport { key: String },
    /// Print one flight by key.
    Flight { key: String },
    /// Print the first N airports (20 when N <= 0).
    Airports {
        #[arg(short = 'n', long = "count", default_value_t = 0, allow_negative_numbers = true)]
        count: i64,
    },
    /// Print the first N flights (20 when N <= 0).
    Flights {
        #[arg(short = 'n', long = "count", default_value_t = 0, allow_negative_numbers = true)]
        count: i64,
    },
    /// Print the number of airports per state.
    States,
    /// Print up to N outbound flights from an airport code (20 when N <= 0).
    Outbound {
        code: String,
        #[arg(short = 'n', long = "count", default_value_t = 20, allow_negative_numbers = true)]
        count: i64,
    },
    /// Insert the demonstration airport and read it back.
    CreateAirport,
}

impl Args {
    fn to_config(&self) -> ConnectionConfig {
        ConnectionConfig {
            endpoint: self.endpoint.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
            database: self.database.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            batch_size: self.batch_size,
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = args.log_level.as_deref().unwrap_or(default_log_level());
    if let Err(err) = init_logging(level, args.log_dir.as_deref()) {
        eprintln!("flightgraph: {err}");
        return ExitCode::FAILURE;
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_run module=cli status=error error={}", err);
            eprintln!("flightgraph: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> CliResult<()> {
    let client = ArangoClient::connect(args.to_config())?;
    let database = client.database(&client.config().database)?;
    let service = FlightService::new(ArangoDocumentStore::new(database));

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let command = args.command.clone().unwrap_or(Command::Demo);
    info!("event=cli_run module=cli status=start command={:?}", command);

    match command {
        Command::Demo => run_demo(&service, &mut out)?,
        Command::Airport { key } => service.airport_by_key(&key)?.print_to(&mut out)?,
        Command::Flight { key } => service.flight_by_key(&key)?.print_to(&mut out)?,
        Command::Airports { count } => print_all(&mut out, &service.first_airports(count)?)?,
        Command::Flights { count } => print_all(&mut out, &service.first_flights(count)?)?,
        Command::States => print_state_counts(&service, &mut out)?,
        Command::Outbound { code, count } => {
            print_all(&mut out, &service.flights_from_airport(&code, count)?)?
        }
        Command::CreateAirport => create_demo_airport(&service, &mut out)?,
    }

    out.flush()?;
    Ok(())
}

/// Runs every operation once, in the fixed demonstration order.
fn run_demo<S: DocumentStore>(service: &FlightService<S>, out: &mut dyn Write) -> CliResult<()> {
    let started_at = Instant::now();

    service.airport_by_key(DEMO_AIRPORT_KEY)?.print_to(out)?;
    service.flight_by_key(DEMO_FLIGHT_KEY)?.print_to(out)?;

    for count in DEMO_LISTING_COUNTS {
        print_all(out, &service.first_airports(count)?)?;
    }
    for count in DEMO_LISTING_COUNTS {
        print_all(out, &service.first_flights(count)?)?;
    }

    print_state_counts(service, out)?;
    print_all(
        out,
        &service.flights_from_airport(DEMO_DEPARTURE_CODE, DEMO_OUTBOUND_COUNT)?,
    )?;
    create_demo_airport(service, out)?;

    writeln!(out, "Total Elapsed Time {:?}", started_at.elapsed())?;
    Ok(())
}

fn print_state_counts<S: DocumentStore>(
    service: &FlightService<S>,
    out: &mut dyn Write,
) -> CliResult<()> {
    for (state, count) in service.airport_count_per_state()? {
        writeln!(out, "{state}")?;
        writeln!(out, "{count}")?;
    }
    Ok(())
}

fn create_demo_airport<S: DocumentStore>(
    service: &FlightService<S>,
    out: &mut dyn Write,
) -> CliResult<()> {
    let (meta, reloaded) = service.insert_and_reload(&Airport::demo())?;
    let items: [&dyn Printable; 2] = [&meta, &reloaded];
    print_contents(out, &items)?;
    Ok(())
}

fn print_all<T: Printable>(out: &mut dyn Write, items: &[T]) -> io::Result<()> {
    for item in items {
        item.print_to(out)?;
    }
    Ok(())
}
