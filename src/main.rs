mod logging;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use ibancheck::batch::check_csv;
use ibancheck::generator::{generate_bics, generate_ibans};
use ibancheck::reference::IBAN_SEPA_COUNTRIES;
use ibancheck::{BicField, EffectiveLengths, FieldError, IbanField, IbanOptions};
use rand::Rng;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "ibancheck")]
#[command(about = "IBAN and SWIFT-BIC validator", long_about = None)]
struct Cli {
    /// Raise log verbosity; repeat for more.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate one or more IBANs.
    Iban(IbanArgs),
    /// Validate one or more SWIFT-BICs.
    Bic(BicArgs),
    /// Validate a CSV file with `kind,value` columns.
    Check(CheckArgs),
    /// Print synthetic, valid IBANs or BICs.
    Sample(SampleArgs),
    /// List the IBAN lengths in force.
    Countries(CountriesArgs),
}

#[derive(Args)]
struct IbanOptionArgs {
    /// Evaluate the activation schedule as of this date (YYYY-MM-DD).
    #[arg(long)]
    as_of: Option<NaiveDate>,
    /// Comma-separated country codes to accept, e.g. NL,BE,LU.
    #[arg(long, conflicts_with = "sepa")]
    include: Option<String>,
    /// Accept SEPA countries only.
    #[arg(long, default_value_t = false)]
    sepa: bool,
    /// Also accept unofficial formats catalogued by Nordea.
    #[arg(long, default_value_t = false)]
    nordea: bool,
}

#[derive(Parser)]
struct IbanArgs {
    #[arg(required = true)]
    values: Vec<String>,
    #[command(flatten)]
    options: IbanOptionArgs,
}

#[derive(Parser)]
struct BicArgs {
    #[arg(required = true)]
    values: Vec<String>,
}

#[derive(Parser)]
struct CheckArgs {
    #[arg(long)]
    input: PathBuf,
    #[arg(long)]
    output: Option<PathBuf>,
    #[command(flatten)]
    options: IbanOptionArgs,
}

#[derive(Clone, Copy, ValueEnum)]
enum SampleKind {
    Iban,
    Bic,
}

#[derive(Parser)]
struct SampleArgs {
    #[arg(long, value_enum, default_value_t = SampleKind::Iban)]
    kind: SampleKind,
    #[arg(long, default_value_t = 10)]
    count: usize,
    /// Comma-separated country codes to draw from.
    #[arg(long)]
    countries: Option<String>,
    #[arg(long)]
    seed: Option<u64>,
    #[command(flatten)]
    options: IbanOptionArgs,
}

#[derive(Parser)]
struct CountriesArgs {
    #[command(flatten)]
    options: IbanOptionArgs,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let cli = Cli::parse();
    logging::init_logging("ibancheck", cli.verbose)?;
    match cli.command {
        Command::Iban(args) => run_iban(args),
        Command::Bic(args) => run_bic(args),
        Command::Check(args) => run_check(args),
        Command::Sample(args) => run_sample(args),
        Command::Countries(args) => run_countries(args),
    }
}

fn run_iban(args: IbanArgs) -> Result<(), String> {
    let options = resolve_options(&args.options)?;
    log::debug!("IBAN options: {:?}", options);
    let field = IbanField::new(options);

    let mut invalid = 0usize;
    for value in &args.values {
        match field.clean(value) {
            Ok(iban) => println!("{}\tvalid\t{}", value, field.prepare_value(iban.as_str())),
            Err(errors) => {
                invalid += 1;
                println!("{}\tinvalid\t{}", value, join_errors(&errors));
            }
        }
    }
    finish(invalid, "IBAN")
}

fn run_bic(args: BicArgs) -> Result<(), String> {
    let field: BicField = BicField::default();

    let mut invalid = 0usize;
    for value in &args.values {
        match field.clean(value) {
            Ok(bic) => println!("{}\tvalid\t{}", value, bic),
            Err(errors) => {
                invalid += 1;
                println!("{}\tinvalid\t{}", value, join_errors(&errors));
            }
        }
    }
    finish(invalid, "BIC")
}

fn run_check(args: CheckArgs) -> Result<(), String> {
    let options = resolve_options(&args.options)?;
    let start = Instant::now();
    let (results, summary) = check_csv(&args.input, args.output.as_deref(), &options)?;
    let elapsed = start.elapsed();

    match &args.output {
        Some(output) => log::info!("Results written to {}", output.display()),
        None => {
            for result in &results {
                let (status, detail) = if result.valid {
                    ("valid", &result.display)
                } else {
                    ("invalid", &result.errors)
                };
                println!("{}\t{}\t{}\t{}", result.kind, result.input, status, detail);
            }
        }
    }

    log::info!(
        "Checked {} record(s): iban={} bic={} valid={} invalid={} unknown_kind={}",
        summary.total_records,
        summary.iban_records,
        summary.bic_records,
        summary.valid_records,
        summary.invalid_records,
        summary.unknown_kind
    );
    log::info!("Check time: {} ms", elapsed.as_millis());

    finish(summary.invalid_records, "record")
}

fn run_sample(args: SampleArgs) -> Result<(), String> {
    let seed = args.seed.unwrap_or_else(random_seed);
    let countries = match args.countries.as_deref() {
        Some(value) => parse_country_list(value)?,
        None => Vec::new(),
    };
    let samples = match args.kind {
        SampleKind::Iban => {
            let lengths = EffectiveLengths::resolve(&resolve_options(&args.options)?);
            generate_ibans(&lengths, &countries, args.count, seed)?
        }
        SampleKind::Bic => generate_bics(&countries, args.count, seed)?,
    };
    log::info!("Generated {} sample(s) with seed {}", samples.len(), seed);
    for sample in samples {
        println!("{sample}");
    }
    Ok(())
}

fn run_countries(args: CountriesArgs) -> Result<(), String> {
    let options = resolve_options(&args.options)?;
    let lengths = EffectiveLengths::resolve(&options);
    for (country, length) in lengths.countries() {
        println!("{country}\t{length}");
    }
    log::info!(
        "{} countries in force as of {}",
        lengths.len(),
        options.effective_date()
    );
    Ok(())
}

fn resolve_options(args: &IbanOptionArgs) -> Result<IbanOptions, String> {
    let mut options = IbanOptions::default().allow_unofficial(args.nordea);
    if let Some(date) = args.as_of {
        options = options.as_of(date);
    }
    if args.sepa {
        options = options.include_countries(IBAN_SEPA_COUNTRIES.iter().copied());
    } else if let Some(value) = args.include.as_deref() {
        let parsed = parse_country_list(value)?;
        if !parsed.is_empty() {
            options = options.include_countries(parsed);
        }
    }
    Ok(options)
}

fn parse_country_list(input: &str) -> Result<Vec<String>, String> {
    let mut countries: Vec<String> = Vec::new();
    for raw in input.split(',') {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            continue;
        }
        let code = trimmed.to_uppercase();
        if code.len() != 2 || !code.chars().all(|ch| ch.is_ascii_alphabetic()) {
            return Err(format!("invalid country code: {}", trimmed));
        }
        if !countries.contains(&code) {
            countries.push(code);
        }
    }
    Ok(countries)
}

fn join_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

fn finish(invalid: usize, label: &str) -> Result<(), String> {
    if invalid > 0 {
        return Err(format!("{} invalid {}(s)", invalid, label));
    }
    Ok(())
}

fn random_seed() -> u64 {
    let mut rng = rand::rngs::OsRng;
    rng.gen()
}
