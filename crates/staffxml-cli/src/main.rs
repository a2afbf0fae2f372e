use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use staffxml::{Config, EmployeeRepository};

const DEFAULT_CSV: &str = "empleados.csv";
const DEFAULT_XML: &str = "empleados.xml";

#[derive(Debug, Parser)]
#[command(
    name = "staffxml",
    version,
    about = "Convert employee CSV to XML, patch salaries and show the result"
)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
    /// Spaces per nesting level in written XML (0 for a single line)
    #[arg(long, global = true, default_value_t = 4)]
    indent: usize,
    /// CSV field separator
    #[arg(long, global = true, default_value = ",", value_parser = parse_delimiter)]
    delimiter: u8,
    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Read a CSV file and write a fresh XML document
    Build {
        #[arg(long, value_name = "CSV")]
        csv: PathBuf,
        #[arg(long, value_name = "XML")]
        xml: PathBuf,
    },
    /// Set the salary of the first employee with the given id
    SetSalary {
        #[arg(long, value_name = "XML")]
        xml: PathBuf,
        #[arg(long, allow_negative_numbers = true)]
        id: i32,
        #[arg(long)]
        salary: f64,
    },
    /// Print every employee in an XML document
    Show {
        #[arg(long, value_name = "XML")]
        xml: PathBuf,
    },
    /// Build, set one salary, then show (the default)
    Run(RunArgs),
}

#[derive(Debug, ClapArgs)]
struct RunArgs {
    #[arg(long, value_name = "CSV", default_value = DEFAULT_CSV)]
    csv: PathBuf,
    #[arg(long, value_name = "XML", default_value = DEFAULT_XML)]
    xml: PathBuf,
    #[arg(long, default_value_t = 2, allow_negative_numbers = true)]
    id: i32,
    #[arg(long, default_value_t = 4500.0)]
    salary: f64,
}

impl Default for RunArgs {
    fn default() -> Self {
        Self {
            csv: PathBuf::from(DEFAULT_CSV),
            xml: PathBuf::from(DEFAULT_XML),
            id: 2,
            salary: 4500.0,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = Config::new(args.delimiter, args.indent);
    let repo = EmployeeRepository::new(config);
    debug!(?config, "starting");

    match args.command.unwrap_or(Command::Run(RunArgs::default())) {
        Command::Build { csv, xml } => {
            let employees = repo.read_csv(&csv);
            repo.write_document_logged(&employees, &xml);
        }
        Command::SetSalary { xml, id, salary } => {
            repo.set_salary_logged(&xml, id, salary);
        }
        Command::Show { xml } => {
            repo.print_employees_logged(&xml, &mut io::stdout());
        }
        Command::Run(run) => {
            info!("reading {}", run.csv.display());
            let employees = repo.read_csv(&run.csv);
            repo.write_document_logged(&employees, &run.xml);
            repo.set_salary_logged(&run.xml, run.id, run.salary);
            repo.print_employees_logged(&run.xml, &mut io::stdout());
        }
    }

    io::stdout().flush().context("failed to flush stdout")?;
    Ok(())
}

/// Diagnostics share stdout with the employee listing
fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(io::stdout)
        .with_ansi(io::stdout().is_terminal())
        .with_target(false)
        .without_time()
        .init();
}

fn parse_delimiter(value: &str) -> std::result::Result<u8, String> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) if ch.is_ascii() => u8::try_from(ch).map_err(|e| e.to_string()),
        _ => Err(format!("delimiter must be a single ASCII character, got {value:?}")),
    }
}
