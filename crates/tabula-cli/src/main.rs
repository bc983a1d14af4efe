use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::io::Read;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use tabula_solver::{LinearProgram, Outcome, SolverError};

#[derive(Parser)]
#[command(name = "tabula")]
#[command(about = "Exact rational tableau simplex solver", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Human-readable status and variable values
    Pretty,
    /// The full outcome, trace included, as JSON
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a program and print the optimal solution
    Solve {
        /// Program text: `n m` then m+1 rows of n+1 integers (read from stdin when omitted)
        #[arg(allow_negative_numbers = true)]
        program: Vec<String>,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Pretty)]
        format: OutputFormat,
        /// Print every iteration's tableau and basis
        #[arg(short, long)]
        trace: bool,
        /// Prompt for the counts and rows
        #[arg(short, long)]
        interactive: bool,
    },
    /// Solve a program and write a LaTeX report into a template
    Report {
        /// Template file containing the marker line
        #[arg(long)]
        template: PathBuf,
        /// File to write the filled-in template to
        #[arg(short, long)]
        output: PathBuf,
        /// Line in the template replaced by the report
        #[arg(short, long, default_value = tabula_format::DEFAULT_MARKER)]
        marker: String,
        /// Program text (read from stdin when omitted)
        #[arg(allow_negative_numbers = true)]
        program: Vec<String>,
    },
    /// Check a program and print its initial tableau
    Check {
        /// Program text (read from stdin when omitted)
        #[arg(allow_negative_numbers = true)]
        program: Vec<String>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Solve {
            program,
            format,
            trace,
            interactive,
        } => {
            let program = if interactive {
                let stdin = std::io::stdin();
                tabula_format::read_interactive(stdin.lock(), std::io::stdout())
                    .unwrap_or_else(|e| fail(&format!("Parse error: {}", e)))
            } else {
                load_program(&program)
            };

            let outcome = solve_or_exit(&program);

            if format == OutputFormat::Json {
                match serde_json::to_string_pretty(&outcome) {
                    Ok(json) => println!("{}", json),
                    Err(e) => fail(&format!("Error serializing solution: {}", e)),
                }
                return;
            }

            if trace {
                for (k, iteration) in outcome.trace.iter().enumerate() {
                    println!("Iteration {}", k + 1);
                    if let Some(ref pivot) = iteration.pivot {
                        println!(
                            "  pivot at (row {}, column {}) = {}",
                            pivot.row, pivot.column, pivot.element
                        );
                    }
                    println!("  basis: {:?}", iteration.basis);
                    print!("{}", iteration.tableau);
                    println!();
                }
            }

            print_solution(&outcome);
        }
        Commands::Report {
            template,
            output,
            marker,
            program,
        } => {
            let program = load_program(&program);
            let outcome = solve_or_exit(&program);

            let report = tabula_format::render_report(&outcome.trace, &outcome.solution);
            if let Err(e) = tabula_format::write_report(&template, &output, &marker, &report) {
                fail(&format!("Report error: {}", e));
            }

            println!("✓ wrote {} ({} iterations)", output.display(), outcome.trace.len());
            println!("  z = {}", outcome.solution.objective_value);
        }
        Commands::Check { program } => {
            let program = load_program(&program);

            match tabula_solver::Tableau::build(&program) {
                Ok((tableau, basis)) => {
                    println!("✓ program is valid");
                    println!("  {} variables", program.variable_count);
                    println!("  {} constraints", program.constraint_count);
                    println!("  basis: {:?}", basis);
                    println!();
                    println!("Linear program to solve:");
                    print!("{}", tableau);
                }
                Err(e) => {
                    eprintln!("✗ program has errors:");
                    eprintln!("  {}", e);
                    std::process::exit(1);
                }
            }
        }
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        std::process::exit(1);
    }
}

/// Joins argument tokens into program text, or reads all of stdin when there are none.
fn load_program(tokens: &[String]) -> LinearProgram {
    let source = if tokens.is_empty() {
        let mut source = String::new();
        if let Err(e) = std::io::stdin().read_to_string(&mut source) {
            fail(&format!("Error reading stdin: {}", e));
        }
        source
    } else {
        tokens.join(" ")
    };

    tabula_format::parse_program(&source).unwrap_or_else(|e| fail(&format!("Parse error: {}", e)))
}

fn solve_or_exit(program: &LinearProgram) -> Outcome {
    match tabula_solver::solve(program) {
        Ok(outcome) => outcome,
        Err(SolverError::Unbounded { column }) => {
            println!("Status: UNBOUNDED");
            println!("The problem has no finite optimal solution (column {}).", column);
            std::process::exit(1);
        }
        Err(e) => fail(&format!("Solver error: {}", e)),
    }
}

fn print_solution(outcome: &Outcome) {
    println!("Status: OPTIMAL");
    println!("z = {}", outcome.solution.objective_value);
    println!();
    println!("Variables:");
    for (i, value) in outcome.solution.all_values.iter().enumerate() {
        println!("  x_{:<4} {}", i + 1, value);
    }
    println!();
    println!("Iterations: {}", outcome.trace.len());
}

fn fail(message: &str) -> ! {
    eprintln!("{}", message);
    std::process::exit(1);
}
