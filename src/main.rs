//! Interactive benchmark: single-threaded vs row, column and block-wise
//! threaded multiplication.

use std::collections::VecDeque;
use std::env;
use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;

use matmul_strategies::harness;
use matmul_strategies::{Matrix, RunConfig, Strategy};
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Source {
    File,
    Random,
}

struct Config {
    run: RunConfig,
    dims: Option<[usize; 4]>,
    source: Option<Source>,
    a_path: PathBuf,
    b_path: PathBuf,
    seed: Option<u64>,
    strategies: Vec<Strategy>,
    quiet: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let config = match parse_args(env::args().skip(1)) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err}");
            print_usage(&program_name());
            process::exit(2);
        }
    };

    let stdin = io::stdin();
    let mut prompt = Prompt::new(stdin.lock());
    run(config, &mut prompt)
}

fn run<R: BufRead>(config: Config, prompt: &mut Prompt<R>) -> Result<(), Box<dyn Error>> {
    let [m, n1, m2, p] = match config.dims {
        Some(dims) => dims,
        None => [
            prompt.ask_usize("Enter the number of rows of matrix A: ")?,
            prompt.ask_usize("Enter the number of columns of matrix A: ")?,
            prompt.ask_usize("Enter the number of rows of matrix B: ")?,
            prompt.ask_usize("Enter the number of columns of matrix B: ")?,
        ],
    };

    if n1 != m2 {
        return Err(matmul_strategies::Error::ShapeMismatch {
            a_rows: m,
            a_cols: n1,
            b_rows: m2,
            b_cols: p,
        }
        .into());
    }
    let n = n1;

    // Reject unaddressable shapes before anything is read or allocated
    let mut c = Matrix::try_zeros(m, p)?;
    Matrix::checked_len(m, n)?;
    Matrix::checked_len(n, p)?;

    let source = match config.source {
        Some(source) => source,
        None => prompt.ask_source()?,
    };

    let (a, b) = match source {
        Source::File => (
            Matrix::from_file(&config.a_path, m, n)?,
            Matrix::from_file(&config.b_path, n, p)?,
        ),
        Source::Random => match config.seed {
            Some(seed) => (
                Matrix::random_seeded(m, n, seed),
                Matrix::random_seeded(n, p, seed.rotate_left(17)),
            ),
            None => {
                let mut rng = rand::thread_rng();
                (Matrix::random(m, n, &mut rng), Matrix::random(n, p, &mut rng))
            }
        },
    };

    if !config.quiet {
        println!("\nMatrix A:\n{a}");
        println!("Matrix B:\n{b}");
    }

    let timings = harness::run_all(&a, &b, &mut c, &config.strategies, &config.run)?;

    // The single-threaded run goes first, so cells a later strategy skips
    // still hold the product.
    if !config.quiet {
        println!("Matrix C:\n{c}");
    }

    println!("{} worker threads", config.run.workers);
    print!("{}", harness::format_report(&timings));

    for t in timings.iter().filter(|t| !t.coverage.is_exact()) {
        println!(
            "note: {} left {} cells uncovered and {} contested",
            t.method, t.coverage.uncovered, t.coverage.contested
        );
    }

    Ok(())
}

/// Whitespace-separated tokens read from an interactive input.
struct Prompt<R> {
    input: R,
    tokens: VecDeque<String>,
}

impl<R: BufRead> Prompt<R> {
    fn new(input: R) -> Self {
        Prompt {
            input,
            tokens: VecDeque::new(),
        }
    }

    fn next_token(&mut self) -> io::Result<Option<String>> {
        while self.tokens.is_empty() {
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.tokens.extend(line.split_whitespace().map(str::to_string));
        }
        Ok(self.tokens.pop_front())
    }

    fn ask(&mut self, question: &str) -> Result<String, Box<dyn Error>> {
        print!("{question}");
        io::stdout().flush()?;
        self.next_token()?.ok_or_else(|| "unexpected end of input".into())
    }

    fn ask_usize(&mut self, question: &str) -> Result<usize, Box<dyn Error>> {
        let token = self.ask(question)?;
        token
            .parse()
            .map_err(|_| format!("expected a non-negative integer, got {token:?}").into())
    }

    fn ask_source(&mut self) -> Result<Source, Box<dyn Error>> {
        println!("Select one of the following options");
        println!("  1.Fill the matrix with the values given in a file");
        println!("  2.Fill the matrix with random values\n");
        let mut token = self.ask(" Enter your choice: ")?;
        loop {
            match token.as_str() {
                "1" => return Ok(Source::File),
                "2" => return Ok(Source::Random),
                _ => {}
            }
            token = self.ask(" Please enter a valid input...")?;
        }
    }
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Config, String> {
    let mut args = args.into_iter();

    let mut run = RunConfig::from_env().map_err(|err| err.to_string())?;
    let mut dims = None;
    let mut source = None;
    let mut a_path = PathBuf::from("A.txt");
    let mut b_path = PathBuf::from("B.txt");
    let mut seed = None;
    let mut strategies = Vec::new();
    let mut grid = false;
    let mut quiet = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--workers" => {
                let value = args.next().ok_or("--workers requires a value")?;
                run.workers = parse_usize(&value, "--workers")?;
            }
            "--strict" => run.strict = true,
            "--dims" => {
                let mut parsed = [0; 4];
                for slot in &mut parsed {
                    let value = args.next().ok_or("--dims requires four values")?;
                    *slot = parse_usize(&value, "--dims")?;
                }
                dims = Some(parsed);
            }
            "--source" => {
                let value = args.next().ok_or("--source requires a value")?;
                source = Some(match value.as_str() {
                    "file" => Source::File,
                    "random" => Source::Random,
                    _ => return Err(format!("unknown source: {value}")),
                });
            }
            "--a" => a_path = args.next().ok_or("--a requires a path")?.into(),
            "--b" => b_path = args.next().ok_or("--b requires a path")?.into(),
            "--seed" => {
                let value = args.next().ok_or("--seed requires a value")?;
                seed = Some(
                    value
                        .parse()
                        .map_err(|_| format!("--seed: invalid value {value}"))?,
                );
            }
            "--strategy" => {
                let value = args.next().ok_or("--strategy requires a value")?;
                let strategy = value.parse::<Strategy>()?;
                if !strategies.contains(&strategy) {
                    strategies.push(strategy);
                }
            }
            "--grid" => grid = true,
            "--quiet" => quiet = true,
            "-h" | "--help" => {
                print_usage(&program_name());
                process::exit(0);
            }
            _ => return Err(format!("unknown argument: {arg}")),
        }
    }

    if run.workers == 0 {
        return Err("--workers must be at least 1".to_string());
    }
    if strategies.is_empty() {
        strategies = Strategy::COMPARED.to_vec();
    }
    if grid && !strategies.contains(&Strategy::Grid) {
        strategies.push(Strategy::Grid);
    }

    Ok(Config {
        run,
        dims,
        source,
        a_path,
        b_path,
        seed,
        strategies,
        quiet,
    })
}

fn parse_usize(value: &str, flag: &str) -> Result<usize, String> {
    value
        .parse()
        .map_err(|_| format!("{flag}: invalid value {value}"))
}

fn program_name() -> String {
    env::args()
        .next()
        .unwrap_or_else(|| "matmul-strategies".to_string())
}

fn print_usage(program: &str) {
    eprintln!(
        "\
Usage:
  {program} [--workers N] [--strict] [--dims M N1 M2 P] [--source file|random]
            [--a PATH] [--b PATH] [--seed N] [--strategy NAME]... [--grid] [--quiet]

Without --dims and --source the dimensions and data source are prompted for.

Options:
  --workers N        Worker threads per strategy (default: 4, env MATMUL_WORKERS)
  --strict           Fail when a strategy's partitions do not tile C (env MATMUL_STRICT)
  --dims M N1 M2 P   A is M x N1, B is M2 x P
  --source SRC       'file' reads --a/--b, 'random' fills with 0..9
  --a PATH           File for matrix A (default: A.txt)
  --b PATH           File for matrix B (default: B.txt)
  --seed N           Seed for random matrices
  --strategy NAME    Time only the named strategies: row, column, block, grid
                     (repeatable; default: row, column and block)
  --grid             Also time the corrected grid tiling
  --quiet            Do not print the matrices

Logging is controlled with RUST_LOG (default: warn).
"
    );
}
