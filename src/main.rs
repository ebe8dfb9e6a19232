use std::process::exit;

use clap::Parser;
use infixcalc::{
    CalcResult, EvalOptions, NamespaceRef, Reducer, Value,
    interpreter::{
        evaluator::core::{DEFAULT_MAX_DEPTH, MAX_DEPTH_CEILING},
        namespace::registry::{NamespaceRegistry, Namespaces},
    },
    structure_with,
};
use tracing_subscriber::{EnvFilter, fmt};

/// infixcalc evaluates a single infix arithmetic expression and prints the
/// result.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The expression to evaluate, such as `2 * (sin(pi / 2) + 3)`.
    #[arg(allow_hyphen_values = true)]
    expression: String,

    /// Makes an extra namespace available, searched before `math` and
    /// `builtins`. May be repeated; earlier namespaces win.
    #[arg(short = 'm', long = "use-modules", value_name = "NAME")]
    use_modules: Vec<String>,

    /// Deepest bracket nesting accepted, at most 1024.
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH, value_parser = parse_max_depth)]
    max_depth: usize,

    /// Logs each stage of the evaluation to stderr.
    #[arg(short, long)]
    verbose: bool,
}

fn parse_max_depth(text: &str) -> Result<usize, String> {
    let depth = text.parse::<usize>().map_err(|e| e.to_string())?;
    if depth > MAX_DEPTH_CEILING {
        return Err(format!("must be at most {MAX_DEPTH_CEILING}"));
    }
    Ok(depth)
}

fn init_logging(verbose: bool) {
    // RUST_LOG takes precedence over the verbosity flag.
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    fmt().with_env_filter(filter)
         .with_writer(std::io::stderr)
         .with_target(false)
         .init();
}

fn run(args: &Args) -> CalcResult<Value> {
    let options = EvalOptions { max_depth: args.max_depth };
    let refs = args.use_modules
                   .iter()
                   .map(|name| NamespaceRef::from(name.as_str()))
                   .collect::<Vec<_>>();

    let namespaces = Namespaces::resolve(&refs, NamespaceRegistry::standard())
        .map_err(|err| err.with_expression(&args.expression))?;
    let tokens = structure_with(&args.expression, &options)?;

    Reducer::new(args.expression.as_str(), namespaces, options).evaluate(&tokens)
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(&args) {
        Ok(value) => println!("{value}"),
        Err(e) => {
            eprintln!("{e}");
            exit(1);
        },
    }
}
