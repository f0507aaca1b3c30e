//! Command-line front end: `solve` decides an XNF file, `preprocess`
//! writes back an equivalent XNF after crGCP-based simplification.

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::atomic::Ordering;
use std::time::Duration;

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};

use heron_xnf::builder::{parse_guessing_path, parse_xnf, ParsedXnf, Reordering};
use heron_xnf::config::{Config, DecisionHeuristic, FlsMode, GraphForm, PreprocessMode, Scoring};
use heron_xnf::context::Context;
use heron_xnf::reports::{check_solution, Report};

fn formula_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("fname")
                .required(true)
                .value_parser(value_parser!(PathBuf))
                .help("path to a 2-XNF instance (optionally .xz compressed)"),
        )
        .arg(
            Arg::new("decision")
                .short('d')
                .long("decision-heuristic")
                .default_value("mp")
                .help("decision heuristic: 'mp' MaxPath, 'mr' MaxReach, 'mbn' MaxBottleneck, 'fv' FirstVert, 'lex' lexicographic"),
        )
        .arg(
            Arg::new("fls")
                .long("fls")
                .default_value("no")
                .help("failed-lineral search: 'no', 'trivial', 'trivial_cc', or 'full'"),
        )
        .arg(
            Arg::new("fls_schedule")
                .long("fls-schedule")
                .value_parser(value_parser!(u32))
                .default_value("1")
                .help("run the failed-lineral search every n-th crGCP"),
        )
        .arg(
            Arg::new("score")
                .short('s')
                .long("score")
                .action(ArgAction::SetTrue)
                .help("weight decision heuristics by variable activity"),
        )
        .arg(
            Arg::new("simple")
                .long("simple")
                .action(ArgAction::SetTrue)
                .help("emit the simple implication graph instead of the extended one"),
        )
        .arg(
            Arg::new("preprocess")
                .short('p')
                .long("preprocess")
                .default_value("fls_scc")
                .help("construction-time preprocessing: 'no', 'scc', 'fls_scc', or 'fls_scc_ee'"),
        )
        .arg(
            Arg::new("guessing_path")
                .short('g')
                .long("guessing-path")
                .value_parser(value_parser!(PathBuf))
                .help("file with one variable index per line giving the lex decision order"),
        )
        .arg(
            Arg::new("timeout")
                .short('t')
                .long("time-out")
                .value_parser(value_parser!(i64))
                .default_value("-1")
                .help("timeout in seconds, negative to deactivate"),
        )
}

fn cli() -> Command {
    Command::new("heron_xnf")
        .about("Decides satisfiability of 2-XNF formulas over a skew-symmetric implication graph")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(formula_args(Command::new("solve").about("solve an XNF instance")))
        .subcommand(
            formula_args(Command::new("preprocess").about("emit an equivalent simplified XNF"))
                .arg(
                    Arg::new("out")
                        .long("out")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("path for the preprocessed XNF"),
                ),
        )
}

fn open_instance(path: &Path) -> Option<Box<dyn BufRead>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(_) => {
            println!("c file {path:?} not found");
            return None;
        }
    };
    match path.extension() {
        Some(ext) if ext == "xz" => Some(Box::new(BufReader::new(xz2::read::XzDecoder::new(file)))),
        _ => Some(Box::new(BufReader::new(file))),
    }
}

/// Builds the configuration from the argument matches; `None` on an
/// unreadable option value.
fn configure(matches: &ArgMatches, parsed: &ParsedXnf, reordering: Reordering) -> Option<Config> {
    let mut config = Config::from_parsed(parsed);

    let decision = matches.get_one::<String>("decision").unwrap();
    config.decision = DecisionHeuristic::from_str(decision).ok()?;

    let fls = matches.get_one::<String>("fls").unwrap();
    config.fls = FlsMode::from_str(fls).ok()?;
    config.fls_schedule = *matches.get_one::<u32>("fls_schedule").unwrap();

    let preprocess = matches.get_one::<String>("preprocess").unwrap();
    config.preprocess = PreprocessMode::from_str(preprocess).ok()?;

    if matches.get_flag("score") {
        config.scoring = Scoring::Active;
    }
    if matches.get_flag("simple") {
        config.graph_form = GraphForm::Simple;
    }

    let timeout = *matches.get_one::<i64>("timeout").unwrap();
    if timeout > 0 {
        config.time_limit = Some(Duration::from_secs(timeout as u64));
    }

    // a guessing path implies lexicographic decisions
    if !reordering.is_empty() {
        config.decision = DecisionHeuristic::Lex;
    }
    config.reordering = reordering;
    Some(config)
}

fn print_stats(ctx: &Context) {
    let c = &ctx.counters;
    let secs = c.time.as_secs_f64();
    println!("c decisions   : {}", c.decisions);
    println!("c conflicts   : {}", c.conflicts);
    println!("c crGCP       : {}", c.gcp_rounds);
    println!("c graph upd   : {}", c.graph_updates);
    println!("c vertex upd  : {}", c.vertex_updates);
    println!("c lins from upd : {}", c.eqs_from_update);
    println!("c lins from SCC : {}", c.eqs_from_scc);
    println!("c lins from FLS : {}", c.eqs_from_fls);
    if c.graph_updates > 0 {
        println!(
            "c avg graph size : {:.1}",
            c.update_vertices_seen as f64 / c.graph_updates as f64
        );
        println!(
            "c avg system size : {:.1}",
            c.update_rows_seen as f64 / c.graph_updates as f64
        );
    }
    if secs > 0.0 {
        println!("c dec/sec     : {:.1}", c.decisions as f64 / secs);
    }
    println!("c total time  : {secs:.3} [s]");
}

fn print_witness(sol: &[bool]) {
    print!("v ");
    for (i, &value) in sol.iter().enumerate() {
        print!("{}{} ", if value { "" } else { "-" }, i + 1);
    }
    println!("0");
}

/// Arms a watcher thread that sets the context's cancellation flag once
/// the deadline passes.
fn arm_timeout(ctx: &Context) {
    if let Some(limit) = ctx.config.time_limit {
        let flag = ctx.cancellation_flag();
        std::thread::spawn(move || {
            std::thread::sleep(limit);
            flag.store(true, Ordering::Relaxed);
        });
    }
}

fn load(matches: &ArgMatches) -> Option<(ParsedXnf, Config)> {
    let reordering = match matches.get_one::<PathBuf>("guessing_path") {
        Some(path) => {
            let file = File::open(path)
                .map_err(|_| println!("c guessing path {path:?} not found"))
                .ok()?;
            match parse_guessing_path(BufReader::new(file)) {
                Ok(reordering) => reordering,
                Err(e) => {
                    println!("c guessing path unreadable: {e}");
                    return None;
                }
            }
        }
        None => Reordering::default(),
    };

    let path = matches.get_one::<PathBuf>("fname").unwrap();
    let reader = open_instance(path)?;
    let parsed = match parse_xnf(reader, &reordering) {
        Ok(parsed) => parsed,
        Err(e) => {
            println!("c parse error: {e}");
            return None;
        }
    };

    let config = configure(matches, &parsed, reordering)?;
    Some((parsed, config))
}

fn run_solve(matches: &ArgMatches) -> i32 {
    let Some((parsed, config)) = load(matches) else {
        println!("s INDEFINITE");
        return 1;
    };

    let mut ctx = match Context::from_clauses(parsed.clauses.clone(), config) {
        Ok(ctx) => ctx,
        Err(e) => {
            println!("c {e}");
            println!("s INDEFINITE");
            return 1;
        }
    };
    arm_timeout(&ctx);

    let report = ctx.solve();
    print_stats(&ctx);
    println!("s {report}");

    match report {
        Report::Satisfiable => {
            let witness = ctx.witness().expect("a satisfiable solve has a witness");
            print_witness(witness);
            if check_solution(&parsed.clauses, witness) {
                println!("c solution verified");
                0
            } else {
                println!("c solution INCORRECT!");
                -1
            }
        }
        Report::Unsatisfiable => 1,
        Report::Indefinite => {
            println!("c timeout reached or interrupted");
            1
        }
    }
}

fn run_preprocess(matches: &ArgMatches) -> i32 {
    let Some((parsed, config)) = load(matches) else {
        return 1;
    };

    let ctx = match Context::from_clauses(parsed.clauses, config) {
        Ok(ctx) => ctx,
        Err(e) => {
            println!("c {e}");
            return 1;
        }
    };

    let out_path = matches.get_one::<PathBuf>("out").unwrap();
    let mut out = match File::create(out_path) {
        Ok(file) => file,
        Err(_) => {
            println!("c cannot write {out_path:?}");
            return 1;
        }
    };
    match out.write_all(ctx.to_xnf().as_bytes()) {
        Ok(()) => 0,
        Err(_) => {
            println!("c cannot write {out_path:?}");
            1
        }
    }
}

fn main() {
    let matches = cli().get_matches();
    let code = match matches.subcommand() {
        Some(("solve", sub)) => run_solve(sub),
        Some(("preprocess", sub)) => run_preprocess(sub),
        _ => unreachable!("subcommand required"),
    };
    std::process::exit(code);
}
