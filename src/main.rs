use std::path::PathBuf;

use clap::Parser;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use mallow::{pr_str, Error, Evaluator, Reader, Scanner, Value};

const RESET: &str = "\x1b[0m";
const BLUE: &str = "\x1b[34m";
const RED: &str = "\x1b[31m";

#[derive(clap::Parser)]
#[clap(about, version)]
struct Opt {
    /// Dump the token stream of each input line.
    #[clap(short = 'l', long)]
    dump_lexer: bool,

    /// Dump the parsed forms of each input line.
    #[clap(short = 'r', long)]
    dump_reader: bool,

    /// Colorize prompt and error output.
    #[clap(short, long)]
    color: bool,

    /// History file path.
    #[clap(long)]
    history: Option<PathBuf>,
}

fn main() {
    let opt = Opt::parse();

    let history_path = opt.history.clone().unwrap_or_else(|| {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(".mallow-history")
    });

    let mut rl = match DefaultEditor::new() {
        Ok(editor) => editor,
        Err(err) => {
            eprintln!("Could not initialize line editor: {}", err);
            std::process::exit(1);
        }
    };
    let _ = rl.load_history(&history_path);

    let evaluator = Evaluator::new();
    let prompt = if opt.color {
        format!("{}user>{} ", BLUE, RESET)
    } else {
        "user> ".to_string()
    };

    loop {
        match rl.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line);

                for output in rep(&evaluator, line, &opt) {
                    match output {
                        Ok(text) => println!("{}", text),
                        Err(err) => print_error(&err, opt.color),
                    }
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("Error reading input: {}", err);
                break;
            }
        }
    }

    let _ = rl.save_history(&history_path);
}

/// Read, eval and print one input line
///
/// Each top-level form yields one output line; an error stops the rest of
/// the line but the next input starts fresh.
fn rep(evaluator: &Evaluator, line: &str, opt: &Opt) -> Vec<Result<String, Error>> {
    let mut scanner = Scanner::new(line);
    let tokens = match scanner.scan_tokens() {
        Ok(tokens) => tokens,
        Err(err) => return vec![Err(err)],
    };

    if opt.dump_lexer {
        for token in &tokens {
            println!("{}:{} {}", token.line, token.column, token.kind);
        }
    }

    let mut reader = Reader::new(tokens);
    let forms = match reader.read_all() {
        Ok(forms) => forms,
        Err(err) => return vec![Err(err)],
    };

    if opt.dump_reader {
        for form in &forms {
            println!("{}", pr_str(form, true));
        }
    }

    let mut outputs = Vec::new();
    for form in &forms {
        match evaluator.eval(form) {
            Ok(value) => outputs.push(Ok(pr_str(&value, true))),
            Err(err) => {
                outputs.push(Err(err));
                break;
            }
        }
    }
    outputs
}

/// Render an error as a single `Error: <message>` line
///
/// Thrown non-string values go through the printer.
fn print_error(err: &Error, color: bool) {
    let message = match err {
        Error::Exception(Value::Str(s)) => s.clone(),
        Error::Exception(value) => pr_str(value, true),
        other => other.to_string(),
    };
    if color {
        eprintln!("{}Error:{} {}", RED, RESET, message);
    } else {
        eprintln!("Error: {}", message);
    }
}
