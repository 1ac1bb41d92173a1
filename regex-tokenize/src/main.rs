use std::io::{self, BufRead, Write};

use anyhow::{bail, Context};
use regex_scanner::{escape, Scanner};
use regex_tokenize::Matcher;

const USAGE: &str = "\
Tokenize lines from stdin with an ordered list of patterns.

USAGE:
    regex-tokenize [-F] -e <pattern> [-e <pattern> ...]

OPTIONS:
    -e, --regexp <pattern>    Add a pattern. Earlier patterns win ties.
    -F, --fixed-strings       Treat every pattern as a literal string.
    -h, --help                Print this message.

Each output line is <line>:<start>..<end>, the index of the matching
pattern ('-' for unmatched text) and the text itself. Set RUST_LOG=trace to
see which searches the scanner's cache saved.
";

#[derive(Debug, Default)]
struct Args {
    patterns: Vec<String>,
    fixed_strings: bool,
    help: bool,
}

impl Args {
    fn parse(mut argv: impl Iterator<Item = String>) -> anyhow::Result<Args> {
        let mut args = Args::default();
        while let Some(arg) = argv.next() {
            match arg.as_str() {
                "-e" | "--regexp" => {
                    let pattern = argv.next().with_context(|| {
                        format!("{} requires a pattern", arg)
                    })?;
                    args.patterns.push(pattern);
                }
                "-F" | "--fixed-strings" => args.fixed_strings = true,
                "-h" | "--help" => args.help = true,
                _ => bail!("unrecognized argument: {}\n\n{}", arg, USAGE),
            }
        }
        Ok(args)
    }

    fn patterns(&self) -> Vec<String> {
        if self.fixed_strings {
            self.patterns.iter().map(|p| escape(p)).collect()
        } else {
            self.patterns.clone()
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse(std::env::args().skip(1))?;
    if args.help {
        print!("{}", USAGE);
        return Ok(());
    }
    if args.patterns.is_empty() {
        bail!("at least one pattern is required\n\n{}", USAGE);
    }

    let mut scanner = Scanner::new(args.patterns())?;
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for (lineno, line) in stdin.lock().lines().enumerate() {
        let line = line.context("failed to read stdin")?;
        let segments = Matcher::new(&mut scanner)
            .segments(&line)
            .with_context(|| format!("failed to tokenize line {}", lineno))?;
        for segment in segments {
            let pattern = match segment.pattern {
                Some(index) => index.to_string(),
                None => "-".to_string(),
            };
            writeln!(
                out,
                "{}:{}..{}\t{}\t{:?}",
                lineno,
                segment.span.start,
                segment.span.end,
                pattern,
                segment.as_str(&line),
            )?;
        }
    }

    let stats = scanner.stats();
    log::debug!(
        "{} engine searches, {} answered from cache",
        stats.searches,
        stats.cache_hits
    );
    Ok(())
}
