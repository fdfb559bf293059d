//! instant-markup - Reformat article HTML into instant-article markup

use std::fs;
use std::io::{self, Read, Write};
use std::process::ExitCode;

use clap::Parser;

use instant_markup::{ContentUnit, MediaLibrary, Options, Reformatter};

#[derive(Parser)]
#[command(name = "instant-markup")]
#[command(version, about = "Reformat article HTML into instant-article markup", long_about = None)]
#[command(after_help = "EXAMPLES:
    instant-markup post.html                      Reformat a post to stdout
    instant-markup post.html -l media.json        Resolve gallery and caption images
    instant-markup --embed tweet.html             Wrap embed markup
    cat post.html | instant-markup -o out.html    Read from stdin")]
struct Cli {
    /// Input file (reads stdin when omitted or `-`)
    #[arg(value_name = "INPUT")]
    input: Option<String>,

    /// Output file (writes stdout when omitted)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<String>,

    /// JSON media library used to resolve images and galleries
    #[arg(short, long, value_name = "FILE")]
    library: Option<String>,

    /// JSON options file
    #[arg(short, long, value_name = "FILE")]
    config: Option<String>,

    /// Only expand shortcodes, skip the tree passes
    #[arg(long, conflicts_with = "embed")]
    expand_only: bool,

    /// Treat the input as embed markup and wrap it
    #[arg(long)]
    embed: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> instant_markup::Result<()> {
    let options = match &cli.config {
        Some(path) => Options::from_json(&fs::read_to_string(path)?)?,
        None => Options::default(),
    };
    let library = match &cli.library {
        Some(path) => MediaLibrary::from_json_file(path)?,
        None => MediaLibrary::new(),
    };
    let reformatter = Reformatter::from_library(library).with_options(options);

    let unit = read_input(cli.input.as_deref())?;
    let html = if cli.embed {
        reformatter.reformat_embed(unit.body())
    } else if cli.expand_only {
        reformatter.expand_shortcodes(unit.body())
    } else {
        reformatter.reformat_unit(&unit)
    };

    match &cli.output {
        Some(path) => fs::write(path, html)?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(html.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }
    Ok(())
}

fn read_input(path: Option<&str>) -> io::Result<ContentUnit> {
    match path {
        Some(path) if path != "-" => {
            let bytes = fs::read(path)?;
            Ok(ContentUnit::from_bytes(path, &bytes))
        }
        _ => {
            let mut bytes = Vec::new();
            io::stdin().read_to_end(&mut bytes)?;
            Ok(ContentUnit::from_bytes("stdin", &bytes))
        }
    }
}
