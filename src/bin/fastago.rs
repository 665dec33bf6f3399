use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use log::info;
use regex::bytes::Regex;
use structopt::clap::AppSettings::*;
use structopt::StructOpt;

use fastago::compression::{open_input, Compression};
use fastago::ops::{self, FreqsMode, LengthMode, Selector, WriteOptions};
use fastago::parse_fasta_reader;

#[derive(Debug, StructOpt)]
enum StatsCommand {
    #[structopt(about = "Count the sequences")]
    Count,

    #[structopt(about = "Length of each sequence, or their average, minimum or maximum")]
    Length {
        #[structopt(
            short,
            long,
            default_value = "each",
            help = "One of: each, average (mean), min (minimum), max (maximum)"
        )]
        mode: LengthMode,
    },

    #[structopt(about = "Frequencies of each symbol, over all sequences or per sequence")]
    Freqs {
        #[structopt(
            short,
            long,
            default_value = "average",
            help = "One of: average (mean), each"
        )]
        mode: FreqsMode,
    },
}

#[derive(Debug, StructOpt)]
struct StatsOpts {
    #[structopt(subcommand)]
    cmd: StatsCommand,
}

#[derive(Debug, StructOpt)]
enum TransformCommand {
    #[structopt(about = "Convert sequences to uppercase")]
    Upper,

    #[structopt(about = "Replace a pattern in all sequences by another")]
    Replace {
        #[structopt(help = "What to replace")]
        from: String,
        #[structopt(help = "What to replace it with")]
        to: String,
    },
}

#[derive(Debug, StructOpt)]
struct TransformOpts {
    #[structopt(subcommand)]
    cmd: TransformCommand,
}

#[derive(Debug, StructOpt)]
enum Commands {
    #[structopt(about = "Statistics about the sequences")]
    Stats(StatsOpts),

    #[structopt(about = "Transform the sequences")]
    Transform(TransformOpts),

    #[structopt(name = "addid", about = "Add a prefix or suffix to sequence names")]
    AddId {
        #[structopt(short, long, default_value = "", help = "Prefix to add")]
        prefix: String,
        #[structopt(short, long, default_value = "", help = "Suffix to add")]
        suffix: String,
    },

    #[structopt(about = "Rename sequences according to a map file or a regex")]
    Rename {
        #[structopt(
            short,
            long,
            parse(from_os_str),
            help = "Tab separated file mapping old names to new names, one per line"
        )]
        map: Option<PathBuf>,
        #[structopt(short, long, help = "Regex matching the parts of names to rename")]
        regex: Option<String>,
        #[structopt(short = "p", long, help = "Replace matched parts with this")]
        replace: Option<String>,
    },

    #[structopt(about = "Subset sequences by name")]
    Subset {
        #[structopt(
            short,
            long,
            parse(from_os_str),
            help = "File containing the names of sequences to keep, one per line"
        )]
        names: Option<PathBuf>,
        #[structopt(
            short,
            long,
            help = "Regex selecting sequence names (takes precedence over names)"
        )]
        regex: Option<String>,
        #[structopt(short = "x", long, help = "Exclude sequences instead of keeping them")]
        exclude: bool,
        #[structopt(name = "NAMES", help = "Names of sequences to keep")]
        selected: Vec<String>,
    },
}

#[derive(Debug, StructOpt)]
#[structopt(
    name = "fastago",
    about = "Manipulate FASTA files",
    settings = &[SubcommandRequiredElseHelp, DisableHelpSubcommand, VersionlessSubcommands]
)]
struct CliOpts {
    #[structopt(
        short,
        long,
        parse(from_os_str),
        global = true,
        help = "Input FASTA file [default: stdin]"
    )]
    input: Option<PathBuf>,

    #[structopt(
        short,
        long,
        parse(from_os_str),
        global = true,
        help = "Output file [default: stdout]"
    )]
    output: Option<PathBuf>,

    #[structopt(
        short,
        long,
        global = true,
        help = "Input compression, detected from the extension or content when absent [gz, bz2, xz]"
    )]
    compression: Option<Compression>,

    #[structopt(
        short = "w",
        long = "linewidth",
        default_value = "80",
        global = true,
        allow_hyphen_values = true,
        help = "Line width of sequences in the output"
    )]
    line_width: i64,

    #[structopt(subcommand)]
    cmd: Commands,
}

fn run(opts: CliOpts) -> Result<()> {
    let options = WriteOptions::new(opts.line_width).context("invalid --linewidth")?;

    let input = open_input(opts.input.as_deref(), opts.compression)
        .context("could not open the input")?;
    let events = parse_fasta_reader(input);

    let mut writer: Box<dyn Write> = match &opts.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path)
                .with_context(|| format!("could not create {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout())),
    };
    let writer = &mut *writer;

    match opts.cmd {
        Commands::Stats(StatsOpts { cmd }) => match cmd {
            StatsCommand::Count => {
                let n = ops::count(events)?;
                writeln!(writer, "{}", n)?;
                writer.flush()?;
            }
            StatsCommand::Length { mode } => ops::lengths(events, mode, writer)?,
            StatsCommand::Freqs { mode } => ops::freqs(events, mode, writer)?,
        },
        Commands::Transform(TransformOpts { cmd }) => {
            let n = match cmd {
                TransformCommand::Upper => ops::upper(events, writer, &options)?,
                TransformCommand::Replace { from, to } => {
                    ops::replace(events, from.as_bytes(), to.as_bytes(), writer, &options)?
                }
            };
            info!("transformed {} records", n);
        }
        Commands::AddId { prefix, suffix } => {
            ops::add_id(events, prefix.as_bytes(), suffix.as_bytes(), writer, &options)?;
        }
        Commands::Rename {
            map,
            regex,
            replace,
        } => {
            if let Some(expression) = regex {
                let replace = match replace {
                    Some(r) => r,
                    None => bail!("if using regex renaming the --replace flag must be specified"),
                };
                let regex = Regex::new(&expression)
                    .with_context(|| format!("invalid regex '{}'", expression))?;
                ops::rename_from_regex(events, &regex, replace.as_bytes(), writer, &options)?;
            } else if let Some(path) = map {
                let file = File::open(&path)
                    .with_context(|| format!("could not open map file {}", path.display()))?;
                let map = ops::read_rename_map(file)
                    .with_context(|| format!("could not read map file {}", path.display()))?;
                ops::rename_from_map(events, &map, writer, &options)?;
            } else {
                bail!("you must specify a regular expression or a map file to rename sequences");
            }
        }
        Commands::Subset {
            names,
            regex,
            exclude,
            selected,
        } => {
            let selector = if let Some(expression) = regex {
                Selector::Pattern(
                    Regex::new(&expression)
                        .with_context(|| format!("invalid regex '{}'", expression))?,
                )
            } else if let Some(path) = names {
                let file = File::open(&path)
                    .with_context(|| format!("could not open names file {}", path.display()))?;
                Selector::Names(ops::read_names(file)?)
            } else {
                selected.iter().map(String::as_str).collect()
            };
            let n = ops::subset(events, &selector, exclude, writer, &options)?;
            info!("kept {} records", n);
        }
    }
    Ok(())
}

fn main() {
    env_logger::init();
    let opts = CliOpts::from_args();
    if let Err(e) = run(opts) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
