use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process;

use cardfile_reader::{
    CardFileReader, CardSink, JsonLinesSink, ReaderOptions, TextSink, XmlSink,
};
use clap::{Parser, ValueEnum};

/// Read a Windows Cardfile (.crd) and print its cards
#[derive(Parser, Debug)]
#[command(name = "cardfile", version, about)]
struct Cli {
    /// Path to the .crd file
    input: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Write cards to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Keep going when an embedded object cannot be walked
    #[arg(long)]
    lenient_objects: bool,

    /// Include card titles and text in RUST_LOG trace output
    #[arg(long)]
    trace_content: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Text,
    Xml,
    Json,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("ERROR: Failed to read Cardfile {}", cli.input.display());
        eprintln!("  {}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let options = ReaderOptions {
        lenient_objects: cli.lenient_objects,
        trace_content: cli.trace_content,
    };
    let mut reader = CardFileReader::open(&cli.input, options)?;

    let header = reader.header();
    eprintln!("Cardfile: {}", cli.input.display());
    eprintln!("  Variant: {}", header.variant);
    eprintln!("  Encoding: {:?}", header.variant.encoding());
    eprintln!("  Cards: {}", header.card_count);
    if let Some(id) = header.last_object_id {
        eprintln!("  Last object ID: {}", id);
    }

    let out: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };
    let mut sink: Box<dyn CardSink> = match cli.format {
        Format::Text => Box::new(TextSink::new(out)),
        Format::Xml => Box::new(XmlSink::new(out)),
        Format::Json => Box::new(JsonLinesSink::new(out)),
    };

    let written = reader.decode_into(&mut sink)?;
    eprintln!("  Decoded: {}", written);
    Ok(())
}
