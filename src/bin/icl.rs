//! CLI tool to validate, print and convert Image Cash Letter files.

use clap::{Parser, Subcommand, ValueEnum};
use icl_rs::records::IclRecord;
use icl_rs::{
    Encoding, Format, Framing, Options, Reader, RecordReader, Writer, field::Line, from_json,
    to_json,
};
use std::fs;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum EncodingArg {
    Ascii,
    Ebcdic,
}

impl From<EncodingArg> for Encoding {
    fn from(arg: EncodingArg) -> Self {
        match arg {
            EncodingArg::Ascii => Encoding::Ascii,
            EncodingArg::Ebcdic => Encoding::Ebcdic,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FramingArg {
    /// Records back-to-back, optionally newline separated
    Fixed,
    /// Four-byte big-endian length before each record
    Variable,
}

impl From<FramingArg> for Framing {
    fn from(arg: FramingArg) -> Self {
        match arg {
            FramingArg::Fixed => Framing::Fixed,
            FramingArg::Variable => Framing::VariableLength,
        }
    }
}

/// Read, check and rewrite X9.100-187 / X9.37 image cash letter files.
///
/// Set FRB_COMPATIBILITY_MODE to relax the FRB-specific checks, and
/// RUST_LOG for finer control over diagnostics.
#[derive(Parser)]
#[command(name = "icl")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Input text encoding
    #[arg(long, value_enum, default_value = "ascii", global = true)]
    encoding: EncodingArg,

    /// Input record framing
    #[arg(long, value_enum, default_value = "fixed", global = true)]
    framing: FramingArg,

    /// Read and write the older DSTU X9.37 dialect
    #[arg(long, global = true)]
    dstu: bool,

    /// Largest record accepted, in bytes
    #[arg(long, global = true)]
    buffer_size: Option<usize>,

    /// Show progress and record counts on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Read a file and check every record and control total
    Validate {
        /// ICL file
        file: String,
    },
    /// List every record: type, length and a short summary
    Print {
        /// ICL file
        file: String,
    },
    /// Rewrite a file with another encoding or framing, or as JSON
    Convert {
        /// ICL file, or JSON with --from-json
        input: String,

        /// Output file
        #[arg(short, long)]
        output: String,

        /// Output encoding (defaults to the input encoding)
        #[arg(long, value_enum)]
        to_encoding: Option<EncodingArg>,

        /// Output framing (defaults to the input framing)
        #[arg(long, value_enum)]
        to_framing: Option<FramingArg>,

        /// Write the file tree as JSON instead of ICL
        #[arg(long)]
        json: bool,

        /// Read the input as JSON instead of ICL
        #[arg(long)]
        from_json: bool,
    },
}

fn fail(msg: impl std::fmt::Display) -> ! {
    eprintln!("{msg}");
    process::exit(1);
}

fn open(path: &str) -> BufReader<fs::File> {
    match fs::File::open(path) {
        Ok(f) => BufReader::new(f),
        Err(e) => fail(format!("Error reading input file '{path}': {e}")),
    }
}

fn create(path: &str) -> BufWriter<fs::File> {
    if let Some(parent) = Path::new(path).parent()
        && !parent.as_os_str().is_empty()
        && fs::create_dir_all(parent).is_err()
    {
        fail(format!("Error creating output directory for '{path}'"));
    }
    match fs::File::create(path) {
        Ok(f) => BufWriter::new(f),
        Err(e) => fail(format!("Error writing output file '{path}': {e}")),
    }
}

fn summary(record: &IclRecord) -> String {
    match record {
        IclRecord::FileHeader(h) => format!(
            "{} -> {}",
            h.immediate_origin, h.immediate_destination
        ),
        IclRecord::CashLetterHeader(h) => format!("cash letter {}", h.cash_letter_id),
        IclRecord::BundleHeader(h) => format!("bundle {}", h.bundle_sequence_number),
        IclRecord::CheckDetail(c) => format!(
            "item {} amount {}",
            c.ece_institution_item_sequence_number, c.item_amount
        ),
        IclRecord::ReturnDetail(r) => format!(
            "item {} amount {} reason {}",
            r.ece_institution_item_sequence_number, r.item_amount, r.return_reason
        ),
        IclRecord::ImageViewData(d) => format!("{} image bytes", d.length_image_data()),
        IclRecord::BundleControl(c) => format!(
            "{} items amount {}",
            c.bundle_items_count, c.bundle_total_amount
        ),
        IclRecord::CashLetterControl(c) => format!(
            "{} bundles {} items amount {}",
            c.cash_letter_bundle_count, c.cash_letter_items_count, c.cash_letter_total_amount
        ),
        IclRecord::FileControl(c) => format!(
            "{} records {} items amount {}",
            c.total_record_count, c.total_item_count, c.file_total_amount
        ),
        _ => String::new(),
    }
}

fn validate(path: &str, opts: Options, verbose: bool) {
    let mut reader = Reader::new(open(path), opts);
    match reader.read() {
        Ok(file) => {
            let totals = file.totals();
            if verbose {
                eprintln!("Records:      {}", totals.records);
                eprintln!("Cash letters: {}", totals.cash_letters);
            }
            println!("{path}: ok ({} items, amount {})", totals.items, totals.amount);
        }
        Err(e) => fail(format!(
            "{path}: record {}: {e}",
            reader.records_read()
        )),
    }
}

fn print(path: &str, opts: Options) {
    let translator = opts.translator();
    let mut records = RecordReader::new(open(path), &opts);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    loop {
        let bytes = match records.next_record() {
            Ok(Some(bytes)) => bytes,
            Ok(None) => break,
            Err(e) => fail(format!("record {}: {e}", records.records_read() + 1)),
        };
        let line = Line::new(&bytes, translator);
        let text = match IclRecord::parse(&line) {
            Ok(record) => format!(
                "{} {:>7} {:<24} {}",
                record.record_type(),
                bytes.len(),
                record.name(),
                summary(&record)
            ),
            Err(e) => format!("{} {:>7} {e}", line.record_type(), bytes.len()),
        };
        if let Err(e) = writeln!(out, "{}", text.trim_end()) {
            fail(format!("Error writing output: {e}"));
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let mut opts = Options::from_env()
        .with_encoding(cli.encoding.into())
        .with_framing(cli.framing.into());
    if cli.dstu {
        opts = opts.with_format(Format::Dstu);
    }
    if let Some(size) = cli.buffer_size {
        opts = opts.with_buffer_size(size);
    }

    match cli.command {
        Command::Validate { file } => validate(&file, opts, cli.verbose),
        Command::Print { file } => print(&file, opts),
        Command::Convert {
            input,
            output,
            to_encoding,
            to_framing,
            json,
            from_json: input_is_json,
        } => {
            if cli.verbose {
                eprintln!("Input:  {input}");
                eprintln!("Output: {output}");
            }
            let file = if input_is_json {
                let text = match fs::read_to_string(&input) {
                    Ok(text) => text,
                    Err(e) => fail(format!("Error reading input file '{input}': {e}")),
                };
                match from_json(&text) {
                    Ok(file) => file,
                    Err(e) => fail(format!("{input}: {e}")),
                }
            } else {
                let mut reader = Reader::new(open(&input), opts.clone());
                match reader.read() {
                    Ok(file) => file,
                    Err(e) => fail(format!("{input}: record {}: {e}", reader.records_read())),
                }
            };

            let mut sink = create(&output);
            if json {
                let text = match to_json(&file) {
                    Ok(text) => text,
                    Err(e) => fail(e),
                };
                if let Err(e) = sink.write_all(text.as_bytes()).and_then(|_| sink.flush()) {
                    fail(format!("Error writing output file '{output}': {e}"));
                }
                return;
            }

            let mut out_opts = opts;
            if let Some(encoding) = to_encoding {
                out_opts = out_opts.with_encoding(encoding.into());
            }
            if let Some(framing) = to_framing {
                out_opts = out_opts.with_framing(framing.into());
            }
            let mut writer = Writer::new(sink, out_opts);
            if let Err(e) = writer.write(&file) {
                fail(format!("{output}: {e}"));
            }
            if cli.verbose {
                eprintln!("Records: {}", writer.records_written());
            }
        }
    }
}
