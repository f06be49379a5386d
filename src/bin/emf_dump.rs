use anyhow::{Context, Result, bail, format_err};
use clap::{Arg, ArgAction, ArgMatches, Command};
use dialoguer::Confirm;
use indoc::indoc;
use log::{Level, info};
use serde::Serialize;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

use emf_endian::utils::{HexDisplay, write_hexdump};
use emf_endian::{
    CodecSettings, Direction, EmfParser, Endianness, RecordInfo, ValidationError, WalkReport, validate_buffers,
};

use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::exit;
use tempfile::NamedTempFile;

/// Bytes shown when the failing record has no usable size.
const FAILURE_DUMP_LEN: usize = 64;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EmfOutputFormat {
    List,
    Json,
    Jsonl,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Mode {
    Dump,
    Validate,
    Transcode(Direction),
}

#[derive(Debug, Serialize)]
struct DumpedStream<'a> {
    path: &'a str,
    records: Vec<RecordInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    report: Option<WalkReport>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "serialize_failure")]
    error: Option<ValidationError>,
}

fn serialize_failure<S: serde::Serializer>(
    error: &Option<ValidationError>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    match error {
        Some(e) => serializer.collect_str(e),
        None => serializer.serialize_none(),
    }
}

struct EmfDump {
    settings: CodecSettings,
    inputs: Vec<String>,
    mode: Mode,
    foreign_input: bool,
    output_format: EmfOutputFormat,
    output_target: Option<PathBuf>,
    prompt: bool,
    hexdump: bool,
    verbosity_level: Option<Level>,
}

impl EmfDump {
    pub fn from_cli_matches(matches: &ArgMatches) -> Result<Self> {
        let inputs: Vec<String> = matches
            .get_many::<String>("INPUT")
            .map(|values| values.cloned().collect())
            .unwrap_or_default();
        if inputs.is_empty() {
            bail!("at least one input is required");
        }

        let output_format = match matches.get_one::<String>("output-format").map(String::as_str) {
            Some("json") => EmfOutputFormat::Json,
            Some("jsonl") => EmfOutputFormat::Jsonl,
            _ => EmfOutputFormat::List,
        };

        let mode = match (
            matches.get_flag("validate"),
            matches.get_one::<String>("transcode").map(String::as_str),
        ) {
            (true, _) => Mode::Validate,
            (false, Some("to-foreign")) => Mode::Transcode(Direction::ToForeign),
            (false, Some("to-native")) => Mode::Transcode(Direction::ToNative),
            (false, Some(other)) => bail!("unknown transcode direction `{}`", other),
            (false, None) => Mode::Dump,
        };

        if matches!(mode, Mode::Transcode(_)) && inputs.len() > 1 {
            bail!("`--transcode` accepts a single input");
        }

        let num_threads = matches.get_one::<usize>("num-threads").copied().unwrap_or(0);
        let num_threads = match (cfg!(feature = "multithreading"), num_threads) {
            (true, number) => number,
            (false, 0) | (false, 1) => 1,
            (false, _) => {
                eprintln!(
                    "turned on threads, but library was compiled without `multithreading` feature! using a single thread"
                );
                1
            }
        };

        let verbosity_level = match matches.get_count("verbose") {
            0 => None,
            1 => Some(Level::Info),
            2 => Some(Level::Debug),
            3 => Some(Level::Trace),
            _ => {
                eprintln!("using more than -vvv does not affect verbosity level");
                Some(Level::Trace)
            }
        };

        Ok(EmfDump {
            settings: CodecSettings::new()
                .num_threads(num_threads)
                .strict_unhandled(matches.get_flag("strict"))
                .check_dib_pixels(!matches.get_flag("no-dib-pixel-check")),
            inputs,
            mode,
            foreign_input: matches.get_flag("foreign"),
            output_format,
            output_target: matches.get_one::<PathBuf>("output-target").cloned(),
            prompt: !matches.get_flag("no-confirm-overwrite"),
            hexdump: matches.get_flag("hexdump"),
            verbosity_level,
        })
    }

    /// Main entry point for `EmfDump`. Returns `false` if any input failed.
    pub fn run(&self) -> Result<bool> {
        self.try_to_initialize_logging();

        match self.mode {
            Mode::Dump => self.dump(),
            Mode::Validate => self.validate(),
            Mode::Transcode(direction) => self.transcode(direction),
        }
    }

    fn input_order(&self) -> Endianness {
        if self.foreign_input {
            Endianness::Big
        } else {
            Endianness::Little
        }
    }

    fn read_input(path: &str) -> Result<Vec<u8>> {
        let mut data = Vec::new();
        if path == "-" {
            io::stdin()
                .lock()
                .read_to_end(&mut data)
                .context("Failed to read stream from stdin")?;
        } else {
            File::open(path)
                .and_then(|mut f| f.read_to_end(&mut data))
                .with_context(|| format!("Failed to read stream from `{}`", path))?;
        }
        Ok(data)
    }

    fn open_output(&self) -> Result<Box<dyn Write>> {
        match &self.output_target {
            Some(path) => {
                Self::prepare_output_path(path, self.prompt)?;
                let f = File::create(path).with_context(|| format!("Failed to create `{}`", path.display()))?;
                Ok(Box::new(io::BufWriter::new(f)))
            }
            None => Ok(Box::new(io::stdout().lock())),
        }
    }

    fn dump(&self) -> Result<bool> {
        let mut output = self.open_output()?;
        let mut all_ok = true;

        for path in &self.inputs {
            let data = Self::read_input(path)?;
            let parser = EmfParser::from_buffer_in(data, self.input_order()).with_configuration(self.settings.clone());

            let mut dumped = DumpedStream {
                path,
                records: vec![],
                report: None,
                error: None,
            };
            for record in parser.records() {
                match record {
                    Ok(r) => dumped.records.push(r),
                    Err(e) => dumped.error = Some(e),
                }
            }
            if dumped.error.is_none() {
                match parser.validate() {
                    Ok(report) => dumped.report = Some(report),
                    Err(e) => dumped.error = Some(e),
                }
            }
            all_ok &= dumped.error.is_none();

            self.write_dumped(&mut *output, &dumped, parser.as_bytes())?;
        }

        output.flush()?;
        Ok(all_ok)
    }

    fn write_dumped(&self, output: &mut dyn Write, dumped: &DumpedStream, data: &[u8]) -> Result<()> {
        match self.output_format {
            EmfOutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *output, dumped)?;
                writeln!(output)?;
            }
            EmfOutputFormat::Jsonl => {
                for record in &dumped.records {
                    serde_json::to_writer(&mut *output, record)?;
                    writeln!(output)?;
                }
            }
            EmfOutputFormat::List => {
                if self.inputs.len() > 1 {
                    writeln!(output, "== {} ==", dumped.path)?;
                }
                for record in &dumped.records {
                    let marker = if record.handled { "" } else { " (header only)" };
                    writeln!(
                        output,
                        "{:08x}  {:>3}  {:<28} {:>8} bytes{}",
                        record.offset,
                        record.tag,
                        record.name(),
                        record.size,
                        marker
                    )?;
                }
                if let Some(report) = &dumped.report
                    && report.trailing_bytes != 0
                {
                    writeln!(output, "{} bytes after the terminal record", report.trailing_bytes)?;
                }
            }
        }

        if let Some(e) = &dumped.error {
            self.report_failure(dumped.path, e, data, self.input_order());
        }
        Ok(())
    }

    /// Print a failure to stderr, followed by the bytes of the failing record with `--hexdump`.
    fn report_failure(&self, path: &str, e: &ValidationError, data: &[u8], order: Endianness) {
        eprintln!("{}: {}", path, e);
        let offset = e.offset();
        if !self.hexdump || offset >= data.len() {
            return;
        }

        let declared = data
            .get(offset + 4..offset + 8)
            .and_then(|size| <[u8; 4]>::try_from(size).ok())
            .map(|size| match order {
                Endianness::Little => u32::from_le_bytes(size),
                Endianness::Big => u32::from_be_bytes(size),
            })
            .unwrap_or(0) as usize;
        let len = if declared >= 8 { declared } else { FAILURE_DUMP_LEN };
        let end = offset.saturating_add(len).min(data.len());

        let mut text = String::new();
        match write_hexdump(&mut text, &data[offset..end], offset, HexDisplay::Canonical) {
            Ok(()) => eprint!("{}", text),
            Err(e) => eprintln!("Failed to format hex dump: {}", e),
        }
    }

    fn validate(&self) -> Result<bool> {
        let buffers = self
            .inputs
            .iter()
            .map(|path| Self::read_input(path))
            .collect::<Result<Vec<_>>>()?;

        let results = if self.foreign_input {
            buffers
                .iter()
                .map(|data| {
                    EmfParser::from_buffer_in(data.clone(), Endianness::Big)
                        .with_configuration(self.settings.clone())
                        .validate()
                })
                .collect()
        } else {
            validate_buffers(&buffers, &self.settings)
        };

        let mut output = self.open_output()?;
        let mut all_ok = true;
        for ((path, data), result) in self.inputs.iter().zip(&buffers).zip(results) {
            match result {
                Ok(report) => {
                    writeln!(
                        output,
                        "{}: ok, {} records, {} diagnostics",
                        path,
                        report.records,
                        report.diagnostics.len()
                    )?;
                }
                Err(e) => {
                    all_ok = false;
                    self.report_failure(path, &e, data, self.input_order());
                }
            }
        }
        output.flush()?;
        Ok(all_ok)
    }

    fn transcode(&self, direction: Direction) -> Result<bool> {
        let path = &self.inputs[0];
        let mut data = Self::read_input(path)?;

        let report = match emf_endian::transcode_with_settings(&mut data, direction, &self.settings) {
            Ok(report) => report,
            Err(e) => {
                self.report_failure(path, &e, &data, direction.source_order());
                return Ok(false);
            }
        };
        info!("converted {} records ({:?})", report.records, direction);

        match &self.output_target {
            Some(target) => {
                Self::prepare_output_path(target, self.prompt)?;
                let dir = match target.parent() {
                    Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
                    _ => PathBuf::from("."),
                };
                // Only replace the target once the whole stream is written.
                let mut tmp = NamedTempFile::new_in(&dir)
                    .with_context(|| format!("Failed to create a temporary file in `{}`", dir.display()))?;
                tmp.write_all(&data)?;
                tmp.persist(target)
                    .map_err(|e| format_err!("Failed to write `{}`: {}", target.display(), e.error))?;
            }
            None => {
                let mut stdout = io::stdout().lock();
                stdout.write_all(&data)?;
                stdout.flush()?;
            }
        }
        Ok(true)
    }

    /// If `prompt` is passed, will display a confirmation prompt before overwriting files.
    fn prepare_output_path(path: impl AsRef<Path>, prompt: bool) -> Result<()> {
        let p = path.as_ref();

        if p.is_dir() {
            bail!("There is a directory at {}, refusing to overwrite", p.display());
        }

        if p.exists() {
            if prompt {
                match Confirm::new()
                    .with_prompt(format!("Are you sure you want to override output file at {}", p.display()))
                    .default(false)
                    .interact()
                {
                    Ok(true) => Ok(()),
                    Ok(false) => bail!("Cancelled"),
                    Err(e) => bail!("Failed to write confirmation prompt to term caused by\n{}", e),
                }
            } else {
                Ok(())
            }
        } else {
            // Ok to assume p is not an existing directory
            match p.parent() {
                Some(parent) => {
                    if !parent.as_os_str().is_empty() && !parent.exists() {
                        fs::create_dir_all(parent)?;
                    }
                    Ok(())
                }
                None => bail!("Output file cannot be root."),
            }
        }
    }

    fn try_to_initialize_logging(&self) {
        if let Some(level) = self.verbosity_level {
            match TermLogger::init(
                level.to_level_filter(),
                Config::default(),
                TerminalMode::Stderr,
                ColorChoice::Auto,
            ) {
                Ok(_) => {}
                Err(e) => eprintln!("Failed to initialize logging: {:?}", e),
            };
        }
    }
}

fn cli() -> Command {
    Command::new("EMF Dump")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Utility to validate and byte-swap EMF record streams")
        .long_about(indoc!(
            r#"
            Utility to validate and byte-swap EMF record streams.

            By default every record of every input is listed. With `--validate` the
            inputs are only checked, and the exit code is 1 if any of them is invalid.
            With `--transcode` the single input is checked in full and then written out
            in the other byte order; nothing is written if the check fails.
        "#
        ))
        .arg(
            Arg::new("INPUT")
                .action(ArgAction::Append)
                .required(true)
                .help("EMF streams to read, `-` reads standard input."),
        )
        .arg(
            Arg::new("num-threads")
                .short('t')
                .long("threads")
                .default_value("0")
                .value_parser(clap::value_parser!(usize))
                .help("Sets the number of worker threads used by `--validate`, defaults to number of CPU cores."),
        )
        .arg(
            Arg::new("output-format")
                .short('o')
                .long("format")
                .value_parser(["list", "json", "jsonl"])
                .default_value("list")
                .help("Sets the output format")
                .long_help(indoc!(
                    r#"
                    Sets the output format:
                        "list"  - one line per record.
                        "json"  - one document per input, with records and diagnostics.
                        "jsonl" - one record per line.
                "#
                )),
        )
        .arg(
            Arg::new("output-target")
                .long("output")
                .short('f')
                .value_parser(clap::value_parser!(PathBuf))
                .help(indoc!(
                    "Writes output to the file specified instead of stdout, errors will still be printed to stderr.
                     Will ask for confirmation before overwriting files, to allow overwriting, pass `--no-confirm-overwrite`
                     Will create parent directories if needed."
                )),
        )
        .arg(
            Arg::new("no-confirm-overwrite")
                .long("no-confirm-overwrite")
                .action(ArgAction::SetTrue)
                .help("When set, will not ask for confirmation before overwriting files, useful for automation"),
        )
        .arg(
            Arg::new("validate")
                .long("validate")
                .action(ArgAction::SetTrue)
                .conflicts_with("transcode")
                .help("Only check the inputs, exits with 1 if any of them is invalid."),
        )
        .arg(
            Arg::new("transcode")
                .long("transcode")
                .value_parser(["to-foreign", "to-native"])
                .help("Convert the input to big-endian (`to-foreign`) or back to little-endian (`to-native`)."),
        )
        .arg(
            Arg::new("foreign")
                .long("foreign")
                .action(ArgAction::SetTrue)
                .conflicts_with("transcode")
                .help("Inputs are stored big-endian."),
        )
        .arg(
            Arg::new("strict")
                .long("strict")
                .action(ArgAction::SetTrue)
                .help("Treat records whose layout is not modeled as errors."),
        )
        .arg(
            Arg::new("no-dib-pixel-check")
                .long("no-dib-pixel-check")
                .action(ArgAction::SetTrue)
                .help("Do not require bitmap pixel data to cover the bitmap geometry."),
        )
        .arg(
            Arg::new("hexdump")
                .long("hexdump")
                .action(ArgAction::SetTrue)
                .help("Print a hex dump of the record that failed."),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .action(ArgAction::Count)
                .help(indoc!(
                    "-v - info, -vv - debug, -vvv - trace.
                     trace output is only available in debug builds, as it is extremely verbose"
                )),
        )
}

fn main() {
    let matches = cli().get_matches();

    let app = match EmfDump::from_cli_matches(&matches) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("{:?}", e);
            exit(1)
        }
    };

    match app.run() {
        Ok(true) => {}
        Ok(false) => exit(1),
        Err(e) => {
            eprintln!("{:?}", e);
            exit(1)
        }
    }
}
