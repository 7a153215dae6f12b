use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chunker::{try_chunks, ChunkSize};
use clap::{Parser, ValueEnum};
use regex::Regex;
use tracing::{debug, info};

/// Print the lines of a file (or stdin) in chunks.
#[derive(Debug, Parser)]
#[command(name = "chunk", version)]
struct Args {
    /// Number of lines per chunk
    #[arg(
        long,
        allow_negative_numbers = true,
        required_unless_present = "split_on",
        conflicts_with = "split_on"
    )]
    size: Option<i64>,

    /// End a chunk after every line matching this regex
    #[arg(long, value_name = "REGEX")]
    split_on: Option<String>,

    #[arg(long, value_enum, default_value_t = Format::Lines)]
    format: Format,

    /// Input file; stdin when absent or `-`
    file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// The chunk's lines followed by a blank line
    Lines,
    /// One JSON array of strings per chunk
    Json,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let args = Args::parse();
    debug!(?args, "parsed arguments");

    let input: Box<dyn BufRead> = match &args.file {
        Some(path) if path.as_os_str() != "-" => {
            let file = File::open(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        _ => Box::new(io::stdin().lock()),
    };
    let mut out = BufWriter::new(io::stdout().lock());

    let written = match (args.size, &args.split_on) {
        (Some(size), _) => {
            write_chunks(try_chunks(input.lines(), size)?, args.format, &mut out)?
        }
        (None, Some(pattern)) => {
            let split = split_on(pattern)?;
            write_chunks(try_chunks(input.lines(), split)?, args.format, &mut out)?
        }
        (None, None) => bail!("one of --size or --split-on is required"),
    };

    out.flush().context("failed to flush stdout")?;
    info!(chunks = written, "done");
    Ok(())
}

/// A chunk size that ends a chunk after every line matching `pattern`.
fn split_on(pattern: &str) -> Result<ChunkSize<impl FnMut(&String) -> bool>> {
    let regex =
        Regex::new(pattern).with_context(|| format!("invalid --split-on regex {pattern:?}"))?;
    Ok(ChunkSize::Split(move |line: &String| regex.is_match(line)))
}

/// Writes every chunk and returns how many were written.
///
/// Chunks read before an I/O error are written out before the error is
/// returned.
fn write_chunks<W, I>(chunks: I, format: Format, out: &mut W) -> Result<usize>
where
    W: Write,
    I: Iterator<Item = io::Result<Vec<String>>>,
{
    let mut written = 0;
    for chunk in chunks {
        let chunk = chunk.context("failed to read input")?;
        match format {
            Format::Lines => {
                for line in &chunk {
                    writeln!(out, "{line}")?;
                }
                writeln!(out)?;
            }
            Format::Json => writeln!(out, "{}", serde_json::to_string(&chunk)?)?,
        }
        written += 1;
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(input: &str, size: i64, format: Format) -> String {
        let lines = io::Cursor::new(input.to_owned()).lines();
        let mut out = Vec::new();
        write_chunks(try_chunks(lines, size).unwrap(), format, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn lines_format_separates_chunks_with_blank_line() {
        assert_eq!(render("a\nb\nc\n", 2, Format::Lines), "a\nb\n\nc\n\n");
    }

    #[test]
    fn json_format_writes_one_array_per_chunk() {
        assert_eq!(
            render("a\nb\nc\n", 2, Format::Json),
            "[\"a\",\"b\"]\n[\"c\"]\n"
        );
    }

    #[test]
    fn empty_input_writes_nothing() {
        assert_eq!(render("", 3, Format::Lines), "");
    }

    #[test]
    fn io_error_is_reported_after_completed_chunks() {
        let lines = vec![
            Ok("a".to_owned()),
            Ok("b".to_owned()),
            Err(io::Error::new(io::ErrorKind::InvalidData, "bad utf-8")),
        ];
        let mut out = Vec::new();
        let err = write_chunks(try_chunks(lines, 1).unwrap(), Format::Lines, &mut out)
            .unwrap_err();
        assert!(err.to_string().contains("failed to read input"));
        assert_eq!(out, b"a\n\nb\n\n");
    }

    #[test]
    fn split_on_ends_chunk_at_matching_line() {
        let lines = io::Cursor::new("a\n--\nb\nc\n--\nd\n").lines();
        let split = split_on("^--$").unwrap();
        let mut out = Vec::new();
        let written = write_chunks(try_chunks(lines, split).unwrap(), Format::Json, &mut out)
            .unwrap();
        assert_eq!(written, 3);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "[\"a\",\"--\"]\n[\"b\",\"c\",\"--\"]\n[\"d\"]\n"
        );
    }

    #[test]
    fn split_on_rejects_invalid_regex() {
        let err = split_on("(").err().unwrap();
        assert!(err.to_string().contains("invalid --split-on regex"));
    }

    #[test]
    fn size_and_split_on_conflict() {
        let parsed = Args::try_parse_from(["chunk", "--size", "2", "--split-on", "x"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn one_of_size_or_split_on_is_required() {
        assert!(Args::try_parse_from(["chunk"]).is_err());
    }

    #[test]
    fn negative_size_parses_and_is_rejected_by_chunker() {
        let args = Args::try_parse_from(["chunk", "--size", "-3"]).unwrap();
        assert_eq!(args.size, Some(-3));
        let lines = io::Cursor::new(String::new()).lines();
        assert!(try_chunks(lines, -3i64).is_err());
    }
}
