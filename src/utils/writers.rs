use super::Result;
use crate::align::AlignmentResult;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputFormat {
    Pretty,
    Fasta,
    Cigar,
}

impl FromStr for OutputFormat {
    type Err = &'static str;
    fn from_str(format: &str) -> std::result::Result<Self, Self::Err> {
        match format {
            "pretty" => Ok(OutputFormat::Pretty),
            "fasta" => Ok(OutputFormat::Fasta),
            "cigar" => Ok(OutputFormat::Cigar),
            _ => Err("Invalid output format. Options are: pretty, fasta, cigar"),
        }
    }
}

/// Buffered writer to `path`, or to stdout when no path is given.
pub fn create_output(path: Option<&Path>) -> Result<Box<dyn Write + Send>> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .map_err(|e| format!("Failed to create {}: {}", path.display(), e))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout()))),
    }
}

pub fn write_alignment<W: Write + ?Sized>(
    writer: &mut W,
    format: OutputFormat,
    names: (&str, &str),
    result: &AlignmentResult,
) -> Result<()> {
    let (name_a, name_b) = names;
    let written = match format {
        OutputFormat::Pretty => {
            let (a, markers, b) = result.matching();
            writeln!(
                writer,
                "# {} vs {}\n# score: {}\n# identity: {:.4}\n{}\n{}\n{}",
                name_a,
                name_b,
                result.score,
                result.stats().identity,
                a,
                markers,
                b
            )
        }
        OutputFormat::Fasta => writeln!(
            writer,
            ">{}\n{}\n>{}\n{}",
            name_a,
            result.aligned_a_str(),
            name_b,
            result.aligned_b_str()
        ),
        OutputFormat::Cigar => writeln!(
            writer,
            "{}\t{}\t{}\t{}",
            name_a,
            name_b,
            result.score,
            result.cigar_or_placeholder()
        ),
    };
    written.map_err(|e| format!("Failed to write alignment: {}", e))
}
