use super::{GenomicRegion, Result};
use flate2::read::MultiGzDecoder;
use rust_htslib::faidx;
use std::fs::File;
use std::io::{BufRead, BufReader, Read as ioRead};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastaRecord {
    pub name: String,
    pub seq: Vec<u8>,
}

pub fn open_fasta_reader(path: &Path) -> Result<BufReader<Box<dyn ioRead>>> {
    fn is_gzipped(path: &Path) -> bool {
        let path_str = path.to_string_lossy().to_lowercase();
        path_str.ends_with(".gz") || path_str.ends_with(".gzip")
    }
    let file = File::open(path).map_err(|e| format!("File {}: {}", path.display(), e))?;
    if is_gzipped(path) {
        let gz_decoder = MultiGzDecoder::new(file);
        if gz_decoder.header().is_some() {
            Ok(BufReader::new(Box::new(gz_decoder)))
        } else {
            Err(format!("Invalid gzip header: {}", path.to_string_lossy()))
        }
    } else {
        Ok(BufReader::new(Box::new(file)))
    }
}

/// Reads every record of a (multi-line) FASTA stream. Record names are the
/// first whitespace-delimited token of the header line.
pub fn read_fasta<R: BufRead>(reader: R) -> Result<Vec<FastaRecord>> {
    let mut records: Vec<FastaRecord> = Vec::new();
    for (line_number, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| format!("Error reading line {}: {}", line_number + 1, e))?;
        let line = line.trim_end();
        if let Some(header) = line.strip_prefix('>') {
            let name = header
                .split_whitespace()
                .next()
                .ok_or(format!("Missing record name at line {}", line_number + 1))?;
            records.push(FastaRecord {
                name: name.to_string(),
                seq: Vec::new(),
            });
        } else if !line.is_empty() {
            let record = records.last_mut().ok_or(format!(
                "Sequence data before first header at line {}",
                line_number + 1
            ))?;
            record.seq.extend(line.bytes().filter(|b| !b.is_ascii_whitespace()));
        }
    }
    Ok(records)
}

pub fn read_fasta_path(path: &Path) -> Result<Vec<FastaRecord>> {
    let reader = open_fasta_reader(path)?;
    let records = read_fasta(reader).map_err(|e| format!("{}: {}", path.display(), e))?;
    log::debug!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

pub fn open_genome_reader(path: &Path) -> Result<faidx::Reader> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or(format!("Reference path has no extension: {}", path.display()))?;
    let fai_path = path.with_extension(extension.to_owned() + ".fai");
    if !fai_path.exists() {
        return Err(format!(
            "Reference index file not found: {}. Create it using 'samtools faidx {}'",
            fai_path.display(),
            path.display()
        ));
    }
    faidx::Reader::from_path(path).map_err(|e| e.to_string())
}

pub fn fetch_region(genome: &faidx::Reader, region: &GenomicRegion) -> Result<Vec<u8>> {
    // faidx reports unknown contigs as a negative length
    let len = genome.fetch_seq_len(&region.contig) as i64;
    if len <= 0 {
        return Err(format!("Contig not found in reference: {}", region.contig));
    }
    let len = len as usize;
    // htslib clamps out-of-range coordinates, so check them here
    let (start, end) = match region.span {
        Some((_, end)) if end as usize > len => {
            return Err(format!("Region {} exceeds contig length {}", region, len));
        }
        Some((start, end)) => (start as usize, end as usize),
        None => (0, len),
    };
    // faidx end coordinates are inclusive
    let seq = genome
        .fetch_seq_string(&region.contig, start, end - 1)
        .map_err(|e| format!("Error fetching sequence for region {}: {}", region, e))?;
    Ok(seq.into_bytes())
}
