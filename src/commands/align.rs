use crate::align::PairwiseAligner;
use crate::cli::AlignArgs;
use crate::utils::{
    create_output, fetch_region, open_genome_reader, read_fasta_path, write_alignment,
    FastaRecord, GenomicRegion, Result,
};
use std::io::Write;

pub fn align(args: AlignArgs) -> Result<()> {
    let aligner = PairwiseAligner::new(args.scoring.score_model()?);
    let (mut record_a, mut record_b) = load_inputs(&args)?;
    if args.uppercase {
        record_a.seq.make_ascii_uppercase();
        record_b.seq.make_ascii_uppercase();
    }

    log::info!(
        "Aligning {} ({} bp) against {} ({} bp)",
        record_a.name,
        record_a.seq.len(),
        record_b.name,
        record_b.seq.len()
    );
    let result = aligner
        .align(&record_a.seq, &record_b.seq)
        .map_err(|e| format!("{} vs {}: {}", record_a.name, record_b.name, e))?;
    log::info!("Alignment score: {}", result.score);

    let mut writer = create_output(args.output_path.as_deref())?;
    write_alignment(
        &mut writer,
        args.format,
        (record_a.name.as_str(), record_b.name.as_str()),
        &result,
    )?;
    writer
        .flush()
        .map_err(|e| format!("Failed to flush output: {}", e))
}

fn load_inputs(args: &AlignArgs) -> Result<(FastaRecord, FastaRecord)> {
    if let (Some(seq_a), Some(seq_b)) = (&args.seq_a, &args.seq_b) {
        return Ok((
            FastaRecord {
                name: "seq_a".to_string(),
                seq: seq_a.as_bytes().to_vec(),
            },
            FastaRecord {
                name: "seq_b".to_string(),
                seq: seq_b.as_bytes().to_vec(),
            },
        ));
    }

    if let Some(genome_path) = &args.genome_path {
        let (Some(region_a), Some(region_b)) = (&args.region_a, &args.region_b) else {
            return Err("Both --region-a and --region-b are required with --genome".into());
        };
        let genome = open_genome_reader(genome_path)?;
        let fetch = |region: &GenomicRegion| -> Result<FastaRecord> {
            Ok(FastaRecord {
                name: region.to_string(),
                seq: fetch_region(&genome, region)?,
            })
        };
        return Ok((fetch(region_a)?, fetch(region_b)?));
    }

    if let Some(fasta_path) = &args.fasta_path {
        let mut records = read_fasta_path(fasta_path)?.into_iter();
        let (Some(record_a), Some(record_b)) = (records.next(), records.next()) else {
            return Err(format!(
                "Expected at least two records in {}",
                fasta_path.display()
            ));
        };
        let ignored = records.count();
        if ignored > 0 {
            log::warn!(
                "Only the first two records of {} are aligned, ignoring {} more",
                fasta_path.display(),
                ignored
            );
        }
        return Ok((record_a, record_b));
    }

    Err("No input sequences given: use --seq-a/--seq-b, --genome or --fasta".into())
}
