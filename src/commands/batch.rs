use crate::align::PairwiseAligner;
use crate::cli::BatchArgs;
use crate::utils::{create_output, read_fasta_path, FastaRecord, Result};
use crossbeam_channel::{bounded, Receiver};
use itertools::Itertools;
use rayon::{
    iter::{IndexedParallelIterator, IntoParallelRefIterator, ParallelIterator},
    ThreadPoolBuilder,
};
use std::{collections::BTreeMap, io::Write, str::FromStr, thread};

const CHANNEL_BUFFER_SIZE: usize = 2048;
const TSV_HEADER: &str = "name_a\tname_b\tlen_a\tlen_b\tscore\tidentity\tcigar";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PairingMode {
    Pairs,
    All,
}

impl FromStr for PairingMode {
    type Err = &'static str;
    fn from_str(mode: &str) -> std::result::Result<Self, Self::Err> {
        match mode {
            "pairs" => Ok(PairingMode::Pairs),
            "all" => Ok(PairingMode::All),
            _ => Err("Invalid pairing mode. Options are: pairs, all"),
        }
    }
}

pub fn batch(args: BatchArgs) -> Result<()> {
    let aligner = PairwiseAligner::new(args.scoring.score_model()?);
    let mut records = read_fasta_path(&args.fasta_path)?;
    if args.uppercase {
        records
            .iter_mut()
            .for_each(|record| record.seq.make_ascii_uppercase());
    }
    if args.mode == PairingMode::Pairs && records.len() % 2 == 1 {
        if let Some(last) = records.last() {
            log::warn!("Odd number of records, skipping trailing record {}", last.name);
        }
    }

    let pairs = pair_indices(records.len(), args.mode);
    log::info!(
        "Aligning {} pairs from {} records using {} threads",
        pairs.len(),
        records.len(),
        args.num_threads
    );

    let mut writer = create_output(args.output_path.as_deref())?;
    writeln!(writer, "{}", TSV_HEADER).map_err(|e| format!("Failed to write header: {}", e))?;

    let (sender, receiver) = bounded(CHANNEL_BUFFER_SIZE);
    let writer_thread = thread::spawn(move || write_rows_in_order(writer, receiver));

    let pool = initialize_thread_pool(args.num_threads)?;
    pool.install(|| {
        pairs
            .par_iter()
            .enumerate()
            .for_each_with(sender, |s, (index, &(i, j))| {
                let (record_a, record_b) = (&records[i], &records[j]);
                let row = match align_pair(&aligner, record_a, record_b, args.score_only) {
                    Ok(row) => Some(row),
                    Err(err) => {
                        log::error!("Error aligning {} vs {}: {}", record_a.name, record_b.name, err);
                        None
                    }
                };
                if let Err(e) = s.send((index, row)) {
                    log::error!("Failed to send alignment row to writer thread: {}", e);
                }
            });
    });

    writer_thread
        .join()
        .map_err(|_| "Writer thread panicked".to_string())??;
    log::trace!("Writer thread finished");
    Ok(())
}

fn pair_indices(num_records: usize, mode: PairingMode) -> Vec<(usize, usize)> {
    match mode {
        PairingMode::Pairs => (0..num_records / 2).map(|k| (2 * k, 2 * k + 1)).collect(),
        PairingMode::All => (0..num_records).tuple_combinations().collect(),
    }
}

fn align_pair(
    aligner: &PairwiseAligner,
    record_a: &FastaRecord,
    record_b: &FastaRecord,
    score_only: bool,
) -> Result<String> {
    let prefix = format!(
        "{}\t{}\t{}\t{}",
        record_a.name,
        record_b.name,
        record_a.seq.len(),
        record_b.seq.len()
    );
    if score_only {
        let score = aligner
            .score(&record_a.seq, &record_b.seq)
            .map_err(|e| e.to_string())?;
        return Ok(format!("{}\t{}\t*\t*", prefix, score));
    }

    let result = aligner
        .align(&record_a.seq, &record_b.seq)
        .map_err(|e| e.to_string())?;
    log::debug!(
        "{} vs {}: score={} length={}",
        record_a.name,
        record_b.name,
        result.score,
        result.len()
    );
    Ok(format!(
        "{}\t{}\t{:.4}\t{}",
        prefix,
        result.score,
        result.stats().identity,
        result.cigar_or_placeholder()
    ))
}

/// Rows arrive in completion order; buffer them so output follows input order.
fn write_rows_in_order(
    mut writer: Box<dyn Write + Send>,
    receiver: Receiver<(usize, Option<String>)>,
) -> Result<()> {
    let mut pending = BTreeMap::new();
    let mut next_index = 0;
    for (index, row) in receiver {
        pending.insert(index, row);
        while let Some(row) = pending.remove(&next_index) {
            if let Some(row) = row {
                writeln!(writer, "{}", row).map_err(|e| format!("Failed to write row: {}", e))?;
            }
            next_index += 1;
        }
    }
    writer
        .flush()
        .map_err(|e| format!("Failed to flush output: {}", e))
}

fn initialize_thread_pool(num_threads: usize) -> Result<rayon::ThreadPool> {
    ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .thread_name(|i| format!("nwalign-{}", i))
        .start_handler(|_thread_index| {
            log::trace!("Initialized thread {:?}", std::thread::current().id());
        })
        .build()
        .map_err(|e| format!("Failed to initialize thread pool: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Command};
    use clap::Parser;

    fn record(name: &str, seq: &[u8]) -> FastaRecord {
        FastaRecord {
            name: name.to_string(),
            seq: seq.to_vec(),
        }
    }

    fn run_batch(fasta: &str, extra: &[&str]) -> String {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.fa");
        std::fs::write(&input, fasta).unwrap();
        let out = dir.path().join("out.tsv");
        let mut argv = vec![
            "nwalign",
            "batch",
            "--fasta",
            input.to_str().unwrap(),
            "--output",
            out.to_str().unwrap(),
        ];
        argv.extend_from_slice(extra);
        let Command::Batch(args) = Cli::try_parse_from(argv).unwrap().command else {
            panic!("expected batch subcommand");
        };
        batch(args).unwrap();
        std::fs::read_to_string(&out).unwrap()
    }

    #[test]
    fn parse_pairing_mode() {
        assert_eq!("all".parse::<PairingMode>(), Ok(PairingMode::All));
        assert!("some".parse::<PairingMode>().is_err());
    }

    #[test]
    fn consecutive_pairs_skip_odd_record() {
        assert_eq!(pair_indices(5, PairingMode::Pairs), vec![(0, 1), (2, 3)]);
        assert!(pair_indices(1, PairingMode::Pairs).is_empty());
    }

    #[test]
    fn all_pairs_are_unordered_combinations() {
        assert_eq!(
            pair_indices(4, PairingMode::All),
            vec![(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]
        );
        assert!(pair_indices(0, PairingMode::All).is_empty());
    }

    #[test]
    fn align_pair_row() {
        let aligner = PairwiseAligner::default();
        let row = align_pair(&aligner, &record("a", b"AT"), &record("b", b"A"), false).unwrap();
        assert_eq!(row, "a\tb\t2\t1\t0\t0.5000\t1=1D");
        let row = align_pair(&aligner, &record("a", b"AT"), &record("b", b"A"), true).unwrap();
        assert_eq!(row, "a\tb\t2\t1\t0\t*\t*");
        let row = align_pair(&aligner, &record("e", b""), &record("f", b""), false).unwrap();
        assert_eq!(row, "e\tf\t0\t0\t0\t0.0000\t*");
        assert!(align_pair(&aligner, &record("g", b"A-"), &record("h", b"A"), false).is_err());
    }

    #[test]
    fn batch_writes_rows_in_input_order() {
        let fasta = ">s1\nATCG\n>s2\nATCG\n>s3\nAAAA\n>s4\nTTTT\n>s5\nGCAT\n>s6\nGATTACA\n";
        let output = run_batch(fasta, &["--threads", "3"]);
        assert_eq!(
            output,
            "name_a\tname_b\tlen_a\tlen_b\tscore\tidentity\tcigar\n\
             s1\ts2\t4\t4\t4\t1.0000\t4=\n\
             s3\ts4\t4\t4\t-4\t0.0000\t4X\n\
             s5\ts6\t4\t7\t-2\t0.3750\t1=1D1=1I1=3I\n"
        );
    }

    #[test]
    fn batch_all_pairs_score_only() {
        let fasta = ">a\nAC\n>b\nAC\n>c\nGG\n";
        let output = run_batch(fasta, &["--mode", "all", "--score-only", "-t", "2"]);
        let rows: Vec<&str> = output.lines().collect();
        assert_eq!(
            rows,
            vec![
                TSV_HEADER,
                "a\tb\t2\t2\t2\t*\t*",
                "a\tc\t2\t2\t-2\t*\t*",
                "b\tc\t2\t2\t-2\t*\t*",
            ]
        );
    }

    #[test]
    fn batch_skips_failed_pairs() {
        let fasta = ">a\nA-C\n>b\nAC\n>c\nAC\n>d\nAC\n";
        let output = run_batch(fasta, &[]);
        assert_eq!(
            output,
            format!("{}\nc\td\t2\t2\t2\t1.0000\t2=\n", TSV_HEADER)
        );
    }
}
