mod readers;
mod region;
mod writers;

pub use readers::{
    fetch_region, open_fasta_reader, open_genome_reader, read_fasta, read_fasta_path,
    FastaRecord,
};
pub use region::GenomicRegion;
pub use writers::{create_output, write_alignment, OutputFormat};

pub type Result<T> = std::result::Result<T, String>;

pub fn handle_error_and_exit(err: String) -> ! {
    log::error!("{}", err);
    std::process::exit(1);
}
