use crate::utils::Result;
use std::fmt;

/// A contig, optionally restricted to the 0-based half-open interval `[start, end)`.
#[derive(Debug, Clone, PartialEq)]
pub struct GenomicRegion {
    pub contig: String,
    pub span: Option<(u32, u32)>,
}

impl GenomicRegion {
    pub fn new(contig: impl Into<String>, start: u32, end: u32) -> Result<Self> {
        if start >= end {
            return Err(format!("Invalid region: start {} >= end {}", start, end));
        }

        Ok(Self {
            contig: contig.into(),
            span: Some((start, end)),
        })
    }

    pub fn whole_contig(contig: impl Into<String>) -> Self {
        Self {
            contig: contig.into(),
            span: None,
        }
    }

    /// Parses `contig:start-end` or a bare `contig`. Text after the last `:`
    /// is only read as an interval when it contains a `-`, so names such as
    /// `HLA-A*01:01` are taken as whole contigs.
    pub fn from_string(encoding: &str) -> Result<Self> {
        let error_msg = || format!("Invalid region encoding: {}", encoding);
        if encoding.is_empty() {
            return Err(error_msg());
        }
        let Some((contig, (start, end))) = encoding
            .rsplit_once(':')
            .and_then(|(contig, interval)| Some((contig, interval.split_once('-')?)))
        else {
            return Ok(Self::whole_contig(encoding));
        };
        if contig.is_empty() {
            return Err(error_msg());
        }

        let start: u32 = start.parse().map_err(|_| error_msg())?;
        let end: u32 = end.parse().map_err(|_| error_msg())?;

        Self::new(contig, start, end)
    }
}

impl fmt::Display for GenomicRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.span {
            Some((start, end)) => write!(f, "{}:{}-{}", self.contig, start, end),
            None => write!(f, "{}", self.contig),
        }
    }
}
