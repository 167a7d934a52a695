use crate::{error::SvqError, utils::util::Result};

/// One endpoint of a structural variant: a chromosome interval plus a
/// strand. Indexed observations carry `1`/`-1` strands; query-side
/// breakpoints are built with strand `0` (unspecified).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breakpoint {
    pub chrom: String,
    pub start: u32,
    pub end: u32,
    pub strand: i8,
}

impl Breakpoint {
    pub fn new(chrom: impl Into<String>, start: u32, end: u32, strand: i8) -> Self {
        Self {
            chrom: chrom.into(),
            start,
            end,
            strand,
        }
    }

    /// Builds a query-side breakpoint from a `chrom:start-end` region string.
    pub fn from_region(region: &str) -> Result<Self> {
        let (chrom, start, end) = parse_region(region)?;
        Ok(Self {
            chrom,
            start,
            end,
            strand: 0,
        })
    }
}

impl std::fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}-{}", self.chrom, self.start, self.end)
    }
}

/// Splits a `chrom:start-end` region string into its parts. The chromosome
/// is everything before the last `:`, so contig names containing colons
/// still parse.
pub fn parse_region(region: &str) -> Result<(String, u32, u32)> {
    let malformed = || SvqError::usage(format!("Error parsing region '{region}'"));

    let (chrom, range) = region.rsplit_once(':').ok_or_else(malformed)?;
    let (start, end) = range.split_once('-').ok_or_else(malformed)?;
    if chrom.is_empty() {
        return Err(malformed());
    }
    let start: u32 = start.parse().map_err(|_| malformed())?;
    let end: u32 = end.parse().map_err(|_| malformed())?;
    Ok((chrom.to_owned(), start, end))
}
