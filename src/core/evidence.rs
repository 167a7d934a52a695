use crate::{core::breakpoint::Breakpoint, error::SvqError, utils::util::Result};
use serde::Serialize;

/// Evidence category of one indexed observation. Paired-end observations
/// come from discordant read pairs, split-read observations from single
/// chimeric alignments; the two support deletions under opposite strand
/// rules and are counted separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvidenceType {
    PairedEnd,
    SplitRead,
}

impl EvidenceType {
    /// Wire encoding: `0` is paired-end, any other integer split-read.
    pub fn from_code(code: u32) -> Self {
        if code == 0 {
            EvidenceType::PairedEnd
        } else {
            EvidenceType::SplitRead
        }
    }
}

/// One decoded evidence line: the two breakpoint observations plus the
/// evidence category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvidenceRecord {
    pub left: Breakpoint,
    pub right: Breakpoint,
    pub evidence_type: EvidenceType,
}

impl EvidenceRecord {
    /// Decodes one raw evidence line with exactly 9 tab-separated fields:
    /// `leftChrom leftStart leftEnd leftStrand rightChrom rightStart
    /// rightEnd rightStrand evidenceType`. Strands are small signed
    /// integers. Field-count mismatch or an unparseable numeric field is a
    /// recoverable `MalformedRecord` error.
    pub fn parse(line: &str) -> Result<Self> {
        const EXPECTED_FIELD_COUNT: usize = 9;
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() != EXPECTED_FIELD_COUNT {
            return Err(SvqError::MalformedRecord {
                reason: format!(
                    "expected {} tab-separated fields, found {}",
                    EXPECTED_FIELD_COUNT,
                    fields.len()
                ),
                line: line.to_owned(),
            });
        }

        let left = Breakpoint::new(
            fields[0],
            parse_field::<u32>(fields[1], "leftStart", line)?,
            parse_field::<u32>(fields[2], "leftEnd", line)?,
            parse_field::<i8>(fields[3], "leftStrand", line)?,
        );
        let right = Breakpoint::new(
            fields[4],
            parse_field::<u32>(fields[5], "rightStart", line)?,
            parse_field::<u32>(fields[6], "rightEnd", line)?,
            parse_field::<i8>(fields[7], "rightStrand", line)?,
        );
        let evidence_type =
            EvidenceType::from_code(parse_field::<u32>(fields[8], "evidenceType", line)?);

        Ok(Self {
            left,
            right,
            evidence_type,
        })
    }
}

fn parse_field<T: std::str::FromStr>(field: &str, name: &str, line: &str) -> Result<T> {
    field.parse().map_err(|_| SvqError::MalformedRecord {
        reason: format!("invalid {name} field '{field}'"),
        line: line.to_owned(),
    })
}

/// Per-sample evidence depth, split by category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EvidenceCount {
    pub paired_end: u32,
    pub split_read: u32,
}

impl EvidenceCount {
    pub fn total(&self) -> u32 {
        self.paired_end + self.split_read
    }
}
