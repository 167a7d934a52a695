use crate::{core::evidence::EvidenceCount, core::stats::QuartileSummary, utils::util::Result};
use serde::Serialize;
use std::io::Write;

/// One per-sample row of the depth table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SampleDepth {
    pub sample: String,
    pub paired_end: u32,
    pub split_read: u32,
    pub total: u32,
}

impl SampleDepth {
    pub fn new(sample: impl Into<String>, count: &EvidenceCount) -> Self {
        Self {
            sample: sample.into(),
            paired_end: count.paired_end,
            split_read: count.split_read,
            total: count.total(),
        }
    }
}

/// Full output of one search: the population summary, optionally preceded
/// by the per-sample depth table.
#[derive(Debug, Clone, Serialize)]
pub struct SearchReport {
    pub summary: QuartileSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub samples: Option<Vec<SampleDepth>>,
}

impl SearchReport {
    pub fn new(summary: QuartileSummary, samples: Option<Vec<SampleDepth>>) -> Self {
        Self { summary, samples }
    }

    pub fn write_text<W: Write>(&self, out: &mut W) -> Result<()> {
        if let Some(samples) = &self.samples {
            writeln!(out, "sample\tpaired_end\tsplit_read\ttotal")?;
            for row in samples {
                writeln!(
                    out,
                    "{}\t{}\t{}\t{}",
                    row.sample, row.paired_end, row.split_read, row.total
                )?;
            }
        }

        let s = &self.summary;
        writeln!(out, "zero\tone\tmin\tq1\tq2\tq3\tmax\tcounts")?;
        writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{},{},{},{}",
            s.zero_count,
            s.one_count,
            s.min,
            s.q1,
            s.q2,
            s.q3,
            s.max,
            s.counts[0],
            s.counts[1],
            s.counts[2],
            s.counts[3]
        )?;
        Ok(())
    }

    pub fn write_json<W: Write>(&self, out: &mut W) -> Result<()> {
        serde_json::to_writer_pretty(&mut *out, self)?;
        writeln!(out)?;
        Ok(())
    }
}
