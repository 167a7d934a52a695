use crate::{
    core::{
        breakpoint::Breakpoint,
        evidence::{EvidenceCount, EvidenceRecord, EvidenceType},
        matcher::check_sv,
        svtype::SvType,
    },
    error::SvqError,
    index::evidence_index::EvidenceIndex,
    utils::util::Result,
};
use once_cell::unsync::OnceCell;
use std::path::{Path, PathBuf};

/// Explicit query context: the index directory plus the lazily loaded
/// index. Loading happens on the first query and is memoized for the
/// lifetime of the handle; afterwards the index is read-only.
pub struct IndexHandle {
    dir: PathBuf,
    index: OnceCell<EvidenceIndex>,
}

impl IndexHandle {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self {
            dir: dir.into(),
            index: OnceCell::new(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn is_loaded(&self) -> bool {
        self.index.get().is_some()
    }

    pub fn get_or_load(&self) -> Result<&EvidenceIndex> {
        self.index.get_or_try_init(|| {
            log::info!("Loading evidence index {}", self.dir.display());
            EvidenceIndex::load(&self.dir)
        })
    }
}

/// Queries the index for the left breakpoint's window and accumulates,
/// per sample, how many indexed observations support the queried pair,
/// split into paired-end and split-read counts.
///
/// `sample_ids` restricts the query to a subset of the index's samples;
/// `None` (or an empty slice) means all of them. The returned array has
/// one zero-initialized entry per queried sample, in query order.
///
/// Left-side slop is applied to the index search window here; the
/// matcher applies its own slop to the right side only.
pub fn run_query(
    handle: &IndexHandle,
    sv_type: SvType,
    query_left: &Breakpoint,
    query_right: &Breakpoint,
    slop: u32,
    sample_ids: Option<&[u32]>,
) -> Result<Vec<EvidenceCount>> {
    sv_type.ensure_supported()?;

    let index = handle.get_or_load()?;
    let result = index.query(
        &query_left.chrom,
        query_left.start.saturating_sub(slop),
        query_left.end,
    );

    let selected: Vec<u32> = match sample_ids {
        Some(ids) if !ids.is_empty() => {
            if let Some(&bad) = ids.iter().find(|&&id| id >= result.sample_count()) {
                return Err(SvqError::usage(format!(
                    "Sample id {bad} is out of range: index has {} samples",
                    result.sample_count()
                )));
            }
            ids.to_vec()
        }
        _ => (0..result.sample_count()).collect(),
    };

    let mut depths = vec![EvidenceCount::default(); selected.len()];
    for (depth, &sample_index) in depths.iter_mut().zip(&selected) {
        for line in result.iter_sample(sample_index as usize) {
            let record = EvidenceRecord::parse(line)?;
            let hit = check_sv(
                query_left,
                query_right,
                &record.left,
                &record.right,
                record.evidence_type,
                slop,
                sv_type,
            )?;
            if hit {
                match record.evidence_type {
                    EvidenceType::PairedEnd => depth.paired_end += 1,
                    EvidenceType::SplitRead => depth.split_read += 1,
                }
            }
        }
    }

    log::debug!(
        "Query {} / {} ({}, slop {}) matched evidence in {} of {} samples",
        query_left,
        query_right,
        sv_type,
        slop,
        depths.iter().filter(|d| d.total() > 0).count(),
        depths.len()
    );

    Ok(depths)
}
