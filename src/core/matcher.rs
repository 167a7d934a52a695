use crate::{
    core::{breakpoint::Breakpoint, evidence::EvidenceType, svtype::SvType},
    error::SvqError,
    utils::util::Result,
};

/// Decides whether an indexed observation supports the queried breakpoint
/// pair. Dispatches on SV type; only deletions carry a matching algorithm,
/// every other declared type yields `UnsupportedSvType`.
///
/// The left query breakpoint is unused by the deletion rule: the range
/// query that produced the observation was already restricted to the left
/// breakpoint's chromosome and interval.
pub fn check_sv(
    _query_left: &Breakpoint,
    query_right: &Breakpoint,
    obs_left: &Breakpoint,
    obs_right: &Breakpoint,
    evidence_type: EvidenceType,
    slop: u32,
    sv_type: SvType,
) -> Result<bool> {
    match sv_type {
        SvType::DELETION => Ok(check_del(
            query_right,
            obs_left,
            obs_right,
            evidence_type,
            slop,
        )),
        other => Err(SvqError::UnsupportedSvType { sv_type: other }),
    }
}

/// Deletion support rule:
/// paired-end evidence needs discordant strands, split-read evidence
/// concordant strands; the observation must sit on the query's right
/// chromosome; and the right sides must intersect, with `slop` widening
/// the window on the upper bound only.
fn check_del(
    query_right: &Breakpoint,
    obs_left: &Breakpoint,
    obs_right: &Breakpoint,
    evidence_type: EvidenceType,
    slop: u32,
) -> bool {
    match evidence_type {
        EvidenceType::PairedEnd => {
            if obs_left.strand == obs_right.strand {
                return false;
            }
        }
        EvidenceType::SplitRead => {
            if obs_left.strand != obs_right.strand {
                return false;
            }
        }
    }

    if query_right.chrom != obs_right.chrom {
        return false;
    }

    obs_right.end >= query_right.start && obs_right.start < query_right.end.saturating_add(slop)
}
