use crate::{
    constants::EVIDENCE_FILE_EXTENSIONS,
    core::containers::interval_tree::{Interval, IntervalTree},
    error::SvqError,
    io::readers::open_evidence_reader,
    utils::util::Result,
};
use std::{
    collections::HashMap,
    io::BufRead,
    path::{Path, PathBuf},
};

/// Interval-indexed evidence for one sample: per-chromosome trees keyed on
/// the left breakpoint interval, each node carrying the raw record line.
#[derive(Debug)]
struct SampleEvidence {
    name: String,
    trees: HashMap<String, IntervalTree<String>>,
}

/// Range index over a directory of per-sample evidence shards.
///
/// Each recognized file (see `EVIDENCE_FILE_EXTENSIONS`; plain or gzip)
/// holds one sample's raw evidence records. Sample order is the
/// lexicographic file-name order, and the file stem is the sample name.
/// Both stored intervals and query windows are closed.
#[derive(Debug)]
pub struct EvidenceIndex {
    dir: PathBuf,
    samples: Vec<SampleEvidence>,
}

impl EvidenceIndex {
    pub fn load<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        let load_error = |message: String| SvqError::IndexLoad {
            path: dir.to_path_buf(),
            message,
        };

        let entries = std::fs::read_dir(dir)
            .map_err(|e| load_error(format!("cannot read directory: {e}")))?;

        let mut shard_paths: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_file() && is_evidence_file(path))
            .collect();
        shard_paths.sort();

        if shard_paths.is_empty() {
            return Err(load_error(format!(
                "no evidence files ({}) found",
                EVIDENCE_FILE_EXTENSIONS.join(", ")
            )));
        }

        let mut samples = Vec::with_capacity(shard_paths.len());
        for path in &shard_paths {
            samples.push(load_sample(path).map_err(|e| load_error(e.to_string()))?);
        }

        log::debug!(
            "Loaded evidence index {} with {} samples",
            dir.display(),
            samples.len()
        );

        Ok(Self {
            dir: dir.to_path_buf(),
            samples,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn sample_count(&self) -> u32 {
        self.samples.len() as u32
    }

    pub fn sample_name(&self, sample_index: usize) -> Option<&str> {
        self.samples.get(sample_index).map(|s| s.name.as_str())
    }

    /// Collects, per sample, the raw record lines whose left breakpoint
    /// interval overlaps the closed window `[start, end]` on `chromosome`.
    pub fn query(&self, chromosome: &str, start: u32, end: u32) -> QueryResultSet<'_> {
        let hits = self
            .samples
            .iter()
            .map(|sample| {
                let mut lines = Vec::new();
                if let Some(tree) = sample.trees.get(chromosome) {
                    tree.visit_overlapping(start, end, &mut |interval| {
                        lines.push(interval.value.as_str());
                    });
                }
                lines
            })
            .collect();
        QueryResultSet { hits }
    }
}

/// Result of one range query: per-sample sequences of raw record lines,
/// borrowed from the index. Released when dropped.
pub struct QueryResultSet<'a> {
    hits: Vec<Vec<&'a str>>,
}

impl<'a> QueryResultSet<'a> {
    pub fn sample_count(&self) -> u32 {
        self.hits.len() as u32
    }

    /// Single-pass iteration over one sample's matching record lines.
    /// Out-of-range sample indexes yield an empty sequence.
    pub fn iter_sample(&self, sample_index: usize) -> impl Iterator<Item = &'a str> + '_ {
        self.hits.get(sample_index).into_iter().flatten().copied()
    }
}

fn is_evidence_file(path: &Path) -> bool {
    let name = path.file_name().map(|n| n.to_string_lossy().to_lowercase());
    match name {
        Some(name) => EVIDENCE_FILE_EXTENSIONS
            .iter()
            .any(|ext| name.ends_with(ext)),
        None => false,
    }
}

fn sample_name_from_path(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let lower = name.to_lowercase();
    for ext in EVIDENCE_FILE_EXTENSIONS {
        if lower.ends_with(ext) {
            return name[..name.len() - ext.len()].to_owned();
        }
    }
    name
}

/// Reads one evidence shard into per-chromosome interval trees. Indexing
/// needs only the first three fields (left chromosome, start, end); full
/// record validation happens at query time.
fn load_sample(path: &Path) -> Result<SampleEvidence> {
    let reader = open_evidence_reader(path)?;
    let mut intervals_by_chrom: HashMap<String, Vec<Interval<String>>> = HashMap::new();

    for (line_number, result_line) in reader.lines().enumerate() {
        let line = result_line.map_err(|e| {
            crate::svq_error!("{} line {}: {}", path.display(), line_number + 1, e)
        })?;
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut fields = line.split('\t');
        let (chrom, start, end) = match (fields.next(), fields.next(), fields.next()) {
            (Some(chrom), Some(start), Some(end)) if !chrom.is_empty() => (chrom, start, end),
            _ => {
                return Err(crate::svq_error!(
                    "{} line {}: expected at least 3 tab-separated fields",
                    path.display(),
                    line_number + 1
                ))
            }
        };
        let start: u32 = start.parse().map_err(|_| {
            crate::svq_error!(
                "{} line {}: invalid start '{}'",
                path.display(),
                line_number + 1,
                start
            )
        })?;
        let end: u32 = end.parse().map_err(|_| {
            crate::svq_error!(
                "{} line {}: invalid end '{}'",
                path.display(),
                line_number + 1,
                end
            )
        })?;

        intervals_by_chrom
            .entry(chrom.to_owned())
            .or_default()
            .push(Interval::new(start, end, line));
    }

    let trees = intervals_by_chrom
        .into_iter()
        .map(|(chrom, intervals)| (chrom, IntervalTree::new(intervals)))
        .collect();

    Ok(SampleEvidence {
        name: sample_name_from_path(path),
        trees,
    })
}
