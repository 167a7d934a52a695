use crate::{
    cli::SearchArgs,
    core::{
        query::{run_query, IndexHandle},
        stats::summarize,
    },
    io::report::{SampleDepth, SearchReport},
    utils::util::Result,
};
use std::{
    fs::File,
    io::{self, Write},
};

pub fn search(args: SearchArgs) -> Result<()> {
    log::info!(
        "Searching {} for {} evidence at {} / {} (slop {})",
        args.index_dir.display(),
        args.sv_type,
        args.left,
        args.right,
        args.slop
    );

    let handle = IndexHandle::new(&args.index_dir);
    let depths = run_query(
        &handle,
        args.sv_type,
        &args.left,
        &args.right,
        args.slop,
        args.sample_ids.as_deref(),
    )?;
    let summary = summarize(&depths);

    let samples = if args.depths {
        let index = handle.get_or_load()?;
        let rows = match &args.sample_ids {
            Some(ids) if !ids.is_empty() => ids
                .iter()
                .zip(&depths)
                .map(|(&id, depth)| {
                    SampleDepth::new(
                        index.sample_name(id as usize).unwrap_or(""),
                        depth,
                    )
                })
                .collect(),
            _ => depths
                .iter()
                .enumerate()
                .map(|(id, depth)| SampleDepth::new(index.sample_name(id).unwrap_or(""), depth))
                .collect(),
        };
        Some(rows)
    } else {
        None
    };

    let report = SearchReport::new(summary, samples);

    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout().lock()),
    };
    if args.json {
        report.write_json(&mut out)?;
    } else {
        report.write_text(&mut out)?;
    }
    out.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Command};
    use clap::Parser;
    use std::path::Path;
    use tempfile::tempdir;

    fn record(left: (&str, u32, u32, i8), right: (&str, u32, u32, i8), evidence: u32) -> String {
        format!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            left.0, left.1, left.2, left.3, right.0, right.1, right.2, right.3, evidence
        )
    }

    fn write_shard(dir: &Path, name: &str, lines: &[String]) {
        std::fs::write(dir.join(name), lines.join("\n") + "\n").unwrap();
    }

    fn run_search(extra: &[&str], index_dir: &Path, output: &Path) {
        let mut argv = vec![
            "svq",
            "search",
            "-i",
            index_dir.to_str().unwrap(),
            "-l",
            "chr1:100-200",
            "-r",
            "chr1:1000-1100",
            "-s",
            "50",
            "-o",
            output.to_str().unwrap(),
        ];
        argv.extend_from_slice(extra);
        let parsed = Cli::try_parse_from(argv).expect("CLI parse should succeed");
        let Command::Search(args) = parsed.command;
        search(args).expect("search should succeed");
    }

    #[test]
    fn test_search_writes_text_report() {
        let index_dir = tempdir().unwrap();
        write_shard(
            index_dir.path(),
            "s1.bed",
            &[record(("chr1", 50, 150, 1), ("chr1", 950, 1050, -1), 0)],
        );
        write_shard(
            index_dir.path(),
            "s2.bed",
            &[record(("chr1", 50, 150, 1), ("chr1", 400, 500, -1), 0)],
        );

        let out_dir = tempdir().unwrap();
        let out_path = out_dir.path().join("report.tsv");
        run_search(&[], index_dir.path(), &out_path);

        let text = std::fs::read_to_string(&out_path).unwrap();
        // One supporting sample, one without evidence.
        assert!(text.contains("zero\tone\t"));
        assert!(text.contains("1\t1\t0\t"));
    }

    #[test]
    fn test_search_writes_json_with_depths() {
        let index_dir = tempdir().unwrap();
        write_shard(
            index_dir.path(),
            "s1.bed",
            &[
                record(("chr1", 50, 150, 1), ("chr1", 950, 1050, -1), 0),
                record(("chr1", 60, 160, -1), ("chr1", 960, 1060, -1), 1),
            ],
        );

        let out_dir = tempdir().unwrap();
        let out_path = out_dir.path().join("report.json");
        run_search(&["--json", "--depths"], index_dir.path(), &out_path);

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&out_path).unwrap()).unwrap();
        assert_eq!(value["samples"][0]["sample"], "s1");
        assert_eq!(value["samples"][0]["paired_end"], 1);
        assert_eq!(value["samples"][0]["split_read"], 1);
        assert_eq!(value["summary"]["zero_count"], 0);
        assert_eq!(value["summary"]["q3"], 2);
    }
}
