use crate::{error::SvqError, utils::util::Result};
use flate2::read::MultiGzDecoder;
use std::{
    fs::File,
    io::{BufReader, Read as ioRead},
    path::Path,
};

pub fn open_evidence_reader(path: &Path) -> Result<BufReader<Box<dyn ioRead>>> {
    fn is_gzipped(path: &Path) -> bool {
        let path_str = path.to_string_lossy().to_lowercase();
        path_str.ends_with(".gz") || path_str.ends_with(".gzip")
    }
    let file = File::open(path)
        .map_err(|error| crate::svq_error!("Failed to open file {}: {error}", path.display()))?;
    if is_gzipped(path) {
        let gz_decoder = MultiGzDecoder::new(file);
        if gz_decoder.header().is_some() {
            Ok(BufReader::new(Box::new(gz_decoder)))
        } else {
            Err(SvqError::InvalidGzipHeader {
                path: path.to_path_buf(),
            })
        }
    } else {
        Ok(BufReader::new(Box::new(file)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::{write::GzEncoder, Compression};
    use std::io::{BufRead, Write};
    use tempfile::tempdir;

    #[test]
    fn test_open_plain_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sample.bed");
        std::fs::write(&path, "chr1\t1\t2\n").unwrap();

        let reader = open_evidence_reader(&path).unwrap();
        let lines: Vec<String> = reader.lines().map(|l| l.unwrap()).collect();
        assert_eq!(lines, vec!["chr1\t1\t2"]);
    }

    #[test]
    fn test_open_gzipped_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sample.bed.gz");
        let mut encoder = GzEncoder::new(File::create(&path).unwrap(), Compression::default());
        encoder.write_all(b"chr1\t1\t2\nchr2\t3\t4\n").unwrap();
        encoder.finish().unwrap();

        let reader = open_evidence_reader(&path).unwrap();
        let lines: Vec<String> = reader.lines().map(|l| l.unwrap()).collect();
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn test_open_fake_gzip_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sample.bed.gz");
        std::fs::write(&path, "not actually gzip").unwrap();

        let err = open_evidence_reader(&path).err().unwrap();
        assert!(matches!(err, SvqError::InvalidGzipHeader { .. }));
    }

    #[test]
    fn test_open_missing_file_fails() {
        let dir = tempdir().unwrap();
        let err = open_evidence_reader(&dir.path().join("absent.bed")).err().unwrap();
        assert!(matches!(err, SvqError::Message(_)));
    }
}
