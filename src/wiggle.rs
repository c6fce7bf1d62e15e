//! Per-column Shannon entropy of a multiple sequence alignment, reported along
//! a reference sequence as a `variableStep` wiggle track.
//!
//! Columns where the reference has a gap are dropped from both the wiggle and
//! the reduced alignment written next to it.

use anyhow::{anyhow, bail, Context, Result};
use bio::io::fasta;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;
use tracing::info;

/// Scale applied to the entropy in bits.
const ENTROPY_SCALE: f64 = 100.0;

fn is_gap(base: u8) -> bool {
    matches!(base, b'-' | b'.' | b'_' | b'~')
}

fn is_unknown(base: u8) -> bool {
    base == b'n' || base == b'N'
}

struct AlignedRecord {
    id: String,
    desc: Option<String>,
    seq: Vec<u8>,
}

impl AlignedRecord {
    fn header(&self) -> String {
        match &self.desc {
            Some(desc) => format!("{} {}", self.id, desc),
            None => self.id.clone(),
        }
    }
}

/// Scaled Shannon entropy `-100 * sum(p * log2 p)` of one column, ignoring
/// `N`/`n`. Never negative.
pub fn column_entropy(column: &[u8]) -> f64 {
    let mut counts: HashMap<u8, usize> = HashMap::new();
    for &base in column.iter().filter(|b| !is_unknown(**b)) {
        *counts.entry(base).or_insert(0) += 1;
    }
    let total: usize = counts.values().sum();
    if total == 0 {
        return 0.0;
    }
    let entropy = -ENTROPY_SCALE
        * counts
            .values()
            .map(|&count| {
                let p = count as f64 / total as f64;
                p * p.log2()
            })
            .sum::<f64>();
    if entropy > 0.0 {
        entropy
    } else {
        0.0
    }
}

/// Drops `;` and `#` comment lines, which the FASTA reader would otherwise
/// reject or glue onto the sequence.
fn strip_comments<R: Read>(msa: R) -> Result<Vec<u8>> {
    let mut kept = Vec::new();
    for line in BufReader::new(msa).split(b'\n') {
        let line = line.context("Failed to read alignment")?;
        if matches!(line.first(), Some(b';') | Some(b'#')) {
            continue;
        }
        kept.extend_from_slice(&line);
        kept.push(b'\n');
    }
    Ok(kept)
}

fn read_alignment<R: Read>(msa: R) -> Result<Vec<AlignedRecord>> {
    let content = strip_comments(msa)?;
    fasta::Reader::new(content.as_slice())
        .records()
        .map(|record| {
            let record = record.context("Failed to parse alignment record")?;
            Ok(AlignedRecord {
                id: record.id().to_string(),
                desc: record.desc().map(str::to_string),
                seq: record.seq().to_vec(),
            })
        })
        .collect()
}

/// Writes the reduced alignment to `msa_out` and the entropy track to
/// `wig_out`. `seq_id` selects the first record whose header starts with it.
/// Returns the number of columns kept.
pub fn msa_to_wiggle<R: Read, M: Write, W: Write>(
    msa: R,
    seq_id: &str,
    msa_out: M,
    mut wig_out: W,
) -> Result<usize> {
    let mut records = read_alignment(msa)?;
    let ref_idx = records
        .iter()
        .position(|r| r.header().starts_with(seq_id))
        .ok_or_else(|| anyhow!("No sequence with id starting with {:?} in alignment", seq_id))?;
    let reference = records.remove(ref_idx);

    if let Some(short) = records.iter().find(|r| r.seq.len() < reference.seq.len()) {
        bail!(
            "Sequence {} has {} columns but reference {} has {}",
            short.id,
            short.seq.len(),
            reference.id,
            reference.seq.len()
        );
    }

    writeln!(wig_out, "variableStep chrom={}", reference.header())?;

    let mut kept_ref = Vec::with_capacity(reference.seq.len());
    let mut kept: Vec<Vec<u8>> = vec![Vec::with_capacity(reference.seq.len()); records.len()];
    let mut column = Vec::with_capacity(records.len() + 1);
    let mut skip = 0;
    for (i, &ref_base) in reference.seq.iter().enumerate() {
        if is_gap(ref_base) {
            skip += 1;
            continue;
        }
        column.clear();
        column.push(ref_base);
        kept_ref.push(ref_base);
        for (record, out) in records.iter().zip(kept.iter_mut()) {
            column.push(record.seq[i]);
            out.push(record.seq[i]);
        }
        writeln!(wig_out, "{} {:?}", i - skip, column_entropy(&column))?;
    }
    wig_out.flush()?;

    let mut writer = fasta::Writer::new(msa_out);
    writer.write(&reference.id, reference.desc.as_deref(), &kept_ref)?;
    for (record, seq) in records.iter().zip(kept.iter()) {
        writer.write(&record.id, record.desc.as_deref(), seq)?;
    }
    writer.flush()?;

    Ok(kept_ref.len())
}

/// File based [`msa_to_wiggle`]; the alignment may be compressed.
pub fn msa_to_wiggle_files(msa_path: &Path, seq_id: &str, msa_output: &Path, wig_output: &Path) -> Result<usize> {
    let started = chrono::Local::now();
    info!("Started MSA to wiggle on {} for {}", started.format("%Y-%m-%d %H:%M:%S"), msa_path.display());

    let (reader, _format) = niffler::from_path(msa_path)
        .with_context(|| format!("Failed to open alignment {}", msa_path.display()))?;
    let msa_out = File::create(msa_output)
        .with_context(|| format!("Failed to create {}", msa_output.display()))?;
    let wig_out = File::create(wig_output)
        .with_context(|| format!("Failed to create {}", wig_output.display()))?;

    let columns = msa_to_wiggle(reader, seq_id, BufWriter::new(msa_out), BufWriter::new(wig_out))?;

    let elapsed = chrono::Local::now() - started;
    info!(
        "There were {} columns extracted in {}.{:03}s",
        columns,
        elapsed.num_seconds(),
        elapsed.num_milliseconds() % 1000
    );
    Ok(columns)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALIGNMENT: &str = ">ref A/Ohio/1 segment 4\nAC-GT\n>s1\nACTGA\n>s2\nNCTGT\n";

    fn run(alignment: &str, seq_id: &str) -> Result<(usize, String, String)> {
        let mut msa = Vec::new();
        let mut wig = Vec::new();
        let columns = msa_to_wiggle(alignment.as_bytes(), seq_id, &mut msa, &mut wig)?;
        Ok((columns, String::from_utf8(msa)?, String::from_utf8(wig)?))
    }

    #[test]
    fn test_column_entropy() {
        assert_eq!(column_entropy(b"AAAA"), 0.0);
        assert!((column_entropy(b"ACGT") - 200.0).abs() < 1e-9);
        assert!((column_entropy(b"AAcc") - 100.0).abs() < 1e-9);
        // unknown bases are ignored, an all-N column has no entropy
        assert!((column_entropy(b"ANTn") - 100.0).abs() < 1e-9);
        assert_eq!(column_entropy(b"NNnn"), 0.0);
        assert_eq!(column_entropy(b""), 0.0);
    }

    #[test]
    fn test_reference_gaps_are_dropped() {
        let (columns, msa, wig) = run(ALIGNMENT, "ref").unwrap();
        assert_eq!(columns, 4);
        assert_eq!(msa, ">ref A/Ohio/1 segment 4\nACGT\n>s1\nACGA\n>s2\nNCGT\n");

        let lines: Vec<&str> = wig.lines().collect();
        assert_eq!(lines[0], "variableStep chrom=ref A/Ohio/1 segment 4");
        assert_eq!(&lines[1..4], &["0 0.0", "1 0.0", "2 0.0"]);

        let (pos, value) = lines[4].split_once(' ').unwrap();
        assert_eq!(pos, "3");
        let expected = -100.0 * ((2.0f64 / 3.0) * (2.0f64 / 3.0).log2() + (1.0f64 / 3.0) * (1.0f64 / 3.0).log2());
        assert!((value.parse::<f64>().unwrap() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_reference_matched_by_prefix_in_any_position() {
        let (columns, msa, _) = run(ALIGNMENT, "s1").unwrap();
        assert_eq!(columns, 5);
        assert!(msa.starts_with(">s1\nACTGA\n>ref A/Ohio/1 segment 4\nAC-GT\n"));
    }

    #[test]
    fn test_comment_lines_are_skipped() {
        let with_header_comment = "# produced by muscle\n>ref\nAC-GT\n>s1\nACTGA\n";
        let (columns, msa, _) = run(with_header_comment, "ref").unwrap();
        assert_eq!(columns, 4);
        assert_eq!(msa, ">ref\nACGT\n>s1\nACGA\n");

        let with_inline_comment = ">ref\n;comment\nAC-GT\n>s1\nACT\n# wrapped\nGA\n";
        let (columns, msa, wig) = run(with_inline_comment, "ref").unwrap();
        assert_eq!(columns, 4);
        assert_eq!(msa, ">ref\nACGT\n>s1\nACGA\n");
        assert_eq!(wig.lines().count(), 5);
    }

    #[test]
    fn test_missing_reference() {
        let err = run(ALIGNMENT, "H3N2").unwrap_err();
        assert!(err.to_string().contains("H3N2"));
    }

    #[test]
    fn test_ragged_alignment() {
        let err = run(">ref\nACGT\n>s1\nAC\n", "ref").unwrap_err();
        assert!(err.to_string().contains("s1"));
    }
}
