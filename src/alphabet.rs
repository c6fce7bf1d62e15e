//! Nucleotide/protein detection for FASTA input.

use std::collections::HashSet;

/// Option telling the analysis tool the sequences are nucleotides.
pub const NUCLEOTIDE_FLAG: &str = "-n";

/// Number of residues sampled, and the per-line limit.
const SAMPLE_LEN: usize = 1000;

const NUCLEOTIDES: &[char] = &['A', 'C', 'T', 'G', 'N'];

fn is_sequence_line(line: &str) -> bool {
    !(line.starts_with('>') || line.starts_with('#') || line.starts_with(';'))
}

/// True when the first residues of `fasta` only use `ACTGN` (case-insensitive).
/// Input without any residues counts as nucleotide.
pub fn is_nucleotide(fasta: &str) -> bool {
    let mut sample = String::with_capacity(SAMPLE_LEN * 2);
    for line in fasta.lines().filter(|line| is_sequence_line(line)) {
        sample.extend(line.trim().to_uppercase().chars().take(SAMPLE_LEN));
        if sample.chars().count() >= SAMPLE_LEN {
            break;
        }
    }
    let observed: HashSet<char> = sample.chars().collect();
    observed.iter().all(|c| NUCLEOTIDES.contains(c))
}

/// Appends `-n` to `options` when `fasta` looks like nucleotides and the flag
/// is not already given.
pub fn with_nucleotide_flag(options: &str, fasta: &str) -> String {
    let has_flag = options.split_whitespace().any(|token| token == NUCLEOTIDE_FLAG);
    if has_flag || !is_nucleotide(fasta) {
        return options.to_string();
    }
    if options.trim().is_empty() {
        NUCLEOTIDE_FLAG.to_string()
    } else {
        format!("{} {}", options, NUCLEOTIDE_FLAG)
    }
}
