use snp_runner::figure::write_figure;
use snp_runner::wiggle::msa_to_wiggle_files;
use std::fs;

#[test]
fn wiggle_from_alignment_file() {
    let dir = tempfile::tempdir().unwrap();
    let msa = dir.path().join("output.afa");
    fs::write(
        &msa,
        ">A/California/07/2009 HA\nATG--GCA\n>A/Texas/05/2009\nATGAAGCT\n>A/Ohio/09/2015\nATCAAGNA\n",
    )
    .unwrap();
    let msa_out = dir.path().join("msa.afa");
    let wig_out = dir.path().join("entropy.wig");

    let columns = msa_to_wiggle_files(&msa, "A/California", &msa_out, &wig_out).unwrap();

    assert_eq!(columns, 6);
    assert_eq!(
        fs::read_to_string(&msa_out).unwrap(),
        ">A/California/07/2009 HA\nATGGCA\n>A/Texas/05/2009\nATGGCT\n>A/Ohio/09/2015\nATCGNA\n"
    );
    let wig = fs::read_to_string(&wig_out).unwrap();
    let positions: Vec<&str> = wig.lines().skip(1).map(|l| l.split(' ').next().unwrap()).collect();
    assert_eq!(positions, vec!["0", "1", "2", "3", "4", "5"]);
    assert!(wig.starts_with("variableStep chrom=A/California/07/2009 HA\n"));
    // the N in the Ohio sequence is ignored, leaving C and C
    assert_eq!(wig.lines().nth(5).unwrap(), "4 0.0");
}

#[test]
fn wiggle_reports_unknown_reference() {
    let dir = tempfile::tempdir().unwrap();
    let msa = dir.path().join("output.afa");
    fs::write(&msa, ">s1\nACGT\n").unwrap();

    let result = msa_to_wiggle_files(&msa, "H3N2", &dir.path().join("m.afa"), &dir.path().join("e.wig"));
    assert!(result.is_err());
}

#[test]
fn figure_from_foma_table() {
    let dir = tempfile::tempdir().unwrap();
    let table = dir.path().join("foma.table");
    fs::write(
        &table,
        "Position\tScore\tNumberOfSequence\n1\t10\t3\n2\t0\t3\nSummary\t-\t-\n",
    )
    .unwrap();

    let prefix = dir.path().join("snp_figure");
    let (svg, rows) = write_figure(&table, prefix.to_str().unwrap()).unwrap();

    assert_eq!(rows, 2);
    assert!(fs::read_to_string(svg).unwrap().contains("Position versus Score and Number of Sequences"));
}
