//! End-to-end runs of each command over small fixture files.

use std::fs;
use std::path::PathBuf;

use genetools::commands::{
    collapse_annotations, filter_by_ids, fix_reference_alleles, generate_mutations,
    resolve_gene_sets,
};
use genetools::sequences::MutationKind;
use genetools::test_utilities::{temp_fasta, temp_text};
use tempfile::NamedTempFile;

fn out_path(file: &NamedTempFile) -> PathBuf {
    file.path().to_path_buf()
}

#[test]
fn filter_keeps_listed_ids_in_order() {
    let ids = temp_text("id1\nid3\n");
    let input = temp_text("id1\tfoo\nid2\tbar\nid3\tbaz\n");
    let output = NamedTempFile::new().unwrap();

    filter_by_ids(
        &ids.path().to_path_buf(),
        Some(&input.path().to_path_buf()),
        1,
        None,
        Some(&out_path(&output)),
    )
    .unwrap();

    let written = fs::read_to_string(output.path()).unwrap();
    assert_eq!(written, "id1\tfoo\nid3\tbaz\n");
}

#[test]
fn filter_resolves_named_key_column_from_header() {
    let ids = temp_text("ENSG002\n");
    let input = temp_text(
        "gene_id\tgene_name\nENSG001\tTP53\nENSG002\tKRAS\n",
    );
    let output = NamedTempFile::new().unwrap();

    filter_by_ids(
        &ids.path().to_path_buf(),
        Some(&input.path().to_path_buf()),
        1,
        Some("gene_id"),
        Some(&out_path(&output)),
    )
    .unwrap();

    let written = fs::read_to_string(output.path()).unwrap();
    assert_eq!(written, "gene_id\tgene_name\nENSG002\tKRAS\n");
}

#[test]
fn filter_fails_fast_on_missing_named_column() {
    let ids = temp_text("ENSG002\n");
    let input = temp_text("gene_id\tgene_name\nENSG001\tTP53\n");

    let err = filter_by_ids(
        &ids.path().to_path_buf(),
        Some(&input.path().to_path_buf()),
        1,
        Some("transcript_id"),
        None,
    )
    .unwrap_err();
    assert!(err.to_string().contains("transcript_id"));
}

#[test]
fn filter_drops_short_rows_and_keeps_comments() {
    let ids = temp_text("id1\n");
    // column 2 is the key; the second row is too short to have it
    let input = temp_text("#header line\nfoo\tid1\nbar\nbaz\tid2\n");
    let output = NamedTempFile::new().unwrap();

    filter_by_ids(
        &ids.path().to_path_buf(),
        Some(&input.path().to_path_buf()),
        2,
        None,
        Some(&out_path(&output)),
    )
    .unwrap();

    let written = fs::read_to_string(output.path()).unwrap();
    assert_eq!(written, "#header line\nfoo\tid1\n");
}

#[test]
fn collapse_rewrites_only_annotated_records() {
    let input = temp_text(
        "##fileformat=VCFv4.2\n\
         #CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\n\
         chr1\t100\t.\tA\tT\t50\tPASS\tDP=10;ANN=a,b,c;AF=0.1\n\
         chr1\t200\t.\tC\tG\t50\tPASS\tDP=7;AF=0.2\n\
         not a vcf row\n",
    );
    let output = NamedTempFile::new().unwrap();

    collapse_annotations(Some(&input.path().to_path_buf()), Some(&out_path(&output))).unwrap();

    let written = fs::read_to_string(output.path()).unwrap();
    assert_eq!(
        written,
        "##fileformat=VCFv4.2\n\
         #CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\n\
         chr1\t100\t.\tA\tT\t50\tPASS\tDP=10;ANN=a;AF=0.1\n\
         chr1\t200\t.\tC\tG\t50\tPASS\tDP=7;AF=0.2\n\
         not a vcf row\n"
    );
}

#[test]
fn resolve_rewrites_gene_sets_and_drops_unknowns() {
    let genes = temp_text("ENSG001\tTP53\nENSG002\tKRAS\tKRAS2\n");
    let hgnc = temp_text("HGNC:1\tTP53\tx\tx\tx\tx\tLFS1\tx\tp53\n");
    let input = temp_text("setA\tdescription\tTP53\tKRAS2\tp53\tUNKNOWN\n");
    let output = NamedTempFile::new().unwrap();

    resolve_gene_sets(
        &genes.path().to_path_buf(),
        &[hgnc.path().to_path_buf()],
        Some(&input.path().to_path_buf()),
        Some(&out_path(&output)),
    )
    .unwrap();

    let written = fs::read_to_string(output.path()).unwrap();
    assert_eq!(written, "setA\tdescription\tTP53\tKRAS\tTP53\n");
}

#[test]
fn mutate_emits_one_vcf_row_per_position() {
    let fasta = temp_fasta(&[("chr1", "ACGT")]);
    let output = NamedTempFile::new().unwrap();

    generate_mutations(
        &fasta.path().to_path_buf(),
        "chr1",
        0,
        4,
        MutationKind::Snv,
        'T',
        Some(&out_path(&output)),
    )
    .unwrap();

    let written = fs::read_to_string(output.path()).unwrap();
    assert_eq!(
        written,
        "chr1\t1\t.\tA\tT\t.\t.\t.\n\
         chr1\t2\t.\tC\tG\t.\t.\t.\n\
         chr1\t3\t.\tG\tC\t.\t.\t.\n\
         chr1\t4\t.\tT\tA\t.\t.\t.\n"
    );
}

#[test]
fn mutate_deletion_skips_past_end_positions() {
    let fasta = temp_fasta(&[("chr1", "ACGT")]);
    let output = NamedTempFile::new().unwrap();

    generate_mutations(
        &fasta.path().to_path_buf(),
        "chr1",
        2,
        4,
        MutationKind::Deletion,
        'T',
        Some(&out_path(&output)),
    )
    .unwrap();

    // position 3 has no two-base window, so only position 2 is emitted
    let written = fs::read_to_string(output.path()).unwrap();
    assert_eq!(written, "chr1\t3\t.\tGT\tG\t.\t.\t.\n");
}

#[test]
fn mutate_rejects_inverted_range() {
    let fasta = temp_fasta(&[("chr1", "ACGT")]);
    let result = generate_mutations(
        &fasta.path().to_path_buf(),
        "chr1",
        3,
        3,
        MutationKind::Snv,
        'T',
        None,
    );
    assert!(result.is_err());
}

#[test]
fn fix_ref_corrects_mismatches_and_skips_bad_records() {
    let fasta = temp_fasta(&[("chr1", "ACGTACGT")]);
    let input = temp_text(
        "#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\n\
         chr1\t2\t.\tG\tT\t.\tPASS\tDP=1\n\
         chr1\t8\t.\tTA\tT\t.\tPASS\tDP=2\n\
         chr2\t1\t.\tA\tC\t.\tPASS\tDP=3\n",
    );
    let output = NamedTempFile::new().unwrap();

    fix_reference_alleles(
        &fasta.path().to_path_buf(),
        Some(&input.path().to_path_buf()),
        Some(&out_path(&output)),
    )
    .unwrap();

    // row 1: REF G corrected to C; row 2: window [7, 9) exceeds the
    // 8-base chromosome and is skipped; row 3: chr2 is absent and skipped
    let written = fs::read_to_string(output.path()).unwrap();
    assert_eq!(
        written,
        "#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\n\
         chr1\t2\t.\tC\tT\t.\tPASS\tDP=1\n"
    );
}
