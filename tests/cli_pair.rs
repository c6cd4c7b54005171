use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn command_pair_sister_clades() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("domtree")?;
    let output = cmd
        .arg("pair")
        .arg("tests/newick/sister.nwk")
        .arg("--keep-root")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert_eq!(
        stdout,
        "((X_1[&&NHX:shape=circle:size=10],Y_1[&&NHX:shape=circle:size=10])[&&NHX:color=#1f77b4:group=0:size=15],\
(X_2[&&NHX:shape=circle:size=10],Y_2[&&NHX:shape=circle:size=10])[&&NHX:color=#1f77b4:group=0:size=15]);\n"
    );

    Ok(())
}

#[test]
fn command_pair_tsv() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("domtree")?;
    cmd.arg("pair")
        .arg("tests/newick/sister.nwk")
        .arg("--format")
        .arg("tsv");
    cmd.assert()
        .success()
        .stdout(predicate::eq("0\t0\t#1f77b4\t2\tX_1,Y_1|X_2,Y_2\n"));

    // Same groups with the connected merge
    let mut cmd = Command::cargo_bin("domtree")?;
    cmd.arg("pair")
        .arg("tests/newick/sister.nwk")
        .arg("--format")
        .arg("tsv")
        .arg("--merge")
        .arg("connected");
    cmd.assert()
        .success()
        .stdout(predicate::eq("0\t0\t#1f77b4\t2\tX_1,Y_1|X_2,Y_2\n"));

    Ok(())
}

#[test]
fn command_pair_disjoint_multiples() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("domtree")?;
    let output = cmd
        .arg("pair")
        .arg("tests/newick/disjoint.nwk")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert!(stdout.contains("X_1[&&NHX:shape=circle:size=10]"));
    assert!(stdout.contains("Y_2[&&NHX:shape=circle:size=10]"));
    assert!(!stdout.contains("group="));
    assert!(stdout.contains("(A,B)"));

    let mut cmd = Command::cargo_bin("domtree")?;
    cmd.arg("pair")
        .arg("tests/newick/disjoint.nwk")
        .arg("--format")
        .arg("tsv");
    cmd.assert().success().stdout(predicate::str::is_empty());

    Ok(())
}

#[test]
fn command_pair_skip_pairing() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("domtree")?;
    let output = cmd
        .arg("pair")
        .arg("stdin")
        .arg("--skip-pairing")
        .write_stdin("((X_1,Y_1),(X_2,Y_2));")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert!(stdout.contains("X_1[&&NHX:shape=circle:size=10]"));
    assert!(!stdout.contains("group="));

    Ok(())
}

#[test]
fn command_pair_trims_and_demotes() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("domtree")?;
    let output = cmd
        .arg("pair")
        .arg("tests/newick/trimmed.nwk")
        .arg("--keep-root")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert!(stdout.contains("A_1:1[&&NHX:shape=circle:size=10]"));
    assert!(stdout.contains("80:1[&&NHX:color=#1f77b4:group=0:size=15]"));
    assert!(stdout.contains("95:1[&&NHX:color=#1f77b4:group=0:size=15]"));
    // P_1 is the only fragment of P
    assert!(stdout.contains(",P:2);"));
    assert!(!stdout.contains("177"));

    Ok(())
}

#[test]
fn command_pair_collapse() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("domtree")?;
    cmd.arg("pair")
        .arg("tests/newick/bracketed.nwk")
        .arg("--keep-root")
        .arg("--format")
        .arg("tsv");
    cmd.assert()
        .success()
        .stdout(predicate::eq("0\t0\t#1f77b4\t2\tX_1,Y_1|X_2,Y_2\n"));

    // The (X_1,Y_1) clade has support 30 and goes away
    let mut cmd = Command::cargo_bin("domtree")?;
    cmd.arg("pair")
        .arg("tests/newick/bracketed.nwk")
        .arg("--keep-root")
        .arg("--collapse")
        .arg("50")
        .arg("--format")
        .arg("tsv");
    cmd.assert().success().stdout(predicate::str::is_empty());

    Ok(())
}

#[test]
fn command_pair_midpoint_nested() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("domtree")?;
    let output = cmd
        .arg("pair")
        .arg("tests/newick/nested.nwk")
        .arg("--format")
        .arg("tsv")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert_eq!(stdout.lines().count(), 1);
    assert!(stdout.starts_with("0\t0\t#1f77b4\t2\t"));
    assert!(stdout.contains("W_1,X_1,Y_1,Z_1"));
    assert!(stdout.contains("W_2,X_2,Y_2,Z_2"));

    Ok(())
}

#[test]
fn command_pair_dot() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("domtree")?;
    cmd.arg("pair")
        .arg("tests/newick/sister.nwk")
        .arg("--format")
        .arg("dot");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("digraph Tree {"))
        .stdout(predicate::str::contains("fillcolor=\"#1f77b4\""))
        .stdout(predicate::str::contains("label=\"X_1\", shape=circle"));

    Ok(())
}

#[test]
fn command_pair_multiple_trees() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("domtree")?;
    let output = cmd
        .arg("pair")
        .arg("stdin")
        .arg("--format")
        .arg("tsv")
        .write_stdin("((X_1,Y_1),(X_2,Y_2));\n((A_1,A_2),(B_1,B_2));\n((P_1,Q_1),(P_2,Q_2));\n")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert_eq!(
        stdout,
        "0\t0\t#1f77b4\t2\tX_1,Y_1|X_2,Y_2\n2\t0\t#1f77b4\t2\tP_1,Q_1|P_2,Q_2\n"
    );

    Ok(())
}

#[test]
fn command_pair_greedy_overlap() -> anyhow::Result<()> {
    // (B_8,C_10) matches both (C_5,(A_6,B_2)) and (D_3,B_4); greedy keeps two groups
    let mut cmd = Command::cargo_bin("domtree")?;
    cmd.arg("pair")
        .arg("tests/newick/overlap.nwk")
        .arg("--keep-root")
        .arg("--format")
        .arg("tsv");
    cmd.assert()
        .success()
        .stdout(predicate::eq(
            "0\t0\t#1f77b4\t3\tA_6,B_2|B_4,D|B_8,C_10\n\
0\t1\t#aec7e8\t2\tA_6,B_2,C_5|B_8,C_10\n\
0\t2\t#ff7f0e\t2\tA_6,B_2,B_4,B_8,C_10,C_5,D|A_9,B_7,C_1\n",
        ))
        .stderr(predicate::str::contains("groups 0 and 1 share nodes"));

    // Connected components fuse the two groups
    let mut cmd = Command::cargo_bin("domtree")?;
    cmd.arg("pair")
        .arg("tests/newick/overlap.nwk")
        .arg("--keep-root")
        .arg("--format")
        .arg("tsv")
        .arg("--merge")
        .arg("connected");
    cmd.assert()
        .success()
        .stdout(predicate::eq(
            "0\t0\t#1f77b4\t4\tA_6,B_2|B_4,D|A_6,B_2,C_5|B_8,C_10\n\
0\t1\t#aec7e8\t2\tA_6,B_2,B_4,B_8,C_10,C_5,D|A_9,B_7,C_1\n",
        ))
        .stderr(predicate::str::contains("share nodes").not());

    Ok(())
}

#[test]
fn command_pair_invalid_threshold() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("domtree")?;
    cmd.arg("pair")
        .arg("tests/newick/sister.nwk")
        .arg("--threshold")
        .arg("1.5");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("threshold"));

    Ok(())
}

#[test]
fn command_pair_parse_error() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("domtree")?;
    cmd.arg("pair").arg("stdin").write_stdin("((A,B);");
    cmd.assert().failure();

    Ok(())
}
