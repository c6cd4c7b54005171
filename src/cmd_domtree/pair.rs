use clap::*;
use domtree::libs::pairing::{self, render, MergeStrategy, PairingConfig};
use domtree::libs::phylo::Tree;
use std::io::Write;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("pair")
        .about("Pair clades sharing multi-domain fragments")
        .after_help(
            r###"
Finds clades whose leaves hold fragments of the same multi-domain sequences and
colors each group of matching clades.

Notes:
* Fragments are leaves named `<prefix>_<n>`, e.g. `Q9XYZ1_1`, `Q9XYZ1_2`.
  Domain positions such as `_(5-177)` are removed first.
* A prefix carried by a single leaf is not a multiple; the leaf is renamed
  to the bare prefix.
* Two clades match when the Jaccard index of their fragment prefixes reaches
  the threshold and neither contains the other. Only the most ancestral
  version of a match is kept.
* Support values may be internal labels `(A,B)65:0.8` or bracketed
  comments `(A,B):0.8[65]`.
* The tree is rerooted at its midpoint unless --keep-root is given.

Output formats:
* nwk: Newick with NHX tags (shape, size, group, color)
* dot: Graphviz
* tsv: tree index, group index, color, member count, members (leaf names
  joined by `,`, members separated by `|`)

Examples:
1. Pair and color:
   domtree pair tests/newick/sister.nwk

2. List the groups:
   domtree pair tests/newick/sister.nwk --format tsv

3. Only mark the multiples:
   domtree pair tests/newick/sister.nwk --skip-pairing

"###,
        )
        .arg(
            Arg::new("infile")
                .required(true)
                .num_args(1)
                .index(1)
                .help("Input filename. [stdin] for standard input"),
        )
        .arg(
            Arg::new("threshold")
                .long("threshold")
                .short('s')
                .num_args(1)
                .default_value("0.5")
                .value_parser(value_parser!(f64))
                .help("Minimal score in both directions"),
        )
        .arg(
            Arg::new("skip_pairing")
                .long("skip-pairing")
                .action(ArgAction::SetTrue)
                .help("Only mark the multiples"),
        )
        .arg(
            Arg::new("merge")
                .long("merge")
                .num_args(1)
                .default_value("greedy")
                .value_parser(["greedy", "connected"])
                .help("How matches are merged into groups"),
        )
        .arg(
            Arg::new("collapse")
                .long("collapse")
                .num_args(1)
                .value_parser(value_parser!(f64))
                .help("Collapse internal nodes with support below this value"),
        )
        .arg(
            Arg::new("keep_root")
                .long("keep-root")
                .action(ArgAction::SetTrue)
                .help("Do not reroot at the midpoint"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .num_args(1)
                .default_value("nwk")
                .value_parser([
                    builder::PossibleValue::new("nwk"),
                    builder::PossibleValue::new("dot"),
                    builder::PossibleValue::new("tsv"),
                ])
                .help("Output format"),
        )
        .arg(
            Arg::new("outfile")
                .short('o')
                .long("outfile")
                .num_args(1)
                .default_value("stdout")
                .help("Output filename. [stdout] for screen"),
        )
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    let mut writer = intspan::writer(args.get_one::<String>("outfile").unwrap());

    let config = PairingConfig {
        threshold: *args.get_one::<f64>("threshold").unwrap(),
        skip_pairing: args.get_flag("skip_pairing"),
        merge: args
            .get_one::<String>("merge")
            .unwrap()
            .parse::<MergeStrategy>()
            .map_err(|e| anyhow::anyhow!(e))?,
    };
    config.validate()?;

    let collapse = args.get_one::<f64>("collapse").copied();
    let keep_root = args.get_flag("keep_root");
    let format = args.get_one::<String>("format").unwrap();

    let infile = args.get_one::<String>("infile").unwrap();
    let trees = Tree::from_file(infile)?;

    for (tree_index, mut tree) in trees.into_iter().enumerate() {
        tree.labels_to_support();
        super::trim_leaf_names(&mut tree);

        if !keep_root {
            tree.midpoint_root()?;
        }
        if let Some(cutoff) = collapse {
            let n = tree.collapse_low_support(cutoff);
            tracing::debug!("collapsed {} nodes with support below {}", n, cutoff);
        }

        let report = pairing::pair_tree(&mut tree, &config)?;
        render::style_multiples(&mut tree, &report.registry);
        render::style_groups(&mut tree, &report.groups);

        match format.as_str() {
            "dot" => writer.write_all(tree.to_dot().as_bytes())?,
            "tsv" => writer.write_all(
                render::groups_to_tsv(tree_index, &tree, &report.groups).as_bytes(),
            )?,
            _ => writer.write_fmt(format_args!("{}\n", tree.to_newick()))?,
        }
    }

    Ok(())
}
