use clap::*;
use domtree::libs::pairing::MultipleRegistry;
use domtree::libs::phylo::Tree;
use std::io::Write;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("multiples")
        .about("List multi-domain fragments among the leaves")
        .after_help(
            r###"
Prints one line per multi-domain sequence: the prefix and its fragment leaves,
joined by commas, in tree order.

Notes:
* Domain positions such as `_(5-177)` are removed before matching.
* Prefixes carried by a single leaf are not listed.
* With several trees in the input, their lists follow each other.

Examples:
1. List the multiples:
   domtree multiples tests/newick/sister.nwk

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

    let infile = args.get_one::<String>("infile").unwrap();
    let trees = Tree::from_file(infile)?;

    for mut tree in trees {
        super::trim_leaf_names(&mut tree);
        let registry = MultipleRegistry::from_tree(&tree);

        for (id, prefix) in registry.demoted() {
            tracing::info!("leaf {} is a single fragment of {}", id, prefix);
        }

        for (prefix, leaves) in registry.iter() {
            let names: Vec<&str> = leaves
                .iter()
                .filter_map(|&id| tree.get_node(id).and_then(|n| n.name.as_deref()))
                .collect();
            writer.write_fmt(format_args!("{}\t{}\n", prefix, names.join(",")))?;
        }
    }

    Ok(())
}
