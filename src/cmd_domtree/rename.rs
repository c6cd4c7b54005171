use clap::*;
use domtree::libs::names::{hmmer_name_mapping, HmmerStyle};
use domtree::libs::phylo::Tree;
use std::io::Write;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("rename")
        .about("Turn HMMER hit IDs into numbered leaf names")
        .after_help(
            r###"
Renames HMMER domain hits so that fragments of one sequence are numbered by
their position: `query_1`, `query_2`, ...

Notes:
* The ` [subseq from] ...` tail is dropped (` _subseq ...` with --rsga).
* The query is the text before `/` (before the first `<start>-<end>` with --rsga).
* Names already ending in `_<digit>` are kept.
* A query with a single hit becomes `query_1`.
* Labels with spaces or brackets must be quoted in the Newick input.

Examples:
1. Rename the leaves of a tree:
   domtree rename tests/newick/hmmer.nwk

2. Print the mapping of a list of names:
   domtree rename tests/newick/hmmer.lst --list

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
            Arg::new("rsga")
                .long("rsga")
                .action(ArgAction::SetTrue)
                .help("Names use the ` _subseq` marker and no `/`"),
        )
        .arg(
            Arg::new("list")
                .long("list")
                .action(ArgAction::SetTrue)
                .help("Input is one name per line; print old<TAB>new"),
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
    let style = if args.get_flag("rsga") {
        HmmerStyle::Rsga
    } else {
        HmmerStyle::Bracketed
    };

    if args.get_flag("list") {
        let names: Vec<String> = intspan::read_lines(infile)
            .into_iter()
            .map(|line| line.trim_end().to_string())
            .filter(|line| !line.is_empty())
            .collect();

        for (old, new) in hmmer_name_mapping(&names, style)? {
            writer.write_fmt(format_args!("{}\t{}\n", old, new))?;
        }
        return Ok(());
    }

    let trees = Tree::from_file(infile)?;
    for mut tree in trees {
        let leaves: Vec<_> = tree
            .get_leaves()
            .into_iter()
            .filter_map(|id| {
                tree.get_node(id)
                    .and_then(|n| n.name.clone())
                    .map(|name| (id, name))
            })
            .collect();
        let names: Vec<&str> = leaves.iter().map(|(_, name)| name.as_str()).collect();
        let mapping = hmmer_name_mapping(&names, style)?;

        for (id, name) in &leaves {
            if let (Some(new), Some(node)) = (mapping.get(name), tree.get_node_mut(*id)) {
                node.set_name(new.as_str());
            }
        }

        writer.write_fmt(format_args!("{}\n", tree.to_newick()))?;
    }

    Ok(())
}
