extern crate clap;
use clap::*;

mod cmd_domtree;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let app = Command::new("domtree")
        .version(crate_version!())
        .author(crate_authors!())
        .about("`domtree` - Pairing multi-domain fragments on phylogenetic trees")
        .propagate_version(true)
        .arg_required_else_help(true)
        .color(ColorChoice::Auto)
        .subcommand(cmd_domtree::pair::make_subcommand())
        .subcommand(cmd_domtree::multiples::make_subcommand())
        .subcommand(cmd_domtree::rename::make_subcommand())
        .after_help(
            r###"Subcommands:

* pair      - Match clades sharing multi-domain fragments and color the groups
* multiples - List the multi-domain fragments found among the leaves
* rename    - Turn HMMER hit IDs into numbered leaf names

Set RUST_LOG=info to see a summary of each pairing run.

"###,
        );

    match app.get_matches().subcommand() {
        Some(("pair", sub_matches)) => cmd_domtree::pair::execute(sub_matches),
        Some(("multiples", sub_matches)) => cmd_domtree::multiples::execute(sub_matches),
        Some(("rename", sub_matches)) => cmd_domtree::rename::execute(sub_matches),
        _ => unreachable!(),
    }?;

    Ok(())
}
