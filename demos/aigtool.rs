use std::path::PathBuf;

use clap::Parser;

use netlist_rs::aiger::{AigerConfig, AigerFormat, UnconnectedFlop};
use netlist_rs::netlist::Netlist;

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Input AIGER file (`.aag` or `.aig`).
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Output AIGER file. The variant follows the extension unless `--binary` is given.
    #[clap(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Write the binary (`aig`) variant.
    #[clap(long)]
    binary: bool,

    /// Remove logic outside the cone of influence of the outputs.
    #[clap(long)]
    prune: bool,

    /// Print the topological order of the logic.
    #[clap(long)]
    order: bool,

    /// Print every node.
    #[clap(long)]
    dump: bool,

    /// Treat outputs as properties when the file has no property sections.
    #[clap(long)]
    legacy: bool,

    /// Fail on flops without a next-state input instead of tying them to false.
    #[clap(long)]
    strict: bool,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Info,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let time_total = std::time::Instant::now();

    let args = Cli::parse();
    println!("args = {:?}", args);

    let read_config = AigerConfig::default().with_outputs_as_properties(args.legacy);
    let mut netlist = Netlist::load_aiger(&args.input, &read_config)?;
    println!("netlist = {:?}", netlist);
    println!(
        "properties: {}, constraints: {}, fair properties: {}, fair constraints: {}",
        netlist.n_properties(),
        netlist.n_constraints(),
        netlist.n_fair_properties(),
        netlist.n_fair_constraints()
    );
    for (signal, name) in netlist.names().take(10) {
        println!("- {} = {:?}", signal, name);
    }

    if args.prune {
        let time_prune = std::time::Instant::now();
        let removed = netlist.remove_unreach()?;
        println!(
            "Removed {} nodes in {:.3} s, netlist = {:?}",
            removed,
            time_prune.elapsed().as_secs_f64(),
            netlist
        );
    }

    if args.order {
        let order = netlist.uporder()?;
        println!("order ({} nodes):", order.len());
        for signal in order {
            println!("- {}", signal);
        }
    }

    if args.dump {
        print!("{}", netlist);
    }

    if let Some(path) = &args.output {
        let format = if args.binary {
            AigerFormat::Binary
        } else {
            AigerFormat::from_path(path).unwrap_or_default()
        };
        let policy = if args.strict {
            UnconnectedFlop::Reject
        } else {
            UnconnectedFlop::ConstFalse
        };
        let config = AigerConfig::default()
            .with_format(format)
            .with_unconnected_flops(policy)
            .with_comment(format!("written by aigtool from {}", args.input.display()));
        netlist.save_aiger(path, &config)?;
        println!("Wrote {} to {}", format.magic(), path.display());
    }

    let time_total = time_total.elapsed();
    println!("Done in {:.3} s", time_total.as_secs_f64());

    Ok(())
}
