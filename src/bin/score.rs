//! Command line tool to score predicted answers against a gold key

use anyhow::{anyhow, Result};
use decision_list::scoring::score_files;
use pico_args::Arguments;

const HELP: &str = "\
Usage: score PREDICTED GOLD

Arguments:
  PREDICTED            The answers written by disambiguate
  GOLD                 The gold answer key

Options:
  -h, --help           Print help
";

#[derive(Debug)]
struct Args {
    /// Prints the usage menu
    help: bool,

    /// The predicted answers
    predicted: String,

    /// The gold answers
    gold: String,
}

fn parse_args() -> Result<Args, pico_args::Error> {
    let mut pargs = Arguments::from_env();

    let help = pargs.contains(["-h", "--help"]);
    if help {
        return Ok(Args {
            help,
            predicted: String::new(),
            gold: String::new(),
        });
    }

    let args = Args {
        help,
        predicted: pargs.free_from_str()?,
        gold: pargs.free_from_str()?,
    };

    Ok(args)
}

#[tokio::main]
async fn main() -> Result<()> {
    pretty_env_logger::init();

    let args = parse_args().map_err(|e| anyhow!("{}\n\n{}", e, HELP))?;

    if args.help {
        println!("{}", HELP);
        return Ok(());
    }

    let report = score_files(&args.predicted, &args.gold).await?;

    log::info!(
        "{} of {} gold instances matched",
        report.matched,
        report.total
    );
    print!("{}", report);

    Ok(())
}
