//! Command line tool to rank the features on a training corpus and label a test corpus

use anyhow::anyhow;
use burn::config::Config as _;
use decision_list::{
    cli::feature_sets,
    datasets::{senseval, LoadableCorpus},
    pipelines::decision_list::{append_audit, disambiguate, Config, MatchPolicy, Sense},
};
use pico_args::Arguments;

const HELP: &str = "\
Usage: disambiguate TRAIN TEST LOG [OPTIONS]

Arguments:
  TRAIN                The training corpus (Senseval XML with answers)
  TEST                 The test corpus (Senseval XML)
  LOG                  The ranking log to append feature scores to

Options:
  -h, --help           Print help
  -c, --config         A JSON run configuration
  -f, --features       A built-in feature set name (e.g., 'line') or a YAML/JSON feature file
  -t, --tie-sense      The fallback sense on an evenly split corpus ('first' or 'second')
  --first-match        Let the first matching sentence decide an instance
";

#[derive(Debug)]
struct Args {
    train: String,
    test: String,
    log: String,
    config: Option<String>,
    features: Option<String>,
    tie_sense: Option<String>,
    first_match: bool,
}

impl Args {
    fn parse() -> anyhow::Result<Option<Self>> {
        let mut pargs = Arguments::from_env();

        // Help has a higher priority and should be handled separately.
        if pargs.contains(["-h", "--help"]) {
            return Ok(None);
        }

        let args = Args {
            config: pargs.opt_value_from_str(["-c", "--config"])?,
            features: pargs.opt_value_from_str(["-f", "--features"])?,
            tie_sense: pargs.opt_value_from_str(["-t", "--tie-sense"])?,
            first_match: pargs.contains("--first-match"),
            train: required(&mut pargs, "TRAIN")?,
            test: required(&mut pargs, "TEST")?,
            log: required(&mut pargs, "LOG")?,
        };

        Ok(Some(args))
    }

    /// Apply command line overrides on top of the loaded configuration
    fn configure(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => {
                Config::load(path).map_err(|e| anyhow!("Unable to load config file: {}", e))?
            }
            None => Config::new(),
        };

        if let Some(features) = &self.features {
            let is_file = [".yaml", ".yml", ".json"]
                .iter()
                .any(|extension| features.ends_with(*extension));

            if is_file {
                config.feature_file = Some(features.clone());
            } else {
                config.feature_set = features.clone();
                config.feature_file = None;
            }
        }

        if let Some(tie_sense) = &self.tie_sense {
            config.tie_sense = Sense::try_from(tie_sense.as_str())?;
        }

        if self.first_match {
            config.match_policy = MatchPolicy::FirstMatchingSentence;
        }

        Ok(config)
    }
}

fn required(pargs: &mut Arguments, name: &str) -> anyhow::Result<String> {
    pargs.free_from_str().map_err(|e| match e {
        pico_args::Error::MissingArgument => anyhow!("Missing required argument: {}", name),
        _ => anyhow!("{}", e),
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let Some(args) = Args::parse()? else {
        print!("{}", HELP);

        return Ok(());
    };

    let config = args.configure()?;
    let features = feature_sets::resolve(&config).await?;

    let train = senseval::Dataset::load(&args.train).await?;
    let test = senseval::Dataset::load(&args.test).await?;

    let outcome = disambiguate(&features, &train, &test, &config)?;

    append_audit(&outcome.feature_list, &args.log)
        .await
        .map_err(|e| anyhow!("Unable to write ranking log {}: {}", args.log, e))?;

    for answer in outcome.answers() {
        println!("{}", answer);
    }

    Ok(())
}
