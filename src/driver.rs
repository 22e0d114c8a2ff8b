use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

use log::info;

use crate::{
    config::RunConfig,
    evaluator::{evaluate, Evaluation},
    network::Network,
    report::{Event, Reporter},
    trainer::{train, TrainOutcome},
    Result, RpsErr,
};

/// The evaluations and training outcome of a `learn_and_save` run.
#[derive(Debug, Clone, PartialEq)]
pub struct LearnReport {
    pub before: Evaluation,
    pub training: TrainOutcome,
    pub after: Evaluation,
}

/// Creates a network, trains it and writes it to `config.model_path`, evaluating it before and
/// after training.
///
/// Not converging is not an error: the network is evaluated and saved all the same.
///
/// # Errors
/// The first failure of creation, training, evaluation, file creation or serialization.
pub fn learn_and_save<N, R>(config: &RunConfig, reporter: &mut R) -> Result<(N, LearnReport)>
where
    N: Network,
    R: Reporter + ?Sized,
{
    config.validate()?;

    let mut network = N::create(&config.topology, config.seed).map_err(RpsErr::network)?;
    info!("created network with topology {}", config.topology);
    reporter.report(Event::Topology(network.topology()));

    let before = evaluate(&network, "before training", reporter)?;
    let training = train(&mut network, &config.train_params(), reporter)?;
    let after = evaluate(&network, "after training", reporter)?;

    save(&network, &config.model_path)?;
    info!("saved network to {}", config.model_path.display());
    reporter.report(Event::Saved {
        path: config.model_path.display().to_string(),
    });

    let report = LearnReport {
        before,
        training,
        after,
    };

    Ok((network, report))
}

/// Reads a network from `path` and evaluates it once.
///
/// # Errors
/// `RpsErr::Io` if the file can't be opened, `RpsErr::Network` if it doesn't hold a network
/// and `RpsErr::InvalidTopology` if the network doesn't fit the game.
pub fn load_and_test<N, R, P>(path: P, reporter: &mut R) -> Result<(N, Evaluation)>
where
    N: Network,
    R: Reporter + ?Sized,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let network = load::<N>(path)?;

    let topology = network.topology();
    topology.validate()?;
    info!(
        "loaded network with topology {topology} from {}",
        path.display()
    );
    reporter.report(Event::Loaded {
        path: path.display().to_string(),
    });
    reporter.report(Event::Topology(topology));

    let evaluation = evaluate(&network, "after loading", reporter)?;
    Ok((network, evaluation))
}

/// Writes `network` to `path`, truncating any previous content.
///
/// # Errors
/// `RpsErr::Io` if the file can't be created or flushed, `RpsErr::Network` if serialization
/// fails.
pub fn save<N: Network>(network: &N, path: &Path) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    network.save(&mut writer).map_err(RpsErr::network)?;
    writer.flush()?;
    Ok(())
}

/// Reads a network from `path`.
///
/// # Errors
/// `RpsErr::Io` if the file can't be opened, `RpsErr::Network` if deserialization fails.
pub fn load<N: Network>(path: &Path) -> Result<N> {
    let reader = BufReader::new(File::open(path)?);
    N::load(reader).map_err(RpsErr::network)
}
