use crate::{
    network::Network,
    report::{Event, Reporter},
    sample::{samples, Sample},
    Result, RpsErr,
};

/// A progress event is emitted every `PROGRESS_EVERY` epochs.
pub const PROGRESS_EVERY: u64 = 1000;

/// The last epoch's average error is reported every `REPORT_EVERY` epochs.
pub const REPORT_EVERY: u64 = 5000;

/// The stopping criteria and step length of a training.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainParams {
    pub learning_rate: f32,
    /// Training stops once an epoch's average error, as a percentage, is strictly below this.
    pub min_avg_error: f32,
    pub max_iterations: u64,
}

/// How a training ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainOutcome {
    /// The epoch the training stopped at, `max_iterations + 1` if it did not converge.
    pub iterations: u64,
    pub converged: bool,
    /// Average error of the last finished epoch, as a percentage. `None` if no epoch ran.
    pub avg_error: Option<f32>,
}

/// Trains `network` with online updates, sweeping every pair of moves on each epoch, until the
/// epoch's average error drops below `params.min_avg_error` or `params.max_iterations` epochs
/// have run.
///
/// # Errors
/// `RpsErr::Network` as soon as a training step fails.
pub fn train<N, R>(network: &mut N, params: &TrainParams, reporter: &mut R) -> Result<TrainOutcome>
where
    N: Network,
    R: Reporter + ?Sized,
{
    reporter.report(Event::TrainingStarted {
        min_avg_error: params.min_avg_error,
    });

    let samples: Vec<Sample> = samples().collect();
    let mut last_avg = None;
    let mut i: u64 = 0;

    loop {
        if i % PROGRESS_EVERY == 0 {
            reporter.report(Event::Progress { iteration: i });
        }
        i += 1;

        if i % REPORT_EVERY == 0 {
            if let Some(avg_error) = last_avg {
                reporter.report(Event::EpochError {
                    iteration: i,
                    avg_error,
                });
            }
        }

        if i > params.max_iterations {
            log::warn!("no convergence after {} epochs", params.max_iterations);
            reporter.report(Event::TooManyIterations { iteration: i });

            return Ok(TrainOutcome {
                iterations: i,
                converged: false,
                avg_error: last_avg,
            });
        }

        let avg_error = epoch(network, &samples, params.learning_rate)?;
        last_avg = Some(avg_error);

        if avg_error < params.min_avg_error {
            log::info!("converged after {i} epochs, average error {avg_error:.5}%");
            reporter.report(Event::Converged {
                iteration: i,
                avg_error,
            });

            return Ok(TrainOutcome {
                iterations: i,
                converged: true,
                avg_error: last_avg,
            });
        }
    }
}

/// Submits every sample once and returns the average error as a percentage.
fn epoch<N: Network>(network: &mut N, samples: &[Sample], learning_rate: f32) -> Result<f32> {
    let mut sum = 0.0;

    for sample in samples {
        sum += network
            .train(&sample.input, &sample.target, learning_rate)
            .map_err(RpsErr::network)?;
    }

    Ok(100.0 * sum / samples.len() as f32)
}
