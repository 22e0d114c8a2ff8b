use crate::{
    network::Network,
    report::{Event, Reporter, SampleRecord},
    sample::samples,
    Result, RpsErr,
};

/// The outcome of evaluating a network on every pair of moves.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub records: Vec<SampleRecord>,
    /// Average of the per sample mean squared errors, as a percentage.
    pub avg_error: f32,
}

/// Mean squared error between two vectors of the same length.
pub(crate) fn mse(prediction: &[f32], target: &[f32]) -> f32 {
    let dist: f32 = prediction
        .iter()
        .zip(target)
        .map(|(p, t)| (t - p) * (t - p))
        .sum();

    dist / target.len() as f32
}

/// Compares the network's predictions against the rules for every ordered pair of moves.
///
/// The network is only read, so evaluating never changes the outcome of a later training.
///
/// # Errors
/// `RpsErr::Network` if a prediction fails and `RpsErr::OutputMismatch` if the network
/// doesn't predict one value per player.
pub fn evaluate<N, R>(network: &N, label: &'static str, reporter: &mut R) -> Result<Evaluation>
where
    N: Network,
    R: Reporter + ?Sized,
{
    reporter.report(Event::EvaluationStarted { label });

    let mut records = Vec::new();
    let mut sum = 0.0;

    for sample in samples() {
        let prediction = network.predict(&sample.input).map_err(RpsErr::network)?;

        if prediction.len() != sample.target.len() {
            return Err(RpsErr::OutputMismatch {
                got: prediction.len(),
                expected: sample.target.len(),
            });
        }

        let dist = mse(&prediction, &sample.target);
        sum += dist;

        let record = SampleRecord {
            pair: sample.pair,
            input: sample.input,
            prediction,
            target: sample.target.to_vec(),
            error: dist * 100.0,
        };
        reporter.report(Event::Sample(record.clone()));
        records.push(record);
    }

    let avg_error = 100.0 * sum / records.len() as f32;
    log::debug!("{label}: average error {avg_error:.5}%");
    reporter.report(Event::EvaluationFinished { avg_error });

    Ok(Evaluation { records, avg_error })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mse() {
        assert_eq!(mse(&[0.5, 0.0], &[1.0, 0.0]), 0.125);
        assert_eq!(mse(&[1.0, 0.0], &[1.0, 0.0]), 0.0);
    }
}
