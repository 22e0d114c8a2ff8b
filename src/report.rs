use std::io::{self, Write};

use crate::{game::MovePair, network::Topology};

const COLOR_RESET: &str = "\x1b[39;49;0m";
const COLOR_RED: &str = "\x1b[31;1m";
const COLOR_GREEN: &str = "\x1b[32;1m";
const COLOR_YELLOW: &str = "\x1b[33;1m";
const COLOR_OTHER: &str = "\x1b[34;1m";
const COLOR_BLUE: &str = "\x1b[36;1m";

/// The evaluation of a single sample.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleRecord {
    pub pair: MovePair,
    pub input: Vec<f32>,
    pub prediction: Vec<f32>,
    pub target: Vec<f32>,
    /// Mean squared error of the sample, as a percentage.
    pub error: f32,
}

/// Something worth telling about a run.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Topology(Topology),
    EvaluationStarted {
        label: &'static str,
    },
    Sample(SampleRecord),
    EvaluationFinished {
        avg_error: f32,
    },
    TrainingStarted {
        min_avg_error: f32,
    },
    /// Emitted every `PROGRESS_EVERY` epochs.
    Progress { iteration: u64 },
    /// Emitted every `REPORT_EVERY` epochs with the last finished epoch's average error.
    EpochError {
        iteration: u64,
        avg_error: f32,
    },
    Converged {
        iteration: u64,
        avg_error: f32,
    },
    TooManyIterations {
        iteration: u64,
    },
    Saved { path: String },
    Loaded { path: String },
}

/// A sink for the events of a run.
pub trait Reporter {
    fn report(&mut self, event: Event);
}

impl<R: Reporter + ?Sized> Reporter for &mut R {
    fn report(&mut self, event: Event) {
        (**self).report(event)
    }
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoReport;

impl Reporter for NoReport {
    fn report(&mut self, _event: Event) {}
}

/// Keeps every event, in order.
#[derive(Debug, Default, Clone)]
pub struct Recorder {
    pub events: Vec<Event>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn samples(&self) -> impl Iterator<Item = &SampleRecord> {
        self.events.iter().filter_map(|e| match e {
            Event::Sample(record) => Some(record),
            _ => None,
        })
    }
}

impl Reporter for Recorder {
    fn report(&mut self, event: Event) {
        self.events.push(event);
    }
}

/// Writes a colored, human readable transcript of the run.
pub struct ConsoleReporter<W: Write> {
    out: W,
}

impl ConsoleReporter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_event(&mut self, event: &Event) -> io::Result<()> {
        let out = &mut self.out;

        match event {
            Event::Topology(topology) => writeln!(out, "topology: {topology}"),
            Event::EvaluationStarted { label } => writeln!(out, "test {label}:"),
            Event::Sample(record) => {
                write!(out, "{COLOR_BLUE}{:<10}{COLOR_RESET}", record.pair.a)?;
                write!(out, " vs ")?;
                write!(out, "{COLOR_BLUE}{:<10}{COLOR_RESET}", record.pair.b)?;
                write!(out, " src={COLOR_YELLOW}{:?}{COLOR_RESET}", record.input)?;
                write!(out, " res={COLOR_OTHER}[")?;
                for (i, p) in record.prediction.iter().enumerate() {
                    if i > 0 {
                        write!(out, " ")?;
                    }
                    write!(out, "{p:12.7}")?;
                }
                write!(out, "]{COLOR_RESET}")?;
                write!(out, " exp={COLOR_GREEN}{:?}{COLOR_RESET}", record.target)?;
                writeln!(out, " err={COLOR_RED}{:12.7}%{COLOR_RESET}", record.error)
            }
            Event::EvaluationFinished { avg_error } => {
                writeln!(out, "average error: {avg_error:9.5}%\n")
            }
            Event::TrainingStarted { min_avg_error } => {
                writeln!(out, "learning [min avg error: {min_avg_error:.6}]:")
            }
            Event::Progress { .. } => write!(out, "."),
            Event::EpochError { avg_error, .. } => write!(out, "{avg_error:.2}"),
            Event::Converged {
                iteration,
                avg_error,
            } => writeln!(
                out,
                "\naverage error={avg_error:9.5}%\n - {iteration} iterations\n"
            ),
            Event::TooManyIterations { iteration } => {
                writeln!(out, "\ntoo many iterations\n - {iteration} iterations\n")
            }
            Event::Saved { path } => writeln!(out, "saved to {path}"),
            Event::Loaded { path } => writeln!(out, "loaded from {path}"),
        }?;

        out.flush()
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn report(&mut self, event: Event) {
        // the transcript is best effort, a closed stdout must not abort training
        if let Err(e) = self.write_event(&event) {
            log::warn!("failed to write report: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Move;

    fn uncolored(bytes: Vec<u8>) -> String {
        let s = String::from_utf8(bytes).unwrap();
        let colors = [
            COLOR_RESET,
            COLOR_RED,
            COLOR_GREEN,
            COLOR_YELLOW,
            COLOR_OTHER,
            COLOR_BLUE,
        ];
        colors.iter().fold(s, |s, color| s.replace(color, ""))
    }

    #[test]
    fn test_console_sample_line() {
        let mut console = ConsoleReporter::new(Vec::new());
        console.report(Event::Sample(SampleRecord {
            pair: MovePair::new(Move::Paper, Move::Rock),
            input: vec![0., 1., 0., 1., 0., 0.],
            prediction: vec![0.5, 0.25],
            target: vec![1., 0.],
            error: 15.625,
        }));

        let line = uncolored(console.into_inner());
        assert!(line.starts_with("Paper      vs Rock      "), "{line}");
        assert!(
            line.contains("src=[0.0, 1.0, 0.0, 1.0, 0.0, 0.0]"),
            "{line}"
        );
        assert!(line.contains("res=[   0.5000000    0.2500000]"), "{line}");
        assert!(line.contains("exp=[1.0, 0.0]"), "{line}");
        assert!(line.ends_with("err=  15.6250000%\n"), "{line}");
    }

    #[test]
    fn test_console_summary() {
        let mut console = ConsoleReporter::new(Vec::new());
        console.report(Event::EvaluationFinished { avg_error: 1.5 });
        assert_eq!(
            uncolored(console.into_inner()),
            "average error:   1.50000%\n\n"
        );
    }

    #[test]
    fn test_recorder_keeps_order() {
        let mut recorder = Recorder::new();
        recorder.report(Event::Progress { iteration: 1000 });
        recorder.report(Event::TooManyIterations { iteration: 1001 });

        assert_eq!(
            recorder.events,
            vec![
                Event::Progress { iteration: 1000 },
                Event::TooManyIterations { iteration: 1001 }
            ]
        );
    }
}
