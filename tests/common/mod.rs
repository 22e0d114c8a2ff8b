#![allow(dead_code)]

use std::{
    error::Error,
    fmt,
    io::{Read, Write},
};

use rps_learn::network::{Network, Topology};

#[derive(Debug)]
pub struct FakeErr(pub &'static str);

impl fmt::Display for FakeErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fake network error: {}", self.0)
    }
}

impl Error for FakeErr {}

/// A network whose training error per epoch is scripted. Every sample of epoch `k` reports
/// `errors[k]`, the last value repeating forever.
#[derive(Debug, Clone)]
pub struct ScriptedNet {
    pub errors: Vec<f32>,
    pub steps: usize,
    pub outputs: usize,
    pub fail_at_step: Option<usize>,
}

impl ScriptedNet {
    pub fn new(errors: Vec<f32>) -> Self {
        Self {
            errors,
            steps: 0,
            outputs: 2,
            fail_at_step: None,
        }
    }

    pub fn epochs(&self) -> usize {
        self.steps / 9
    }
}

impl Network for ScriptedNet {
    type Error = FakeErr;

    fn create(_topology: &Topology, _seed: Option<u64>) -> Result<Self, FakeErr> {
        Ok(Self::new(vec![0.0]))
    }

    fn predict(&self, input: &[f32]) -> Result<Vec<f32>, FakeErr> {
        if input.len() != 6 {
            return Err(FakeErr("input length"));
        }

        Ok(vec![0.5; self.outputs])
    }

    fn train(&mut self, _input: &[f32], _target: &[f32], _lr: f32) -> Result<f32, FakeErr> {
        if self.fail_at_step == Some(self.steps) {
            return Err(FakeErr("train step"));
        }

        let epoch = self.steps / 9;
        self.steps += 1;

        let last = self.errors.len() - 1;
        Ok(self.errors[epoch.min(last)])
    }

    fn save<W: Write>(&self, _writer: W) -> Result<(), FakeErr> {
        Err(FakeErr("save"))
    }

    fn load<R: Read>(_reader: R) -> Result<Self, FakeErr> {
        Err(FakeErr("load"))
    }

    fn topology(&self) -> Topology {
        Topology::new(vec![6, self.outputs])
    }
}
