use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

use super::{Sequential, activations::ActFn, layers::Layer};
use crate::{MlErr, Result};

/// The version written by `Sequential::save`, `Sequential::load` only accepts this one.
pub const SNAPSHOT_VERSION: u32 = 1;

/// The on disk representation of a `Sequential`.
#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    version: u32,
    topology: Vec<usize>,
    layers: Vec<LayerSnapshot>,
}

#[derive(Debug, Serialize, Deserialize)]
struct LayerSnapshot {
    act_fn: Option<ActFn>,
    params: Vec<f32>,
}

impl Sequential {
    /// Writes the model as JSON into `writer`.
    ///
    /// # Errors
    /// `MlErr::Io` if writing fails.
    pub fn save<W: Write>(&self, writer: W) -> Result<()> {
        let mut offset = 0;
        let layers = self
            .layers()
            .iter()
            .map(|layer| {
                let params = self.params()[offset..offset + layer.size()].to_vec();
                offset += layer.size();

                LayerSnapshot {
                    act_fn: layer.act_fn(),
                    params,
                }
            })
            .collect();

        let snapshot = Snapshot {
            version: SNAPSHOT_VERSION,
            topology: self.topology(),
            layers,
        };

        serde_json::to_writer_pretty(writer, &snapshot)?;
        Ok(())
    }

    /// Reads a model previously written by `save`.
    ///
    /// # Errors
    /// `MlErr::Io` if reading fails, `MlErr::Format` if the content is not a snapshot,
    /// `MlErr::UnsupportedVersion` for snapshots of another version and `MlErr::InvalidTopology`
    /// or `MlErr::SizeMismatch` if the snapshot is not self consistent.
    pub fn load<R: Read>(reader: R) -> Result<Self> {
        let snapshot: Snapshot = serde_json::from_reader(reader)?;

        if snapshot.version != SNAPSHOT_VERSION {
            return Err(MlErr::UnsupportedVersion {
                got: snapshot.version,
                expected: SNAPSHOT_VERSION,
            });
        }

        let Snapshot {
            topology, layers, ..
        } = snapshot;

        if topology.len() != layers.len() + 1 {
            return Err(MlErr::SizeMismatch {
                a: "topology",
                b: "layers",
                got: layers.len() + 1,
                expected: topology.len(),
            });
        }

        let mut model_layers = Vec::with_capacity(layers.len());
        let mut params = Vec::new();

        for (dim, layer) in topology.windows(2).map(|w| (w[0], w[1])).zip(layers) {
            let model_layer = Layer::dense(dim, layer.act_fn);

            if layer.params.len() != model_layer.size() {
                return Err(MlErr::SizeMismatch {
                    a: "layer params",
                    b: "topology",
                    got: layer.params.len(),
                    expected: model_layer.size(),
                });
            }

            params.extend(layer.params);
            model_layers.push(model_layer);
        }

        Sequential::new(model_layers, params)
    }
}
