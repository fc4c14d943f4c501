use burn::nn::{Linear, LinearConfig, Relu};
use burn::prelude::*;

use crate::game::{CELLS, OUTCOME_CLASSES};

/// Outcome classifier for tic-tac-toe positions.
///
/// ```text
/// Input:  [batch, 9]       (cell encodings)
/// FC1:    9 -> hidden, ReLU
/// FC2:    hidden -> hidden, ReLU
/// Out:    hidden -> 3      (logits: cross-win, circle-win, draw)
/// ```
#[derive(Module, Debug)]
pub struct OutcomeNetwork<B: Backend> {
    fc1: Linear<B>,
    fc2: Linear<B>,
    out: Linear<B>,
    relu: Relu,
}

#[derive(Config, Debug)]
pub struct OutcomeNetworkConfig {
    #[config(default = 64)]
    pub hidden_size: usize,
}

impl OutcomeNetworkConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> OutcomeNetwork<B> {
        OutcomeNetwork {
            fc1: LinearConfig::new(CELLS, self.hidden_size).init(device),
            fc2: LinearConfig::new(self.hidden_size, self.hidden_size).init(device),
            out: LinearConfig::new(self.hidden_size, OUTCOME_CLASSES).init(device),
            relu: Relu::new(),
        }
    }
}

impl<B: Backend> OutcomeNetwork<B> {
    /// Forward pass: input [batch, 9] -> output [batch, 3] logits.
    pub fn forward(&self, input: Tensor<B, 2>) -> Tensor<B, 2> {
        let x = self.relu.forward(self.fc1.forward(input));
        let x = self.relu.forward(self.fc2.forward(x));
        self.out.forward(x)
    }
}
