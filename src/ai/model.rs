use burn::backend::{Autodiff, NdArray};
use burn::module::AutodiffModule;
use burn::optim::{AdamConfig, GradientsParams, Optimizer};
use burn::prelude::*;
use burn::tensor::TensorData;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::ai::networks::{OutcomeNetwork, OutcomeNetworkConfig};
use crate::ai::state_encoding::encode_states_batch;
use crate::error::ModelError;
use crate::game::{BoardState, GameOutcome, OUTCOME_CLASSES};

type InferBackend = NdArray<f32>;
type TrainBackend = Autodiff<InferBackend>;

/// Per-class probabilities indexed by [`GameOutcome::class_index`].
pub type OutcomeProbabilities = [f32; OUTCOME_CLASSES];

/// A trainable mapping from board states to final-outcome probabilities.
pub trait OutcomeModel {
    /// Fit the model on states labeled with the outcome of their game.
    /// Returns the mean training loss.
    fn train(&mut self, states: &[BoardState], outcomes: &[GameOutcome]) -> Result<f32, ModelError>;

    /// Predict outcome probabilities for each state.
    fn predict(&self, states: &[BoardState]) -> Vec<OutcomeProbabilities>;
}

/// Classifier hyperparameters.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub hidden_size: usize,
    pub learning_rate: f64,
    pub epochs: usize,
    pub batch_size: usize,
}

impl Default for ModelConfig {
    fn default() -> Self {
        ModelConfig {
            hidden_size: 64,
            learning_rate: 1e-3,
            epochs: 5,
            batch_size: 128,
        }
    }
}

/// MLP outcome classifier trained with Adam on cross-entropy loss.
pub struct NeuralOutcomeModel {
    network: OutcomeNetwork<TrainBackend>,
    infer_network: OutcomeNetwork<InferBackend>,
    optimizer:
        burn::optim::adaptor::OptimizerAdaptor<burn::optim::Adam, OutcomeNetwork<TrainBackend>, TrainBackend>,
    config: ModelConfig,
    device: <TrainBackend as Backend>::Device,
    rng: StdRng,
    train_steps: usize,
}

impl NeuralOutcomeModel {
    pub fn new(config: ModelConfig) -> Self {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    /// Seeds minibatch shuffling only; weight initialization stays backend-random.
    pub fn with_seed(config: ModelConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: ModelConfig, rng: StdRng) -> Self {
        let device = Default::default();
        let network: OutcomeNetwork<TrainBackend> = OutcomeNetworkConfig::new()
            .with_hidden_size(config.hidden_size)
            .init(&device);
        let infer_network = network.valid();
        let optimizer = AdamConfig::new().init();

        NeuralOutcomeModel {
            network,
            infer_network,
            optimizer,
            config,
            device,
            rng,
            train_steps: 0,
        }
    }

    pub fn train_steps(&self) -> usize {
        self.train_steps
    }

    /// One gradient update on a minibatch. Returns the batch loss.
    fn train_step(&mut self, states: &[BoardState], labels: &[usize]) -> f32 {
        let n = states.len();
        let input = encode_states_batch::<TrainBackend>(states, &self.device);

        // One-hot targets: [n, 3].
        let mut target_data = vec![0.0f32; n * OUTCOME_CLASSES];
        for (i, &label) in labels.iter().enumerate() {
            target_data[i * OUTCOME_CLASSES + label] = 1.0;
        }
        let targets = Tensor::<TrainBackend, 1>::from_data(
            TensorData::from(target_data.as_slice()),
            &self.device,
        )
        .reshape([n as i32, OUTCOME_CLASSES as i32]);

        let logits = self.network.forward(input);
        let log_probs = burn::tensor::activation::log_softmax(logits, 1);
        let loss = -(targets * log_probs).sum_dim(1).mean();

        let loss_val: f32 = loss
            .clone()
            .into_data()
            .to_vec::<f32>()
            .expect("f32 loss tensor extraction")[0];

        if loss_val.is_finite() {
            let grads = loss.backward();
            let grads = GradientsParams::from_grads(grads, &self.network);
            self.network =
                self.optimizer
                    .step(self.config.learning_rate, self.network.clone(), grads);
        }
        self.train_steps += 1;

        loss_val
    }
}

impl OutcomeModel for NeuralOutcomeModel {
    fn train(&mut self, states: &[BoardState], outcomes: &[GameOutcome]) -> Result<f32, ModelError> {
        if states.len() != outcomes.len() {
            return Err(ModelError::ShapeMismatch {
                states: states.len(),
                outcomes: outcomes.len(),
            });
        }
        let labels = outcomes
            .iter()
            .map(|o| o.class_index().ok_or(ModelError::UnfinishedLabel))
            .collect::<Result<Vec<_>, _>>()?;
        if states.is_empty() {
            return Ok(0.0);
        }

        let mut order: Vec<usize> = (0..states.len()).collect();
        let mut total_loss = 0.0;
        let mut steps = 0;
        for _ in 0..self.config.epochs {
            order.shuffle(&mut self.rng);
            for chunk in order.chunks(self.config.batch_size.max(1)) {
                let batch_states: Vec<BoardState> = chunk.iter().map(|&i| states[i]).collect();
                let batch_labels: Vec<usize> = chunk.iter().map(|&i| labels[i]).collect();
                total_loss += self.train_step(&batch_states, &batch_labels);
                steps += 1;
            }
        }

        // Inference reads from a snapshot refreshed after every pass.
        self.infer_network = self.network.valid();

        Ok(if steps == 0 { 0.0 } else { total_loss / steps as f32 })
    }

    fn predict(&self, states: &[BoardState]) -> Vec<OutcomeProbabilities> {
        if states.is_empty() {
            return Vec::new();
        }
        let input = encode_states_batch::<InferBackend>(states, &self.device);
        let probs = burn::tensor::activation::softmax(self.infer_network.forward(input), 1);
        let data: Vec<f32> = probs
            .into_data()
            .to_vec()
            .expect("f32 tensor data extraction");

        data.chunks_exact(OUTCOME_CLASSES)
            .map(|p| [p[0], p[1], p[2]])
            .collect()
    }
}
