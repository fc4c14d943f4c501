mod outcome_network;

pub use outcome_network::{OutcomeNetwork, OutcomeNetworkConfig};
