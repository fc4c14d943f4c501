use burn::prelude::*;
use burn::tensor::TensorData;

use crate::game::{BoardState, CELLS};

/// Encode board states as a tensor of shape [batch, 9].
///
/// Each value is the cell encoding: 0.0 empty, 1.0 cross, 2.0 circle.
pub fn encode_states_batch<B: Backend>(states: &[BoardState], device: &B::Device) -> Tensor<B, 2> {
    let batch_size = states.len();
    let mut flat = Vec::with_capacity(batch_size * CELLS);
    for state in states {
        flat.extend(state.encode().iter().map(|&v| f32::from(v)));
    }
    Tensor::<B, 1>::from_data(TensorData::from(flat.as_slice()), device)
        .reshape([batch_size as i32, CELLS as i32])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Board, Side};
    use burn::backend::NdArray;

    type TestBackend = NdArray<f32>;

    #[test]
    fn test_encode_batch_shape() {
        let device = Default::default();
        let states = [BoardState::empty(), BoardState::empty()];
        let tensor = encode_states_batch::<TestBackend>(&states, &device);
        assert_eq!(tensor.shape().dims, [2, 9]);
    }

    #[test]
    fn test_encode_values() {
        let mut board = Board::new();
        board.play_move(0, Side::Cross).unwrap();
        board.play_move(8, Side::Circle).unwrap();

        let device = Default::default();
        let tensor = encode_states_batch::<TestBackend>(&[*board.state()], &device);
        let data: Vec<f32> = tensor.into_data().to_vec().unwrap();
        assert_eq!(data, vec![1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 2.0]);
    }
}
