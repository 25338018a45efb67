use anyhow::Result;
use ndarray::{stack, Array, Array1, Array2, Array5, ArrayView4, Axis};
use ndarray_npy::write_npy;
use tracing::info;

use crate::data::TrainingExample;

/// Save training data to NPY files
///
/// Creates three separate files:
/// - `{path}_states.npy`: (N, 4, depth, height, width) encoded positions
/// - `{path}_policies.npy`: (N, cells) move distributions
/// - `{path}_values.npy`: (N,) value targets
///
/// All examples must come from boards of the same dimensions.
///
/// # Example
/// ```no_run
/// use gomoku3d_selfplay::storage::save_training_data;
/// use gomoku3d_selfplay::TrainingExample;
/// use ndarray::Array4;
///
/// let examples = vec![
///     TrainingExample::new(Array4::zeros((4, 4, 4, 4)), vec![0.0; 64], 1.0),
/// ];
/// save_training_data(&examples, "selfplay_data").unwrap();
/// // Creates: selfplay_data_states.npy, selfplay_data_policies.npy, selfplay_data_values.npy
/// ```
pub fn save_training_data(examples: &[TrainingExample], path: &str) -> Result<()> {
    let Some(first) = examples.first() else {
        anyhow::bail!("Cannot save empty training data");
    };

    let state_shape = first.state.shape();
    let num_cells = first.policy.len();
    for (i, e) in examples.iter().enumerate() {
        if e.state.shape() != state_shape {
            anyhow::bail!(
                "Example {} has state shape {:?}, expected {:?}",
                i,
                e.state.shape(),
                state_shape
            );
        }
        if e.policy.len() != num_cells {
            anyhow::bail!(
                "Example {} has {} policy entries, expected {}",
                i,
                e.policy.len(),
                num_cells
            );
        }
    }

    // (N, 4, D, H, W)
    let views: Vec<ArrayView4<f32>> = examples.iter().map(|e| e.state.view()).collect();
    let states_array: Array5<f32> = stack(Axis(0), &views)?;

    // (N, cells)
    let policies: Vec<f32> = examples
        .iter()
        .flat_map(|e| e.policy.iter().copied())
        .collect();
    let policies_array: Array2<f32> = Array::from_shape_vec((examples.len(), num_cells), policies)?;

    // (N,)
    let values: Vec<f32> = examples.iter().map(|e| e.value).collect();
    let values_array: Array1<f32> = Array::from_vec(values);

    write_npy(format!("{}_states.npy", path), &states_array)?;
    write_npy(format!("{}_policies.npy", path), &policies_array)?;
    write_npy(format!("{}_values.npy", path), &values_array)?;

    info!(examples = examples.len(), path, "training data saved");
    Ok(())
}
