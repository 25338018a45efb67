use rand::Rng;
use rand_distr::{Dirichlet, Distribution};

use crate::error::{MctsError, Result};
use crate::tree::{MctsTree, NodeId};

/// Mix Dirichlet noise into the priors of the root's children:
/// `P' = (1 - epsilon) * P + epsilon * noise`.
///
/// Used during self-play so that every game explores a little differently.
pub fn add_dirichlet_noise_to_root<R: Rng + ?Sized>(
    tree: &mut MctsTree,
    root_id: NodeId,
    alpha: f32,
    epsilon: f32,
    rng: &mut R,
) -> Result<()> {
    let root = &tree.nodes[root_id];
    if !root.is_expanded {
        return Err(MctsError::RootNotInitialized);
    }

    let children = root.children.clone();
    // Dirichlet needs at least two categories
    if children.len() < 2 {
        return Ok(());
    }

    let dirichlet = Dirichlet::new_with_size(alpha as f64, children.len())
        .map_err(|e| MctsError::DirichletError(e.to_string()))?;
    let noise = dirichlet.sample(rng);

    for (&child_id, &eta) in children.iter().zip(noise.iter()) {
        let child = &mut tree.nodes[child_id];
        child.prior_probability = (1.0 - epsilon) * child.prior_probability + epsilon * eta as f32;
    }

    Ok(())
}
