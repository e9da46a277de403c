//! Keeping vertex 0 at label 0

use crate::error::{ReorderError, Result};
use crate::permutation::Permutation;

/// Swap images so that vertex 0 maps to 0
///
/// The vertex that held image 0 takes over the old image of vertex 0. A
/// second application finds vertex 0 already fixed and changes nothing. When
/// vertex 0 was never observed there is nothing to keep, and the permutation
/// is returned as is.
pub fn preserve_zero(mut perm: Permutation) -> Result<Permutation> {
    let Some(image_of_zero) = perm.get(0) else {
        log::debug!("Vertex 0 not present, zero preservation skipped");
        return Ok(perm);
    };
    if image_of_zero == 0 {
        return Ok(perm);
    }

    let holder = perm.preimage(0).ok_or_else(|| {
        ReorderError::BrokenInvariant("no vertex is mapped to 0".to_string())
    })?;
    log::debug!(
        "Vertex {} gives up image 0 and takes image {}",
        holder,
        image_of_zero
    );
    perm.swap_images(0, holder);
    Ok(perm)
}
