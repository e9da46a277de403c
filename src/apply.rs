//! Rewriting edges through a permutation

use rayon::prelude::*;

use crate::error::Result;
use crate::graph::{Edge, EdgeList};
use crate::permutation::Permutation;

/// Edges per parallel work unit
const CHUNK_SIZE: usize = 1 << 16;

fn relabel(edge: &Edge, perm: &Permutation) -> Result<Edge> {
    Ok(Edge {
        src: perm.image(edge.src)?,
        dst: perm.image(edge.dst)?,
        weight: edge.weight.clone(),
    })
}

/// Relabel every edge, keeping edge order and weights
///
/// Chunks are rewritten in parallel and collected back positionally, so the
/// output lines up with the input edge for edge. A vertex without an image
/// aborts the rewrite.
pub fn apply_permutation(graph: &EdgeList, perm: &Permutation) -> Result<EdgeList> {
    log::info!(
        "Applying permutation of {} vertices to {} edges",
        perm.len(),
        graph.edge_count()
    );

    let chunks: Vec<Vec<Edge>> = graph
        .edges
        .par_chunks(CHUNK_SIZE)
        .map(|chunk| chunk.iter().map(|edge| relabel(edge, perm)).collect::<Result<Vec<_>>>())
        .collect::<Result<Vec<_>>>()?;

    let mut edges = Vec::with_capacity(graph.edge_count());
    for chunk in chunks {
        edges.extend(chunk);
    }

    // Every image is distinct, so relabeling preserves the vertex count
    let vertices = graph
        .vertices
        .iter()
        .map(|&v| perm.image(v))
        .collect::<Result<_>>()?;

    Ok(EdgeList {
        edges,
        vertices,
        weighted: graph.weighted,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReorderError;
    use crate::permutation::PermutationBuilder;

    #[test]
    fn relabels_endpoints_and_keeps_weights() {
        let graph: EdgeList = vec![Edge::weighted(0, 1, "5"), Edge::weighted(1, 2, "x"), Edge::weighted(0, 1, "5")]
            .into_iter()
            .collect();
        let perm = Permutation::from_order(vec![2, 0, 1]).unwrap();

        let out = apply_permutation(&graph, &perm).unwrap();
        assert_eq!(
            out.edges,
            vec![Edge::weighted(2, 0, "5"), Edge::weighted(0, 1, "x"), Edge::weighted(2, 0, "5")]
        );
        assert!(out.weighted);
        assert_eq!(out.vertex_count(), 3);
    }

    #[test]
    fn unmapped_vertex_is_a_broken_invariant() {
        let graph: EdgeList = vec![Edge::new(0, 1), Edge::new(1, 7)].into_iter().collect();
        let mut builder = PermutationBuilder::new(2, false);
        builder.assign(0);
        builder.assign(1);

        let err = apply_permutation(&graph, &builder.build()).unwrap_err();
        assert!(matches!(err, ReorderError::BrokenInvariant(_)));
    }

    #[test]
    fn order_survives_multiple_chunks() {
        let n = CHUNK_SIZE as u64 * 2 + 3;
        let graph: EdgeList = (0..n).map(|i| Edge::new(i, (i + 1) % n)).collect();
        let perm = Permutation::from_order((0..n).rev().collect()).unwrap();

        let out = apply_permutation(&graph, &perm).unwrap();
        assert_eq!(out.edge_count(), graph.edge_count());
        for (before, after) in graph.edges.iter().zip(&out.edges) {
            assert_eq!(after.src, n - 1 - before.src);
            assert_eq!(after.dst, n - 1 - before.dst);
        }
    }
}
