//! Vertex permutations and their construction

pub mod file;
pub mod zero;

use indexmap::IndexMap;

use crate::error::{ReorderError, Result};
use crate::graph::{EdgeList, VertexId};

pub use file::{read_order, write_order};
pub use zero::preserve_zero;

/// Mapping from old vertex ids to new vertex ids
///
/// A well-formed permutation is a bijection from the observed vertex ids onto
/// `0..len`. Once built it is only read, except by the zero-preservation
/// policy which consumes it and hands back the adjusted value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Permutation {
    map: IndexMap<VertexId, VertexId>,
}

impl Permutation {
    /// Permutation read from an order file, where position `i` is old id `i`
    pub fn from_order(order: Vec<VertexId>) -> Result<Self> {
        let map: IndexMap<VertexId, VertexId> = order
            .into_iter()
            .enumerate()
            .map(|(old, new)| (old as VertexId, new))
            .collect();
        let perm = Self { map };
        perm.check_bijection()?;
        Ok(perm)
    }

    /// New id of `vertex`, if it has one
    pub fn get(&self, vertex: VertexId) -> Option<VertexId> {
        self.map.get(&vertex).copied()
    }

    /// New id of `vertex`, failing if it has none
    pub fn image(&self, vertex: VertexId) -> Result<VertexId> {
        self.get(vertex).ok_or_else(|| ReorderError::unmapped(vertex))
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// `(old, new)` pairs in assignment order
    pub fn iter(&self) -> impl Iterator<Item = (VertexId, VertexId)> + '_ {
        self.map.iter().map(|(&old, &new)| (old, new))
    }

    /// Old id currently sent to `image`
    pub fn preimage(&self, image: VertexId) -> Option<VertexId> {
        self.iter().find(|&(_, new)| new == image).map(|(old, _)| old)
    }

    /// Every image is distinct and lies in `0..len`
    pub fn is_bijection(&self) -> bool {
        let n = self.map.len();
        let mut seen = vec![false; n];
        for &new in self.map.values() {
            let Ok(idx) = usize::try_from(new) else {
                return false;
            };
            if idx >= n || seen[idx] {
                return false;
            }
            seen[idx] = true;
        }
        true
    }

    pub fn check_bijection(&self) -> Result<()> {
        if self.is_bijection() {
            Ok(())
        } else {
            Err(ReorderError::BrokenInvariant(format!(
                "permutation of {} vertices is not a bijection onto 0..{}",
                self.map.len(),
                self.map.len()
            )))
        }
    }

    /// Every vertex of `graph` has an image
    pub fn check_covers(&self, graph: &EdgeList) -> Result<()> {
        match graph.vertices.iter().find(|v| !self.map.contains_key(*v)) {
            Some(&v) => Err(ReorderError::unmapped(v)),
            None => Ok(()),
        }
    }

    /// Images indexed by old id, for dense id spaces only
    pub fn to_order(&self) -> Result<Vec<VertexId>> {
        (0..self.map.len() as VertexId)
            .map(|old| {
                self.get(old).ok_or_else(|| {
                    ReorderError::BrokenInvariant(format!(
                        "vertex ids are not contiguous: {} is missing from 0..{}",
                        old,
                        self.map.len()
                    ))
                })
            })
            .collect()
    }

    pub(crate) fn swap_images(&mut self, a: VertexId, b: VertexId) {
        if let (Some(ia), Some(ib)) = (self.get(a), self.get(b)) {
            self.map.insert(a, ib);
            self.map.insert(b, ia);
        }
    }
}

/// Incremental assignment of consecutive new ids
///
/// Assigning a vertex twice returns its first id, so later passes can walk
/// vertices that earlier passes already placed. With `reserve_zero`, vertex 0
/// always receives id 0 and everyone else counts from 1.
#[derive(Debug)]
pub struct PermutationBuilder {
    map: IndexMap<VertexId, VertexId>,
    next: VertexId,
    reserve_zero: bool,
}

impl PermutationBuilder {
    pub fn new(capacity: usize, reserve_zero: bool) -> Self {
        Self {
            map: IndexMap::with_capacity(capacity),
            next: reserve_zero as VertexId,
            reserve_zero,
        }
    }

    /// Give `vertex` the next free id unless it already has one
    pub fn assign(&mut self, vertex: VertexId) -> VertexId {
        if let Some(&id) = self.map.get(&vertex) {
            return id;
        }
        let id = if self.reserve_zero && vertex == 0 {
            0
        } else {
            let id = self.next;
            self.next += 1;
            id
        };
        self.map.insert(vertex, id);
        id
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn build(self) -> Permutation {
        Permutation { map: self.map }
    }
}
