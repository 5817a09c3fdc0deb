use crate::error::{GraphError, Result};

/// Dense undirected graph over a fixed number of node slots.
///
/// Nodes are addressed by their current index. Deleting node `k` renumbers
/// every node above `k` down by one, so indices held by callers are only
/// valid until the next deletion.
///
/// The adjacency matrix is a row-major `capacity × capacity` buffer. Only the
/// `count × count` top-left block is meaningful; everything outside it is
/// kept cleared so that a newly inserted node starts with no edges.
#[derive(Debug, Clone)]
pub struct AdjacencyGraph<T> {
    nodes: Vec<T>,
    matrix: Vec<bool>,
    capacity: usize,
    count: usize,
    generation: u64,
}

impl<T: Default> AdjacencyGraph<T> {
    /// Empty graph that grows through [`insert_node`](Self::insert_node).
    pub fn new(capacity: usize) -> Result<Self> {
        Self::allocate(capacity, 0)
    }

    /// Graph whose `capacity` slots are all live and default-valued, meant to
    /// be filled by [`set_node`](Self::set_node).
    pub fn presized(capacity: usize) -> Result<Self> {
        Self::allocate(capacity, capacity)
    }

    fn allocate(capacity: usize, count: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(GraphError::InvalidCapacity);
        }
        let cells = capacity
            .checked_mul(capacity)
            .ok_or(GraphError::InvalidCapacity)?;

        // Storage the allocator refuses is reported, not aborted on.
        let mut matrix = Vec::new();
        let mut nodes = Vec::new();
        if matrix.try_reserve_exact(cells).is_err()
            || nodes.try_reserve_exact(capacity).is_err()
        {
            log::warn!("cannot allocate a graph of capacity {}", capacity);
            return Err(GraphError::InvalidCapacity);
        }
        matrix.resize(cells, false);
        nodes.extend(std::iter::repeat_with(T::default).take(capacity));

        Ok(Self {
            nodes,
            matrix,
            capacity,
            count,
            generation: 0,
        })
    }
}

impl<T> AdjacencyGraph<T> {
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn node_count(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn is_full(&self) -> bool {
        self.count == self.capacity
    }

    /// Mutation counter. Bumped by every successful structural change so that
    /// derived data (shortest paths) can tell it was computed from an older
    /// topology.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Append a node, returning its index.
    pub fn insert_node(&mut self, value: T) -> Result<usize> {
        if self.is_full() {
            return Err(GraphError::Overflow {
                capacity: self.capacity,
            });
        }
        let index = self.count;
        self.nodes[index] = value;
        self.count += 1;
        self.generation += 1;
        log::trace!("inserted node {} ({}/{})", index, self.count, self.capacity);
        Ok(index)
    }

    /// Overwrite the value stored at a live index.
    pub fn set_node(&mut self, index: usize, value: T) -> Result<()> {
        self.check_access(index)?;
        self.nodes[index] = value;
        self.generation += 1;
        Ok(())
    }

    /// Checked read access to a node value.
    pub fn node(&self, index: usize) -> Result<&T> {
        self.check_access(index)?;
        Ok(&self.nodes[index])
    }

    /// Live node values in index order.
    pub fn nodes(&self) -> &[T] {
        &self.nodes[..self.count]
    }

    /// Remove a node and compact both the node list and the matrix.
    ///
    /// Every edge touching `index` is dropped first. Rows and columns above
    /// `index` then move down by one so the matrix stays aligned with the
    /// renumbered node list.
    pub fn delete_node(&mut self, index: usize) -> Result<()> {
        self.check_index(index)?;

        let cap = self.capacity;
        let n = self.count;

        for other in 0..n {
            self.set_cell(index, other, false);
        }

        self.nodes[index..n].rotate_left(1);

        // Rows: slide rows index+1..n up by one, then clear the vacated row.
        self.matrix.copy_within((index + 1) * cap..n * cap, index * cap);
        self.matrix[(n - 1) * cap..n * cap].fill(false);

        // Columns: same shift inside every remaining row.
        for row in self.matrix.chunks_mut(cap).take(n - 1) {
            row.copy_within(index + 1..n, index);
            row[n - 1] = false;
        }

        self.count -= 1;
        self.generation += 1;
        log::debug!("deleted node {} ({} remaining)", index, self.count);
        Ok(())
    }

    /// Connect two nodes. Adding an existing edge has no further effect.
    pub fn add_edge(&mut self, i: usize, j: usize) -> Result<()> {
        self.check_index(i)?;
        self.check_index(j)?;
        self.set_cell(i, j, true);
        self.generation += 1;
        log::trace!("edge {} - {} added", i, j);
        Ok(())
    }

    /// Disconnect two nodes. Removing a missing edge has no further effect.
    pub fn remove_edge(&mut self, i: usize, j: usize) -> Result<()> {
        self.check_index(i)?;
        self.check_index(j)?;
        self.set_cell(i, j, false);
        self.generation += 1;
        log::trace!("edge {} - {} removed", i, j);
        Ok(())
    }

    pub fn are_connected(&self, i: usize, j: usize) -> Result<bool> {
        self.check_index(i)?;
        self.check_index(j)?;
        Ok(self.cell(i, j))
    }

    /// Indices adjacent to `i`, ascending.
    pub fn neighbors(&self, i: usize) -> Result<impl Iterator<Item = usize> + '_> {
        self.check_index(i)?;
        let row = &self.matrix[i * self.capacity..i * self.capacity + self.count];
        Ok(row
            .iter()
            .enumerate()
            .filter(|(_, connected)| **connected)
            .map(|(j, _)| j))
    }

    pub fn degree(&self, i: usize) -> Result<usize> {
        Ok(self.neighbors(i)?.count())
    }

    /// Number of undirected edges (a self-loop counts once).
    pub fn edge_count(&self) -> usize {
        (0..self.count)
            .map(|i| (i..self.count).filter(|&j| self.cell(i, j)).count())
            .sum()
    }

    /// Approximate memory usage in bytes.
    pub fn memory_usage(&self) -> usize {
        use std::mem::size_of;

        self.nodes.len() * size_of::<T>() + self.matrix.len() * size_of::<bool>()
    }

    #[inline]
    pub(crate) fn cell(&self, i: usize, j: usize) -> bool {
        self.matrix[i * self.capacity + j]
    }

    fn set_cell(&mut self, i: usize, j: usize, value: bool) {
        self.matrix[i * self.capacity + j] = value;
        self.matrix[j * self.capacity + i] = value;
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.count {
            return Err(GraphError::invalid_index(index, self.count));
        }
        Ok(())
    }

    fn check_access(&self, index: usize) -> Result<()> {
        if index >= self.count {
            return Err(GraphError::IndexOutOfRange {
                index: index as i64,
                count: self.count,
            });
        }
        Ok(())
    }
}

impl<T: PartialEq> AdjacencyGraph<T> {
    /// Index of the first live node equal to `value`.
    pub fn node_index(&self, value: &T) -> Option<usize> {
        self.nodes().iter().position(|n| n == value)
    }

    /// Connect the nodes holding `a` and `b`. Either value missing fails with
    /// `InvalidIndex` (index `-1`).
    pub fn add_edge_between(&mut self, a: &T, b: &T) -> Result<()> {
        let (i, j) = self.resolve_pair(a, b)?;
        self.add_edge(i, j)
    }

    pub fn remove_edge_between(&mut self, a: &T, b: &T) -> Result<()> {
        let (i, j) = self.resolve_pair(a, b)?;
        self.remove_edge(i, j)
    }

    fn resolve_pair(&self, a: &T, b: &T) -> Result<(usize, usize)> {
        let i = self
            .node_index(a)
            .ok_or_else(|| GraphError::not_found(self.count))?;
        let j = self
            .node_index(b)
            .ok_or_else(|| GraphError::not_found(self.count))?;
        Ok((i, j))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_graph(values: &[&'static str]) -> AdjacencyGraph<&'static str> {
        let mut g = AdjacencyGraph::new(values.len().max(1)).unwrap();
        for v in values {
            g.insert_node(*v).unwrap();
        }
        g
    }

    fn edges(g: &AdjacencyGraph<&'static str>) -> Vec<(usize, usize)> {
        let n = g.node_count();
        (0..n)
            .flat_map(|i| (i..n).map(move |j| (i, j)))
            .filter(|&(i, j)| g.are_connected(i, j).unwrap())
            .collect()
    }

    // --- Construction ---

    #[test]
    fn test_zero_capacity_rejected() {
        assert_eq!(
            AdjacencyGraph::<u32>::new(0).unwrap_err(),
            GraphError::InvalidCapacity
        );
        assert_eq!(
            AdjacencyGraph::<u32>::presized(0).unwrap_err(),
            GraphError::InvalidCapacity
        );
    }

    #[test]
    fn test_unallocatable_capacity_rejected() {
        // 2^56 matrix cells: the square fits in usize but no allocator can
        // provide it.
        assert_eq!(
            AdjacencyGraph::<u8>::new(1 << 28).unwrap_err(),
            GraphError::InvalidCapacity
        );
        assert_eq!(
            AdjacencyGraph::<u8>::presized(1 << 28).unwrap_err(),
            GraphError::InvalidCapacity
        );
        assert_eq!(
            AdjacencyGraph::<u8>::new(usize::MAX).unwrap_err(),
            GraphError::InvalidCapacity
        );
    }

    #[test]
    fn test_append_mode_starts_empty() {
        let g = AdjacencyGraph::<u32>::new(4).unwrap();
        assert_eq!(g.node_count(), 0);
        assert_eq!(g.capacity(), 4);
        assert!(g.is_empty());
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn test_presized_mode_has_default_slots() {
        let g = AdjacencyGraph::<u32>::presized(3).unwrap();
        assert_eq!(g.node_count(), 3);
        assert!(g.is_full());
        assert_eq!(g.nodes(), &[0, 0, 0]);
    }

    #[test]
    fn test_presized_fill_by_index() {
        let mut g = AdjacencyGraph::<u32>::presized(3).unwrap();
        g.set_node(0, 10).unwrap();
        g.set_node(2, 30).unwrap();
        assert_eq!(g.nodes(), &[10, 0, 30]);
        assert_eq!(
            g.set_node(3, 40).unwrap_err(),
            GraphError::IndexOutOfRange { index: 3, count: 3 }
        );
    }

    // --- Insertion ---

    #[test]
    fn test_insert_returns_index() {
        let mut g = AdjacencyGraph::new(3).unwrap();
        assert_eq!(g.insert_node('a').unwrap(), 0);
        assert_eq!(g.insert_node('b').unwrap(), 1);
        assert_eq!(g.node(1), Ok(&'b'));
    }

    #[test]
    fn test_insert_overflow_leaves_graph_unchanged() {
        let mut g = make_graph(&["A", "B"]);
        g.add_edge(0, 1).unwrap();
        let generation = g.generation();

        assert_eq!(
            g.insert_node("C").unwrap_err(),
            GraphError::Overflow { capacity: 2 }
        );
        assert_eq!(g.nodes(), &["A", "B"]);
        assert_eq!(edges(&g), vec![(0, 1)]);
        assert_eq!(g.generation(), generation);
    }

    #[test]
    fn test_presized_graph_is_full() {
        let mut g = AdjacencyGraph::<u32>::presized(2).unwrap();
        assert!(matches!(g.insert_node(1), Err(GraphError::Overflow { .. })));
    }

    // --- Node access ---

    #[test]
    fn test_node_access_out_of_range() {
        let g = make_graph(&["A", "B"]);
        assert_eq!(
            g.node(2).unwrap_err(),
            GraphError::IndexOutOfRange { index: 2, count: 2 }
        );
    }

    #[test]
    fn test_node_index_first_match() {
        let g = make_graph(&["A", "B", "A"]);
        assert_eq!(g.node_index(&"A"), Some(0));
        assert_eq!(g.node_index(&"B"), Some(1));
        assert_eq!(g.node_index(&"Z"), None);
    }

    #[test]
    fn test_node_index_ignores_reserve_slots() {
        let mut g = AdjacencyGraph::new(4).unwrap();
        g.insert_node(7u32).unwrap();
        // Reserve slots hold the default value but are not live.
        assert_eq!(g.node_index(&0), None);
    }

    // --- Edges ---

    #[test]
    fn test_add_edge_symmetric() {
        let mut g = make_graph(&["A", "B", "C"]);
        g.add_edge(0, 2).unwrap();
        assert_eq!(g.are_connected(0, 2), Ok(true));
        assert_eq!(g.are_connected(2, 0), Ok(true));
        assert_eq!(g.are_connected(0, 1), Ok(false));
    }

    #[test]
    fn test_add_edge_idempotent() {
        let mut g = make_graph(&["A", "B"]);
        g.add_edge(0, 1).unwrap();
        g.add_edge(1, 0).unwrap();
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn test_remove_edge_restores_both_directions() {
        let mut g = make_graph(&["A", "B"]);
        g.add_edge(0, 1).unwrap();
        g.remove_edge(1, 0).unwrap();
        assert_eq!(g.are_connected(0, 1), Ok(false));
        assert_eq!(g.are_connected(1, 0), Ok(false));
        // Removing again is a no-op
        g.remove_edge(0, 1).unwrap();
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn test_edge_bounds() {
        let mut g = make_graph(&["A", "B"]);
        assert_eq!(
            g.add_edge(0, 2).unwrap_err(),
            GraphError::InvalidIndex { index: 2, count: 2 }
        );
        assert!(g.remove_edge(5, 0).is_err());
        assert!(g.are_connected(0, 9).is_err());
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn test_edge_to_reserve_slot_rejected() {
        let mut g = AdjacencyGraph::new(5).unwrap();
        g.insert_node(1u32).unwrap();
        g.insert_node(2u32).unwrap();
        assert!(g.add_edge(0, 3).is_err());
    }

    #[test]
    fn test_add_edge_by_value() {
        let mut g = make_graph(&["A", "B", "C"]);
        g.add_edge_between(&"A", &"C").unwrap();
        assert_eq!(g.are_connected(0, 2), Ok(true));

        assert_eq!(
            g.add_edge_between(&"A", &"Z").unwrap_err(),
            GraphError::InvalidIndex { index: -1, count: 3 }
        );

        g.remove_edge_between(&"C", &"A").unwrap();
        assert_eq!(g.are_connected(0, 2), Ok(false));
    }

    #[test]
    fn test_self_loop() {
        let mut g = make_graph(&["A", "B"]);
        g.add_edge(1, 1).unwrap();
        assert_eq!(g.are_connected(1, 1), Ok(true));
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.degree(1), Ok(1));
    }

    #[test]
    fn test_symmetric_closure_without_deletion() {
        let mut g = make_graph(&["A", "B", "C", "D", "E"]);
        let added = [(0, 1), (3, 1), (4, 2), (2, 0), (3, 4)];
        for &(i, j) in &added {
            g.add_edge(i, j).unwrap();
        }

        for i in 0..5 {
            for j in 0..5 {
                let expected = added
                    .iter()
                    .any(|&(a, b)| (a, b) == (i, j) || (b, a) == (i, j));
                assert_eq!(g.are_connected(i, j), Ok(expected), "cell ({}, {})", i, j);
            }
        }
    }

    #[test]
    fn test_neighbors_and_degree() {
        let mut g = make_graph(&["A", "B", "C", "D"]);
        g.add_edge(1, 0).unwrap();
        g.add_edge(1, 3).unwrap();
        assert_eq!(g.neighbors(1).unwrap().collect::<Vec<_>>(), vec![0, 3]);
        assert_eq!(g.degree(2), Ok(0));
        assert!(g.neighbors(4).is_err());
    }

    // --- Deletion ---

    #[test]
    fn test_delete_shifts_nodes_and_edges() {
        // A-B, B-C, C-D, A-D
        let mut g = make_graph(&["A", "B", "C", "D"]);
        g.add_edge(0, 1).unwrap();
        g.add_edge(1, 2).unwrap();
        g.add_edge(2, 3).unwrap();
        g.add_edge(0, 3).unwrap();

        g.delete_node(1).unwrap();

        assert_eq!(g.node_count(), 3);
        assert_eq!(g.nodes(), &["A", "C", "D"]);
        // Surviving edges C-D and A-D, renumbered
        assert_eq!(edges(&g), vec![(0, 2), (1, 2)]);
    }

    #[test]
    fn test_delete_first_and_last() {
        let mut g = make_graph(&["A", "B", "C"]);
        g.add_edge(0, 1).unwrap();
        g.add_edge(1, 2).unwrap();

        g.delete_node(2).unwrap();
        assert_eq!(g.nodes(), &["A", "B"]);
        assert_eq!(edges(&g), vec![(0, 1)]);

        g.delete_node(0).unwrap();
        assert_eq!(g.nodes(), &["B"]);
        assert!(edges(&g).is_empty());
    }

    #[test]
    fn test_delete_only_node() {
        let mut g = make_graph(&["A"]);
        g.add_edge(0, 0).unwrap();
        g.delete_node(0).unwrap();
        assert!(g.is_empty());
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn test_delete_invalid_index() {
        let mut g = make_graph(&["A", "B"]);
        assert_eq!(
            g.delete_node(2).unwrap_err(),
            GraphError::InvalidIndex { index: 2, count: 2 }
        );
        assert_eq!(g.node_count(), 2);
    }

    #[test]
    fn test_insert_after_delete_has_no_stale_edges() {
        let mut g = make_graph(&["A", "B", "C"]);
        g.add_edge(0, 2).unwrap();
        g.add_edge(1, 2).unwrap();

        g.delete_node(0).unwrap();
        let idx = g.insert_node("D").unwrap();

        assert_eq!(idx, 2);
        assert_eq!(g.degree(idx), Ok(0));
        assert_eq!(edges(&g), vec![(0, 1)]);
    }

    #[test]
    fn test_delete_preserves_dense_edges() {
        // Complete graph on 6 nodes minus node 2: every surviving pair stays connected.
        let names = ["0", "1", "2", "3", "4", "5"];
        let mut g = make_graph(&names);
        for i in 0..6 {
            for j in (i + 1)..6 {
                g.add_edge(i, j).unwrap();
            }
        }
        g.delete_node(2).unwrap();
        assert_eq!(g.nodes(), &["0", "1", "3", "4", "5"]);
        assert_eq!(g.edge_count(), 10);
        for i in 0..5 {
            assert_eq!(g.are_connected(i, i), Ok(false));
        }
    }

    // --- Value semantics ---

    #[test]
    fn test_clone_is_independent() {
        let mut g = make_graph(&["A", "B"]);
        g.add_edge(0, 1).unwrap();

        let mut copy = g.clone();
        copy.remove_edge(0, 1).unwrap();
        copy.set_node(0, "Z").unwrap();

        assert_eq!(g.are_connected(0, 1), Ok(true));
        assert_eq!(g.nodes(), &["A", "B"]);
        assert_eq!(copy.nodes(), &["Z", "B"]);
    }

    #[test]
    fn test_generation_tracks_mutation() {
        let mut g = AdjacencyGraph::new(3).unwrap();
        assert_eq!(g.generation(), 0);
        g.insert_node(1u32).unwrap();
        g.insert_node(2u32).unwrap();
        g.add_edge(0, 1).unwrap();
        let before = g.generation();
        assert!(g.add_edge(0, 7).is_err());
        assert_eq!(g.generation(), before);
        g.delete_node(0).unwrap();
        assert!(g.generation() > before);
    }

    #[test]
    fn test_memory_usage_nonzero() {
        let g = AdjacencyGraph::<u64>::new(10).unwrap();
        assert!(g.memory_usage() >= 10 * 8 + 100);
    }
}
