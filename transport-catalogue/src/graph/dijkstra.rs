//! Single-source shortest paths over non-negative weights.
//!
//! # Determinism
//!
//! The heap is keyed on `(distance, vertex)` and relaxation only accepts a
//! strict improvement, with incident edges scanned in insertion order. For a
//! fixed graph every query therefore returns the same edge sequence.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::fmt::Debug;
use std::ops::Add;

use crate::ids::{EdgeId, VertexId};

use super::weighted::DirectedWeightedGraph;

/// Edge weight usable by the shortest-path engine.
///
/// Weights must be non-negative; the engine does not check.
pub trait Weight: Copy + Debug + Default + PartialOrd + Add<Output = Self> {
    /// Total order used for heap ordering.
    fn total_cmp(&self, other: &Self) -> Ordering;
}

impl Weight for f64 {
    fn total_cmp(&self, other: &Self) -> Ordering {
        f64::total_cmp(self, other)
    }
}

impl Weight for u32 {
    fn total_cmp(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }
}

impl Weight for u64 {
    fn total_cmp(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }
}

/// Heap entry ordered by distance, then vertex id.
#[derive(Debug, Clone, Copy)]
struct Candidate<W> {
    distance: W,
    vertex: VertexId,
}

impl<W: Weight> PartialEq for Candidate<W> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<W: Weight> Eq for Candidate<W> {}

impl<W: Weight> PartialOrd for Candidate<W> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<W: Weight> Ord for Candidate<W> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance
            .total_cmp(&other.distance)
            .then_with(|| self.vertex.cmp(&other.vertex))
    }
}

/// A shortest path: its total weight and edges in travel order.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteInfo<W> {
    pub weight: W,
    pub edges: Vec<EdgeId>,
}

/// Distances and predecessor edges from one source to every reachable vertex.
#[derive(Debug, Clone)]
pub struct ShortestPathTree<W> {
    source: VertexId,
    distance: Vec<Option<W>>,
    /// Edge that reached each vertex; `None` for the source and unreached vertices.
    prev_edge: Vec<Option<EdgeId>>,
    /// Tail vertex of every edge, so paths can be walked back without the graph.
    edge_from: Vec<VertexId>,
}

impl<W: Weight> ShortestPathTree<W> {
    /// Run Dijkstra from `source`.
    ///
    /// A source outside the graph yields a tree in which nothing is reachable.
    pub fn compute(graph: &DirectedWeightedGraph<W>, source: VertexId) -> Self {
        let n = graph.vertex_count();
        let mut distance: Vec<Option<W>> = vec![None; n];
        let mut prev_edge: Vec<Option<EdgeId>> = vec![None; n];
        let edge_from = (0..graph.edge_count())
            .map(|i| graph.edge(EdgeId::from_index(i)).from)
            .collect();

        if graph.contains_vertex(source) {
            distance[source.index()] = Some(W::default());

            let mut heap = BinaryHeap::new();
            heap.push(Reverse(Candidate {
                distance: W::default(),
                vertex: source,
            }));

            while let Some(Reverse(Candidate { distance: cost, vertex })) = heap.pop() {
                // Skip stale heap entries
                if let Some(best) = distance[vertex.index()] {
                    if cost.total_cmp(&best) == Ordering::Greater {
                        continue;
                    }
                }

                for &edge_id in graph.incident_edges(vertex) {
                    let edge = graph.edge(edge_id);
                    let candidate = cost + edge.weight;
                    let improves = match distance[edge.to.index()] {
                        Some(known) => candidate.total_cmp(&known) == Ordering::Less,
                        None => true,
                    };

                    if improves {
                        distance[edge.to.index()] = Some(candidate);
                        prev_edge[edge.to.index()] = Some(edge_id);
                        heap.push(Reverse(Candidate {
                            distance: candidate,
                            vertex: edge.to,
                        }));
                    }
                }
            }
        }

        Self {
            source,
            distance,
            prev_edge,
            edge_from,
        }
    }

    pub fn source(&self) -> VertexId {
        self.source
    }

    /// Shortest distance to `target`, or `None` if unreachable.
    pub fn distance_to(&self, target: VertexId) -> Option<W> {
        self.distance.get(target.index()).copied().flatten()
    }

    /// The edge through which `target` is reached.
    pub fn predecessor(&self, target: VertexId) -> Option<EdgeId> {
        self.prev_edge.get(target.index()).copied().flatten()
    }

    /// Shortest path to `target`, or `None` if unreachable.
    ///
    /// The path from the source to itself has zero weight and no edges.
    pub fn route_to(&self, target: VertexId) -> Option<RouteInfo<W>> {
        let weight = self.distance_to(target)?;

        let mut edges = Vec::new();
        let mut current = target;
        while current != self.source {
            let edge = self.predecessor(current)?;
            edges.push(edge);
            current = self.edge_from[edge.index()];
        }
        edges.reverse();

        Some(RouteInfo { weight, edges })
    }
}

/// Shortest path from `from` to `to`, or `None` if `to` is unreachable.
pub fn shortest_route<W: Weight>(
    graph: &DirectedWeightedGraph<W>,
    from: VertexId,
    to: VertexId,
) -> Option<RouteInfo<W>> {
    ShortestPathTree::compute(graph, from).route_to(to)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Edge;

    fn graph(vertex_count: usize, edges: &[(u32, u32, u32)]) -> DirectedWeightedGraph<u32> {
        let mut graph = DirectedWeightedGraph::new(vertex_count);
        for &(from, to, weight) in edges {
            graph.add_edge(Edge {
                from: VertexId(from),
                to: VertexId(to),
                weight,
            });
        }
        graph
    }

    fn edge_ids(raw: &[u32]) -> Vec<EdgeId> {
        raw.iter().map(|&i| EdgeId(i)).collect()
    }

    #[test]
    fn direct_edge_beaten_by_detour() {
        // 0 -> 2 directly costs 10, via 1 costs 3 + 4
        let g = graph(3, &[(0, 2, 10), (0, 1, 3), (1, 2, 4)]);
        let route = shortest_route(&g, VertexId(0), VertexId(2)).unwrap();

        assert_eq!(route.weight, 7);
        assert_eq!(route.edges, edge_ids(&[1, 2]));
    }

    #[test]
    fn unreachable_target() {
        let g = graph(3, &[(0, 1, 1)]);
        assert!(shortest_route(&g, VertexId(0), VertexId(2)).is_none());
        // Edges are directed
        assert!(shortest_route(&g, VertexId(1), VertexId(0)).is_none());
    }

    #[test]
    fn source_to_itself() {
        let g = graph(2, &[(0, 1, 1), (1, 0, 1)]);
        let route = shortest_route(&g, VertexId(0), VertexId(0)).unwrap();

        assert_eq!(route.weight, 0);
        assert!(route.edges.is_empty());
    }

    #[test]
    fn out_of_range_vertices() {
        let g = graph(2, &[(0, 1, 1)]);
        assert!(shortest_route(&g, VertexId(5), VertexId(1)).is_none());
        assert!(shortest_route(&g, VertexId(0), VertexId(5)).is_none());
    }

    #[test]
    fn ties_broken_deterministically() {
        // Two equal-cost paths 0 -> 1 -> 3 and 0 -> 2 -> 3
        let g = graph(4, &[(0, 1, 1), (0, 2, 1), (1, 3, 1), (2, 3, 1)]);
        let first = shortest_route(&g, VertexId(0), VertexId(3)).unwrap();

        for _ in 0..10 {
            assert_eq!(shortest_route(&g, VertexId(0), VertexId(3)).unwrap(), first);
        }
        // Vertex 1 is settled first and claims vertex 3
        assert_eq!(first.edges, edge_ids(&[0, 2]));
    }

    #[test]
    fn tree_answers_every_target() {
        let g = graph(4, &[(0, 1, 2), (1, 2, 2), (0, 2, 5), (2, 3, 1)]);
        let tree = ShortestPathTree::compute(&g, VertexId(0));

        assert_eq!(tree.source(), VertexId(0));
        assert_eq!(tree.distance_to(VertexId(1)), Some(2));
        assert_eq!(tree.distance_to(VertexId(2)), Some(4));
        assert_eq!(tree.distance_to(VertexId(3)), Some(5));
        assert_eq!(tree.predecessor(VertexId(0)), None);
        assert_eq!(tree.route_to(VertexId(3)).unwrap().edges, edge_ids(&[0, 1, 3]));
    }

    #[test]
    fn float_weights() {
        let mut g = DirectedWeightedGraph::new(3);
        g.add_edge(Edge {
            from: VertexId(0),
            to: VertexId(1),
            weight: 0.5,
        });
        g.add_edge(Edge {
            from: VertexId(1),
            to: VertexId(2),
            weight: 0.25,
        });
        let route = shortest_route(&g, VertexId(0), VertexId(2)).unwrap();
        assert_eq!(route.weight, 0.75);
    }

    #[test]
    fn zero_weight_cycle_terminates() {
        let g = graph(3, &[(0, 1, 0), (1, 0, 0), (1, 2, 3)]);
        let route = shortest_route(&g, VertexId(0), VertexId(2)).unwrap();
        assert_eq!(route.weight, 3);
        assert_eq!(route.edges, edge_ids(&[0, 2]));
    }
}
