//! Navigation graphs over the level's tile occupancy and path queries.
//!
//! Rather than a dense grid graph, the level is reduced to a sparse
//! visibility graph: the corners diagonally adjacent to bricks become
//! vertices, and two vertices share an edge when the straight line between
//! them crosses no occupied tile. On modest level sizes this keeps the graph
//! small enough that every pair is tested at build time and queries are
//! cheap.
//!
//! One graph exists per headlight channel, built once at level load and
//! selected (never rebuilt) when the channel changes.

use std::collections::HashSet;

use bevy::prelude::*;
use pathfinding::prelude::astar;

use crate::level::{LevelDefinition, TileGrid, to_pixel_position};
use crate::lighting::LightChannel;

pub mod visibility;

pub use visibility::line_of_sight;

/// Edge weights are Euclidean pixel distances scaled to integer costs for
/// the search.
const COST_SCALE: f32 = 10.0;

fn edge_cost(a: Vec2, b: Vec2) -> u32 {
    (a.distance(b) * COST_SCALE) as u32
}

/// Sparse visibility graph over one channel's occupancy grid.
#[derive(Debug, Clone)]
pub struct LevelGraph {
    vertices: Vec<Vec2>,
    edges: Vec<Vec<(usize, u32)>>,
    grid: TileGrid,
}

impl LevelGraph {
    /// Build the graph from candidate critical points.
    ///
    /// Candidates may repeat and may fall outside the grid; both are
    /// filtered here, as are candidates sitting inside an occupied cell.
    /// Deduplication is exact on the integer tile coordinate and keeps
    /// first-insertion order, so identical input always yields an identical
    /// graph.
    pub fn build(candidates: &[IVec2], grid: TileGrid) -> Self {
        assert!(
            grid.is_consistent(),
            "occupancy grid storage does not match its declared dimensions"
        );

        if grid.is_degenerate() {
            return Self {
                vertices: Vec::new(),
                edges: Vec::new(),
                grid,
            };
        }

        let mut seen = HashSet::new();
        let mut vertices = Vec::new();
        for &candidate in candidates {
            if !grid.in_bounds(candidate) || grid.occupied(candidate) {
                continue;
            }
            if seen.insert((candidate.x, candidate.y)) {
                vertices.push(to_pixel_position(candidate));
            }
        }

        let mut edges = vec![Vec::new(); vertices.len()];
        for i in 0..vertices.len() {
            for j in (i + 1)..vertices.len() {
                if line_of_sight(&grid, vertices[i], vertices[j]) {
                    let cost = edge_cost(vertices[i], vertices[j]);
                    edges[i].push((j, cost));
                    edges[j].push((i, cost));
                }
            }
        }

        let edge_count: usize = edges.iter().map(Vec::len).sum::<usize>() / 2;
        debug!(
            "built level graph: {} vertices, {} edges",
            vertices.len(),
            edge_count
        );

        Self {
            vertices,
            edges,
            grid,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.iter().map(Vec::len).sum::<usize>() / 2
    }

    /// Shortest waypoint path from `start` to `goal`, both in pixel
    /// coordinates.
    ///
    /// The returned sequence excludes `start` and ends with `goal`; a direct
    /// line of sight yields just `[goal]`. An unreachable goal, or a
    /// degenerate grid, yields an empty sequence, which callers treat as
    /// "do not move". The query leaves the graph untouched, so identical
    /// inputs always return identical paths.
    pub fn get_path(&self, start: Vec2, goal: Vec2) -> Vec<Vec2> {
        if self.grid.is_degenerate() {
            return Vec::new();
        }
        if line_of_sight(&self.grid, start, goal) {
            return vec![goal];
        }

        // Temporary vertices for this query: `n` is the start, `n + 1` the
        // goal, linked to every permanent vertex they can see.
        let n = self.vertices.len();
        let start_node = n;
        let goal_node = n + 1;

        let start_links: Vec<(usize, u32)> = (0..n)
            .filter(|&i| line_of_sight(&self.grid, start, self.vertices[i]))
            .map(|i| (i, edge_cost(start, self.vertices[i])))
            .collect();
        let goal_links: Vec<Option<u32>> = (0..n)
            .map(|i| {
                line_of_sight(&self.grid, self.vertices[i], goal)
                    .then(|| edge_cost(self.vertices[i], goal))
            })
            .collect();

        let result = astar(
            &start_node,
            |&node| -> Vec<(usize, u32)> {
                if node == start_node {
                    start_links.clone()
                } else if node == goal_node {
                    Vec::new()
                } else {
                    let mut next = self.edges[node].clone();
                    if let Some(cost) = goal_links[node] {
                        next.push((goal_node, cost));
                    }
                    next
                }
            },
            |&node| {
                let position = if node == start_node {
                    start
                } else if node == goal_node {
                    goal
                } else {
                    self.vertices[node]
                };
                edge_cost(position, goal)
            },
            |&node| node == goal_node,
        );

        match result {
            Some((nodes, _cost)) => nodes
                .into_iter()
                .skip(1)
                .map(|node| {
                    if node == goal_node {
                        goal
                    } else {
                        self.vertices[node]
                    }
                })
                .collect(),
            None => Vec::new(),
        }
    }
}

/// The four per-channel graphs, built together at level load.
#[derive(Resource, Debug, Clone)]
pub struct ChannelGraphs {
    graphs: [LevelGraph; 4],
}

impl ChannelGraphs {
    pub fn build(level: &LevelDefinition) -> Self {
        let candidates = level.critical_point_candidates();
        let graphs =
            LightChannel::ALL.map(|channel| LevelGraph::build(&candidates, level.occupancy(channel)));

        info!(
            "built channel graphs: {} / {} / {} / {} vertices",
            graphs[0].vertex_count(),
            graphs[1].vertex_count(),
            graphs[2].vertex_count(),
            graphs[3].vertex_count()
        );

        Self { graphs }
    }

    pub fn graph(&self, channel: LightChannel) -> &LevelGraph {
        &self.graphs[channel.index()]
    }
}

/// An immutable waypoint sequence plus a consumption cursor.
///
/// Pursuers walk the sequence front to back; the cursor advances instead of
/// mutating the sequence, so a stale path can still report its final
/// destination for the replan check.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NavPath {
    waypoints: Vec<Vec2>,
    current_index: usize,
}

impl NavPath {
    pub fn set(&mut self, waypoints: Vec<Vec2>) {
        self.waypoints = waypoints;
        self.current_index = 0;
    }

    pub fn clear(&mut self) {
        self.waypoints.clear();
        self.current_index = 0;
    }

    pub fn current_waypoint(&self) -> Option<Vec2> {
        self.waypoints.get(self.current_index).copied()
    }

    pub fn advance_waypoint(&mut self) {
        if self.current_index < self.waypoints.len() {
            self.current_index += 1;
        }
    }

    pub fn final_destination(&self) -> Option<Vec2> {
        self.waypoints.last().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// All waypoints consumed (also true for a path that was never set).
    pub fn is_finished(&self) -> bool {
        self.current_index >= self.waypoints.len()
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }
}
