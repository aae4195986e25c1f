//! Slicing of the x-sorted points into contiguous groups, and the
//! coarse-to-fine sweep that merges neighbouring groups.

use crate::config::TriangulationConfig;
use crate::edges::EdgeSet;
use crate::error::Result;
use crate::merge::merge_groups;
use crate::triangle::TriangleIndex;

/// Size of the groups seeded directly with edges.
pub const BASE_GROUP: usize = 3;

/// Split the indices `0..len` into contiguous groups of `size`.
///
/// The last group is shorter when `len` is not a multiple of `size`.
pub fn chunk(len: usize, size: usize) -> Vec<Vec<u32>> {
    let indices: Vec<u32> = (0..len as u32).collect();
    indices.chunks(size.max(1)).map(<[u32]>::to_vec).collect()
}

/// Group sizes merged after the base pass, for an input of `len` points.
///
/// Sizes that would leave a single group are dropped.
pub fn schedule(config: &TriangulationConfig, len: usize) -> Vec<usize> {
    let mut sizes: Vec<usize> = config
        .coarsening
        .iter()
        .copied()
        .filter(|&size| size < len)
        .collect();

    if config.extend_schedule {
        let mut size = config.coarsening.last().copied().unwrap_or(BASE_GROUP) * 2;
        while size < len {
            sizes.push(size);
            size *= 2;
        }
    }

    sizes
}

/// Seed the edges of a single base group.
///
/// Two points give one edge. Three points give a closed triangle, or the two
/// edges of their chain when they are collinear. Returns the number of edges
/// inserted.
pub fn seed_group(edges: &mut EdgeSet, group: &[u32]) -> usize {
    let pairs: Vec<(u32, u32)> = match *group {
        [a, b] => vec![(a, b)],
        [a, b, c] => {
            let triangle = edges.realize_triangle(&TriangleIndex::new([a, b, c]));
            if triangle.is_degenerate(edges.tolerance()) {
                let mut chain = [a, b, c];
                chain.sort_by(|&i, &j| {
                    let (pi, pj) = (edges.point(i), edges.point(j));
                    pi.x.total_cmp(&pj.x).then(pi.y.total_cmp(&pj.y))
                });
                tracing::trace!(?chain, "collinear base group");
                vec![(chain[0], chain[1]), (chain[1], chain[2])]
            } else {
                vec![(a, b), (b, c), (c, a)]
            }
        }
        _ => Vec::new(),
    };

    pairs
        .into_iter()
        .filter(|&(p, q)| edges.insert_if_valid(p, q))
        .count()
}

fn merge_adjacent(
    edges: &mut EdgeSet,
    groups: &[Vec<u32>],
    config: &TriangulationConfig,
) -> Result<()> {
    for pair in groups.windows(2) {
        merge_groups(edges, &pair[0], &pair[1], config)?;
    }
    Ok(())
}

/// Run the whole coarse-to-fine sweep over every point held by `edges`.
pub fn sweep(edges: &mut EdgeSet, config: &TriangulationConfig) -> Result<()> {
    let len = edges.points().len();

    let base = chunk(len, BASE_GROUP);
    for group in &base {
        seed_group(edges, group);
    }
    tracing::debug!(groups = base.len(), edges = edges.len(), "seeded base groups");
    merge_adjacent(edges, &base, config)?;

    for size in schedule(config, len) {
        let groups = chunk(len, size);
        merge_adjacent(edges, &groups, config)?;
        tracing::debug!(size, groups = groups.len(), edges = edges.len(), "merge pass");
    }

    Ok(())
}

// =============================================================================
