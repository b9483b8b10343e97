//! k-ring expansion around a cell.
//!
//! A [`Neighborhood`] is the center cell plus every cell within `ring_size`
//! adjacency hops on the hexagonal grid. It is computed on demand for a single
//! query and answers membership in O(1).
//!
//! For ring `k` on a regular region the neighborhood holds `1 + 3k(k+1)`
//! cells. Near one of the grid's pentagons it holds fewer; that is part of the
//! grid's topology, not an error.

use crate::compute::validation::MAX_RING_SIZE;
use crate::error::Result;
use cellwatch_types::cell::GeoCellId;
use h3o::CellIndex;
use rustc_hash::FxHashSet;

/// Number of cells in a ring of size `k` on a pentagon-free region.
///
/// Saturates instead of overflowing; the real grid is finite, so very large
/// `k` only bounds the answer from above.
#[inline]
pub const fn regular_ring_len(k: u32) -> usize {
    let k = k as usize;
    k.saturating_mul(k.saturating_add(1))
        .saturating_mul(3)
        .saturating_add(1)
}

/// Cells within a fixed number of hops of a center cell, center included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Neighborhood {
    center: GeoCellId,
    ring_size: u32,
    cells: FxHashSet<GeoCellId>,
}

impl Neighborhood {
    pub fn center(&self) -> GeoCellId {
        self.center
    }

    pub fn ring_size(&self) -> u32 {
        self.ring_size
    }

    /// Membership test used by proximity queries.
    #[inline]
    pub fn contains(&self, cell: &GeoCellId) -> bool {
        self.cells.contains(cell)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false: a neighborhood contains at least its center.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GeoCellId> {
        self.cells.iter()
    }

    pub fn is_subset(&self, other: &Neighborhood) -> bool {
        self.cells.is_subset(&other.cells)
    }

    /// Cells in ascending id order, for stable output.
    pub fn to_sorted_vec(&self) -> Vec<GeoCellId> {
        let mut cells: Vec<_> = self.cells.iter().copied().collect();
        cells.sort_unstable();
        cells
    }
}

/// Expand `center` into the set of cells within `ring_size` hops.
///
/// `ring_size = 0` yields exactly `{center}`.
///
/// # Examples
///
/// ```
/// use cellwatch::compute::geocell::index;
/// use cellwatch::compute::neighborhood::neighbors;
///
/// let center = index(37.7749, -122.4194, 8)?;
///
/// let ring0 = neighbors(&center, 0);
/// assert_eq!(ring0.len(), 1);
/// assert!(ring0.contains(&center));
///
/// let ring1 = neighbors(&center, 1);
/// assert_eq!(ring1.len(), 7);
/// # Ok::<(), cellwatch::CellwatchError>(())
/// ```
pub fn neighbors(center: &GeoCellId, ring_size: u32) -> Neighborhood {
    let mut cells = FxHashSet::default();
    cells.reserve(regular_ring_len(ring_size.min(MAX_RING_SIZE)));
    cells.insert(*center);

    if ring_size <= MAX_RING_SIZE {
        cells.extend(
            center
                .inner()
                .grid_disk_safe(ring_size)
                .map(GeoCellId::from),
        );
    } else {
        expand_by_frontier(center.inner(), ring_size, &mut cells);
    }

    log::trace!(
        "expanded {} with ring {} into {} cells",
        center,
        ring_size,
        cells.len()
    );

    Neighborhood {
        center: *center,
        ring_size,
        cells,
    }
}

/// Ring-by-ring expansion for large `ring_size`.
///
/// `grid_disk_safe` sizes its buffers from the hex-plane formula, which is
/// far larger than the grid itself once `k` exceeds the grid's diameter.
/// Growing one ring at a time stops as soon as a ring adds nothing new.
fn expand_by_frontier(
    origin: CellIndex,
    ring_size: u32,
    cells: &mut FxHashSet<GeoCellId>,
) {
    let mut frontier = vec![origin];
    let mut ring = 0;

    while ring < ring_size && !frontier.is_empty() {
        let mut next = Vec::with_capacity(frontier.len() * 2);
        for cell in frontier {
            for neighbor in cell.grid_disk_safe(1) {
                if cells.insert(GeoCellId::from(neighbor)) {
                    next.push(neighbor);
                }
            }
        }
        frontier = next;
        ring += 1;
    }
}

/// Expand a cell given in its string form.
///
/// # Errors
///
/// [`CellwatchError::InvalidCell`](crate::CellwatchError::InvalidCell) if
/// `center` is not a well-formed cell id.
pub fn neighbors_of(center: &str, ring_size: u32) -> Result<Neighborhood> {
    let center: GeoCellId = center.parse()?;
    Ok(neighbors(&center, ring_size))
}
