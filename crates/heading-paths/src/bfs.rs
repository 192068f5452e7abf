use std::collections::VecDeque;

use crate::dijkstra::DistanceTable;
use crate::traits::{StateSpace, UNREACHABLE};

/// Breadth-first hop counts from `source`.
///
/// Each transition counts as 1 regardless of its cost, so on a space whose
/// edges all cost 1 (such as [`PlainGrid`](crate::PlainGrid)) this is an
/// independent reference for the Dijkstra distances.
pub fn bfs_distances<S: StateSpace>(space: &S, source: S::State) -> DistanceTable<'_, S> {
    let mut table = DistanceTable::unreached(space);
    let Some(si) = space.index(source) else {
        return table;
    };

    let mut queue: VecDeque<usize> = VecDeque::new();
    table.dist[si] = 0;
    queue.push_back(si);

    let mut sbuf = Vec::with_capacity(4);

    while let Some(ci) = queue.pop_front() {
        let current_dist = table.dist[ci];

        sbuf.clear();
        space.successors(space.state(ci), &mut sbuf);

        for &(ns, _) in sbuf.iter() {
            let Some(ni) = space.index(ns) else {
                continue;
            };
            if table.dist[ni] != UNREACHABLE {
                continue;
            }
            table.dist[ni] = current_dist + 1;
            queue.push_back(ni);
        }
    }

    table
}
