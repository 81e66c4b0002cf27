//! All-pairs shortest paths over the factory graph.
//!
//! The table is built once from the link list announced at game start and is
//! read-only afterwards. Each entry keeps the shortest distance between two
//! factories and one intermediate factory on a shortest path, which is enough
//! to recover the first hop without storing whole paths.

use crate::world::FactoryId;

/// Distance marker for pairs with no known path.
pub const UNREACHABLE: u32 = u32::MAX;

/// An undirected link between two factories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Link {
    /// One endpoint.
    pub a: FactoryId,
    /// The other endpoint.
    pub b: FactoryId,
    /// Travel time in turns.
    pub distance: u32,
}

impl Link {
    /// Create a link.
    #[must_use]
    pub const fn new(a: FactoryId, b: FactoryId, distance: u32) -> Self {
        Self { a, b, distance }
    }
}

/// One cell of the table.
#[derive(Debug, Clone, Copy)]
struct Route {
    /// Shortest known distance.
    distance: u32,
    /// Intermediate factory of the last improving relaxation, or the source
    /// itself when the direct link was never beaten.
    via: FactoryId,
}

/// Shortest distances, first-hop data and normalized scoring costs.
#[derive(Debug, Clone)]
pub struct RoutingTable {
    /// Number of factories.
    size: usize,
    /// Raw link weights in row-major order, [`UNREACHABLE`] if not linked.
    edges: Vec<u32>,
    /// Relaxed routes in row-major order.
    routes: Vec<Route>,
    /// Shortest distances divided by `cost_scale`.
    costs: Vec<f64>,
    /// Divisor applied to distances to obtain costs.
    cost_scale: f64,
}

impl RoutingTable {
    /// Build the table for `factory_count` factories.
    ///
    /// Links with an endpoint outside `0..factory_count` and self-links are
    /// ignored. When two links join the same pair the shorter one wins.
    /// The graph is expected to be connected; pairs that are not keep
    /// [`UNREACHABLE`] as their distance.
    #[must_use]
    pub fn new(factory_count: usize, links: &[Link]) -> Self {
        let n = factory_count;
        let mut edges = vec![UNREACHABLE; n * n];
        let mut weight_range: Option<(u32, u32)> = None;

        for link in links {
            if link.a == link.b || link.a >= n || link.b >= n {
                continue;
            }
            let ab = link.a * n + link.b;
            let ba = link.b * n + link.a;
            edges[ab] = edges[ab].min(link.distance);
            edges[ba] = edges[ab];
            weight_range = Some(match weight_range {
                Some((lo, hi)) => (lo.min(link.distance), hi.max(link.distance)),
                None => (link.distance, link.distance),
            });
        }

        let mut routes: Vec<Route> = (0..n * n)
            .map(|idx| {
                let (i, j) = (idx / n, idx % n);
                let distance = if i == j { 0 } else { edges[idx] };
                Route { distance, via: i }
            })
            .collect();

        for k in 0..n {
            for i in 0..n {
                let to_k = routes[i * n + k].distance;
                if to_k == UNREACHABLE {
                    continue;
                }
                for j in 0..n {
                    let from_k = routes[k * n + j].distance;
                    if from_k == UNREACHABLE {
                        continue;
                    }
                    let candidate = to_k.saturating_add(from_k);
                    if candidate < routes[i * n + j].distance {
                        routes[i * n + j] = Route {
                            distance: candidate,
                            via: k,
                        };
                    }
                }
            }
        }

        // A single distinct weight gives a zero range; fall back to raw distances.
        let cost_scale = match weight_range {
            Some((lo, hi)) if hi > lo => 0.1 * f64::from(hi - lo),
            _ => 1.0,
        };
        let costs = routes
            .iter()
            .map(|r| {
                if r.distance == UNREACHABLE {
                    f64::INFINITY
                } else {
                    f64::from(r.distance) / cost_scale
                }
            })
            .collect();

        Self {
            size: n,
            edges,
            routes,
            costs,
            cost_scale,
        }
    }

    /// Number of factories covered by the table.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.size
    }

    /// Check if the table covers no factory.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Shortest travel time from `src` to `dst` in turns.
    #[must_use]
    #[inline]
    pub fn distance(&self, src: FactoryId, dst: FactoryId) -> u32 {
        self.routes[src * self.size + dst].distance
    }

    /// Weight of the direct link between two factories, if any.
    #[must_use]
    pub fn edge(&self, a: FactoryId, b: FactoryId) -> Option<u32> {
        match self.edges[a * self.size + b] {
            UNREACHABLE => None,
            w => Some(w),
        }
    }

    /// Normalized shortest distance, used for scoring only.
    #[must_use]
    #[inline]
    pub fn cost(&self, src: FactoryId, dst: FactoryId) -> f64 {
        self.costs[src * self.size + dst]
    }

    /// Divisor turning raw distances into costs.
    #[must_use]
    pub const fn cost_scale(&self) -> f64 {
        self.cost_scale
    }

    /// First factory to send cyborgs to when travelling from `src` to `dst`.
    ///
    /// Peels the stored intermediates back from the destination until one is
    /// reached directly from `src`. Returns `src` when `src == dst` and `dst`
    /// when no path is known.
    #[must_use]
    pub fn next_hop(&self, src: FactoryId, dst: FactoryId) -> FactoryId {
        if src == dst {
            return src;
        }
        let mut target = dst;
        loop {
            let via = self.routes[src * self.size + target].via;
            if via == src {
                return target;
            }
            target = via;
        }
    }

    /// Every factory visited on the way from `src` to `dst`, `dst` included.
    ///
    /// Empty when `src == dst`. Stops early if `dst` is unreachable.
    #[must_use]
    pub fn path(&self, src: FactoryId, dst: FactoryId) -> Vec<FactoryId> {
        let mut path = Vec::new();
        if self.distance(src, dst) == UNREACHABLE {
            return path;
        }
        let mut current = src;
        while current != dst {
            current = self.next_hop(current, dst);
            path.push(current);
        }
        path
    }
}
