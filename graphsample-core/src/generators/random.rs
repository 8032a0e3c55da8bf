//! Random graph models driven by a caller-supplied RNG.

use rand::Rng;

use super::classic::{complete_graph, empty_graph};
use crate::graph::{Graph, NodeId};

/// Draws a `G(n, p)` (Erdős-Rényi) graph on nodes `0..n`.
///
/// Uses the geometric skipping of Batagelj and Brandes, "Efficient generation
/// of large random networks" (Phys. Rev. E 71, 2005), so the running time is
/// linear in the number of edges produced rather than quadratic in `n`.
///
/// # Examples
/// ```
/// use graphsample_core::generators::random::fast_gnp_random_graph;
/// use rand::{SeedableRng, rngs::SmallRng};
///
/// let mut rng = SmallRng::seed_from_u64(42);
/// let graph = fast_gnp_random_graph(100, 0.05, &mut rng);
/// assert_eq!(graph.number_of_nodes(), 100);
/// ```
#[must_use]
pub fn fast_gnp_random_graph<R: Rng + ?Sized>(n: u64, p: f64, rng: &mut R) -> Graph {
    if p.is_nan() || p <= 0.0 {
        return empty_graph(n);
    }
    if p >= 1.0 {
        return complete_graph(n);
    }
    let mut graph = empty_graph(n);
    let limit = i64::try_from(n).unwrap_or(i64::MAX);
    let log_q = (1.0 - p).ln();
    let mut v: i64 = 1;
    let mut w: i64 = -1;
    while v < limit {
        let log_r = (1.0 - rng.gen_range(0.0..1.0_f64)).ln();
        #[expect(
            clippy::cast_possible_truncation,
            reason = "skip length is a non-negative geometric draw that saturates at i64::MAX"
        )]
        let skip = (log_r / log_q) as i64;
        w = w.saturating_add(1).saturating_add(skip);
        while w >= v && v < limit {
            w -= v;
            v += 1;
        }
        if v < limit {
            graph.add_edge(NodeId::new(v.unsigned_abs()), NodeId::new(w.unsigned_abs()));
        }
    }
    graph
}

/// Draws a `G(n, m)` graph: uniform among graphs on `0..n` with exactly `m`
/// edges.
///
/// Walks the candidate pairs once using Knuth's selection sampling
/// (Algorithm S, TAOCP vol. 2, 3.4.2). Requests for at least
/// `n * (n - 1) / 2` edges return the complete graph.
#[must_use]
pub fn dense_gnm_random_graph<R: Rng + ?Sized>(n: u64, m: u64, rng: &mut R) -> Graph {
    let max_edges = n.saturating_mul(n.saturating_sub(1)) / 2;
    if m >= max_edges {
        return complete_graph(n);
    }
    let mut graph = empty_graph(n);
    let mut selected = 0;
    let mut seen = 0;
    'pairs: for a in 0..n {
        for b in (a + 1)..n {
            if selected == m {
                break 'pairs;
            }
            #[expect(
                clippy::cast_precision_loss,
                reason = "pair counts far below 2^52 in practice"
            )]
            let keep = rng.gen_range(0.0..1.0_f64) * (max_edges - seen) as f64;
            #[expect(clippy::cast_precision_loss, reason = "bounded by max_edges")]
            let needed = (m - selected) as f64;
            if keep < needed {
                graph.add_edge(NodeId::new(a), NodeId::new(b));
                selected += 1;
            }
            seen += 1;
        }
    }
    graph
}
