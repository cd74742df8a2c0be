use crate::codec::StateCodec;
use crate::engine::Board;
use crate::heuristics::remaining_estimate;
use log::{debug, info};
use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap};
use std::time::{Duration, Instant};

/// Outcome of one search run.
#[derive(Clone, Debug)]
pub struct SolveReport {
    /// Fingerprints of every board along the found line of play, initial
    /// state first and solved state last. `None` when the whole reachable
    /// space was explored without hitting the goal.
    pub path: Option<Vec<u64>>,
    /// Number of states finalized (popped and expanded) before the search
    /// ended.
    pub states_finalized: usize,
    /// Wall-clock time the search took.
    pub elapsed: Duration,
}

/// A frontier entry: one candidate board plus its ordering key.
///
/// Ordering compares `(priority, moves, seq)` and nothing else, so equal
/// priorities fall back to fewer moves taken, then to insertion order. The
/// board itself never participates in comparisons.
struct SearchNode {
    priority: u32,
    moves: u32,
    seq: u64,
    key: u64,
    parent: Option<u64>,
    board: Board,
}

impl PartialEq for SearchNode {
    fn eq(&self, other: &Self) -> bool {
        (self.priority, self.moves, self.seq) == (other.priority, other.moves, other.seq)
    }
}

impl Eq for SearchNode {}

impl PartialOrd for SearchNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SearchNode {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.priority, self.moves, self.seq).cmp(&(other.priority, other.moves, other.seq))
    }
}

/// Searches for a line of play that brings the goal piece home.
///
/// Best-first search over canonical fingerprints: the frontier is a min-heap
/// ordered by `moves so far + remaining_estimate`, and the visited map keeps
/// one parent fingerprint per finalized state. Duplicate frontier entries are
/// tolerated and discarded lazily when popped, which is cheaper than
/// updating priorities in place.
///
/// Running out of frontier is the normal "no solution" outcome, not an
/// error; by then every state reachable from `initial` has been finalized
/// exactly once.
pub fn solve(initial: &Board) -> SolveReport {
    let start = Instant::now();
    let codec = StateCodec::for_board(initial);

    let mut frontier: BinaryHeap<Reverse<SearchNode>> = BinaryHeap::new();
    let mut visited: HashMap<u64, Option<u64>> = HashMap::new();
    let mut states_finalized = 0usize;
    let mut seq = 0u64;

    frontier.push(Reverse(SearchNode {
        priority: remaining_estimate(initial),
        moves: 0,
        seq,
        key: codec.encode(initial),
        parent: None,
        board: initial.clone(),
    }));

    while let Some(Reverse(node)) = frontier.pop() {
        if visited.contains_key(&node.key) {
            // A cheaper route to this state was finalized earlier.
            continue;
        }
        visited.insert(node.key, node.parent);
        states_finalized += 1;

        if node.board.is_solved() {
            let path = reconstruct(&visited, node.key);
            info!(
                "solved in {} moves after finalizing {} states",
                path.len() - 1,
                states_finalized
            );
            return SolveReport {
                path: Some(path),
                states_finalized,
                elapsed: start.elapsed(),
            };
        }

        if states_finalized % 10_000 == 0 {
            debug!(
                "finalized {} states, frontier holds {}",
                states_finalized,
                frontier.len()
            );
        }

        for (successor, _, _) in node.board.successors() {
            let key = codec.encode(&successor);
            if visited.contains_key(&key) {
                continue;
            }
            seq += 1;
            let moves = node.moves + 1;
            frontier.push(Reverse(SearchNode {
                priority: moves + remaining_estimate(&successor),
                moves,
                seq,
                key,
                parent: Some(node.key),
                board: successor,
            }));
        }
    }

    info!(
        "exhausted the reachable space after finalizing {} states",
        states_finalized
    );
    SolveReport {
        path: None,
        states_finalized,
        elapsed: start.elapsed(),
    }
}

/// Walks the parent chain back from the goal fingerprint and returns the
/// path in chronological order.
fn reconstruct(visited: &HashMap<u64, Option<u64>>, goal_key: u64) -> Vec<u64> {
    let mut path = vec![goal_key];
    let mut current = goal_key;
    while let Some(&Some(parent)) = visited.get(&current) {
        path.push(parent);
        current = parent;
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::board_from_str_array;

    /// The square has to get past a lone horizontal domino.
    fn escort_board() -> Board {
        board_from_str_array(
            &[
                ".aa.",
                ".aa.",
                ".bb.",
                "....",
                "....",
            ],
            None,
            (3, 1),
        )
        .unwrap()
    }

    #[test]
    fn test_solve_finds_a_path() {
        let board = escort_board();
        let report = solve(&board);

        let path = report.path.expect("the escort board is solvable");
        let codec = StateCodec::for_board(&board);
        assert_eq!(path[0], codec.encode(&board));
        let last = codec.decode(*path.last().unwrap()).unwrap();
        assert!(last.is_solved());

        // The domino has to move at least once and the square at least three
        // times, so no line of play is shorter than four moves.
        assert!(path.len() >= 5, "path suspiciously short: {:?}", path);
        assert!(report.states_finalized >= path.len());
    }

    #[test]
    fn test_solve_path_steps_are_single_moves() {
        let board = escort_board();
        let codec = StateCodec::for_board(&board);
        let path = solve(&board).path.expect("the escort board is solvable");

        for window in path.windows(2) {
            let here = codec.decode(window[0]).unwrap();
            let next_key = window[1];
            let reachable = here
                .successors()
                .any(|(successor, _, _)| codec.encode(&successor) == next_key);
            assert!(
                reachable,
                "consecutive path states must differ by one move"
            );
        }
    }

    #[test]
    fn test_solve_on_solved_board_is_trivial() {
        let board = board_from_str_array(
            &[
                "b...",
                "b...",
                "....",
                ".aa.",
                ".aa.",
            ],
            None,
            (3, 1),
        )
        .unwrap();
        assert!(board.is_solved());

        let report = solve(&board);
        let codec = StateCodec::for_board(&board);
        assert_eq!(report.path, Some(vec![codec.encode(&board)]));
        assert_eq!(report.states_finalized, 1);
    }

    #[test]
    fn test_unsolvable_board_explores_everything() {
        // The vertical domino owns the right edge; the square can never
        // reach (0, 2). Exactly three arrangements are reachable.
        let board = board_from_str_array(
            &[
                "aab.",
                "aab.",
            ],
            None,
            (0, 2),
        )
        .unwrap();

        let report = solve(&board);
        assert_eq!(report.path, None);
        assert_eq!(report.states_finalized, 3);
    }

    #[test]
    fn test_solve_is_deterministic() {
        let board = escort_board();
        let first = solve(&board);
        let second = solve(&board);
        assert_eq!(first.path, second.path);
        assert_eq!(first.states_finalized, second.states_finalized);
    }
}
