use std::collections::HashMap;

/// Sequences at least this long stop indexing characters that occur in more
/// than 1% of positions (+1).
const AUTOJUNK_MIN_LEN: usize = 200;

/// Character-level similarity in [0, 1].
///
/// Computed as `2 * M / T`, where `M` is the number of characters covered by
/// matching blocks and `T` is the combined length of both words. Blocks are
/// found by taking the longest common run (earliest in `a`, then earliest in
/// `b`, on ties) and recursing into the unmatched text on either side.
/// Two empty strings are identical and score 1.0.
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    let matched: usize = BlockMatcher::new(&a, &b)
        .matching_blocks()
        .iter()
        .map(|block| block.size)
        .sum();
    2.0 * matched as f64 / total as f64
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct MatchingBlock {
    pub a_start: usize,
    pub b_start: usize,
    pub size: usize,
}

pub(crate) struct BlockMatcher<'a> {
    a: &'a [char],
    b: &'a [char],
    b_positions: HashMap<char, Vec<usize>>,
}

impl<'a> BlockMatcher<'a> {
    pub(crate) fn new(a: &'a [char], b: &'a [char]) -> Self {
        let mut b_positions: HashMap<char, Vec<usize>> = HashMap::new();
        for (j, &c) in b.iter().enumerate() {
            b_positions.entry(c).or_default().push(j);
        }
        if b.len() >= AUTOJUNK_MIN_LEN {
            let popular_above = b.len() / 100 + 1;
            b_positions.retain(|_, positions| positions.len() <= popular_above);
        }
        Self { a, b, b_positions }
    }

    /// Non-overlapping blocks sorted by position; zero-size blocks are omitted.
    pub(crate) fn matching_blocks(&self) -> Vec<MatchingBlock> {
        let mut blocks = Vec::new();
        let mut pending = vec![(0, self.a.len(), 0, self.b.len())];
        while let Some((a_lo, a_hi, b_lo, b_hi)) = pending.pop() {
            let block = self.longest_match(a_lo, a_hi, b_lo, b_hi);
            if block.size == 0 {
                continue;
            }
            let a_end = block.a_start + block.size;
            let b_end = block.b_start + block.size;
            if a_lo < block.a_start && b_lo < block.b_start {
                pending.push((a_lo, block.a_start, b_lo, block.b_start));
            }
            if a_end < a_hi && b_end < b_hi {
                pending.push((a_end, a_hi, b_end, b_hi));
            }
            blocks.push(block);
        }
        blocks.sort_by_key(|block| (block.a_start, block.b_start));
        blocks
    }

    fn longest_match(&self, a_lo: usize, a_hi: usize, b_lo: usize, b_hi: usize) -> MatchingBlock {
        let (mut best_a, mut best_b, mut best_size) = (a_lo, b_lo, 0usize);

        // run_ends[j] = length of the common run ending at a[i - 1], b[j].
        let mut run_ends: HashMap<usize, usize> = HashMap::new();
        for i in a_lo..a_hi {
            let mut next_run_ends = HashMap::new();
            if let Some(positions) = self.b_positions.get(&self.a[i]) {
                for &j in positions {
                    if j < b_lo {
                        continue;
                    }
                    if j >= b_hi {
                        break;
                    }
                    let run = j
                        .checked_sub(1)
                        .and_then(|prev| run_ends.get(&prev))
                        .copied()
                        .unwrap_or(0)
                        + 1;
                    next_run_ends.insert(j, run);
                    if run > best_size {
                        best_a = i + 1 - run;
                        best_b = j + 1 - run;
                        best_size = run;
                    }
                }
            }
            run_ends = next_run_ends;
        }

        // Characters dropped from the index can still extend a block.
        while best_a > a_lo && best_b > b_lo && self.a[best_a - 1] == self.b[best_b - 1] {
            best_a -= 1;
            best_b -= 1;
            best_size += 1;
        }
        while best_a + best_size < a_hi
            && best_b + best_size < b_hi
            && self.a[best_a + best_size] == self.b[best_b + best_size]
        {
            best_size += 1;
        }

        MatchingBlock {
            a_start: best_a,
            b_start: best_b,
            size: best_size,
        }
    }
}
