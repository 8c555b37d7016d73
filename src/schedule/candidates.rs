use super::types::Pair;

/// Iterates over every 4-element subset of `pool` in lexicographic index order.
///
/// `pool` must be sorted ascending; the yielded subsets are then sorted too.
pub struct Quads<'a> {
    pool: &'a [usize],
    idx: [usize; 4],
    done: bool,
}

impl<'a> Quads<'a> {
    pub fn new(pool: &'a [usize]) -> Self {
        Quads {
            pool,
            idx: [0, 1, 2, 3],
            done: pool.len() < 4,
        }
    }
}

impl<'a> Iterator for Quads<'a> {
    type Item = [usize; 4];

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let n = self.pool.len();
        let current = self.idx.map(|i| self.pool[i]);

        // Advance the rightmost position that still has room, then reset
        // everything after it to consecutive positions.
        let mut pos = 4;
        while pos > 0 {
            pos -= 1;
            if self.idx[pos] < n - 4 + pos {
                self.idx[pos] += 1;
                for next in pos + 1..4 {
                    self.idx[next] = self.idx[next - 1] + 1;
                }
                return Some(current);
            }
        }
        self.done = true;
        Some(current)
    }
}

/// The three ways to split four players into two teams, in evaluation order.
/// `team1` always holds the first player of the quad.
pub fn splits(quad: [usize; 4]) -> [(Pair, Pair); 3] {
    let [a, b, c, d] = quad;
    [
        (Pair::new(a, b), Pair::new(c, d)),
        (Pair::new(a, c), Pair::new(b, d)),
        (Pair::new(a, d), Pair::new(b, c)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quads_of_six_in_lexicographic_order() {
        let pool = [0, 1, 2, 3, 4, 5];
        let quads: Vec<[usize; 4]> = Quads::new(&pool).collect();
        assert_eq!(quads.len(), 15);
        assert_eq!(quads[0], [0, 1, 2, 3]);
        assert_eq!(quads[1], [0, 1, 2, 4]);
        assert_eq!(quads[14], [2, 3, 4, 5]);
        assert!(quads.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn quads_use_pool_values_not_positions() {
        let pool = [2, 5, 7, 9, 11];
        let quads: Vec<[usize; 4]> = Quads::new(&pool).collect();
        assert_eq!(quads.len(), 5);
        assert_eq!(quads[0], [2, 5, 7, 9]);
        assert_eq!(quads[4], [5, 7, 9, 11]);
    }

    #[test]
    fn exactly_four_gives_one_quad_and_fewer_gives_none() {
        assert_eq!(Quads::new(&[1, 2, 3, 4]).count(), 1);
        assert_eq!(Quads::new(&[1, 2, 3]).count(), 0);
        assert_eq!(Quads::new(&[]).count(), 0);
    }

    #[test]
    fn splits_cover_all_three_team_pairings() {
        let s = splits([0, 1, 2, 3]);
        assert_eq!(s[0], (Pair::new(0, 1), Pair::new(2, 3)));
        assert_eq!(s[1], (Pair::new(0, 2), Pair::new(1, 3)));
        assert_eq!(s[2], (Pair::new(0, 3), Pair::new(1, 2)));
    }
}
