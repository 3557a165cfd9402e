/// Returns the binomial coefficient `C(n, k)`, saturating at `u64::MAX`.
///
/// # Examples
/// ```
/// use poker_equity::binomial;
///
/// assert_eq!(binomial(7, 5), 21);
/// assert_eq!(binomial(52, 5), 2_598_960);
/// assert_eq!(binomial(3, 4), 0);
/// ```
pub fn binomial(n: usize, k: usize) -> u64 {
    if k > n {
        return 0;
    }

    let k = k.min(n - k);
    let mut result = 1u128;
    for i in 0..k {
        // exact at every step: the product of i + 1 consecutive integers is divisible by (i + 1)!
        result = result * (n - i) as u128 / (i + 1) as u128;
        if result > u64::MAX as u128 {
            return u64::MAX;
        }
    }

    result as u64
}

/// Returns an iterator over all `k`-element subsets of `items`.
///
/// Subsets are produced in lexicographic order of positions, each exactly once, and the elements of
/// each subset keep their relative order in `items`.
///
/// # Examples
/// ```
/// use poker_equity::combinations;
///
/// let subsets = combinations(&[1, 2, 3, 4], 2).collect::<Vec<_>>();
/// assert_eq!(subsets.len(), 6);
/// assert_eq!(subsets[0], vec![1, 2]);
/// assert_eq!(subsets[5], vec![3, 4]);
/// ```
#[inline]
pub fn combinations<T: Copy>(items: &[T], k: usize) -> Combinations<'_, T> {
    Combinations {
        items,
        indices: (0..k).collect(),
        done: k > items.len(),
    }
}

/// Iterator returned by [`combinations`].
#[derive(Debug, Clone)]
pub struct Combinations<'a, T> {
    items: &'a [T],
    indices: Vec<usize>,
    done: bool,
}

impl<'a, T: Copy> Combinations<'a, T> {
    /// Writes the current subset into `buf` and advances, without allocating a new vector.
    ///
    /// Returns `false` when all subsets have been produced.
    pub fn next_into(&mut self, buf: &mut Vec<T>) -> bool {
        if self.done {
            return false;
        }

        buf.clear();
        buf.extend(self.indices.iter().map(|&i| self.items[i]));
        self.advance();
        true
    }

    fn advance(&mut self) {
        let n = self.items.len();
        let k = self.indices.len();

        let mut i = k;
        loop {
            if i == 0 {
                self.done = true;
                return;
            }
            i -= 1;
            if self.indices[i] != i + n - k {
                break;
            }
        }

        self.indices[i] += 1;
        for j in i + 1..k {
            self.indices[j] = self.indices[j - 1] + 1;
        }
    }
}

impl<'a, T: Copy> Iterator for Combinations<'a, T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut buf = Vec::with_capacity(self.indices.len());
        if self.next_into(&mut buf) {
            Some(buf)
        } else {
            None
        }
    }
}
