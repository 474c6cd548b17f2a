// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Play order for the current collection.
//!
//! A collection's track order never changes, so shuffling is expressed as a
//! permutation of track indices that next/previous walk instead.

use rand::{rng, seq::SliceRandom};

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct PlayOrder {
    order: Vec<usize>,
}

impl PlayOrder {
    /// Collection order, `0..len`.
    pub(crate) fn sequential(len: usize) -> Self {
        Self {
            order: (0..len).collect(),
        }
    }

    /// A random permutation of `0..len` that starts with `first`.
    pub(crate) fn shuffled(len: usize, first: Option<usize>) -> Self {
        let mut order: Vec<usize> = (0..len).collect();
        order.shuffle(&mut rng());

        if let Some(first) = first {
            if let Some(pos) = order.iter().position(|&i| i == first) {
                order.swap(0, pos);
            }
        }

        Self { order }
    }

    pub(crate) fn len(&self) -> usize {
        self.order.len()
    }

    #[cfg(test)]
    pub(crate) fn indices(&self) -> &[usize] {
        &self.order
    }

    /// Track index to play after `current`, wrapping only under `repeat`.
    pub(crate) fn next_after(&self, current: usize, repeat: bool) -> Option<usize> {
        let pos = self.order.iter().position(|&i| i == current)?;
        match self.order.get(pos + 1) {
            Some(&next) => Some(next),
            None if repeat => self.order.first().copied(),
            None => None,
        }
    }

    /// Track index to play before `current`, wrapping only under `repeat`.
    pub(crate) fn previous_before(&self, current: usize, repeat: bool) -> Option<usize> {
        let pos = self.order.iter().position(|&i| i == current)?;
        if pos > 0 {
            self.order.get(pos - 1).copied()
        } else if repeat {
            self.order.last().copied()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn sequential_walks_in_collection_order() {
        let order = PlayOrder::sequential(3);

        assert_eq!(order.next_after(0, false), Some(1));
        assert_eq!(order.next_after(2, false), None);
        assert_eq!(order.next_after(2, true), Some(0));
        assert_eq!(order.previous_before(1, false), Some(0));
        assert_eq!(order.previous_before(0, false), None);
        assert_eq!(order.previous_before(0, true), Some(2));
    }

    #[test]
    fn unknown_index_has_no_neighbours() {
        let order = PlayOrder::sequential(2);

        assert_eq!(order.next_after(5, true), None);
        assert_eq!(order.previous_before(5, true), None);
    }

    #[test]
    fn shuffled_is_a_permutation_starting_with_current() {
        for _ in 0..20 {
            let order = PlayOrder::shuffled(8, Some(5));

            assert_eq!(order.len(), 8);
            assert_eq!(order.indices()[0], 5);
            let unique: HashSet<_> = order.indices().iter().copied().collect();
            assert_eq!(unique, (0..8).collect::<HashSet<_>>());
        }
    }

    #[test]
    fn empty_order_is_harmless() {
        let order = PlayOrder::shuffled(0, Some(0));

        assert_eq!(order.len(), 0);
        assert_eq!(order.next_after(0, true), None);
    }
}
