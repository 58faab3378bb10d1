// Copyright (C) 2023 setzer22 and contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use itertools::Itertools;
use smallvec::SmallVec;

pub type SVec<T> = SmallVec<[T; 4]>;

pub trait IteratorUtils: Iterator {
    fn collect_svec(self) -> SVec<Self::Item>
    where
        Self: Sized,
    {
        self.collect()
    }

    /// Collects exactly three items. Panics if the iterator yields any other
    /// amount, which for a face cycle means the face is not a triangle.
    fn collect_triple(self) -> [Self::Item; 3]
    where
        Self: Sized,
    {
        match self.collect_tuple() {
            Some((a, b, c)) => [a, b, c],
            None => panic!("Expected exactly three elements"),
        }
    }
}

impl<T: ?Sized> IteratorUtils for T where T: Iterator {}

pub trait SliceUtils<T> {
    /// Same as .iter().copied(), but doesn't trigger rustfmt line breaks
    fn iter_cpy(&self) -> std::iter::Copied<std::slice::Iter<'_, T>>;
}

impl<T: Copy> SliceUtils<T> for [T] {
    fn iter_cpy(&self) -> std::iter::Copied<std::slice::Iter<'_, T>> {
        self.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_triple() {
        assert_eq!([1, 2, 3].iter_cpy().collect_triple(), [1, 2, 3]);
        assert_eq!((0..3).collect_svec().len(), 3);
    }

    #[test]
    #[should_panic]
    fn test_collect_triple_rejects_quads() {
        let _ = (0..4).collect_triple();
    }
}
