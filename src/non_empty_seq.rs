use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use std::{
    fmt::{Debug, Display, Formatter},
    num::NonZeroUsize,
    ops::Index,
    slice, vec,
};
use thiserror::Error;

///immutable sequence that cannot be empty
///
///every transformation hands back a fresh value. when the result provably still
///holds an element you get a [`NonEmptySeq`] again; when it could have shrunk to
///nothing you get a plain `Vec` and the guarantee is explicitly gone.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NonEmptySeq<T>(Vec<T>);

///rejection reported when a zero-length sequence is offered to [`TryFrom`]
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("a NonEmptySeq cannot be built from an empty sequence")]
pub struct EmptyError;

impl<T> NonEmptySeq<T> {
    ///the only unchecked entry point. callers inside the crate must have
    ///already proven the vec holds at least one element.
    pub(crate) fn from_non_empty_vec(vec: Vec<T>) -> Self {
        debug_assert!(!vec.is_empty());
        Self(vec)
    }

    pub fn single(value: T) -> Self {
        Self::from_non_empty_vec(vec![value])
    }

    ///one required element plus however many more
    pub fn of(head: T, rest: impl IntoIterator<Item = T>) -> Self {
        let mut vec = vec![head];
        vec.extend(rest);
        Self::from_non_empty_vec(vec)
    }

    ///the only fallible constructor: `None` iff the input is empty
    pub fn from_vec(vec: Vec<T>) -> Option<Self> {
        if vec.is_empty() {
            None
        } else {
            Some(Self::from_non_empty_vec(vec))
        }
    }

    ///head/tail form. the head argument already proves non-emptiness, so
    ///nothing is validated.
    pub fn from_cons(head: T, tail: Vec<T>) -> Self {
        let mut vec = Vec::with_capacity(1 + tail.len());
        vec.push(head);
        vec.extend(tail);
        Self::from_non_empty_vec(vec)
    }

    pub fn len(&self) -> NonZeroUsize {
        //safety: at least one element since construction
        unsafe { NonZeroUsize::new_unchecked(self.0.len()) }
    }

    ///kept for API parity with the general container
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn first(&self) -> &T {
        &self.0[0]
    }

    pub fn last(&self) -> &T {
        &self.0[self.0.len() - 1]
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.0.get(index)
    }

    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.0.iter()
    }

    pub fn append(mut self, value: T) -> Self {
        self.0.push(value);
        self
    }

    ///self's elements followed by the other's; the other side may be empty
    pub fn concat(mut self, other: Vec<T>) -> Self {
        self.0.extend(other);
        self
    }

    ///the other's elements followed by self's
    pub fn prepend(self, other: Vec<T>) -> Self {
        let mut vec = other;
        vec.extend(self.0);
        Self::from_non_empty_vec(vec)
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> NonEmptySeq<U> {
        NonEmptySeq::from_non_empty_vec(self.0.into_iter().map(f).collect())
    }

    ///every expansion is itself non-empty, so the concatenation is too
    pub fn flat_map<U>(self, mut f: impl FnMut(T) -> NonEmptySeq<U>) -> NonEmptySeq<U> {
        let mut out = Vec::with_capacity(self.0.len());
        for value in self.0 {
            out.extend(f(value).0);
        }
        NonEmptySeq::from_non_empty_vec(out)
    }

    ///single left-to-right pass threading an accumulator through every
    ///element; returns the final state next to the mapped sequence
    pub fn map_accum<S, U>(
        self,
        seed: S,
        mut f: impl FnMut(S, T) -> (S, U),
    ) -> (S, NonEmptySeq<U>) {
        let mut state = seed;
        let mut out = Vec::with_capacity(self.0.len());
        for value in self.0 {
            let (next, mapped) = f(state, value);
            state = next;
            out.push(mapped);
        }
        (state, NonEmptySeq::from_non_empty_vec(out))
    }

    ///pairwise combine running to the *longer* operand. once one side runs
    ///out, its counterpart's fill function covers the rest.
    pub fn zip_all_with<U, V>(
        self,
        other: Vec<U>,
        mut left: impl FnMut(T) -> V,
        mut right: impl FnMut(U) -> V,
        mut both: impl FnMut(T, U) -> V,
    ) -> NonEmptySeq<V> {
        let mut out = Vec::with_capacity(self.0.len().max(other.len()));
        let mut rhs = other.into_iter();
        for value in self.0 {
            match rhs.next() {
                Some(partner) => out.push(both(value, partner)),
                None => out.push(left(value)),
            }
        }
        out.extend(rhs.map(right));
        NonEmptySeq::from_non_empty_vec(out)
    }

    ///pairwise combine truncated to the *shorter* operand.
    ///
    ///two non-empty operands always produce at least one pair, but the result
    ///is deliberately handed back as a plain `Vec`: existing callers treat
    ///this as a general sequence, and anyone wanting the refinement back can
    ///run it through [`NonEmptySeq::from_vec`].
    pub fn zip_with<U, V>(
        self,
        other: NonEmptySeq<U>,
        mut f: impl FnMut(T, U) -> V,
    ) -> Vec<V> {
        self.0
            .into_iter()
            .zip(other.0)
            .map(|(a, b)| f(a, b))
            .collect()
    }

    pub fn zip_with_index(self) -> NonEmptySeq<(T, usize)> {
        self.zip_with_index_from(0)
    }

    pub fn zip_with_index_from(self, offset: usize) -> NonEmptySeq<(T, usize)> {
        NonEmptySeq::from_non_empty_vec(
            self.0
                .into_iter()
                .enumerate()
                .map(|(index, value)| (value, offset + index))
                .collect(),
        )
    }

    ///seedless left fold; total because there is always a first element
    pub fn reduce(self, f: impl FnMut(T, T) -> T) -> T {
        let (head, tail) = self.into_cons();
        tail.into_iter().fold(head, f)
    }

    ///head element plus the (possibly empty) remainder
    pub fn into_cons(self) -> (T, Vec<T>) {
        let mut rest = self.0.into_iter();
        let head = rest.next().expect("NonEmptySeq holds at least one element");
        (head, rest.collect())
    }

    ///O(1) escape hatch to the general container; the non-emptiness fact is
    ///discarded exactly here
    pub fn into_vec(self) -> Vec<T> {
        self.0
    }

    pub fn as_slice(&self) -> &[T] {
        &self.0
    }
}

impl<T> NonEmptySeq<NonEmptySeq<T>> {
    pub fn flatten(self) -> NonEmptySeq<T> {
        self.flat_map(|inner| inner)
    }
}

impl<T> From<NonEmptySeq<T>> for Vec<T> {
    fn from(value: NonEmptySeq<T>) -> Self {
        value.0
    }
}

impl<T> TryFrom<Vec<T>> for NonEmptySeq<T> {
    type Error = EmptyError;

    fn try_from(vec: Vec<T>) -> Result<Self, Self::Error> {
        NonEmptySeq::from_vec(vec).ok_or(EmptyError)
    }
}

impl<T> AsRef<[T]> for NonEmptySeq<T> {
    fn as_ref(&self) -> &[T] {
        &self.0
    }
}

impl<T> Index<usize> for NonEmptySeq<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.0[index]
    }
}

impl<T> IntoIterator for NonEmptySeq<T> {
    type Item = T;
    type IntoIter = vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a NonEmptySeq<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<T: Debug> Debug for NonEmptySeq<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut list = f.debug_list();

        for el in &self.0 {
            list.entry(el);
        }

        list.finish()
    }
}

impl<T: Display> Display for NonEmptySeq<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "NonEmptySeq(")?;

        let mut is_first = true;
        for el in &self.0 {
            if is_first {
                is_first = false;
            } else {
                write!(f, ", ")?;
            }

            write!(f, "{el}")?;
        }

        write!(f, ")")
    }
}

impl<T: Serialize> Serialize for NonEmptySeq<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for NonEmptySeq<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let vec = Vec::<T>::deserialize(deserializer)?;
        NonEmptySeq::from_vec(vec).ok_or_else(|| de::Error::custom(EmptyError))
    }
}
