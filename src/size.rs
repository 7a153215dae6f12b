use std::num::NonZeroUsize;

use crate::error::{ChunkError, Result};

/// How a stream is cut into chunks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkSize<P> {
    /// Consecutive groups of exactly this many elements, the last one possibly shorter.
    Fixed(NonZeroUsize),
    /// A chunk ends with (and includes) every element the predicate accepts.
    Split(P),
}

impl<P> ChunkSize<P> {
    /// A fixed size, rejecting zero.
    pub fn fixed(size: usize) -> Result<Self> {
        NonZeroUsize::new(size)
            .map(ChunkSize::Fixed)
            .ok_or(ChunkError::ZeroSize)
    }

    /// Whether chunks are cut by count.
    pub fn is_fixed(&self) -> bool {
        matches!(self, ChunkSize::Fixed(_))
    }
}

/// Conversion of a `chunk_size` argument into a validated [`ChunkSize`].
///
/// Implemented for every primitive integer up to 64 bits, for
/// [`NonZeroUsize`], for any `FnMut(&T) -> bool` and for [`ChunkSize`]
/// itself. Integers are checked at runtime; anything else is refused by
/// the compiler.
///
/// Closures passed through this trait need their argument type spelled
/// out, e.g. `|i: &i32| *i == 15`.
pub trait IntoChunkSize<T> {
    type Predicate: FnMut(&T) -> bool;

    fn into_chunk_size(self) -> Result<ChunkSize<Self::Predicate>>;
}

impl<T, P> IntoChunkSize<T> for ChunkSize<P>
where
    P: FnMut(&T) -> bool,
{
    type Predicate = P;

    fn into_chunk_size(self) -> Result<ChunkSize<P>> {
        Ok(self)
    }
}

impl<T, F> IntoChunkSize<T> for F
where
    F: FnMut(&T) -> bool,
{
    type Predicate = F;

    fn into_chunk_size(self) -> Result<ChunkSize<F>> {
        Ok(ChunkSize::Split(self))
    }
}

impl<T> IntoChunkSize<T> for NonZeroUsize {
    type Predicate = fn(&T) -> bool;

    fn into_chunk_size(self) -> Result<ChunkSize<Self::Predicate>> {
        Ok(ChunkSize::Fixed(self))
    }
}

macro_rules! unsigned_chunk_size {
    ($($ty:ty),*) => {$(
        impl<T> IntoChunkSize<T> for $ty {
            type Predicate = fn(&T) -> bool;

            fn into_chunk_size(self) -> Result<ChunkSize<Self::Predicate>> {
                let size =
                    usize::try_from(self).map_err(|_| ChunkError::TooLarge(self as u64))?;
                ChunkSize::fixed(size)
            }
        }
    )*};
}

macro_rules! signed_chunk_size {
    ($($ty:ty),*) => {$(
        impl<T> IntoChunkSize<T> for $ty {
            type Predicate = fn(&T) -> bool;

            fn into_chunk_size(self) -> Result<ChunkSize<Self::Predicate>> {
                if self < 0 {
                    return Err(ChunkError::NegativeSize(self as i64));
                }
                let size =
                    usize::try_from(self).map_err(|_| ChunkError::TooLarge(self as u64))?;
                ChunkSize::fixed(size)
            }
        }
    )*};
}

unsigned_chunk_size!(u8, u16, u32, u64, usize);
signed_chunk_size!(i8, i16, i32, i64, isize);

#[cfg(test)]
mod tests {
    use super::*;

    fn convert<S: IntoChunkSize<u8>>(size: S) -> Result<ChunkSize<S::Predicate>> {
        size.into_chunk_size()
    }

    fn fixed_len<P>(size: Result<ChunkSize<P>>) -> Option<usize> {
        match size {
            Ok(ChunkSize::Fixed(n)) => Some(n.get()),
            _ => None,
        }
    }

    #[test]
    fn positive_integers_become_fixed() {
        assert_eq!(fixed_len(convert(3usize)), Some(3));
        assert_eq!(fixed_len(convert(7i8)), Some(7));
        assert_eq!(fixed_len(convert(1u64)), Some(1));
        assert_eq!(fixed_len(convert(NonZeroUsize::MIN)), Some(1));
    }

    #[test]
    fn zero_is_rejected() {
        assert_eq!(convert(0i32).err(), Some(ChunkError::ZeroSize));
        assert_eq!(convert(0u16).err(), Some(ChunkError::ZeroSize));
        assert_eq!(ChunkSize::<()>::fixed(0).err(), Some(ChunkError::ZeroSize));
    }

    #[test]
    fn negatives_are_rejected() {
        assert_eq!(convert(-1i64).err(), Some(ChunkError::NegativeSize(-1)));
        assert_eq!(
            convert(isize::MIN).err(),
            Some(ChunkError::NegativeSize(isize::MIN as i64))
        );
    }

    #[test]
    fn closures_become_split() {
        let size = convert(|b: &u8| *b == b'\n').unwrap();
        assert!(!size.is_fixed());
        match size {
            ChunkSize::Split(mut p) => {
                assert!(p(&b'\n'));
                assert!(!p(&b'a'));
            }
            ChunkSize::Fixed(_) => panic!("expected a split size"),
        }
    }

    #[test]
    fn chunk_size_passes_through() {
        let size = ChunkSize::<fn(&u8) -> bool>::fixed(4);
        assert_eq!(fixed_len(size.and_then(convert)), Some(4));
    }
}
