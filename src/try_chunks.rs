use std::iter::FusedIterator;

use tracing::debug;

use crate::chunks::{chunks_into, Chunks};
use crate::error::Result;
use crate::size::IntoChunkSize;

/// Chunk a stream of `Result`s, stopping at the first upstream error.
///
/// Chunks completed before the error come out as `Ok`. The error itself is
/// yielded once, in place of the chunk it interrupted (whose elements are
/// dropped), and iteration ends there.
pub fn try_chunks<T, E, I, S>(
    stream: I,
    chunk_size: S,
) -> Result<TryChunks<I::IntoIter, E, S::Predicate, Vec<T>>>
where
    I: IntoIterator<Item = std::result::Result<T, E>>,
    S: IntoChunkSize<T>,
{
    try_chunks_into(stream, chunk_size)
}

/// Like [`try_chunks`], collecting each chunk into `C`.
pub fn try_chunks_into<C, T, E, I, S>(
    stream: I,
    chunk_size: S,
) -> Result<TryChunks<I::IntoIter, E, S::Predicate, C>>
where
    I: IntoIterator<Item = std::result::Result<T, E>>,
    S: IntoChunkSize<T>,
    C: FromIterator<T>,
{
    let shunt = Shunt {
        stream: stream.into_iter(),
        error: None,
    };
    Ok(TryChunks {
        chunks: chunks_into(shunt, chunk_size)?,
    })
}

/// Yields the `Ok` values of a `Result` stream and parks the first error.
struct Shunt<I, E> {
    stream: I,
    error: Option<E>,
}

impl<I, T, E> Iterator for Shunt<I, E>
where
    I: Iterator<Item = std::result::Result<T, E>>,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.error.is_some() {
            return None;
        }
        match self.stream.next()? {
            Ok(item) => Some(item),
            Err(err) => {
                self.error = Some(err);
                None
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.error.is_some() {
            return (0, Some(0));
        }
        (0, self.stream.size_hint().1)
    }
}

/// Iterator returned by [`try_chunks`] and [`try_chunks_into`].
pub struct TryChunks<I, E, P, C> {
    chunks: Chunks<Shunt<I, E>, P, C>,
}

impl<I, T, E, P, C> Iterator for TryChunks<I, E, P, C>
where
    I: Iterator<Item = std::result::Result<T, E>>,
    P: FnMut(&T) -> bool,
    C: FromIterator<T>,
{
    type Item = std::result::Result<C, E>;

    fn next(&mut self) -> Option<Self::Item> {
        let chunk = self.chunks.next();
        if let Some(err) = self.chunks.stream_mut().error.take() {
            debug!("upstream error ended chunking");
            return Some(Err(err));
        }
        chunk.map(Ok)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (_, upper) = self.chunks.size_hint();
        (0, upper.map(|upper| upper.saturating_add(1)))
    }
}

impl<I, T, E, P, C> FusedIterator for TryChunks<I, E, P, C>
where
    I: Iterator<Item = std::result::Result<T, E>>,
    P: FnMut(&T) -> bool,
    C: FromIterator<T>,
{
}
