use std::iter::{self, FusedIterator};
use std::marker::PhantomData;

/// Splits a stream right after every element `predicate` accepts.
///
/// The accepted element closes (and belongs to) the current chunk. Elements
/// left over when the stream ends form one final chunk.
pub fn chunk_on<I, P>(stream: I, predicate: P) -> ChunkOn<I::IntoIter, P, Vec<I::Item>>
where
    I: IntoIterator,
    P: FnMut(&I::Item) -> bool,
{
    chunk_on_into(stream, predicate)
}

/// Like [`chunk_on`], collecting each chunk into `C`.
pub fn chunk_on_into<C, I, P>(stream: I, predicate: P) -> ChunkOn<I::IntoIter, P, C>
where
    I: IntoIterator,
    P: FnMut(&I::Item) -> bool,
    C: FromIterator<I::Item>,
{
    ChunkOn::new(stream.into_iter(), predicate)
}

/// Iterator returned by [`chunk_on`] and [`chunk_on_into`].
pub struct ChunkOn<I, P, C> {
    stream: I,
    predicate: P,
    exhausted: bool,
    output: PhantomData<fn() -> C>,
}

impl<I, P, C> ChunkOn<I, P, C> {
    pub(crate) fn new(stream: I, predicate: P) -> Self {
        Self {
            stream,
            predicate,
            exhausted: false,
            output: PhantomData,
        }
    }

    pub(crate) fn stream_mut(&mut self) -> &mut I {
        &mut self.stream
    }
}

impl<I, P, C> Iterator for ChunkOn<I, P, C>
where
    I: Iterator,
    P: FnMut(&I::Item) -> bool,
    C: FromIterator<I::Item>,
{
    type Item = C;

    fn next(&mut self) -> Option<C> {
        if self.exhausted {
            return None;
        }

        let mut taken = 0;
        let mut open = true;
        let chunk = iter::from_fn(|| {
            if !open {
                return None;
            }
            match self.stream.next() {
                Some(item) => {
                    taken += 1;
                    open = !(self.predicate)(&item);
                    Some(item)
                }
                None => {
                    self.exhausted = true;
                    None
                }
            }
        })
        .collect::<C>();

        if taken == 0 {
            return None;
        }
        Some(chunk)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.exhausted {
            return (0, Some(0));
        }
        let (lower, upper) = self.stream.size_hint();
        (usize::from(lower > 0), upper)
    }
}

impl<I, P, C> FusedIterator for ChunkOn<I, P, C>
where
    I: Iterator,
    P: FnMut(&I::Item) -> bool,
    C: FromIterator<I::Item>,
{
}
