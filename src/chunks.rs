use std::iter::FusedIterator;

use tracing::debug;

use crate::chunk_on::ChunkOn;
use crate::error::Result;
use crate::fixed::FixedChunks;
use crate::size::{ChunkSize, IntoChunkSize};

/// Lazily cut `stream` into chunks collected as `Vec`s.
///
/// `chunk_size` is either a positive integer, giving fixed-size groups, or a
/// predicate, giving chunks that end right after every element it accepts.
/// The size is validated before the stream is touched, and nothing is
/// pulled from the stream until the first chunk is requested.
pub fn chunks<I, S>(
    stream: I,
    chunk_size: S,
) -> Result<Chunks<I::IntoIter, S::Predicate, Vec<I::Item>>>
where
    I: IntoIterator,
    S: IntoChunkSize<I::Item>,
{
    chunks_into(stream, chunk_size)
}

/// Like [`chunks`], collecting each chunk into `C` instead of a `Vec`.
///
/// A set-like `C` collapses duplicate elements within a chunk.
pub fn chunks_into<C, I, S>(
    stream: I,
    chunk_size: S,
) -> Result<Chunks<I::IntoIter, S::Predicate, C>>
where
    I: IntoIterator,
    S: IntoChunkSize<I::Item>,
    C: FromIterator<I::Item>,
{
    let mode = match chunk_size.into_chunk_size()? {
        ChunkSize::Fixed(size) => {
            debug!(size = size.get(), "chunking stream into fixed-size groups");
            Mode::Fixed(FixedChunks::new(stream.into_iter(), size))
        }
        ChunkSize::Split(predicate) => {
            debug!("chunking stream on predicate");
            Mode::Split(ChunkOn::new(stream.into_iter(), predicate))
        }
    };
    Ok(Chunks { mode })
}

/// Iterator returned by [`chunks`] and [`chunks_into`].
pub struct Chunks<I, P, C> {
    mode: Mode<I, P, C>,
}

enum Mode<I, P, C> {
    Fixed(FixedChunks<I, C>),
    Split(ChunkOn<I, P, C>),
}

impl<I, P, C> Chunks<I, P, C> {
    /// Whether this iterator groups by count rather than by predicate.
    pub fn is_fixed(&self) -> bool {
        matches!(self.mode, Mode::Fixed(_))
    }

    pub(crate) fn stream_mut(&mut self) -> &mut I {
        match &mut self.mode {
            Mode::Fixed(fixed) => fixed.stream_mut(),
            Mode::Split(split) => split.stream_mut(),
        }
    }
}

impl<I, P, C> Iterator for Chunks<I, P, C>
where
    I: Iterator,
    P: FnMut(&I::Item) -> bool,
    C: FromIterator<I::Item>,
{
    type Item = C;

    fn next(&mut self) -> Option<C> {
        match &mut self.mode {
            Mode::Fixed(fixed) => fixed.next(),
            Mode::Split(split) => split.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.mode {
            Mode::Fixed(fixed) => fixed.size_hint(),
            Mode::Split(split) => split.size_hint(),
        }
    }
}

impl<I, P, C> FusedIterator for Chunks<I, P, C>
where
    I: Iterator,
    P: FnMut(&I::Item) -> bool,
    C: FromIterator<I::Item>,
{
}
