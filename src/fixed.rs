use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::num::NonZeroUsize;

/// Groups a stream into consecutive chunks of `size` elements.
///
/// Every chunk but the last holds exactly `size` elements; the last holds
/// whatever was left. An empty stream produces no chunk at all.
pub struct FixedChunks<I, C> {
    stream: I,
    size: NonZeroUsize,
    exhausted: bool,
    output: PhantomData<fn() -> C>,
}

impl<I, C> FixedChunks<I, C> {
    pub(crate) fn new(stream: I, size: NonZeroUsize) -> Self {
        Self {
            stream,
            size,
            exhausted: false,
            output: PhantomData,
        }
    }

    pub(crate) fn stream_mut(&mut self) -> &mut I {
        &mut self.stream
    }
}

impl<I, C> Iterator for FixedChunks<I, C>
where
    I: Iterator,
    C: FromIterator<I::Item>,
{
    type Item = C;

    fn next(&mut self) -> Option<C> {
        if self.exhausted {
            return None;
        }

        let size = self.size.get();
        let mut taken = 0;
        let chunk = self
            .stream
            .by_ref()
            .take(size)
            .inspect(|_| taken += 1)
            .collect::<C>();

        // A short group means the stream ran dry; never poll it again.
        if taken < size {
            self.exhausted = true;
        }
        if taken == 0 {
            return None;
        }
        Some(chunk)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.exhausted {
            return (0, Some(0));
        }
        let size = self.size.get();
        let (lower, upper) = self.stream.size_hint();
        (lower.div_ceil(size), upper.map(|upper| upper.div_ceil(size)))
    }
}

impl<I, C> FusedIterator for FixedChunks<I, C>
where
    I: Iterator,
    C: FromIterator<I::Item>,
{
}
