use crate::chunk_on::{chunk_on, ChunkOn};
use crate::chunks::{chunks, chunks_into, Chunks};
use crate::error::Result;
use crate::size::IntoChunkSize;

/// Method-call access to the chunking adapters.
pub trait ChunkExt: Iterator + Sized {
    fn chunked<S>(self, chunk_size: S) -> Result<Chunks<Self, S::Predicate, Vec<Self::Item>>>
    where
        S: IntoChunkSize<Self::Item>,
    {
        chunks(self, chunk_size)
    }

    fn chunked_into<C, S>(self, chunk_size: S) -> Result<Chunks<Self, S::Predicate, C>>
    where
        S: IntoChunkSize<Self::Item>,
        C: FromIterator<Self::Item>,
    {
        chunks_into(self, chunk_size)
    }

    fn chunk_on<P>(self, predicate: P) -> ChunkOn<Self, P, Vec<Self::Item>>
    where
        P: FnMut(&Self::Item) -> bool,
    {
        chunk_on(self, predicate)
    }
}

impl<I: Iterator> ChunkExt for I {}
