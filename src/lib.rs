//! Lazy chunking of streams.
//!
//! A stream is cut either into fixed-size groups or right after every
//! element a predicate accepts:
//!
//! ```
//! use chunker::chunks;
//!
//! let pairs: Vec<Vec<i32>> = chunks(0..5, 2)?.collect();
//! assert_eq!(pairs, vec![vec![0, 1], vec![2, 3], vec![4]]);
//!
//! let split: Vec<Vec<i32>> = chunks(0..7, |i: &i32| i % 3 == 0)?.collect();
//! assert_eq!(split, vec![vec![0], vec![1, 2, 3], vec![4, 5, 6]]);
//! # Ok::<(), chunker::ChunkError>(())
//! ```

mod chunk_on;
mod chunks;
mod error;
mod ext;
mod fixed;
mod size;
mod try_chunks;

pub use chunk_on::{chunk_on, chunk_on_into, ChunkOn};
pub use chunks::{chunks, chunks_into, Chunks};
pub use error::{ChunkError, Result};
pub use ext::ChunkExt;
pub use size::{ChunkSize, IntoChunkSize};
pub use try_chunks::{try_chunks, try_chunks_into, TryChunks};
