// Copyright 2017 Brian Langenberger
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The error latched by a writer whose sink failed.

use thiserror::Error;

/// The first error reported by a writer's byte sink.
///
/// Bytes written before the failure stay in the sink;
/// everything after it was dropped.
#[derive(Error, Debug)]
#[error("sink write failed after {bytes_written} bytes: {source}")]
pub struct SinkWriteFailure<E> {
    #[source]
    source: E,
    bytes_written: u64,
}

impl<E> SinkWriteFailure<E> {
    pub(crate) fn new(source: E, bytes_written: u64) -> Self {
        SinkWriteFailure {
            source,
            bytes_written,
        }
    }

    /// Number of bytes the sink accepted before failing
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// A reference to the sink's own error
    pub fn get_ref(&self) -> &E {
        &self.source
    }

    /// Unwraps the sink's own error
    pub fn into_inner(self) -> E {
        self.source
    }
}
