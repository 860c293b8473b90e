//! Downloads one byte range of a URL into a local file.
//!
//! ```text
//! cargo run --example fetch_chunk -- <url> [begin] [end] [output]
//! ```
//!
//! Segments are written at their absolute offsets, so several runs over
//! adjacent ranges with the same output rebuild the whole file.

use rangefetch::chunk::{ByteRange, CallbackId, ChunkSink, ChunkSummary};
use rangefetch::downloader::{ChunkDownloaderBuilder, TaskState};
use rangefetch::progress::{ProgressBarOpts, ProgressSink};

use bytes::Bytes;
use std::env;
use std::fs::{File, OpenOptions};
use std::io::{Seek, SeekFrom, Write};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Writes every segment at its offset in `file`.
struct FileSink {
    file: File,
}

impl ChunkSink for FileSink {
    fn write(&mut self, _id: CallbackId, offset: u64, data: Bytes) -> bool {
        let written = self
            .file
            .seek(SeekFrom::Start(offset))
            .and_then(|_| self.file.write_all(&data));
        match written {
            Ok(()) => true,
            Err(e) => {
                error!(offset, error = %e, "Failed to write segment");
                false
            }
        }
    }

    fn finish(&mut self, summary: &ChunkSummary) {
        if let Err(e) = self.file.flush() {
            error!(error = %e, "Failed to flush output");
        }
        info!(
            code = summary.code(),
            downloaded = summary.downloaded(),
            "Chunk finished"
        );
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = env::args().skip(1);
    let url = args
        .next()
        .ok_or("usage: fetch_chunk <url> [begin] [end] [output]")?;
    let begin: u64 = args.next().map(|s| s.parse()).transpose()?.unwrap_or(0);
    let end: i64 = args.next().map(|s| s.parse()).transpose()?.unwrap_or(-1);
    let output = args.next().unwrap_or_else(|| "chunk.bin".to_string());

    let file = OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(&output)?;

    let downloader = ChunkDownloaderBuilder::new(url)
        .id(CallbackId(1))
        .range(ByteRange::from_raw(begin, end))
        .build();
    let sink = ProgressSink::new(
        FileSink { file },
        downloader.request(),
        ProgressBarOpts::with_pip_style(),
    );

    let state = downloader.start(sink)?.await?;
    if state == TaskState::Cancelled {
        info!("Chunk download cancelled");
    } else {
        info!(?state, output = output.as_str(), "Done");
    }
    Ok(())
}
