use std::path::Path;

use common::result::base::ProductRecord;
use tokio::{
    fs::File,
    io::{AsyncWrite, AsyncWriteExt},
};
use tracing::trace;

/// Single `title,price` output shared by every brand of the run.
///
/// Each record is flushed as soon as it is written, so a fatal error later
/// in the crawl keeps everything already extracted.
pub(crate) struct RecordSink<W> {
    writer: W,
    records_written: u64,
}

impl RecordSink<File> {
    /// Creates the output file, truncating a previous run's output
    pub(crate) async fn create(path: &Path) -> std::io::Result<Self> {
        Ok(Self::new(File::create(path).await?))
    }
}

impl<W: AsyncWrite + Unpin> RecordSink<W> {
    pub(crate) fn new(writer: W) -> Self {
        Self {
            writer,
            records_written: 0,
        }
    }

    pub(crate) async fn write_record(&mut self, record: &ProductRecord) -> std::io::Result<()> {
        trace!("{record}");

        self.writer.write_all(record.to_line().as_bytes()).await?;
        self.writer.flush().await?;
        self.records_written += 1;

        Ok(())
    }

    pub(crate) fn records_written(&self) -> u64 {
        self.records_written
    }

    #[cfg(test)]
    pub(crate) fn into_inner(self) -> W {
        self.writer
    }
}
