//! Streaming report decoder

use super::types::{ColumnIndex, DataRow};
use crate::error::{Error, Result};
use csv_async::{AsyncReaderBuilder, ErrorKind, StringRecord};
use futures::stream::{self, BoxStream, StreamExt, TryStreamExt};
use std::io;
use tokio::io::AsyncRead;
use tokio_util::io::StreamReader;
use tracing::debug;

/// A report download split into its header index and lazy data rows
pub struct DecodedReport {
    /// Header label positions
    pub columns: ColumnIndex,
    /// Data rows in payload order, header excluded
    pub rows: BoxStream<'static, Result<DataRow>>,
}

impl std::fmt::Debug for DecodedReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecodedReport")
            .field("columns", &self.columns)
            .finish_non_exhaustive()
    }
}

/// Opens report downloads for row-by-row decoding
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportStreamDecoder;

impl ReportStreamDecoder {
    /// Decode a download response as its body arrives
    pub async fn open_response(response: reqwest::Response) -> Result<DecodedReport> {
        let body = response.bytes_stream().map_err(io::Error::other);
        Self::open(StreamReader::new(body)).await
    }

    /// Read the header record and return the remaining records as a lazy
    /// stream.
    ///
    /// Bytes are pulled from the reader only as rows are consumed. Blank
    /// lines are skipped and rows may differ in length. An empty payload
    /// yields an empty column index and no rows.
    pub async fn open<R>(reader: R) -> Result<DecodedReport>
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        let mut records = Box::pin(
            AsyncReaderBuilder::new()
                .has_headers(false)
                .flexible(true)
                .create_reader(reader)
                .into_records(),
        );

        let header = match records.next().await {
            Some(record) => record.map_err(|err| decode_error(0, err))?,
            None => {
                debug!("Report download is empty");
                return Ok(DecodedReport {
                    columns: ColumnIndex::default(),
                    rows: stream::empty().boxed(),
                });
            }
        };

        let columns = ColumnIndex::from_header(&cells(&header));
        debug!("Report header has {} columns", header.len());

        // The stream ends after the first error
        let rows = stream::try_unfold((records, 0), |(mut records, number)| async move {
            let number = number + 1;
            match records.next().await {
                Some(Ok(record)) => {
                    let row = DataRow {
                        number,
                        cells: cells(&record),
                    };
                    Ok(Some((row, (records, number))))
                }
                Some(Err(err)) => Err(decode_error(number, err)),
                None => Ok(None),
            }
        })
        .boxed();

        Ok(DecodedReport { columns, rows })
    }
}

fn cells(record: &StringRecord) -> Vec<String> {
    record.iter().map(str::to_string).collect()
}

/// Read failures keep their transport error; anything else is a CSV error
/// on the given record
fn decode_error(row: usize, err: csv_async::Error) -> Error {
    match err.into_kind() {
        ErrorKind::Io(err) => transport_error(err),
        ErrorKind::Utf8 { err, .. } => Error::csv(row, format!("invalid UTF-8: {err}")),
        other => Error::csv(row, format!("{other:?}")),
    }
}

fn transport_error(err: io::Error) -> Error {
    let kind = err.kind();
    match err.into_inner() {
        Some(inner) => match inner.downcast::<reqwest::Error>() {
            Ok(http) => Error::Http(*http),
            Err(inner) => Error::Io(io::Error::new(kind, inner)),
        },
        None => Error::Io(io::Error::from(kind)),
    }
}
