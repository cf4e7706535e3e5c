pub mod error;
pub mod models;
pub mod provider;
pub mod store;

pub use {
    error::{Error, Result, StoreError},
    models::HEADER,
    provider::{FakeProvider, Provider},
    store::{NewCustomer, SearchFilter, Store},
};

use {
    models::RecordModel,
    std::{
        io,
        path::{Path, PathBuf},
        time::{Duration, Instant},
    },
    tracing::{debug, info, warn},
};

pub const RECORD_COUNT: u64 = 1000;
pub const OUTPUT_FILE: &str = "mock_customer.csv";

const PROGRESS_LOG_INTERVAL: u64 = 10_000;

type Id = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub customer_id: Id,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

/// Hands out records with ids counting up from 1.
pub struct Generator<P> {
    provider: P,
    next_id: Id,
}

impl<P: Provider> Generator<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            next_id: 1,
        }
    }

    pub fn next_record(&mut self) -> Record {
        let customer_id = self.next_id;
        self.next_id += 1;

        Record {
            customer_id,
            first_name: self.provider.first_name(),
            last_name: self.provider.last_name(),
            email: self.provider.email(),
            phone: self.provider.phone_number(),
        }
    }

    pub fn records(&mut self, count: u64) -> Records<'_, P> {
        Records {
            generator: self,
            remaining: count,
        }
    }
}

pub struct Records<'a, P> {
    generator: &'a mut Generator<P>,
    remaining: u64,
}

impl<P: Provider> Iterator for Records<'_, P> {
    type Item = Record;

    fn next(&mut self) -> Option<Record> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(self.generator.next_record())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = usize::try_from(self.remaining).unwrap_or(usize::MAX);
        (n, Some(n))
    }
}

#[derive(Debug, Clone)]
pub struct Summary {
    pub path: PathBuf,
    pub rows_written: u64,
    pub bytes_written: u64,
    pub elapsed: Duration,
}

impl Summary {
    pub fn rows_per_second(&self) -> f64 {
        if self.elapsed.as_secs_f64() > 0.0 {
            self.rows_written as f64 / self.elapsed.as_secs_f64()
        } else {
            0.0
        }
    }
}

/// Writes the header and `count` rows, calling `tick_func` after each row.
pub fn generate<P, W, F>(
    generator: &mut Generator<P>,
    count: u64,
    writer: &mut csv::Writer<W>,
    mut tick_func: F,
) -> csv::Result<u64>
where
    P: Provider,
    W: io::Write,
    F: FnMut(),
{
    models::write_header(writer)?;

    let mut written = 0;
    for record in generator.records(count) {
        RecordModel::from(record).serialize_csv(writer)?;
        written += 1;
        tick_func();

        if written % PROGRESS_LOG_INTERVAL == 0 {
            debug!(written, "rows written");
        }
    }

    Ok(written)
}

/// Creates (or truncates) `path` and fills it with `count` customer rows.
///
/// The file handle lives inside the csv writer and is closed when it drops,
/// on the error paths as well. Any open, write or flush failure comes back as
/// [`Error::OutputWrite`]; the file may be left truncated in that case.
pub fn generate_file<Q, P, F>(path: Q, count: u64, provider: P, tick_func: F) -> Result<Summary>
where
    Q: AsRef<Path>,
    P: Provider,
    F: FnMut(),
{
    let path = path.as_ref();
    let failed = |source: io::Error| Error::output_write(path, source);

    let time = Instant::now();
    info!(path = %path.display(), count, "generating mock customers");

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(|e| failed(error::into_io(e)))?;

    let mut generator = Generator::new(provider);
    let rows_written = generate(&mut generator, count, &mut writer, tick_func)
        .map_err(|e| failed(error::into_io(e)))?;

    writer.flush().map_err(failed)?;
    // Every row is on disk by now; a failed stat only loses the byte count.
    let bytes_written = match writer.get_ref().metadata() {
        Ok(meta) => meta.len(),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "could not stat output file");
            0
        }
    };
    drop(writer);

    let summary = Summary {
        path: path.to_path_buf(),
        rows_written,
        bytes_written,
        elapsed: time.elapsed(),
    };

    info!(
        rows = summary.rows_written,
        bytes = summary.bytes_written,
        elapsed = ?summary.elapsed,
        "mock customers written ({:.0} rows/sec)",
        summary.rows_per_second()
    );

    Ok(summary)
}
