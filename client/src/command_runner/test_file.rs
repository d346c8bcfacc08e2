use std::path::Path;

use proto::error::Result;
use rand::RngCore;
use tokio::{fs::File, io::AsyncWriteExt};
use utilities::logger::{info, instrument, tracing};

use crate::file_chunker::local_io_error;

pub const DEFAULT_TEST_FILE_MB: u64 = 100;
const MIB: usize = 1024 * 1024;

/// Writes `size_mb` MiB of random bytes to `path`.
#[instrument(name = "client_create_test_file")]
pub async fn create_test_file(path: &str, size_mb: u64) -> Result<String> {
    let file_path = Path::new(path);
    let mut file = File::create(file_path)
        .await
        .map_err(|e| local_io_error(file_path, e))?;
    let mut buffer = vec![0u8; MIB];
    for _ in 0..size_mb {
        rand::rng().fill_bytes(&mut buffer);
        file.write_all(&buffer)
            .await
            .map_err(|e| local_io_error(file_path, e))?;
    }
    file.sync_all()
        .await
        .map_err(|e| local_io_error(file_path, e))?;
    info!("test file created");
    Ok(format!("Created {path} with {size_mb} MB of random data"))
}
