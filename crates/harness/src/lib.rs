mod faulty;
mod fixture;
mod recording;

pub use faulty::FaultyStore;
pub use fixture::{TempCatalogDb, TestCatalog, seed};
pub use recording::{EventLog, RecordingNotifier};

/// Routes `tracing` output through the test writer, filtered by `RUST_LOG`.
/// Safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
