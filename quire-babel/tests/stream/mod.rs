mod blocking;

#[cfg(feature = "async")]
mod tokio_io;
