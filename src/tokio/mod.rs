//! An async feeder built on `tokio::io::BufReader`, gated behind the
//! `tokio` feature exactly as the teacher crate gates its own.

mod asyncbufreader;

pub use asyncbufreader::AsyncBufReaderJsonFeeder;
