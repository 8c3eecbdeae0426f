//! Error types for the batch drivers

use rf_cluster_lab::SimError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BatchError {
    #[error("Engine error: {0}")]
    Engine(#[from] SimError),

    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Invalid option: {0}")]
    InvalidOption(String),
}

pub type BatchResult<T> = Result<T, BatchError>;
