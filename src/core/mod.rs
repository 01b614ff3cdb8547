// src/core/mod.rs

pub mod error;
pub mod logging;
pub mod observer;
pub mod small_roots;

pub use error::{Result, SmallRootsError};
pub use observer::{LogObserver, NullObserver, ProgressObserver, RecordingObserver};
pub use small_roots::{modular_univariate, ModularUnivariate, SmallRootsSolver};
