pub mod observer;
pub mod store;


pub use observer::irrigation::IrrigationObserver;
pub use observer::report::ReportObserver;
pub use observer::sensor::SensorObserver;
pub use observer::{ConcurrentObserver, ObserverOptions};
