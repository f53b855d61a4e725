pub mod timing;

pub use timing::TimingMiddleware;
