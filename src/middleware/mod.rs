pub mod preflight;

pub use preflight::preflight_middleware;
