mod loader;

pub use loader::{Config, MalformedPolicy};
