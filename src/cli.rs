mod args;

pub use args::{ActionArg, Cli};
