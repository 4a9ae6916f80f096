mod payload;
mod resolve;
mod source;

pub use payload::PayloadError;
pub use resolve::ResolveError;
pub use source::SourceError;
