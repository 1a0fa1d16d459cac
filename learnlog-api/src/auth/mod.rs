mod extractor;

pub use extractor::Caller;
