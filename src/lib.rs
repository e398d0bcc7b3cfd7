/// qreftag - Query Reformulation Tagger
///
/// Classifies consecutive search queries from the same user into
/// reformulation categories (word reorder, acronym, spelling correction, ...).

pub mod config;
pub mod core;

#[cfg(test)]
mod tests;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
