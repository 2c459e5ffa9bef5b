//! Loose, pattern-based readers for the documents the sweeps fetch.
//!
//! None of these build a document tree: each answers one structural
//! question (is this attribute pattern present, what does this directive
//! say) with a regex, so a malformed page still gets an answer.

pub mod headers;
pub mod html;
pub mod robots;
pub mod sitemap;

#[cfg(test)]
mod tests;

/// Last path segment of a URL or path, e.g. `sitemap-fr.xml`
pub fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
