//! Query-time text analysis.
//!
//! A deliberately small pipeline: each raw term fetched from the store is
//! expanded into zero or more normalized tokens, either through the field's
//! configured [`Analyzer`] or verbatim via the [`KeywordAnalyzer`].

pub mod analyzer;
pub mod keyword;
pub mod lowercase;
pub mod terms;
pub mod token;

pub use self::analyzer::Analyzer;
pub use self::keyword::KeywordAnalyzer;
pub use self::lowercase::LowercaseAnalyzer;
pub use self::terms::TermTokenizer;
pub use self::token::{Token, TokenStream};
