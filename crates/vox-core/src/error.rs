//! Unified error model.
//!
//! Component crates carry their own precise error enums; this is the
//! category roll-up used at the dispatch boundary and in logs.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum VoxError {
    #[error("INTENT/{0}")]
    Intent(String),

    #[error("TRANSLATE/{0}")]
    Translate(String),

    #[error("AUTH/{0}")]
    Auth(String),

    #[error("DATA/{0}")]
    Data(String),

    #[error("RENDER/{0}")]
    Render(String),

    #[error("CONFIG/{0}")]
    Config(String),
}
