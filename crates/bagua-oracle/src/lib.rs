//! Hexagram casting for Bagua.
//!
//! Provides the divination caster (fresh and chained casts with bounded,
//! logged fallbacks), per-user session state with a cast log, optional
//! hexagram content, and the reading facts handed to an interpreter.

pub mod caster;
pub mod config;
pub mod content;
pub mod draw;
pub mod error;
pub mod log;
pub mod reading;
pub mod session;
pub mod suggest;

pub use caster::{Cast, CastMode, CastQuality, DivinationCaster};
pub use config::CasterConfig;
pub use content::{ContentLibrary, ContentSource, HexagramRecord, NoContent};
pub use draw::{LineDraw, LineDrawMethod};
pub use error::{OracleError, OracleResult};
pub use log::{CastLog, CastLogEntry};
pub use reading::Reading;
pub use session::DivinationSession;
pub use suggest::{Suggestion, suggest};
