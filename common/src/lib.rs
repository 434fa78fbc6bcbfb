//! Monster Compo Common Library
//!
//! CLIとHTTPサーバで共有される型と名前解決ルール

pub mod types;
pub mod alias;
pub mod error;
pub mod normalizer;
pub mod parser;
pub mod selection;
pub mod search;
pub mod compo;
pub mod placeholder;

pub use types::{Candidate, ResolutionRecord, SearchHit, image_url};
pub use alias::AliasTable;
pub use error::{Error, Result};
pub use normalizer::{NormalizedQuery, normalize, strip_awakening_marker};
pub use parser::parse_lookup_response;
pub use selection::select_candidate;
pub use search::{availability_key, filter_available};
pub use compo::{CompoMatch, Roster, RosterRow, RosterSheet, find_players, is_monster_header};
pub use placeholder::{Placeholder, placeholder_for, placeholder_image};
