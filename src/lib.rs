//! モンスター名解決・編成検索
//!
//! スプレッドシートのモンスター名をモンスターDBの正式名・画像URLに解決し、
//! JSON APIとCLIから利用できるようにする。

pub mod cli;
pub mod config;
pub mod error;
pub mod resolver;
pub mod server;
