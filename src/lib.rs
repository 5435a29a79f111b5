//! Chess rules engine: validates requested moves, applies them and keeps track
//! of check, checkmate, en passant, promotion and the move history.
//!
//! ```
//! use chessmate::chess::core::Position;
//! use chessmate::chess::service::{GameStatus, MoveService};
//!
//! let mut game = MoveService::new();
//! for (from, to) in [("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")] {
//!     let from = Position::try_from(from).unwrap();
//!     let to = Position::try_from(to).unwrap();
//!     assert!(game.try_move(from, to).unwrap());
//! }
//! assert!(game.is_checkmate());
//! assert_eq!(game.status().unwrap(), GameStatus::Checkmate);
//! ```

#![warn(missing_docs, variant_size_differences)]
// Rustc lints.
#![warn(
    absolute_paths_not_starting_with_crate,
    keyword_idents,
    macro_use_extern_crate,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unused_extern_crates,
    unused_import_braces,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]
// Rustdoc lints.
#![warn(
    rustdoc::missing_crate_level_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::invalid_codeblock_attributes,
    rustdoc::invalid_html_tags,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::bare_urls
)]
// Clippy lints.
#![warn(
    clippy::correctness,
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo
)]
#![deny(clippy::perf)]

pub mod chess;

use shadow_rs::shadow;

shadow!(build);

/// Returns the full crate version that can be used to identify how it was
/// built in the first place.
fn engine_version() -> String {
    format!(
        "{} (commit {}, branch {})",
        build::PKG_VERSION,
        build::SHORT_COMMIT,
        build::BRANCH
    )
}

/// Prints the version and the repository of the crate on startup.
pub fn print_engine_info() {
    println!("chessmate rules engine {}", engine_version());
    println!("<{}>", env!("CARGO_PKG_REPOSITORY"));
}

/// Prints the build type, target and whether the build is clean.
pub fn print_binary_info() {
    println!("Release build: {}", !shadow_rs::is_debug());
    println!("Target: {}", build::BUILD_TARGET);
    if !shadow_rs::git_clean() {
        println!("Warning: built with uncommitted changes");
    }
    println!();
}
