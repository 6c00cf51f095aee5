//! # Connect Four
//!
//! A Connect Four game core: a board engine with win detection and a static
//! heuristic, a minimax AI with alpha-beta pruning, center-first move
//! ordering, transposition caching and a wall-clock time budget, and a turn
//! coordinator that keeps exactly one move in flight at a time. A terminal
//! front-end built with Ratatui makes it playable.
//!
//! ## Modules
//!
//! - [`game`] — Board grid, win detection, heuristic evaluation, game session
//! - [`ai`] — Difficulty strategies, minimax search, transposition cache
//! - [`coordinator`] — Turn serialization and the collaborator seam
//! - [`ui`] — Terminal UI: game screen, input handling
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod ai;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod game;
pub mod ui;
