//! # Tile Duel Client Library
//!
//! Client-side implementation of a two-player tile-matching duel. Both players
//! race through their own copy of the same layered board; a relay server pairs
//! them up, hands out the shuffled layout, forwards score reports and decides
//! the winner.
//!
//! ## Architecture Overview
//!
//! ### Session State Machine
//! The [`game::Session`] owns the board, both scores, the pending selection and
//! the game phase. It moves from `awaitingOpponent` to `playing` when the
//! server sends the start signal, into `deadEnd` or `cleared` when this
//! player's board is finished, and finally into the terminal `gameOver`
//! state when the server reports a winner.
//!
//! Only two entry points mutate a session:
//! - `on_tile_click` for local play
//! - `on_message` for server traffic
//!
//! The rules themselves (accessibility, matching, scoring and the
//! end-of-board scan) live in the `shared` crate and are pure functions over
//! the board.
//!
//! ### Transport
//! The session never touches a socket. It is handed a [`network::Transport`]
//! and calls `send` with fully encoded protocol text. The TCP client spawns a
//! writer task that drains those messages onto the connection, one line each.
//!
//! ### Presentation
//! Every state change publishes a [`game::SessionSnapshot`] on a watch
//! channel. The [`rendering::Renderer`] subscribes to it and prints the status
//! line and the board; it never writes session state.
//!
//! ## Module Organization
//!
//! - `game`: session state machine, phases, outcome and scores
//! - `input`: parsing of `<layer> <row> <column>` click commands
//! - `network`: transport capability, line framing and the client event loop
//! - `rendering`: text presentation of a snapshot
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use client::network::Client;
//! use client::rendering::Renderer;
//! use tokio::io::BufReader;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut client = Client::connect("127.0.0.1:8080", Renderer::new(true)).await?;
//!
//!     // Clicks are read from stdin until the server hangs up.
//!     client.run(BufReader::new(tokio::io::stdin())).await?;
//!     Ok(())
//! }
//! ```

pub mod game;
pub mod input;
pub mod network;
pub mod rendering;
