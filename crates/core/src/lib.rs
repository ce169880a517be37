//! Solitaire (Pontifex) keystream cipher. Keep this crate free of IO and
//! platform concerns.

pub mod cards;
pub mod cipher;
pub mod config;
pub mod deck;
pub mod keying;
pub mod keystream;
pub mod rng;
pub mod run;

pub use cards::*;
pub use cipher::*;
pub use config::*;
pub use deck::*;
pub use keying::*;
pub use keystream::*;
pub use rng::*;
pub use run::*;
