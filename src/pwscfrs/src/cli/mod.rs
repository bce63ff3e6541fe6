// pwscfrs/src/cli/mod.rs

pub mod generate;
pub mod inspect;
pub mod normalize;

pub use generate::generate_deck;
pub use inspect::{inspect_deck, DeckSummary};
pub use normalize::normalize_deck;
