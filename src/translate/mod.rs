pub mod interface;
pub mod outcome;
pub mod google_translate;
pub mod gemini;
pub mod factory;
pub mod router;

pub use interface::*;
pub use outcome::*;
pub use router::TranslationRouter;
