//! Stand-in collaborators: a table-driven legality backend, the set text
//! codec and an in-memory save. The binary and the tests run against these.

pub mod backend;
pub mod codec;
pub mod save;

pub use backend::{ReferenceBackend, Violation};
pub use codec::SetText;
pub use save::MemorySave;

use crate::entity::Entity;
use crate::regen::RegenTemplate;
use crate::services::SetTextCodec;

// The reference backend speaks the reference set text format
impl SetTextCodec for ReferenceBackend {
    fn to_text(&self, entity: &Entity) -> String {
        SetText.to_text(entity)
    }

    fn parse(&self, text: &str) -> Option<RegenTemplate> {
        SetText.parse(text)
    }
}
