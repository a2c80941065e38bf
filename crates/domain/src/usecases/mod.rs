//! Application use cases / business logic

pub mod controller;
pub mod gateway;
pub mod hooks;
pub mod layout;
pub mod normalizer;
pub mod paste;

pub use controller::{ComposeError, ControllerConfig, FormController, PasteOutcome};
pub use gateway::{SubmissionGateway, prepare_submission};
pub use hooks::{CategorySelection, HookLibrary, copy_to_clipboard};
pub use layout::{LayoutError, SheetCursor, SheetRow, SheetSlot, plan_layout};
pub use normalizer::ContentNormalizer;
pub use paste::{DecodedItem, PasteError, PasteItem, PastePayload, decode_paste_event};
