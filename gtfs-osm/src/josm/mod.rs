//! JOSM edit session documents.
//! see <https://wiki.openstreetmap.org/wiki/JOSM_file_format>
mod export_error;
mod id_allocator;
mod josm_document;
mod josm_element;
mod josm_writer;
mod route_export;

pub use export_error::ExportError;
pub use id_allocator::{ElementKey, IdAllocator};
pub use josm_document::JosmDocument;
pub use josm_element::{JosmElement, JosmMember, MemberType};
pub use josm_writer::GENERATOR;
pub use route_export::RouteExport;
