// Modules --------------------------------------------------------------------
pub mod compositor;
pub mod error;
pub mod layout;
pub mod normalize;
pub mod tga;
#[cfg(test)] mod mocks;


// Re-Exports -----------------------------------------------------------------
pub use self::compositor::SheetCompositor;
pub use self::error::SheetError;
pub use self::layout::{Placement, SheetLayout};
pub use self::normalize::{NormalizedImage, PixelEncoding};
pub use self::tga::{DecodedImage, FormatTag};
