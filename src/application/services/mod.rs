pub mod picture_cache;
pub mod picture_resolver;
pub mod picture_slot;
pub mod url_prefixer;

pub use picture_cache::{CacheInfo, CacheStats, PictureCache};
pub use picture_resolver::{
    DEFAULT_CATALOG_ROOT, PictureResolver, ResolverConfig, primary_format_index,
};
pub use picture_slot::{PictureSlot, RequestTicket, SlotStatus};
pub use url_prefixer::UrlPrefixer;
