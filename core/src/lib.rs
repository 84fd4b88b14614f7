pub mod catalog;
pub mod constellation;
pub mod filter;
pub mod landing;
pub mod page;
pub mod tilt;
pub mod view;

pub use catalog::{parse_catalog, CatalogError, CatalogItem};
pub use constellation::{AnimatorSettings, ConstellationField, Particle, Rgba, StarCanvas};
pub use filter::{filter_items, item_matches, FilterOutcome, NoticeState};
pub use landing::{LandingGate, LandingState, LANDING_REMOVAL_DELAY_MS};
pub use page::{CardRecord, LoadState, PageModel};
pub use tilt::{CardRect, Tilt};
pub use view::{PageView, ViewMachine, ViewPresentation};
