pub mod business_card;
pub mod constants;
pub mod dice;
pub mod page;
pub mod page_manager;
pub mod sensors;

pub use business_card::BusinessCardPage;
pub use dice::DicePage;
pub use page::{Page, PageWrapper};
pub use page_manager::PageManager;
pub use sensors::SensorsPage;
