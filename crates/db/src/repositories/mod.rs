//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. The ticker and carousel
//! repositories share the replace-all protocol in [`ordered_list`].

pub mod ad_repo;
pub mod article_repo;
pub mod carousel_item_repo;
pub mod dashboard_repo;
pub mod ordered_list;
pub mod session_repo;
pub mod ticker_item_repo;
pub mod user_repo;

pub use ad_repo::AdRepo;
pub use article_repo::ArticleRepo;
pub use carousel_item_repo::CarouselItemRepo;
pub use dashboard_repo::DashboardRepo;
pub use ordered_list::ReplaceMode;
pub use session_repo::SessionRepo;
pub use ticker_item_repo::TickerItemRepo;
pub use user_repo::UserRepo;
