//! One controller per screen.
//!
//! Every page owns a [`ViewScope`](crate::scope::ViewScope); `unmount`
//! tears it down so responses that arrive afterwards are dropped. Actions
//! that leave the page return the [`Route`](crate::route::Route) to go to.

mod category_create;
mod category_list;
mod home;
mod product_create;
mod product_detail;
mod product_edit;
mod product_list;

pub use category_create::CategoryCreatePage;
pub use category_list::{CategoryListPage, RenameDialog};
pub use home::{HomePage, FEATURED_COUNT};
pub use product_create::ProductCreatePage;
pub use product_detail::ProductDetailPage;
pub use product_edit::{EditData, ProductEditPage};
pub use product_list::{ProductListData, ProductListPage};
