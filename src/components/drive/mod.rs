//! Drive browsing components.
//!
//! - [`FolderTree`] - searchable folder tree
//! - [`Breadcrumbs`] - path of the open folder
//! - [`FileList`] - files of the open folder with checkbox selection

mod breadcrumbs;
mod file_list;
mod folder_tree;

pub use breadcrumbs::Breadcrumbs;
pub use file_list::FileList;
pub use folder_tree::FolderTree;
