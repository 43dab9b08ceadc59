pub mod bookmark_view;
