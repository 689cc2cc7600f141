pub mod view;
pub mod headless;
