pub mod moonfield_vis3d;
pub mod headless;
