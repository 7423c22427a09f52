pub mod draws;

pub use draws as draw_entity;
