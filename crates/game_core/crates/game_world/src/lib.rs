// World state owned by the authoritative process

pub mod world;

pub use world::World;
