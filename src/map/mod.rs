//! World map: hex coordinates, terrain, tiles, and line of sight

pub mod hex;
pub mod terrain;
pub mod tile;
pub mod world_map;

pub use hex::HexCoord;
pub use terrain::{Terrain, TerrainFeature};
pub use tile::Tile;
pub use world_map::WorldMap;
