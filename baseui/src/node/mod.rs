pub mod compass;
pub mod cursor;
pub mod graticule;
pub mod markers;
pub mod minimap;
