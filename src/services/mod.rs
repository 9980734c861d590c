pub mod energy_aggregator;
pub mod equipment_cascade;
pub mod land_civil;
pub mod module_power;
pub mod site_resource;
pub mod sizing_engine;
pub mod solar_geometry;
