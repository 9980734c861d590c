use crate::models::plant::ReferencePlant;
use crate::models::sizing::CivilWorks;
use crate::models::units::{Hectares, Meters};

/// Land and civil works, all pure functions of the scaled land area.
#[derive(Debug, Clone, Copy)]
pub struct LandCivilScaler<'a> {
    plant: &'a ReferencePlant,
    fence_coverage: f64,
    fence_irregularity: f64,
    road_density_m_per_ha: f64,
}

impl<'a> LandCivilScaler<'a> {
    pub fn new(
        plant: &'a ReferencePlant,
        fence_coverage: f64,
        fence_irregularity: f64,
        road_density_m_per_ha: f64,
    ) -> Self {
        Self { plant, fence_coverage, fence_irregularity, road_density_m_per_ha }
    }

    pub fn land_area(&self, scaling_factor: f64) -> Hectares {
        self.plant.land_area * scaling_factor
    }

    pub fn fence_area(&self, land: Hectares) -> Hectares {
        land * self.fence_coverage
    }

    /// Side of the equivalent square × 4, widened for irregular plots.
    pub fn fence_perimeter(&self, land: Hectares) -> Meters {
        Meters(land.square_meters().sqrt() * 4.0 * self.fence_irregularity)
    }

    pub fn access_road_length(&self, land: Hectares) -> Meters {
        Meters(land.value() * self.road_density_m_per_ha)
    }

    pub fn scale(&self, scaling_factor: f64) -> CivilWorks {
        let land = self.land_area(scaling_factor);
        CivilWorks {
            land_area: land,
            land_area_acres: land.acres(),
            fence_area: self.fence_area(land),
            fence_perimeter: self.fence_perimeter(land),
            access_road_length: self.access_road_length(land),
        }
    }
}
